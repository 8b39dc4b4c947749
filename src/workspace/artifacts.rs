//! Build artifact detection by exact file name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Toolchain family a build or manifest file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Python,
    Node,
    Rust,
    Jvm,
    Go,
    Ruby,
    Php,
    Dotnet,
    Native,
    Container,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Python => "python",
            Ecosystem::Node => "node",
            Ecosystem::Rust => "rust",
            Ecosystem::Jvm => "jvm",
            Ecosystem::Go => "go",
            Ecosystem::Ruby => "ruby",
            Ecosystem::Php => "php",
            Ecosystem::Dotnet => "dotnet",
            Ecosystem::Native => "native",
            Ecosystem::Container => "container",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (file name, ecosystem, install command)
const ARTIFACTS: &[(&str, Ecosystem, Option<&str>)] = &[
    // Python
    ("requirements.txt", Ecosystem::Python, Some("pip install -r requirements.txt")),
    ("requirements-dev.txt", Ecosystem::Python, Some("pip install -r requirements-dev.txt")),
    ("setup.py", Ecosystem::Python, Some("pip install .")),
    ("setup.cfg", Ecosystem::Python, None),
    ("pyproject.toml", Ecosystem::Python, Some("pip install .")),
    ("Pipfile", Ecosystem::Python, Some("pipenv install")),
    ("Pipfile.lock", Ecosystem::Python, None),
    ("poetry.lock", Ecosystem::Python, Some("poetry install")),
    ("tox.ini", Ecosystem::Python, None),
    ("environment.yml", Ecosystem::Python, Some("conda env create -f environment.yml")),
    // Node
    ("package.json", Ecosystem::Node, Some("npm install")),
    ("package-lock.json", Ecosystem::Node, None),
    ("yarn.lock", Ecosystem::Node, Some("yarn install")),
    ("pnpm-lock.yaml", Ecosystem::Node, Some("pnpm install")),
    ("pnpm-workspace.yaml", Ecosystem::Node, None),
    ("tsconfig.json", Ecosystem::Node, None),
    ("webpack.config.js", Ecosystem::Node, None),
    ("vite.config.ts", Ecosystem::Node, None),
    ("vite.config.js", Ecosystem::Node, None),
    // Rust
    ("Cargo.toml", Ecosystem::Rust, Some("cargo build")),
    ("Cargo.lock", Ecosystem::Rust, None),
    ("rust-toolchain.toml", Ecosystem::Rust, None),
    // JVM
    ("pom.xml", Ecosystem::Jvm, Some("mvn install")),
    ("build.gradle", Ecosystem::Jvm, Some("gradle build")),
    ("build.gradle.kts", Ecosystem::Jvm, Some("gradle build")),
    ("settings.gradle", Ecosystem::Jvm, None),
    ("settings.gradle.kts", Ecosystem::Jvm, None),
    ("gradle.properties", Ecosystem::Jvm, None),
    ("build.sbt", Ecosystem::Jvm, Some("sbt compile")),
    // Go
    ("go.mod", Ecosystem::Go, Some("go mod download")),
    ("go.sum", Ecosystem::Go, None),
    ("go.work", Ecosystem::Go, None),
    // Ruby
    ("Gemfile", Ecosystem::Ruby, Some("bundle install")),
    ("Gemfile.lock", Ecosystem::Ruby, None),
    ("Rakefile", Ecosystem::Ruby, None),
    // PHP
    ("composer.json", Ecosystem::Php, Some("composer install")),
    ("composer.lock", Ecosystem::Php, None),
    // .NET
    ("Directory.Build.props", Ecosystem::Dotnet, None),
    ("global.json", Ecosystem::Dotnet, None),
    ("NuGet.Config", Ecosystem::Dotnet, None),
    // Native
    ("Makefile", Ecosystem::Native, Some("make")),
    ("CMakeLists.txt", Ecosystem::Native, Some("cmake -B build && cmake --build build")),
    ("meson.build", Ecosystem::Native, Some("meson setup build")),
    ("configure.ac", Ecosystem::Native, None),
    ("Package.swift", Ecosystem::Native, Some("swift build")),
    // Containers
    ("Dockerfile", Ecosystem::Container, Some("docker build .")),
    ("docker-compose.yml", Ecosystem::Container, Some("docker compose up")),
    ("docker-compose.yaml", Ecosystem::Container, Some("docker compose up")),
    ("compose.yaml", Ecosystem::Container, Some("docker compose up")),
];

/// Project files whose extensions identify a build manifest regardless of
/// the stem (`App.csproj`, `Tool.sln`).
const ARTIFACT_EXTENSIONS: &[(&str, Ecosystem, Option<&str>)] = &[
    ("csproj", Ecosystem::Dotnet, Some("dotnet build")),
    ("fsproj", Ecosystem::Dotnet, Some("dotnet build")),
    ("sln", Ecosystem::Dotnet, Some("dotnet build")),
    ("gemspec", Ecosystem::Ruby, Some("gem build")),
];

/// Recognizes build, dependency and manifest files by name.
pub struct BuildArtifactDetector;

impl BuildArtifactDetector {
    pub fn is_build_artifact(file_name: &str) -> bool {
        Self::lookup(file_name).is_some()
    }

    pub fn ecosystem_of(file_name: &str) -> Option<Ecosystem> {
        Self::lookup(file_name).map(|(_, ecosystem, _)| *ecosystem)
    }

    /// Command that installs or builds what the manifest describes.
    pub fn install_command(file_name: &str) -> Option<&'static str> {
        Self::lookup(file_name).and_then(|(_, _, command)| *command)
    }

    fn lookup(file_name: &str) -> Option<&'static (&'static str, Ecosystem, Option<&'static str>)> {
        if let Some(entry) = ARTIFACTS.iter().find(|(name, _, _)| *name == file_name) {
            return Some(entry);
        }
        let (stem, extension) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        ARTIFACT_EXTENSIONS
            .iter()
            .find(|(ext, _, _)| *ext == extension)
    }
}
