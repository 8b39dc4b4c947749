//! Coarse per-file purpose tags from imports, names and a few source markers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Purpose vocabulary, declared in priority order: the first tag of a file's
/// set is its main purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurposeTag {
    ServiceEndpoint,
    Persistence,
    Presentation,
    Test,
    Configuration,
    Utility,
    General,
}

impl PurposeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurposeTag::ServiceEndpoint => "service-endpoint",
            PurposeTag::Persistence => "persistence",
            PurposeTag::Presentation => "presentation",
            PurposeTag::Test => "test",
            PurposeTag::Configuration => "configuration",
            PurposeTag::Utility => "utility",
            PurposeTag::General => "general",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PurposeTag::ServiceEndpoint => "Handles API endpoints and web requests",
            PurposeTag::Persistence => "Manages database operations",
            PurposeTag::Presentation => "Implements user interface components",
            PurposeTag::Test => "Contains test cases and utilities",
            PurposeTag::Configuration => "Manages application configuration",
            PurposeTag::Utility => "Provides utility functions",
            PurposeTag::General => "General purpose code",
        }
    }
}

impl fmt::Display for PurposeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Signals {
    tag: PurposeTag,
    /// Library names matched against import segments (lowercase)
    imports: &'static [&'static str],
    /// Words matched against path, class and function name tokens (lowercase)
    names: &'static [&'static str],
    /// Case-sensitive substrings of the raw source
    markers: &'static [&'static str],
}

const SIGNALS: &[Signals] = &[
    Signals {
        tag: PurposeTag::ServiceEndpoint,
        imports: &[
            "flask", "fastapi", "django", "express", "koa", "fastify", "hapi", "aiohttp", "tornado",
            "starlette", "sanic", "bottle", "gin", "echo", "fiber", "mux", "axum", "actix_web",
            "rocket", "warp", "tonic", "grpc", "springframework", "ktor", "sinatra", "laravel",
            "symfony", "nestjs", "aspnetcore",
        ],
        names: &["api", "router", "routes", "endpoint", "endpoints", "controller", "handler", "server"],
        markers: &[
            "@app.route", "@app.get", "@app.post", "@router.", "@RestController",
            "@RequestMapping", "@GetMapping", "@PostMapping", "[ApiController]", "[HttpGet",
            "[HttpPost", "http.HandleFunc", "#[get(", "#[post(", "app.listen(",
        ],
    },
    Signals {
        tag: PurposeTag::Persistence,
        imports: &[
            "sqlite3", "sqlite", "sqlalchemy", "psycopg2", "pymysql", "mysql", "postgres", "pg",
            "mongoose", "mongodb", "pymongo", "redis", "sequelize", "typeorm", "prisma", "knex",
            "gorm", "sqlx", "diesel", "rusqlite", "hibernate", "jdbc", "persistence",
            "entityframeworkcore", "activerecord", "peewee", "db",
        ],
        names: &["repository", "repo", "dao", "db", "database", "migration", "migrations"],
        markers: &["CREATE TABLE", "INSERT INTO", "@Entity", "@Table(", "@Repository"],
    },
    Signals {
        tag: PurposeTag::Presentation,
        imports: &[
            "react", "react-dom", "vue", "angular", "svelte", "tkinter", "pyqt5", "pyqt6", "pyside6",
            "kivy", "swiftui", "uikit", "jquery", "electron", "flutter", "gtk", "wx", "compose",
        ],
        names: &["view", "views", "component", "components", "widget", "widgets", "screen", "page", "ui"],
        markers: &["@Composable", "@Component(", "ReactDOM", "<template>"],
    },
    Signals {
        tag: PurposeTag::Test,
        imports: &[
            "pytest", "unittest", "mocha", "jest", "chai", "junit", "testing", "mockito", "rspec",
            "minitest", "xunit", "nunit", "vitest", "testify", "xctest",
        ],
        names: &["test", "tests", "spec", "specs"],
        markers: &[
            "@Test", "#[test]", "#[cfg(test)]", "@pytest.", "[Fact]", "[TestMethod]", "func Test",
        ],
    },
    Signals {
        tag: PurposeTag::Configuration,
        imports: &[
            "configparser", "dotenv", "pydantic_settings", "decouple", "dynaconf", "viper", "config",
        ],
        names: &["config", "configuration", "settings", "env", "environment", "conf"],
        markers: &["os.environ", "process.env", "os.Getenv", "@Configuration"],
    },
    Signals {
        tag: PurposeTag::Utility,
        imports: &["lodash", "underscore", "itertools", "functools", "commons", "guava"],
        names: &["util", "utils", "utility", "utilities", "helper", "helpers", "common", "shared", "tools"],
        markers: &[],
    },
];

/// Extracted data of one file fed to [`PurposeClassifier::classify`].
#[derive(Debug, Clone, Copy)]
pub struct PurposeInput<'a> {
    pub path: &'a str,
    pub functions: &'a [String],
    pub classes: &'a [String],
    pub imports: &'a [String],
    pub text: &'a str,
}

pub struct PurposeClassifier;

impl PurposeClassifier {
    /// Pure function of the input; never empty (falls back to `General`).
    pub fn classify(input: &PurposeInput<'_>) -> BTreeSet<PurposeTag> {
        let import_segments: BTreeSet<String> = input
            .imports
            .iter()
            .flat_map(|imp| import_segments(imp))
            .collect();

        let path_stem = input
            .path
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(input.path);
        let mut words: BTreeSet<String> = name_tokens(path_stem).into_iter().collect();
        for name in input.classes.iter().chain(input.functions) {
            words.extend(name_tokens(name));
        }

        let mut tags: BTreeSet<PurposeTag> = SIGNALS
            .iter()
            .filter(|signals| {
                signals.imports.iter().any(|lib| {
                    import_segments
                        .iter()
                        .any(|seg| seg == lib || seg.strip_prefix(lib).is_some_and(|rest| rest.starts_with('-')))
                }) || signals.names.iter().any(|word| words.contains(*word))
                    || signals.markers.iter().any(|marker| input.text.contains(marker))
            })
            .map(|signals| signals.tag)
            .collect();

        if tags.is_empty() {
            tags.insert(PurposeTag::General);
        }
        tags
    }

    /// First tag in priority order.
    pub fn main_purpose(tags: &BTreeSet<PurposeTag>) -> PurposeTag {
        tags.iter().next().copied().unwrap_or(PurposeTag::General)
    }
}

/// Lowercase segments of an import identifier split on module separators.
fn import_segments(import: &str) -> Vec<String> {
    import
        .split(|c: char| matches!(c, '.' | '/' | '\\' | ':' | '@'))
        .filter(|seg| !seg.is_empty())
        .map(|seg| seg.to_ascii_lowercase())
        .collect()
}

/// Lowercase words of an identifier or path, split on separators and
/// camelCase boundaries (`HTTPServerConfig` -> `http`, `server`, `config`).
fn name_tokens(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                tokens.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
