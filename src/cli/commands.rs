use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use code_doc::config::ScanConfig;
use code_doc::indexer::ScanProgress;
use code_doc::languages::LanguageRegistry;
use code_doc::model::{ProjectModel, ProjectModelBuilder};
use code_doc::summary::summarizer_from_config;
use code_doc::workspace::BuildArtifactDetector;

#[derive(Parser)]
#[command(name = "code-doc")]
#[command(about = "Builds a structural model of a source tree: languages, symbols, imports, build files and dependencies")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Scan the current directory
    code-doc scan

    # Scan a project as JSON with four workers
    code-doc scan ./my-project --format json --jobs 4

    # Include per-file summaries and honour .gitignore
    code-doc scan . --summaries --gitignore

    # Show the file dependency graph
    code-doc deps ./my-project

    # List third-party packages only
    code-doc deps . --external

    # List supported languages
    code-doc languages
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and print the project model
    Scan {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Worker threads (default: one per CPU)
        #[arg(long)]
        jobs: Option<usize>,

        /// Configuration file (default: <PATH>/.code-doc.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also skip files matched by .gitignore
        #[arg(long)]
        gitignore: bool,

        /// Add a short description of every file
        #[arg(long)]
        summaries: bool,

        /// Show a progress bar on stderr
        #[arg(long)]
        progress: bool,
    },

    /// Print file-to-file import edges
    Deps {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Only list third-party packages
        #[arg(long)]
        external: bool,

        /// Configuration file (default: <PATH>/.code-doc.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also skip files matched by .gitignore
        #[arg(long)]
        gitignore: bool,
    },

    /// List supported languages and their extensions
    Languages,
}

/// Options shared by the commands that scan.
pub struct ScanOptions<'a> {
    pub path: &'a Path,
    pub config: Option<&'a Path>,
    pub jobs: Option<usize>,
    pub gitignore: bool,
    pub progress_bar: bool,
}

fn load_config(path: &Path, explicit: Option<&Path>) -> Result<ScanConfig> {
    let config = match explicit {
        Some(file) => ScanConfig::load(file)
            .with_context(|| format!("Failed to load config {}", file.display()))?,
        None => ScanConfig::discover(path)?,
    };
    Ok(config)
}

fn run_scan(options: &ScanOptions<'_>, config: &ScanConfig) -> Result<ProjectModel> {
    let progress = ScanProgress::new();
    let cancel = progress.clone();
    ctrlc::set_handler(move || cancel.cancel()).context("Failed to set Ctrl+C handler")?;

    if options.progress_bar {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} files [{elapsed_precise}]")
                .context("Invalid progress template")?,
        );
        progress.attach_bar(bar);
    }

    let mut builder = ProjectModelBuilder::from_config(config)?.progress(progress);
    if let Some(jobs) = options.jobs {
        builder = builder.jobs(jobs);
    }
    if options.gitignore {
        builder = builder.respect_gitignore(true);
    }

    let model = builder
        .build(options.path)
        .with_context(|| format!("Failed to scan {}", options.path.display()))?;
    Ok(model)
}

#[derive(Serialize)]
struct ScanReport<'a> {
    #[serde(flatten)]
    model: &'a ProjectModel,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    summaries: BTreeMap<&'a str, String>,
}

pub fn scan(options: &ScanOptions<'_>, format: &str, summaries: bool) -> Result<()> {
    let config = load_config(options.path, options.config)?;
    let model = run_scan(options, &config)?;

    let mut descriptions = BTreeMap::new();
    if summaries {
        let summarizer = summarizer_from_config(&config.summarizer)?;
        for file in model.files() {
            descriptions.insert(file.path.as_str(), summarizer.summarize(file)?);
        }
    }

    if format == "json" {
        let report = ScanReport {
            model: &model,
            summaries: descriptions,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_model(&model);
    if !descriptions.is_empty() {
        println!("\nSummaries:");
        for (path, summary) in &descriptions {
            println!("  {}", path);
            for line in summary.lines() {
                println!("    {}", line);
            }
        }
    }
    Ok(())
}

fn print_model(model: &ProjectModel) {
    println!("Project: {}", model.root().display());
    println!(
        "Files: {}  Lines: {}  Classes: {}  Functions: {}",
        model.files().len(),
        model.total_lines(),
        model.class_count(),
        model.function_count()
    );
    println!("Architecture: {}", model.architecture());

    let patterns: Vec<&str> = model
        .design_patterns()
        .iter()
        .map(|p| p.display_name())
        .collect();
    if !patterns.is_empty() {
        println!("Design patterns: {}", patterns.join(", "));
    }

    println!("\nLanguages:");
    for (language, stats) in model.language_breakdown() {
        println!(
            "  {:<12} {:>5} files {:>8} lines",
            language.display_name(),
            stats.files,
            stats.lines
        );
    }

    if !model.build_artifacts().is_empty() {
        println!("\nBuild artifacts:");
        for path in model.build_artifacts() {
            let name = path.rsplit('/').next().unwrap_or(path);
            let ecosystem = BuildArtifactDetector::ecosystem_of(name)
                .map(|e| e.as_str())
                .unwrap_or("-");
            match BuildArtifactDetector::install_command(name) {
                Some(command) => println!("  {} [{}]  {}", path, ecosystem, command),
                None => println!("  {} [{}]", path, ecosystem),
            }
        }
    }

    let external = model.external_dependencies();
    if !external.is_empty() {
        println!("\nExternal dependencies: {}", external.join(", "));
    }

    println!("\nFiles:");
    for file in model.files() {
        println!(
            "  {}  [{}] {} lines, {} classes, {} functions, {} imports, {}",
            file.path,
            file.language,
            file.line_count,
            file.classes.len(),
            file.functions.len(),
            file.imports.len(),
            file.main_purpose()
        );
    }

    if !model.skipped().is_empty() {
        println!("\nSkipped:");
        for skip in model.skipped() {
            println!("  {}: {}", skip.path, skip.reason);
        }
    }
}

pub fn deps(options: &ScanOptions<'_>, format: &str, external_only: bool) -> Result<()> {
    let config = load_config(options.path, options.config)?;
    let model = run_scan(options, &config)?;
    let graph = model.dependency_graph();

    if external_only {
        let external = model.external_dependencies();
        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&external)?);
        } else if external.is_empty() {
            println!("No external dependencies detected.");
        } else {
            for name in external {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(graph)?);
        return Ok(());
    }

    for edge in graph.edges() {
        let target = edge.to.internal_path().unwrap_or("<external>");
        println!("{} -> {} ({})", edge.from, target, edge.import);
    }
    println!(
        "\n{} internal edges, {} external edges",
        graph.internal_edges().count(),
        graph.external_edges().count()
    );
    Ok(())
}

pub fn languages() -> Result<()> {
    let registry = LanguageRegistry::new()?;
    for language in registry.supported_languages() {
        let extraction = if registry.has_structural_rules(language) {
            "structural"
        } else {
            "line count only"
        };
        println!(
            "{:<12} {:<16} {}",
            language.display_name(),
            extraction,
            registry.extensions_for(language).join(", ")
        );
    }
    Ok(())
}
