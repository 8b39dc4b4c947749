mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, ScanOptions};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "code_doc=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            path,
            format,
            jobs,
            config,
            gitignore,
            summaries,
            progress,
        } => {
            let options = ScanOptions {
                path: &path,
                config: config.as_deref(),
                jobs,
                gitignore,
                progress_bar: progress,
            };
            cli::scan(&options, &format, summaries)?;
        }
        Commands::Deps {
            path,
            format,
            external,
            config,
            gitignore,
        } => {
            let options = ScanOptions {
                path: &path,
                config: config.as_deref(),
                jobs: None,
                gitignore,
                progress_bar: false,
            };
            cli::deps(&options, &format, external)?;
        }
        Commands::Languages => {
            cli::languages()?;
        }
    }

    Ok(())
}
