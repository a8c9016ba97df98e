//! vntext command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

mod commands;
mod logging;

/// Vietnamese social-media text normalizer CLI
#[derive(Debug, Parser)]
#[command(name = "vntext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Log format (json or text)
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize noisy Vietnamese text
    Normalize {
        /// Input text
        input: String,

        /// Strip Vietnamese diacritics from the result
        #[arg(long)]
        strip_diacritics: bool,

        /// Print each stage's intermediate output
        #[arg(long)]
        debug_stages: bool,

        /// Path to a tab-separated teencode dictionary
        #[arg(long)]
        teencode: Option<PathBuf>,

        /// Path to a JSON vocabulary file (repeatable)
        #[arg(long)]
        vocabulary: Vec<PathBuf>,
    },

    /// Show version and table info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatArg::Json => logging::LogFormat::Json,
        LogFormatArg::Text => logging::LogFormat::Text,
    };
    logging::init_logging(&cli.log_level, format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting vntext CLI");

    match cli.command {
        Commands::Normalize {
            input,
            strip_diacritics,
            debug_stages,
            teencode,
            vocabulary,
        } => {
            commands::normalize::run(commands::normalize::NormalizeOptions {
                input,
                strip_diacritics,
                debug_stages,
                teencode,
                vocabulary,
            })
            .context("normalization failed")?;
        }
        Commands::Info => {
            commands::info::run();
        }
    }

    Ok(())
}
