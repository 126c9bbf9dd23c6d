use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "haven")]
#[command(about = "Haven CLI - evidence logging, threat classification and supporter connections", long_about = None)]
struct Cli {
    /// Directory holding config.toml and secret.json (defaults to the user config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a piece of text and print the result as JSON
    Classify {
        /// Text to classify
        text: String,
    },
    /// Walk through evidence logging, a dossier and a support conversation
    Demo {
        /// Ignore any configured API key and run in degraded mode
        #[arg(long)]
        offline: bool,
    },
    /// List the vetted supporter directory
    Supporters {
        /// Only show one profession (e.g. lawyer, digital_safety)
        #[arg(long)]
        profession: Option<String>,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Commands::Classify { text } => commands::classify::run(config_dir, &text).await?,
        Commands::Demo { offline } => commands::demo::run(config_dir, offline).await?,
        Commands::Supporters { profession } => {
            commands::supporters::run(config_dir, profession.as_deref())?
        }
    }

    Ok(())
}
