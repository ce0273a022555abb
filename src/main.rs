//! `devprint` CLI - Inspect and rotate per-account device fingerprints

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use devprint::Config;

#[derive(Parser)]
#[command(name = "devprint")]
#[command(about = "Per-account device fingerprints with restorable history")]
#[command(version)]
struct Cli {
    /// Account store file (overrides the config file)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Config file [default: ~/.config/devprint/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List accounts with their current device id
    List,

    /// Show the current fingerprint of an account as JSON
    Show {
        /// Account email
        email: String,
    },

    /// Show retired fingerprints of an account, most recent first
    History {
        /// Account email
        email: String,
    },

    /// Retire the current fingerprint and generate a new one
    Regenerate {
        /// Account email
        email: String,
    },

    /// Restore a fingerprint from history
    Restore {
        /// Account email
        email: String,

        /// History index as shown by `history`
        index: usize,
    },

    /// Print the request headers for an account
    Headers {
        /// Account email
        email: String,
    },

    /// Generate fingerprints without touching the store
    Generate {
        /// Number of fingerprints to generate
        #[arg(short, long, default_value = "3")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean
    let default_filter = if cli.verbose { "devprint=debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(store) = cli.store {
        config.store_path = Some(store);
    }

    match cli.command {
        Commands::List => cmd::accounts::cmd_list(&config).await?,
        Commands::Show { email } => cmd::accounts::cmd_show(&config, &email).await?,
        Commands::History { email } => cmd::accounts::cmd_history(&config, &email).await?,
        Commands::Headers { email } => cmd::accounts::cmd_headers(&config, &email).await?,
        Commands::Regenerate { email } => cmd::rotate::cmd_regenerate(&config, &email).await?,
        Commands::Restore { email, index } => {
            cmd::rotate::cmd_restore(&config, &email, index).await?;
        }
        Commands::Generate { count } => cmd::fingerprint::cmd_generate(&config, count)?,
    }

    Ok(())
}
