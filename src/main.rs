use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dashsplit::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "dashsplit")]
#[command(about = "Split a debugger dashboard's panels into their own terminal windows")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.dashsplit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Device panels return to on teardown (defaults to this terminal)
    #[arg(long, global = true)]
    home_device: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open panel terminals and apply layouts read from stdin, one per line
    Run {
        /// Write dashboard commands here instead of stdout (file or FIFO)
        #[arg(long)]
        commands: Option<PathBuf>,

        /// Panels to open at startup (overrides startup_layout in the config)
        panels: Vec<String>,
    },

    /// List valid panel names
    Panels,

    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries dashboard commands
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { commands, panels } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            cli::run::run_command(config, cli.home_device, commands, panels).await?;
        }
        Commands::Panels => {
            cli::panels::panels_command()?;
        }
        Commands::Init { force } => {
            cli::init::init_command(cli.config, force).await?;
        }
    }

    Ok(())
}
