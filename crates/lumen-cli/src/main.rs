//! CLI for replaying store event scripts and inspecting configuration.

use clap::{Parser, Subcommand};
use lumen_cli::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Lumen - replay UI store events", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines event script and print the final snapshots
    Replay {
        /// Script file, one event per line
        script: PathBuf,

        /// Start the error store offline
        #[arg(long)]
        offline: bool,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays machine-readable.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = commands::config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay {
            script,
            offline,
            pretty,
        } => {
            if offline {
                config.errors.initially_online = false;
            }
            println!("{}", commands::replay::run(&script, &config, pretty)?);
        }
        Commands::Config => {
            print!("{}", commands::config::show(&config)?);
        }
    }

    Ok(())
}
