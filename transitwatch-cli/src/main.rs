//! Transitwatch CLI
//!
//! Terminal frontend for the transitwatch library: watch live vehicle
//! positions for a chosen transit dataset, and manage the stored selection.

mod commands;
mod error;
mod surface;

use clap::{Parser, Subcommand};

use commands::selection::SelectionCommands;
use commands::watch::WatchArgs;

#[derive(Debug, Parser)]
#[command(
    name = "transitwatch",
    version,
    about = "Live transit vehicle map, watched from the terminal"
)]
struct Cli {
    /// Log filter, e.g. "info" or "transitwatch=debug"
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Follow live vehicle positions for the selected dataset
    Watch(WatchArgs),

    /// Inspect or edit the stored selection
    #[command(subcommand)]
    Selection(SelectionCommands),
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log);

    let result = match cli.command {
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Selection(command) => commands::selection::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `--log` when set.
fn init_logging(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
