//! Persisted-selection CLI commands.
//!
//! Provides `selection get`, `selection set`, `selection list`, and
//! `selection path` for inspecting and editing the stored country, dataset,
//! and route choices without starting a watch session.

use clap::Subcommand;
use transitwatch::store::{
    IniSelectionStore, SelectionStore, KEY_COUNTRY, KEY_DATASET, KEY_ROUTES,
};

use crate::error::CliError;

/// Selection subcommands.
#[derive(Debug, Subcommand)]
pub enum SelectionCommands {
    /// Get a stored selection value
    Get {
        /// Selection key: country, dataset, or routes
        key: String,
    },

    /// Set a stored selection value
    Set {
        /// Selection key: country, dataset, or routes
        key: String,

        /// Value to store (routes are comma-joined, e.g. 2,9,64)
        value: String,
    },

    /// List the stored selection
    List,

    /// Show the selection file path
    Path,
}

/// Run a selection subcommand.
pub fn run(command: SelectionCommands) -> Result<(), CliError> {
    match command {
        SelectionCommands::Get { key } => run_get(&key),
        SelectionCommands::Set { key, value } => run_set(&key, &value),
        SelectionCommands::List => run_list(),
        SelectionCommands::Path => run_path(),
    }
}

/// The keys the store understands, in hierarchy order.
const KEYS: [&str; 3] = [KEY_COUNTRY, KEY_DATASET, KEY_ROUTES];

fn parse_key(key: &str) -> Result<&'static str, CliError> {
    KEYS.iter().copied().find(|known| *known == key).ok_or_else(|| {
        CliError::Config(format!(
            "Unknown selection key '{}'. Use 'transitwatch selection list' to see available keys.",
            key
        ))
    })
}

fn open_store() -> Result<IniSelectionStore, CliError> {
    let path = IniSelectionStore::default_path()
        .ok_or_else(|| CliError::Config("Could not determine the config directory".to_string()))?;
    Ok(IniSelectionStore::open(path))
}

fn run_get(key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let store = open_store()?;

    match store.get(key) {
        Some(value) if !value.is_empty() => println!("{}", value),
        _ => println!("(not set)"),
    }

    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut store = open_store()?;
    store.set(key, value);

    println!("Set {} = {}", key, value);

    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let store = open_store()?;

    println!("Stored Selection");
    println!("================");
    println!();

    for key in KEYS {
        match store.get(key) {
            Some(value) if !value.is_empty() => println!("  {} = {}", key, value),
            _ => println!("  {} = (not set)", key),
        }
    }

    Ok(())
}

fn run_path() -> Result<(), CliError> {
    let store = open_store()?;
    println!("{}", store.path().display());
    Ok(())
}
