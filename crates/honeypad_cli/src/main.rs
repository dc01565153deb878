//! Command-line front end for the Honeypad note store.
//!
//! # Responsibility
//! - Resolve settings from flags, environment and platform defaults.
//! - Initialize logging before the store is opened.
//! - Run one subcommand and map failures to a non-zero exit code.

mod cli;
mod commands;
mod config;
mod error;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use honeypad_core::{init_logging, NoteStore};
use log::info;

use crate::cli::Cli;
use crate::config::{ensure_parent_dir, Settings};
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::resolve(&cli)?;
    init_logging(&settings.logging).map_err(CliError::Logging)?;

    ensure_parent_dir(&settings.db_path)?;
    let store = NoteStore::open(&settings.db_path, &settings.store)?;
    info!("event=cli_start module=cli status=ok");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(cli.command, &store, &mut out)?;
    out.flush()?;
    Ok(())
}
