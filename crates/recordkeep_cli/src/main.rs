//! Recordkeep command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, start logging and dispatch one subcommand.
//! - Map the outcome onto the process exit status.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use commands::CliError;
use log::{error, info};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(confirmation) => {
            println!("{confirmation}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=command_finish module=cli status=error error={}", err);
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<&'static str, CliError> {
    if let Some(config) = cli.logging_config().map_err(CliError::Config)? {
        recordkeep_core::init_logging(&config).map_err(CliError::Config)?;
    }
    info!(
        "event=command_start module=cli status=ok core_version={}",
        recordkeep_core::core_version()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let confirmation = commands::run(&cli.command, &mut out)?;
    out.flush()?;
    Ok(confirmation)
}
