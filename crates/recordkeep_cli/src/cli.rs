//! Command-line surface and resolved configuration.

use clap::{Parser, Subcommand};
use recordkeep_core::{default_log_level, normalize_level, LoggingConfig};
use std::path::PathBuf;

/// Recordkeep - keyed record stores for small inventories, patients and grades
#[derive(Debug, Parser)]
#[command(name = "recordkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "RECORDKEEP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rotated log files; file logging is off when unset
    #[arg(long, global = true, env = "RECORDKEEP_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed the warehouse, list stock and run the failure drill
    Warehouse,

    /// List patients and one patient's prescriptions
    Health {
        #[arg(long, default_value_t = 1)]
        patient: u32,
    },

    /// Grade a comma-separated score file into a text report
    Grades {
        #[arg(long, default_value = "input.txt")]
        input: PathBuf,
        #[arg(long, default_value = "output.txt")]
        output: PathBuf,
    },

    /// Save sample inventory to a JSON file and load it back
    Inventory {
        #[arg(long, default_value = "inventory.json")]
        file: PathBuf,
    },

    /// Process sample transactions against a savings account
    Finance,
}

impl Cli {
    /// Resolves logger settings.
    ///
    /// The level is validated even when no directory is given. A relative
    /// directory is resolved against the current working directory.
    pub fn logging_config(&self) -> Result<Option<LoggingConfig>, String> {
        let level = match self.log_level.as_deref() {
            Some(level) => normalize_level(level)?,
            None => default_log_level(),
        };

        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(None);
        };
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()
                .map_err(|err| format!("cannot resolve working directory: {err}"))?
                .join(log_dir)
        };

        Ok(Some(LoggingConfig {
            level: level.to_string(),
            log_dir,
            echo_warnings: false,
        }))
    }
}
