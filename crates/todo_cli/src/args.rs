//! Command-line arguments and log directory resolution.

use clap::Parser;
use std::path::PathBuf;

const DEFAULT_APP_DIR: &str = "todo";
const DEFAULT_LOG_SUBDIR: &str = "logs";

/// Interactive in-memory to-do list with local reminders.
#[derive(Debug, Parser)]
#[command(name = "todo", version, about)]
pub struct Cli {
    /// Log level: trace|debug|info|warn|error (defaults per build mode).
    #[arg(long, env = "TODO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "TODO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Disable file logging.
    #[arg(long)]
    pub no_log: bool,
}

impl Cli {
    /// Resolves the effective log level.
    pub fn effective_log_level(&self) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| todo_core::default_log_level().to_string())
    }

    /// Resolves the log directory: explicit flag/env, else `<data_local_dir>/todo/logs`.
    pub fn effective_log_dir(&self) -> Option<PathBuf> {
        self.log_dir.clone().or_else(|| {
            dirs::data_local_dir().map(|base| base.join(DEFAULT_APP_DIR).join(DEFAULT_LOG_SUBDIR))
        })
    }
}
