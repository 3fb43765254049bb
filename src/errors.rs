use std::io;

use rustyline::error::ReadlineError;
use tally_config::ConfigError;
use tally_core::CoreError;
use thiserror::Error;

/// Failures that stop the shell as a whole, as opposed to a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
}
