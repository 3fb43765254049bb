//! Request layer: turns text commands into ledger calls and prints results.

pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
pub mod request;
mod shell;

pub use self::core::{process_script, CliMode, CommandError, ShellContext};
pub use request::{Request, Verb};
pub use shell::run_cli;
