use std::io::{self, IsTerminal};

use strsim::levenshtein;
use tally_config::{Config, ConfigManager};
use tally_core::{BudgetManager, CoreError, DateDomain};
use tracing::debug;

use crate::cli::{
    commands,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    request::Request,
    shell::parse_command_line,
};
use crate::errors::CliError;

/// Environment variable forcing line-by-line script mode.
pub const SCRIPT_MODE_ENV: &str = "TALLY_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    /// Script mode when forced through the environment or when stdin is piped.
    pub fn detect() -> Self {
        let forced = std::env::var(SCRIPT_MODE_ENV).ok();
        if script_flag(forced.as_deref()) || !io::stdin().is_terminal() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// `1`, `true`, `yes` and `on` (any case) enable script mode; anything else,
/// including an empty value, leaves detection to the terminal check.
fn script_flag(value: Option<&str>) -> bool {
    value.is_some_and(|raw| {
        matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// State shared by every command of one shell session: the ledger it feeds,
/// the loaded configuration and the command table.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    pub(crate) last_command: Option<String>,
    registry: CommandRegistry,
    ledger: BudgetManager,
    config: Config,
    outputs: Vec<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode, config: Config) -> Result<Self, CliError> {
        let domain = resolve_domain(&config)?;
        debug!(start = %domain.start(), end = %domain.end(), days = domain.len(), "building ledger");

        output::set_preferences(OutputPreferences {
            plain_output: mode == CliMode::Script,
        });

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            running: true,
            last_command: None,
            registry,
            ledger: BudgetManager::new(domain),
            config,
            outputs: Vec::new(),
        })
    }

    /// Session configured from the file chosen by `TALLY_CONFIG`.
    pub fn from_env(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::from_env();
        let config = manager.load()?;
        debug!(path = %manager.path().display(), "loaded configuration");
        Self::new(mode, config)
    }

    pub fn ledger(&self) -> &BudgetManager {
        &self.ledger
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Every value printed by `ComputeIncome` so far, formatted as printed.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        "tally> ".to_string()
    }

    /// Tokenizes and dispatches one input line.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        if raw.starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match self.registry.handler(command) {
            Some(handler) => match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            },
            None => Err(CommandError::UnknownCommand(command.to_string())),
        }
    }

    /// Applies a parsed request and prints its result, if any.
    pub(crate) fn run_request(&mut self, request: Request) -> CommandResult {
        debug!(verb = %request.verb(), "applying request");
        if let Some(value) = request.apply(&mut self.ledger)? {
            let formatted = self.config.format_amount(value);
            output::result(&formatted);
            self.outputs.push(formatted);
        }
        Ok(())
    }

    fn suggestion_for(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_ascii_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(&name.to_ascii_lowercase(), &needle), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= 3)
            .map(|(_, name)| name)
    }

    /// Prints a failed command without ending the session.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::UnknownCommand(name) => {
                output::warning(format!(
                    "Unknown command `{}`. Type `help` to see available commands.",
                    name
                ));
                if let Some(best) = self.suggestion_for(&name) {
                    output::hint(format!("Suggestion: `{}`?", best));
                }
            }
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(err) => output::error(err),
        }
    }
}

fn resolve_domain(config: &Config) -> Result<DateDomain, CoreError> {
    let default = DateDomain::default();
    DateDomain::new(
        config.domain_start.unwrap_or(default.start()),
        config.domain_end.unwrap_or(default.end()),
    )
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("exit requested")]
    ExitRequested,
}

/// Runs `lines` through a fresh script-mode session and returns it.
pub fn process_script(config: Config, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::new(CliMode::Script, config)?;
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(context)
}
