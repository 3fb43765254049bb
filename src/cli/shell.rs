use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Context as ReadlineContext, Editor, Helper,
};
use shell_words::{split, ParseError};

use crate::cli::core::{CliMode, LoopControl, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::detect();
    let mut context = ShellContext::from_env(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));

    let domain = *context.ledger().domain();
    output::info(format!(
        "Ledger covers {} to {}. Type `help` for commands.",
        domain.start(),
        domain.date_at(domain.len() - 1).unwrap_or(domain.start())
    ));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match context.process_line(trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Feeds every line of `input` to the session; errors are reported and skipped.
pub(crate) fn run_script(context: &mut ShellContext, input: impl BufRead) -> Result<(), CliError> {
    debug_assert_eq!(context.mode, CliMode::Script);
    for line in input.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match context.process_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

/// Completes command names in the first word of the line.
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort_by_key(|name| name.to_ascii_lowercase());
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, prefix: &str) -> Vec<Pair> {
        let needle = prefix.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(|name| name.to_ascii_lowercase().starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        // Only the verb is completed; arguments are dates and numbers.
        if prefix[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((start, self.candidates(&prefix[start..])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_config::Config;

    #[test]
    fn completes_verbs_case_insensitively() {
        let helper = CommandHelper::new(vec!["Earn", "exit", "PayTax", "ComputeIncome"]);
        let names: Vec<String> = helper
            .candidates("e")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(names, vec!["Earn", "exit"]);
        assert_eq!(helper.candidates("pay")[0].display, "PayTax");
        assert!(helper.candidates("x").is_empty());
    }

    #[test]
    fn tokenizer_honours_quotes() {
        assert_eq!(
            parse_command_line("help 'PayTax'").unwrap(),
            vec!["help", "PayTax"]
        );
        assert!(parse_command_line("Earn 'unterminated").is_err());
    }

    #[test]
    fn script_reader_processes_every_line() {
        let mut context = ShellContext::new(CliMode::Script, Config::default()).unwrap();
        let input = "Earn 2000-01-01 2000-01-10 100\nSpend 2000-01-05 2000-01-05 3\nComputeIncome 2000-01-01 2000-01-10\n";
        run_script(&mut context, input.as_bytes()).unwrap();
        assert_eq!(context.outputs(), ["97"]);
    }
}
