use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "version",
            "Show build metadata",
            "version [json]",
            cmd_version,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context
            .registry()
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        output::section(format!("Help: {}", entry.name));
        output::line(format!("  Description: {}", entry.description));
        output::line(format!("  Usage: {}", entry.usage));
        return Ok(());
    }

    output::section("Available commands");
    for entry in context.registry().list() {
        output::line(format!("  {:<16} {}", entry.name, entry.description));
    }
    output::line("Dates use YYYY-MM-DD; ranges include both ends.");
    output::line("Use `help <command>` for details.");
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    match args.first().copied() {
        Some("json") => {
            let json = serde_json::to_string_pretty(&meta)
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            output::line(json);
        }
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown version format `{}`. Usage: version [json]",
                other
            )));
        }
        None => {
            output::section(meta.summary());
            output::line(format!("  Built at     : {}", meta.timestamp));
            output::line(format!("  Profile      : {}", meta.profile));
            output::line(format!("  Rustc        : {}", meta.rustc));
        }
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
