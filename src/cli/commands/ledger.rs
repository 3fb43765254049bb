use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::request::{Request, Verb};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        entry(Verb::Earn, cmd_earn),
        entry(Verb::Spend, cmd_spend),
        entry(Verb::PayTax, cmd_pay_tax),
        entry(Verb::ComputeIncome, cmd_compute_income),
    ]
}

fn entry(verb: Verb, handler: fn(&mut ShellContext, &[&str]) -> CommandResult) -> CommandEntry {
    CommandEntry::new(verb.name(), verb.description(), verb.usage(), handler)
}

fn run(context: &mut ShellContext, verb: Verb, args: &[&str]) -> CommandResult {
    let request = Request::parse(verb, args)?;
    context.run_request(request)
}

fn cmd_earn(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run(context, Verb::Earn, args)
}

fn cmd_spend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run(context, Verb::Spend, args)
}

fn cmd_pay_tax(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run(context, Verb::PayTax, args)
}

fn cmd_compute_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run(context, Verb::ComputeIncome, args)
}
