pub mod ledger;
pub mod system;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command, ledger verbs first.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in ledger::definitions()
        .into_iter()
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
