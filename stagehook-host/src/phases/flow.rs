//! Flow phase - reachability checks.

use stagehook_core::{
    Diagnostic, Log, Phase,
    env::{FlowFacts, UnitTree, UnreachableStatement},
};

/// Check statement reachability in every method of one unit.
///
/// Only the first unreachable statement of a method is reported.
pub fn flow(unit: &UnitTree, log: &mut Log) -> FlowFacts {
    let mut facts = FlowFacts::default();

    for method in &unit.methods {
        match method.body.iter().position(|s| s.is_terminal()) {
            Some(terminal) if terminal + 1 < method.body.len() => {
                let index = terminal + 1;
                log.report(
                    Diagnostic::error(Phase::Flow.name(), "unreachable statement")
                        .in_unit(&unit.path)
                        .at(format!("{}#{}", method.name, index)),
                );
                facts.unreachable.push(UnreachableStatement {
                    method: method.name.clone(),
                    index,
                });
            }
            Some(_) => {}
            None => facts.completes_normally.push(method.name.clone()),
        }
    }

    facts
}
