//! Attribute phase - symbol resolution.

use stagehook_core::{
    Diagnostic, Log, Phase,
    env::{ResolvedImport, SymbolOrigin, UnitTree},
};

use crate::SymbolTable;

/// Resolve the imports of one unit.
///
/// Unresolved imports are reported as errors and kept in the result with
/// [`SymbolOrigin::Unresolved`], so later phases and plugins still see them.
pub fn attribute(unit: &UnitTree, symbols: &SymbolTable, log: &mut Log) -> Vec<ResolvedImport> {
    unit.imports
        .iter()
        .map(|import| {
            let origin = symbols.resolve(import);
            if origin == SymbolOrigin::Unresolved {
                let message = format!("cannot find symbol '{}'", import);
                log.report(
                    Diagnostic::error(Phase::Attribute.name(), message)
                        .in_unit(&unit.path)
                        .at(format!("import {}", import)),
                );
            }
            ResolvedImport {
                import: import.clone(),
                origin,
            }
        })
        .collect()
}
