//! Lower phase - transforms the source set into unit trees.

use stagehook_core::env::{Import, MethodTree, Statement, UnitTree};
use stagehook_units::{MethodDecl, SourceSet, UnitDecl};

/// Lower every unit of a source set, keeping compilation order.
pub fn lower_units(set: &SourceSet) -> Vec<UnitTree> {
    set.units.iter().map(lower_unit).collect()
}

/// Lower a single unit declaration.
fn lower_unit(unit: &UnitDecl) -> UnitTree {
    UnitTree {
        path: unit.path.clone(),
        package: unit.package.clone(),
        imports: unit.imports.iter().map(|i| lower_import(i)).collect(),
        types: unit.types.clone(),
        methods: unit.methods.iter().map(lower_method).collect(),
    }
}

/// Imports that cannot be split are kept so attribution reports them.
fn lower_import(import: &str) -> Import {
    Import::parse(import).unwrap_or_else(|| Import::unqualified(import))
}

fn lower_method(method: &MethodDecl) -> MethodTree {
    MethodTree {
        name: method.name.clone(),
        body: method.body.iter().map(|s| Statement::from(s.as_str())).collect(),
    }
}
