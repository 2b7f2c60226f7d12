//! Symbol table used by the attribute phase.

use indexmap::IndexMap;
use stagehook_core::env::{Import, SymbolOrigin, UnitTree};
use stagehook_units::ClasspathEntry;

/// Every type visible to a compilation, keyed by qualified name.
///
/// Types declared by source units shadow classpath types of the same name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    types: IndexMap<String, SymbolOrigin>,
}

impl SymbolTable {
    pub fn new(units: &[UnitTree], classpath: &[ClasspathEntry]) -> Self {
        let mut types = IndexMap::new();

        for unit in units {
            for ty in &unit.types {
                types.insert(
                    format!("{}.{}", unit.package, ty),
                    SymbolOrigin::Source {
                        unit: unit.path.clone(),
                    },
                );
            }
        }

        for entry in classpath {
            for ty in &entry.types {
                types
                    .entry(format!("{}.{}", entry.package, ty))
                    .or_insert(SymbolOrigin::Classpath);
            }
        }

        Self { types }
    }

    /// Resolve an import to where its type is declared.
    pub fn resolve(&self, import: &Import) -> SymbolOrigin {
        self.types
            .get(&import.qualified())
            .cloned()
            .unwrap_or(SymbolOrigin::Unresolved)
    }

    /// Number of known types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(path: &str, package: &str, types: &[&str]) -> UnitTree {
        UnitTree {
            path: path.into(),
            package: package.into(),
            imports: vec![],
            types: types.iter().map(|t| t.to_string()).collect(),
            methods: vec![],
        }
    }

    #[test]
    fn test_resolve() {
        let units = vec![unit("A.java", "app", &["A"])];
        let classpath = vec![ClasspathEntry {
            package: "lib".into(),
            types: vec!["Util".into()],
        }];
        let table = SymbolTable::new(&units, &classpath);

        assert_eq!(
            table.resolve(&Import::new("app", "A")),
            SymbolOrigin::Source {
                unit: "A.java".into()
            }
        );
        assert_eq!(
            table.resolve(&Import::new("lib", "Util")),
            SymbolOrigin::Classpath
        );
        assert_eq!(
            table.resolve(&Import::new("lib", "Missing")),
            SymbolOrigin::Unresolved
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_source_shadows_classpath() {
        let units = vec![unit("Util.java", "lib", &["Util"])];
        let classpath = vec![ClasspathEntry {
            package: "lib".into(),
            types: vec!["Util".into()],
        }];
        let table = SymbolTable::new(&units, &classpath);

        assert!(matches!(
            table.resolve(&Import::new("lib", "Util")),
            SymbolOrigin::Source { .. }
        ));
    }
}
