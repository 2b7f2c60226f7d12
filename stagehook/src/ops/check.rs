//! Check operation - source-set validation.

use stagehook_host::lower_units;
use stagehook_units::UnitsToml;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Parsing already validated the source set; this summarizes what a
/// compile would see.
pub fn check(units_toml: &UnitsToml) -> CheckReport {
    let set = units_toml.source_set();
    let trees = lower_units(set);

    CheckReport {
        units_path: units_toml.path().to_path_buf(),
        units: trees.iter().map(|t| t.path.clone()).collect(),
        source_packages: set.source_packages().into_iter().map(String::from).collect(),
        classpath_packages: set.classpath.iter().map(|c| c.package.clone()).collect(),
        imports: trees.iter().map(|t| t.imports.len()).sum(),
    }
}
