//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from source-set validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the source set.
    pub units_path: PathBuf,
    /// Unit paths in compilation order.
    pub units: Vec<String>,
    pub source_packages: Vec<String>,
    pub classpath_packages: Vec<String>,
    /// Total number of imports across all units.
    pub imports: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.units_path.display()));
        out.newline();

        out.key_value("units", &self.units.len().to_string());
        out.key_value("imports", &self.imports.to_string());

        if !self.source_packages.is_empty() {
            out.newline();
            out.section("Source packages");
            for package in &self.source_packages {
                out.list_item(package);
            }
        }

        if !self.classpath_packages.is_empty() {
            out.newline();
            out.section("Classpath packages");
            for package in &self.classpath_packages {
                out.list_item(package);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render() {
        let report = CheckReport {
            units_path: "units.toml".into(),
            units: vec!["A.java".into(), "B.java".into()],
            source_packages: vec!["a".into(), "b".into()],
            classpath_packages: vec![],
            imports: 3,
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        ✓ units.toml is valid

        units: 2
        imports: 3

        Source packages:
          - a
          - b
        ");
    }
}
