//! Source-set manifests for the stagehook reference host.
//!
//! A source set (`units.toml`) declares the compilation units to compile and
//! the packages available on the classpath:
//!
//! ```toml
//! [[classpath]]
//! package = "com.lib"
//! types = ["Util"]
//!
//! [[unit]]
//! path = "src/com/app/Main.java"
//! package = "com.app"
//! imports = ["com.lib.Util"]
//! types = ["Main"]
//!
//! [[unit.methods]]
//! name = "run"
//! body = ["call", "return"]
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod validate;

use std::{path::Path, str::FromStr};

pub use error::{Error, Result, SourceContext};
pub use file::UnitsToml;
use serde::Deserialize;

/// A package of precompiled types available to the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClasspathEntry {
    pub package: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// A method declaration and its body, one statement per string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub body: Vec<String>,
}

/// A compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDecl {
    /// Source path; must be unique within the source set.
    pub path: String,
    pub package: String,
    /// Single-type imports such as `com.lib.Util`.
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// Root schema for units.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSet {
    #[serde(default)]
    pub classpath: Vec<ClasspathEntry>,
    /// Units in compilation order.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitDecl>,
}

impl FromStr for SourceSet {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_source_set(s, "units.toml")
    }
}

impl SourceSet {
    /// Parse a units.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        UnitsToml::open(path).map(UnitsToml::into_source_set)
    }

    /// Parse a units.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_source_set(content, filename)
    }

    /// Find a unit by path.
    pub fn unit(&self, path: &str) -> Option<&UnitDecl> {
        self.units.iter().find(|u| u.path == path)
    }

    /// Packages declared by source units, deduplicated, in first-seen order.
    pub fn source_packages(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = Vec::new();
        for unit in &self.units {
            if !packages.contains(&unit.package.as_str()) {
                packages.push(&unit.package);
            }
        }
        packages
    }
}

/// Parse a source set from content with the given filename for error reporting.
fn parse_source_set(content: &str, filename: &str) -> Result<SourceSet> {
    let ctx = SourceContext::new(content, filename);
    let set: SourceSet = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate::validate_source_set(&set, &ctx)?;
    Ok(set)
}
