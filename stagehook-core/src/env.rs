//! The attributed view of a compilation unit handed to plugin callbacks.
//!
//! The host owns every tree and fact; [`Env`] only borrows them, so plugins
//! can read everything the host has computed so far but change nothing.

use serde::Serialize;

/// A host pipeline phase that plugins are called after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Symbol resolution.
    Attribute,
    /// Dataflow and reachability checks.
    Flow,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Attribute => "attribute",
            Phase::Flow => "flow",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single-type import such as `com.lib.Util`.
///
/// An import that has no package part keeps its raw text in `name` with an
/// empty `package`; it never resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Import {
    pub package: String,
    pub name: String,
}

impl Import {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Split a qualified name at its last dot.
    ///
    /// Returns `None` for names without a package.
    pub fn parse(qualified: &str) -> Option<Self> {
        let (package, name) = qualified.rsplit_once('.')?;
        if package.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(package, name))
    }

    /// Wrap a name that could not be split into package and type.
    pub fn unqualified(raw: impl Into<String>) -> Self {
        Self::new("", raw)
    }

    /// The fully qualified name.
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Import {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.package.is_empty() {
            return f.write_str(&self.name);
        }
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// A statement in a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Statement {
    Return,
    Throw,
    Other(String),
}

impl Statement {
    /// Returns true if control never continues past this statement.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Statement::Return | Statement::Throw)
    }
}

impl From<&str> for Statement {
    fn from(text: &str) -> Self {
        match text.trim() {
            "return" => Statement::Return,
            "throw" => Statement::Throw,
            other => Statement::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodTree {
    pub name: String,
    pub body: Vec<Statement>,
}

/// The parse tree of one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitTree {
    /// Source path, used to identify the unit in diagnostics.
    pub path: String,
    pub package: String,
    pub imports: Vec<Import>,
    /// Simple names of the types declared in this unit.
    pub types: Vec<String>,
    pub methods: Vec<MethodTree>,
}

/// Where an import was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SymbolOrigin {
    /// Declared by a unit of this compilation.
    Source { unit: String },
    /// Found on the classpath.
    Classpath,
    /// Not found anywhere.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImport {
    pub import: Import,
    pub origin: SymbolOrigin,
}

/// A statement that can never execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreachableStatement {
    pub method: String,
    /// Zero-based index in the method body.
    pub index: usize,
}

/// Results of the flow phase for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowFacts {
    pub unreachable: Vec<UnreachableStatement>,
    /// Methods whose body can complete without `return` or `throw`.
    pub completes_normally: Vec<String>,
}

/// The attributed environment of one unit.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    phase: Phase,
    tree: &'a UnitTree,
    resolved: &'a [ResolvedImport],
    flow: Option<&'a FlowFacts>,
}

impl<'a> Env<'a> {
    /// Environment after symbol resolution.
    pub fn attributed(tree: &'a UnitTree, resolved: &'a [ResolvedImport]) -> Self {
        Self {
            phase: Phase::Attribute,
            tree,
            resolved,
            flow: None,
        }
    }

    /// Environment after flow analysis.
    pub fn flowed(tree: &'a UnitTree, resolved: &'a [ResolvedImport], flow: &'a FlowFacts) -> Self {
        Self {
            phase: Phase::Flow,
            tree,
            resolved,
            flow: Some(flow),
        }
    }

    /// The phase that has just completed for this unit.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tree(&self) -> &'a UnitTree {
        self.tree
    }

    pub fn path(&self) -> &'a str {
        &self.tree.path
    }

    pub fn package(&self) -> &'a str {
        &self.tree.package
    }

    pub fn resolved_imports(&self) -> &'a [ResolvedImport] {
        self.resolved
    }

    /// Flow facts, available once the flow phase has run.
    pub fn flow(&self) -> Option<&'a FlowFacts> {
        self.flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_parse() {
        let import = Import::parse("com.lib.Util").unwrap();
        assert_eq!(import.package, "com.lib");
        assert_eq!(import.name, "Util");
        assert_eq!(import.qualified(), "com.lib.Util");

        assert!(Import::parse("Util").is_none());
        assert!(Import::parse("com.lib.").is_none());
    }

    #[test]
    fn test_unqualified_import_displays_raw_name() {
        let import = Import::unqualified("Util");
        assert_eq!(import.package, "");
        assert_eq!(import.qualified(), "Util");
        assert_eq!(import.to_string(), "Util");
    }

    #[test]
    fn test_statement_from_str() {
        assert_eq!(Statement::from("return"), Statement::Return);
        assert_eq!(Statement::from(" throw "), Statement::Throw);
        assert_eq!(Statement::from("call"), Statement::Other("call".into()));
        assert!(Statement::Throw.is_terminal());
        assert!(!Statement::from("call").is_terminal());
    }

    #[test]
    fn test_env_phases() {
        let tree = UnitTree {
            path: "src/a/A.java".into(),
            package: "a".into(),
            imports: vec![],
            types: vec!["A".into()],
            methods: vec![],
        };
        let flow = FlowFacts::default();

        let env = Env::attributed(&tree, &[]);
        assert_eq!(env.phase(), Phase::Attribute);
        assert!(env.flow().is_none());

        let env = Env::flowed(&tree, &[], &flow);
        assert_eq!(env.phase(), Phase::Flow);
        assert_eq!(env.path(), "src/a/A.java");
        assert!(env.flow().is_some());
    }
}
