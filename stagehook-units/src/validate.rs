//! Validation utilities for package, type and method names

use std::collections::{HashMap, HashSet};

use crate::{Result, SourceSet, error::SourceContext};

/// Reserved words of the compiled language that cannot be used as names
pub(crate) const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while",
    // Literals
    "true", "false", "null",
];

/// Check if a name is a reserved word
pub(crate) fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Validate that a name is a valid identifier
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, '_' or '$'"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Some("name must contain only letters, digits, '_' and '$'");
    }

    if is_keyword(name) {
        return Some("name is a reserved word");
    }

    None
}

/// Validate a dot-separated qualified name such as a package
pub(crate) fn validate_qualified(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }
    name.split('.').find_map(|segment| {
        if segment.is_empty() {
            Some("name cannot contain empty segments")
        } else {
            validate_identifier(segment)
        }
    })
}

/// Validate a single-type import, which needs at least a package and a type
pub(crate) fn validate_import(import: &str) -> Option<&'static str> {
    if !import.contains('.') {
        return Some("import must be qualified with a package");
    }
    validate_qualified(import)
}

/// Validate a parsed source set against its source text.
pub(crate) fn validate_source_set(set: &SourceSet, ctx: &SourceContext<'_>) -> Result<()> {
    for entry in &set.classpath {
        if let Some(reason) = validate_qualified(&entry.package) {
            return Err(ctx.invalid_package_error(&entry.package, reason));
        }
        for ty in &entry.types {
            if let Some(reason) = validate_identifier(ty) {
                return Err(ctx.invalid_name_error(ty, "type", reason));
            }
        }
    }

    let mut paths = HashSet::new();
    // Qualified type name -> declaring unit path
    let mut declared: HashMap<String, &str> = HashMap::new();

    for unit in &set.units {
        if !paths.insert(unit.path.as_str()) {
            return Err(ctx.duplicate_unit_error(&unit.path));
        }

        if let Some(reason) = validate_qualified(&unit.package) {
            return Err(ctx.invalid_package_error(&unit.package, reason));
        }

        for import in &unit.imports {
            if let Some(reason) = validate_import(import) {
                return Err(ctx.invalid_import_error(&unit.path, import, reason));
            }
        }

        for ty in &unit.types {
            if let Some(reason) = validate_identifier(ty) {
                return Err(ctx.invalid_name_error(ty, "type", reason));
            }
            let qualified = format!("{}.{}", unit.package, ty);
            if let Some(first) = declared.get(&qualified) {
                return Err(ctx.duplicate_type_error(&qualified, first, &unit.path));
            }
            declared.insert(qualified, &unit.path);
        }

        for method in &unit.methods {
            if let Some(reason) = validate_identifier(&method.name) {
                return Err(ctx.invalid_name_error(&method.name, "method", reason));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("Main").is_none());
        assert!(validate_identifier("_hidden").is_none());
        assert!(validate_identifier("$Proxy1").is_none());
        assert!(validate_identifier("util2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("my-type").is_some());
        assert!(validate_identifier("class").is_some());
        assert!(validate_identifier("null").is_some());
    }

    #[test]
    fn test_qualified_names() {
        assert!(validate_qualified("com.example.app").is_none());
        assert!(validate_qualified("app").is_none());
        assert_eq!(
            validate_qualified("com..app"),
            Some("name cannot contain empty segments")
        );
        assert!(validate_qualified("com.class.app").is_some());
    }

    #[test]
    fn test_imports() {
        assert!(validate_import("com.lib.Util").is_none());
        assert_eq!(
            validate_import("Util"),
            Some("import must be qualified with a package")
        );
        assert!(validate_import("com.lib.").is_some());
    }
}
