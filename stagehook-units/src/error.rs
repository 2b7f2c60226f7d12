use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for source-set operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename so validation code can
/// build errors with labelled spans without threading both around.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> SourceContext<'a> {
    /// Create a new source context.
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Find the span of the `n`-th occurrence of a quoted string value.
    pub fn find_value(&self, value: &str, n: usize) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", value);
        self.src
            .match_indices(&needle)
            .nth(n)
            // +1 to skip the opening quote
            .map(|(pos, _)| SourceSpan::from((pos + 1, value.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an invalid package error.
    pub fn invalid_package_error(&self, package: &str, reason: &str) -> Box<Error> {
        Box::new(Error::InvalidPackage {
            src: self.named_source(),
            span: self.find_value(package, 0),
            package: package.into(),
            reason: reason.into(),
        })
    }

    /// Create an invalid import error.
    pub fn invalid_import_error(&self, unit: &str, import: &str, reason: &str) -> Box<Error> {
        Box::new(Error::InvalidImport {
            src: self.named_source(),
            span: self.find_value(import, 0),
            unit: unit.into(),
            import: import.into(),
            reason: reason.into(),
        })
    }

    /// Create an invalid name error for a type or method.
    pub fn invalid_name_error(&self, name: &str, kind: &str, reason: &str) -> Box<Error> {
        Box::new(Error::InvalidName {
            src: self.named_source(),
            span: self.find_value(name, 0),
            name: name.into(),
            kind: kind.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate unit path error.
    pub fn duplicate_unit_error(&self, path: &str) -> Box<Error> {
        Box::new(Error::DuplicateUnit {
            src: self.named_source(),
            first_span: self.find_value(path, 0),
            second_span: self.find_value(path, 1),
            path: path.into(),
        })
    }

    /// Create a duplicate type declaration error.
    pub fn duplicate_type_error(
        &self,
        qualified: &str,
        first_unit: &str,
        second_unit: &str,
    ) -> Box<Error> {
        Box::new(Error::DuplicateType {
            src: self.named_source(),
            first_span: self.find_value(first_unit, 0),
            second_span: self.find_value(second_unit, 0),
            qualified: qualified.into(),
            first_unit: first_unit.into(),
            second_unit: second_unit.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the source set with '--units <path>'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse source set")]
    #[diagnostic(code(stagehook::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid package '{package}'")]
    #[diagnostic(
        code(stagehook::invalid_package),
        help("{reason}. Packages are dot-separated identifiers, e.g. 'com.example.app'")
    )]
    InvalidPackage {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid package")]
        span: Option<SourceSpan>,
        package: String,
        reason: String,
    },

    #[error("invalid import '{import}' in '{unit}'")]
    #[diagnostic(
        code(stagehook::invalid_import),
        help("{reason}. Imports name a single type, e.g. 'com.example.Util'")
    )]
    InvalidImport {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid import")]
        span: Option<SourceSpan>,
        unit: String,
        import: String,
        reason: String,
    },

    #[error("invalid {kind} name '{name}'")]
    #[diagnostic(
        code(stagehook::invalid_name),
        help("{reason}. Use only letters, digits, '_' and '$', starting with a letter, '_' or '$'")
    )]
    InvalidName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        kind: String,
        reason: String,
    },

    #[error("duplicate unit '{path}'")]
    #[diagnostic(
        code(stagehook::duplicate_unit),
        help("each unit path may appear only once in the source set")
    )]
    DuplicateUnit {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        path: String,
    },

    #[error("duplicate type '{qualified}'")]
    #[diagnostic(
        code(stagehook::duplicate_type),
        help("'{qualified}' is declared by both '{first_unit}' and '{second_unit}'")
    )]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared by this unit")]
        first_span: Option<SourceSpan>,
        #[label("declared again by this unit")]
        second_span: Option<SourceSpan>,
        qualified: String,
        first_unit: String,
        second_unit: String,
    },
}
