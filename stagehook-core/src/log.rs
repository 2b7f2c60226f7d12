//! The shared diagnostic log.

use crate::{Diagnostic, Severity};

/// Diagnostics collected during a run, in the order they were reported.
///
/// The host owns the log and lends it to plugins through
/// [`PluginContext`](crate::PluginContext). Writing to the log never stops
/// the run; only an escalation does.
#[derive(Debug, Default)]
pub struct Log {
    diagnostics: Vec<Diagnostic>,
    warnings_as_errors: bool,
}

impl Log {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote every warning reported from now on to an error.
    pub fn set_warnings_as_errors(&mut self, enabled: bool) {
        self.warnings_as_errors = enabled;
    }

    /// Record a diagnostic.
    pub fn report(&mut self, mut diagnostic: Diagnostic) {
        if self.warnings_as_errors && diagnostic.severity.is_warning() {
            diagnostic.severity = Severity::Error;
        }
        tracing::trace!(
            source = %diagnostic.source,
            severity = %diagnostic.severity,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// Add an error diagnostic.
    pub fn error(&mut self, source: &str, message: impl Into<String>) {
        self.report(Diagnostic::error(source, message));
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, source: &str, message: impl Into<String>) {
        self.report(Diagnostic::warning(source, message));
    }

    /// Add a note diagnostic.
    pub fn note(&mut self, source: &str, message: impl Into<String>) {
        self.report(Diagnostic::note(source, message));
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    /// All diagnostics in reporting order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics reported by a single phase or plugin.
    pub fn from_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.source == source)
    }

    /// Number of diagnostics recorded.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the log, returning its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_counts() {
        let mut log = Log::new();

        log.error("attribute", "cannot find symbol");
        log.warning("naming", "bad name");
        log.note("naming", "1 warning");

        assert!(log.has_errors());
        assert!(log.has_warnings());
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.warning_count(), 1);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_log_no_errors() {
        let mut log = Log::new();

        log.warning("naming", "just a warning");
        log.note("naming", "just a note");

        assert!(!log.has_errors());
        assert!(log.has_warnings());
    }

    #[test]
    fn test_warnings_as_errors() {
        let mut log = Log::new();
        log.warning("naming", "before");
        log.set_warnings_as_errors(true);
        log.warning("naming", "after");

        assert_eq!(log.warning_count(), 1);
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.diagnostics()[1].message, "after");
    }

    #[test]
    fn test_from_source() {
        let mut log = Log::new();
        log.error("flow", "unreachable statement");
        log.warning("strict-deps", "missing direct dependency");
        log.warning("strict-deps", "another");

        assert_eq!(log.from_source("strict-deps").count(), 2);
        assert_eq!(log.from_source("flow").count(), 1);
        assert_eq!(log.from_source("naming").count(), 0);
    }
}
