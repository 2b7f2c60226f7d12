//! Compile command report data structures.

use std::path::{Path, PathBuf};

use serde::Serialize;
use stagehook_core::{Diagnostic, ExitStatus};
use stagehook_host::{LifecycleState, RunReport};

use super::output::{Output, Report};

/// Report data from a compilation run.
#[derive(Debug)]
pub struct CompileReport {
    /// Path to the source set.
    pub units_path: PathBuf,
    pub run: RunReport,
}

/// Machine-readable form of a [`CompileReport`].
#[derive(Debug, Serialize)]
pub struct JsonCompileReport<'a> {
    pub units: &'a Path,
    pub status: ExitStatus,
    pub code: i32,
    pub state: LifecycleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub units_compiled: usize,
    pub diagnostics: &'a [Diagnostic],
}

impl CompileReport {
    pub fn new(units_path: impl Into<PathBuf>, run: RunReport) -> Self {
        Self {
            units_path: units_path.into(),
            run,
        }
    }

    pub fn to_json(&self) -> JsonCompileReport<'_> {
        let status = self.run.outcome.status();
        JsonCompileReport {
            units: &self.units_path,
            status,
            code: status.code(),
            state: self.run.state,
            message: self.run.outcome.message(),
            units_compiled: self.run.units_compiled,
            diagnostics: &self.run.diagnostics,
        }
    }
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.run.diagnostics {
            out.diagnostic(&diagnostic.to_string());
        }

        let errors = self
            .run
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count();
        let warnings = self
            .run
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count();

        if !self.run.diagnostics.is_empty() {
            out.newline();
        }
        // The outcome message is printed by the caller, never here
        out.preformatted(&format!(
            "{}: compiled {} unit{} ({} error{}, {} warning{}), {}",
            self.units_path.display(),
            self.run.units_compiled,
            plural(self.run.units_compiled),
            errors,
            plural(errors),
            warnings,
            plural(warnings),
            self.run.state,
        ));
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use stagehook_core::{Escalation, TerminalStatus};
    use stagehook_host::RunOutcome;

    use super::*;
    use crate::reports::BufferOutput;

    fn make_report(
        outcome: RunOutcome,
        state: LifecycleState,
        units_compiled: usize,
    ) -> CompileReport {
        CompileReport::new(
            "units.toml",
            RunReport {
                outcome,
                diagnostics: vec![
                    Diagnostic::warning("import-cycles", "import cycle: a -> b -> a")
                        .in_unit("B.java"),
                    Diagnostic::note("import-cycles", "1 import cycle(s) across 2 package edge(s)"),
                ],
                state,
                units_compiled,
            },
        )
    }

    #[test]
    fn test_render_completed() {
        let report = make_report(
            RunOutcome::Completed {
                status: ExitStatus::Ok,
            },
            LifecycleState::Finished,
            2,
        );

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        B.java: warning: [import-cycles] import cycle: a -> b -> a
        note: [import-cycles] 1 import cycle(s) across 2 package edge(s)

        units.toml: compiled 2 units (0 errors, 1 warning), finished
        ");
    }

    #[test]
    fn test_render_never_repeats_escalation_message() {
        let report = make_report(
            RunOutcome::Aborted(Escalation::new(TerminalStatus::Error, "illegal import cycle")),
            LifecycleState::Aborted,
            1,
        );

        let rendered = BufferOutput::render(&report);
        assert!(!rendered.contains("illegal import cycle"));
        assert!(rendered.ends_with("compiled 1 unit (0 errors, 1 warning), aborted"));
    }

    #[test]
    fn test_json() {
        let report = make_report(
            RunOutcome::Aborted(Escalation::new(TerminalStatus::Error, "illegal import cycle")),
            LifecycleState::Aborted,
            1,
        );

        let json = serde_json::to_value(report.to_json()).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], 1);
        assert_eq!(json["state"], "aborted");
        assert_eq!(json["message"], "illegal import cycle");
        assert_eq!(json["diagnostics"][0]["severity"], "warning");
        assert_eq!(json["diagnostics"][1].get("unit"), None);
    }
}
