//! The result of a compilation run.

use stagehook_core::{Diagnostic, Escalation, ExitStatus, InvalidCommandLine};

use crate::LifecycleState;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every unit went through every phase and every plugin finished.
    ///
    /// The status is [`ExitStatus::Error`] if errors were logged.
    Completed { status: ExitStatus },
    /// A plugin escalated; its status and message are kept verbatim.
    Aborted(Escalation),
    /// A plugin rejected the command line before compilation started.
    InvalidCommandLine(InvalidCommandLine),
    /// A plugin or the host failed with something other than an escalation.
    Crashed { message: String },
}

impl RunOutcome {
    /// The status the process should exit with.
    pub fn status(&self) -> ExitStatus {
        match self {
            RunOutcome::Completed { status } => *status,
            RunOutcome::Aborted(escalation) => escalation.exit_status(),
            RunOutcome::InvalidCommandLine(_) => ExitStatus::CmdErr,
            RunOutcome::Crashed { .. } => ExitStatus::Abnormal,
        }
    }

    /// The message to print to the error stream, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            RunOutcome::Completed { .. } => None,
            RunOutcome::Aborted(escalation) => Some(escalation.message().to_string()),
            RunOutcome::InvalidCommandLine(err) => Some(format!("invalid command line: {}", err)),
            RunOutcome::Crashed { message } => Some(message.clone()),
        }
    }

    /// The escalation that aborted the run, if any.
    pub fn escalation(&self) -> Option<&Escalation> {
        match self {
            RunOutcome::Aborted(escalation) => Some(escalation),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status().is_ok()
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Diagnostics from host phases and plugins, in reporting order.
    pub diagnostics: Vec<Diagnostic>,
    /// The lifecycle state the run ended in.
    pub state: LifecycleState,
    /// Units that went through both phases.
    pub units_compiled: usize,
}
