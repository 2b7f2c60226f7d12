//! Fatal escalation from a plugin to the host's top-level driver.
//!
//! Hosts wrap every error a callback returns in their own context layers
//! (which plugin, which unit, which phase). An [`Escalation`] rides inside
//! those layers as the root error, and [`Escalation::find`] digs it back out
//! so the driver can report exactly the plugin's status and message.

use thiserror::Error;

use crate::{ExitStatus, TerminalStatus};

/// An immutable request to abort the whole compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Escalation {
    status: TerminalStatus,
    message: String,
}

impl Escalation {
    /// Create a new escalation signal.
    pub fn new(status: TerminalStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The status the run must exit with.
    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    /// The exit status as the host's result enumeration.
    pub fn exit_status(&self) -> ExitStatus {
        self.status.into()
    }

    /// The message printed before shutting down.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Find an escalation anywhere in an error chain.
    ///
    /// The chain is walked from the outermost context layer inwards, so the
    /// signal is found no matter how many layers the host wrapped around it.
    pub fn find(report: &eyre::Report) -> Option<&Escalation> {
        report
            .chain()
            .find_map(|cause| cause.downcast_ref::<Escalation>())
    }
}

/// Abort the compilation run with the given status and message.
///
/// Always returns `Err`; callers propagate it with `?` or `return`:
///
/// ```
/// use stagehook_core::{TerminalStatus, raise_fatal};
///
/// fn check(cyclic: bool) -> eyre::Result<()> {
///     if cyclic {
///         return raise_fatal(TerminalStatus::Error, "illegal import cycle");
///     }
///     Ok(())
/// }
///
/// assert!(check(true).is_err());
/// ```
pub fn raise_fatal<T>(status: TerminalStatus, message: impl Into<String>) -> eyre::Result<T> {
    let escalation = Escalation::new(status, message);
    tracing::debug!(
        status = %escalation.status(),
        message = escalation.message(),
        "fatal escalation raised"
    );
    Err(escalation.into())
}
