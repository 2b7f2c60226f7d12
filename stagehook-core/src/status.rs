//! Exit statuses reported by a compilation run.

use serde::Serialize;

/// The final status of a compilation run.
///
/// Codes match the host compiler's result enumeration, so the value can be
/// passed straight to `std::process::exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatus {
    /// Compilation completed without errors.
    Ok,
    /// Compilation completed with errors.
    Error,
    /// The command line was rejected.
    CmdErr,
    /// A system resource (file, directory) was unavailable.
    SysErr,
    /// The compiler or one of its plugins failed unexpectedly.
    Abnormal,
}

impl ExitStatus {
    /// The process exit code for this status.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::Error => 1,
            ExitStatus::CmdErr => 2,
            ExitStatus::SysErr => 3,
            ExitStatus::Abnormal => 4,
        }
    }

    /// Returns true if this is the success status.
    pub fn is_ok(self) -> bool {
        matches!(self, ExitStatus::Ok)
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitStatus::Ok => write!(f, "ok"),
            ExitStatus::Error => write!(f, "error"),
            ExitStatus::CmdErr => write!(f, "cmderr"),
            ExitStatus::SysErr => write!(f, "syserr"),
            ExitStatus::Abnormal => write!(f, "abnormal"),
        }
    }
}

/// A non-success status that a plugin may abort a run with.
///
/// Keeping success out of this type makes it impossible to escalate with
/// [`ExitStatus::Ok`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalStatus {
    Error,
    CmdErr,
    SysErr,
    Abnormal,
}

impl From<TerminalStatus> for ExitStatus {
    fn from(status: TerminalStatus) -> Self {
        match status {
            TerminalStatus::Error => ExitStatus::Error,
            TerminalStatus::CmdErr => ExitStatus::CmdErr,
            TerminalStatus::SysErr => ExitStatus::SysErr,
            TerminalStatus::Abnormal => ExitStatus::Abnormal,
        }
    }
}

impl std::fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ExitStatus::from(*self).fmt(f)
    }
}
