//! Per-run lifecycle state machine.

use serde::Serialize;
use thiserror::Error;

/// The lifecycle state of one compilation run.
///
/// ```text
/// NotStarted -> ArgsProcessed -> Initialized -> PhaseLoop -> Finished
///                    |               |              |
///                    +---------------+--------------+--> Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    NotStarted,
    ArgsProcessed,
    Initialized,
    PhaseLoop,
    Finished,
    Aborted,
}

impl LifecycleState {
    /// Returns true for states a run can never leave.
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Finished | LifecycleState::Aborted)
    }

    /// Check whether moving to `next` is legal.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;

        matches!(
            (self, next),
            (NotStarted, ArgsProcessed)
                | (ArgsProcessed, Initialized)
                | (Initialized, PhaseLoop)
                | (PhaseLoop, Finished)
                | (ArgsProcessed | Initialized | PhaseLoop, Aborted)
        )
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleState::NotStarted => "not-started",
            LifecycleState::ArgsProcessed => "args-processed",
            LifecycleState::Initialized => "initialized",
            LifecycleState::PhaseLoop => "phase-loop",
            LifecycleState::Finished => "finished",
            LifecycleState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal lifecycle transition from {from} to {to}")]
pub struct LifecycleError {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

/// Tracks and enforces the lifecycle of a single run.
#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::NotStarted,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Move to the next state.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] if the transition is not allowed; the
    /// state is left unchanged.
    pub fn advance(&mut self, next: LifecycleState) -> Result<(), LifecycleError> {
        if !self.state.can_transition_to(next) {
            return Err(LifecycleError {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!(from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
        Ok(())
    }

    /// Abort the run.
    pub fn abort(&mut self) -> Result<(), LifecycleError> {
        self.advance(LifecycleState::Aborted)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    #[test]
    fn test_happy_path() {
        let mut lifecycle = Lifecycle::new();
        for next in [ArgsProcessed, Initialized, PhaseLoop, Finished] {
            lifecycle.advance(next).expect("transition should be legal");
        }
        assert_eq!(lifecycle.state(), Finished);
        assert!(lifecycle.state().is_terminal());
    }

    #[test]
    fn test_abort_from_active_states() {
        for reached in [
            &[ArgsProcessed][..],
            &[ArgsProcessed, Initialized],
            &[ArgsProcessed, Initialized, PhaseLoop],
        ] {
            let mut lifecycle = Lifecycle::new();
            for next in reached {
                lifecycle.advance(*next).unwrap();
            }
            lifecycle.abort().expect("abort should be legal");
            assert_eq!(lifecycle.state(), Aborted);
        }
    }

    #[test]
    fn test_abort_not_allowed_before_start() {
        let mut lifecycle = Lifecycle::new();
        let err = lifecycle.abort().unwrap_err();
        assert_eq!(
            err,
            LifecycleError {
                from: NotStarted,
                to: Aborted
            }
        );
        assert_eq!(lifecycle.state(), NotStarted);
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [Finished, Aborted] {
            for next in [
                NotStarted,
                ArgsProcessed,
                Initialized,
                PhaseLoop,
                Finished,
                Aborted,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_cannot_skip_initialization() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(ArgsProcessed).unwrap();
        let err = lifecycle.advance(PhaseLoop).unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal lifecycle transition from args-processed to phase-loop"
        );
    }
}
