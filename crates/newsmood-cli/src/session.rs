//! One-shot run trigger that re-arms itself after each run.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum SessionError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Lifecycle of a user-triggered analysis run.
///
/// `Idle -> Triggered -> Running -> Done -> Idle`. A new trigger is refused
/// while a run is pending or in progress, which is the only reentrancy guard
/// the pipeline relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum RunState {
    #[default]
    Idle,
    Triggered {
        query: String,
    },
    Running {
        query: String,
    },
    Done,
}

impl RunState {
    fn name(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Triggered { .. } => "triggered",
            RunState::Running { .. } => "running",
            RunState::Done => "done",
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.name(),
        }
    }

    /// Arm a run for `query`. Allowed from `Idle` or `Done`.
    pub(crate) fn trigger(&mut self, query: &str) -> Result<(), SessionError> {
        if self.is_active() {
            return Err(self.invalid("trigger"));
        }
        *self = RunState::Triggered {
            query: query.to_string(),
        };
        Ok(())
    }

    /// Move a triggered run to `Running`, handing back its query.
    pub(crate) fn start(&mut self) -> Result<String, SessionError> {
        match std::mem::take(self) {
            RunState::Triggered { query } => {
                *self = RunState::Running {
                    query: query.clone(),
                };
                Ok(query)
            }
            other => {
                let err = other.invalid("start");
                *self = other;
                Err(err)
            }
        }
    }

    /// Mark the running run as finished, whether it succeeded or not.
    pub(crate) fn finish(&mut self) -> Result<(), SessionError> {
        match self {
            RunState::Running { .. } => {
                *self = RunState::Done;
                Ok(())
            }
            _ => Err(self.invalid("finish")),
        }
    }

    /// Re-arm after a finished run so the next trigger is accepted.
    pub(crate) fn reset(&mut self) {
        if matches!(self, RunState::Done) {
            *self = RunState::Idle;
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        matches!(self, RunState::Triggered { .. } | RunState::Running { .. })
    }
}
