use std::{cell::Cell, rc::Rc};

/// Failure of a user action in a view.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    InProgress,
    #[error("The view has been closed")]
    Closed,
    #[error("Example data cannot be modified")]
    Degraded,
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Failed(String),
}

/// Guard against a second submission while one is in flight.
///
/// All write actions of a view share one guard.
#[derive(Clone, Default)]
pub struct SubmitGuard {
    busy: Rc<Cell<bool>>,
}

impl SubmitGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a submission as started. The guard is released when the ticket is dropped.
    pub fn try_begin(&self) -> Result<SubmitTicket, SubmitError> {
        if self.busy.replace(true) {
            return Err(SubmitError::InProgress);
        }
        Ok(SubmitTicket {
            busy: self.busy.clone(),
        })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

#[must_use]
pub struct SubmitTicket {
    busy: Rc<Cell<bool>>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
