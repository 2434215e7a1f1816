use std::{cell::RefCell, future::Future};

use crate::{SubmitError, SubmitGuard, ViewScope};

/// Plumbing shared by all view models: the scope of the view, its submit guard and the
/// message of the error banner.
#[derive(Default)]
pub(crate) struct ViewState {
    pub(crate) scope: ViewScope,
    pub(crate) guard: SubmitGuard,
    error: RefCell<Option<String>>,
}

impl ViewState {
    pub(crate) fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub(crate) fn dismiss_error(&self) {
        *self.error.borrow_mut() = None;
    }

    /// Show `error` in the banner and return it.
    pub(crate) fn reject<T>(&self, error: SubmitError) -> Result<T, SubmitError> {
        *self.error.borrow_mut() = Some(error.to_string());
        Err(error)
    }

    /// Run a read inside the scope of the view.
    pub(crate) async fn read<T, E>(
        &self,
        call: impl Future<Output = Result<T, E>>,
        message: impl FnOnce(E) -> String,
    ) -> Result<T, SubmitError> {
        match self.scope.run(call).await {
            None => Err(SubmitError::Closed),
            Some(Ok(value)) => {
                self.dismiss_error();
                Ok(value)
            }
            Some(Err(err)) => self.reject(SubmitError::Failed(message(err))),
        }
    }

    /// Run a write inside the scope of the view, refusing it while another write is in flight.
    pub(crate) async fn write<T, E>(
        &self,
        call: impl Future<Output = Result<T, E>>,
        message: impl FnOnce(E) -> String,
    ) -> Result<T, SubmitError> {
        let _ticket = self.guard.try_begin()?;
        self.read(call, message).await
    }
}
