use std::{cell::RefCell, collections::BTreeMap, future::Future, rc::Rc};

use futures_util::future::{AbortHandle, Abortable};

/// Lifetime of a view.
///
/// Every network call of a view runs inside its scope. Closing the scope aborts all calls in
/// flight, so that no response updates the state of a view that is gone.
#[derive(Clone, Default)]
pub struct ViewScope {
    inner: Rc<RefCell<ScopeState>>,
}

#[derive(Default)]
struct ScopeState {
    closed: bool,
    next_task: u64,
    tasks: BTreeMap<u64, AbortHandle>,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `future` to completion unless the scope is closed first.
    ///
    /// Returns `None` if the scope was closed before or while the future was running.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();
        let task = {
            let mut state = self.inner.borrow_mut();
            if state.closed {
                return None;
            }
            let task = state.next_task;
            state.next_task += 1;
            state.tasks.insert(task, handle);
            task
        };

        let output = Abortable::new(future, registration).await.ok();

        let mut state = self.inner.borrow_mut();
        state.tasks.remove(&task);
        if state.closed { None } else { output }
    }

    pub fn close(&self) {
        let mut state = self.inner.borrow_mut();
        state.closed = true;
        for handle in std::mem::take(&mut state.tasks).into_values() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }
}
