use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use rutina_domain::{Routine, RoutineID, RoutineService, RoutineSummary, TrainerID};

use crate::{SubmitError, view::ViewState};

const LOAD_FAILED: &str = "Could not load the routines";
const DELETE_FAILED: &str = "Could not delete the routine";

/// List of the routines of a trainer.
pub struct RoutinesView<S> {
    service: Rc<S>,
    trainer_id: TrainerID,
    routines: RefCell<Vec<RoutineSummary>>,
    state: ViewState,
}

impl<S: RoutineService> RoutinesView<S> {
    #[must_use]
    pub fn new(service: Rc<S>, trainer_id: TrainerID) -> Self {
        Self {
            service,
            trainer_id,
            routines: RefCell::new(vec![]),
            state: ViewState::default(),
        }
    }

    pub async fn load(&self) -> Result<(), SubmitError> {
        let routines = self
            .state
            .read(self.service.get_routines(self.trainer_id.clone()), |err| {
                err.user_message(LOAD_FAILED)
            })
            .await?;
        *self.routines.borrow_mut() = routines;
        Ok(())
    }

    pub fn routines(&self) -> Ref<'_, Vec<RoutineSummary>> {
        self.routines.borrow()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    pub fn dismiss_error(&self) {
        self.state.dismiss_error();
    }

    /// Patch the list with a routine confirmed by the backend.
    pub fn apply_saved(&self, routine: &Routine) {
        let Some(summary) = routine.summary() else {
            return;
        };
        let mut routines = self.routines.borrow_mut();
        match routines.iter_mut().find(|r| r.id == summary.id) {
            Some(existing) => *existing = summary,
            None => routines.push(summary),
        }
    }

    pub async fn delete(&self, id: RoutineID) -> Result<(), SubmitError> {
        let deleted = self
            .state
            .write(self.service.delete_routine(id), |err| {
                err.user_message(DELETE_FAILED)
            })
            .await?;
        self.routines.borrow_mut().retain(|r| r.id != deleted);
        Ok(())
    }

    pub fn close(&self) {
        self.state.scope.close();
    }
}
