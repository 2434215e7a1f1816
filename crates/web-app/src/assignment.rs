use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use chrono::NaiveDate;
use rutina_domain::{Assignment, AssignmentForm, AssignmentService, RoutineID, User, UserService};

use crate::{SubmitError, view::ViewState};

const USERS_FAILED: &str = "Could not load the users";
const ASSIGN_FAILED: &str = "Could not assign the routine";

/// Modal for assigning a routine to a user.
pub struct AssignmentModal<S> {
    service: Rc<S>,
    form: RefCell<AssignmentForm>,
    users: RefCell<Vec<User>>,
    on_assigned: Box<dyn Fn(&Assignment)>,
    state: ViewState,
}

impl<S: AssignmentService + UserService> AssignmentModal<S> {
    /// `on_assigned` is invoked after the backend confirmed an assignment, so that the opening
    /// view can refresh its data.
    pub fn new(
        service: Rc<S>,
        today: NaiveDate,
        routine_id: Option<RoutineID>,
        on_assigned: impl Fn(&Assignment) + 'static,
    ) -> Self {
        let mut form = AssignmentForm::new(today);
        form.routine_id = routine_id;
        Self {
            service,
            form: RefCell::new(form),
            users: RefCell::new(vec![]),
            on_assigned: Box::new(on_assigned),
            state: ViewState::default(),
        }
    }

    /// Fetch the users that can be picked.
    pub async fn load_users(&self) -> Result<(), SubmitError> {
        let users = self
            .state
            .read(self.service.get_users(), |err| {
                err.user_message(USERS_FAILED)
            })
            .await?;
        *self.users.borrow_mut() = users;
        Ok(())
    }

    pub fn users(&self) -> Ref<'_, Vec<User>> {
        self.users.borrow()
    }

    pub fn form(&self) -> Ref<'_, AssignmentForm> {
        self.form.borrow()
    }

    pub fn update_form(&self, update: impl FnOnce(&mut AssignmentForm)) {
        update(&mut self.form.borrow_mut());
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    pub fn dismiss_error(&self) {
        self.state.dismiss_error();
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.state.guard.is_busy()
    }

    pub async fn submit(&self) -> Result<Assignment, SubmitError> {
        let _ticket = self.state.guard.try_begin()?;

        let request = match self.form.borrow().validate() {
            Ok(request) => request,
            Err(err) => return self.state.reject(SubmitError::Invalid(err.to_string())),
        };

        let assignment = self
            .state
            .read(self.service.assign_routine(request), |err| {
                err.user_message(ASSIGN_FAILED)
            })
            .await?;
        (self.on_assigned)(&assignment);
        Ok(assignment)
    }

    pub fn close(&self) {
        self.state.scope.close();
    }
}
