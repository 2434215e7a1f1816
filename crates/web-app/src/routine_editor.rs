use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use rutina_domain::{
    EditorError, EditorMode, Routine, RoutineEditor, RoutineID, RoutineService, TrainerID,
};

use crate::{SubmitError, view::ViewState};

const LOAD_FAILED: &str = "Could not load the routine";
const CREATE_FAILED: &str = "Could not create the routine";
const UPDATE_FAILED: &str = "Could not update the routine";
const NOT_LOADED: &str = "The routine has not been loaded yet";

/// Modal for creating or editing a routine.
pub struct RoutineEditorModal<S> {
    service: Rc<S>,
    editor: RefCell<RoutineEditor>,
    loading: Cell<bool>,
    state: ViewState,
}

impl<S: RoutineService> RoutineEditorModal<S> {
    /// Modal for a new routine, seeded with one week, day and exercise.
    #[must_use]
    pub fn create(service: Rc<S>, trainer_id: Option<TrainerID>) -> Self {
        Self::with_editor(service, RoutineEditor::create(trainer_id))
    }

    #[must_use]
    pub fn edit(service: Rc<S>, routine: Routine) -> Self {
        Self::with_editor(service, RoutineEditor::edit(routine))
    }

    /// Modal for an existing routine that is fetched by [`RoutineEditorModal::load`].
    #[must_use]
    pub fn open(service: Rc<S>) -> Self {
        let modal = Self::with_editor(service, RoutineEditor::create(None));
        modal.loading.set(true);
        modal
    }

    /// Fetch a routine and open it for editing.
    ///
    /// The fetch is discarded if the modal is closed before the response arrives.
    pub async fn load(&self, id: RoutineID) -> Result<(), SubmitError> {
        let routine = self
            .state
            .read(self.service.get_routine(id), |err| {
                err.user_message(LOAD_FAILED)
            })
            .await?;
        *self.editor.borrow_mut() = RoutineEditor::edit(routine);
        self.loading.set(false);
        Ok(())
    }

    fn with_editor(service: Rc<S>, editor: RoutineEditor) -> Self {
        Self {
            service,
            editor: RefCell::new(editor),
            loading: Cell::new(false),
            state: ViewState::default(),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn editor(&self) -> Ref<'_, RoutineEditor> {
        self.editor.borrow()
    }

    /// Apply an editing operation to the document.
    pub fn update<T>(
        &self,
        operation: impl FnOnce(&mut RoutineEditor) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        operation(&mut self.editor.borrow_mut())
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

    /// Validate the document and send it to the backend.
    ///
    /// On success the routine as returned by the backend is handed back, so that the caller
    /// can patch its list.
    pub async fn submit(&self) -> Result<Routine, SubmitError> {
        let _ticket = self.state.guard.try_begin()?;

        if self.is_loading() {
            return self
                .state
                .reject(SubmitError::Invalid(NOT_LOADED.to_string()));
        }

        let (mode, routine) = {
            let editor = self.editor.borrow();
            (editor.mode().clone(), editor.validate())
        };
        let routine = match routine {
            Ok(routine) => routine,
            Err(err) => return self.state.reject(SubmitError::Invalid(err.to_string())),
        };

        match mode {
            EditorMode::Create => {
                self.state
                    .read(self.service.create_routine(routine), |err| {
                        err.user_message(CREATE_FAILED)
                    })
                    .await
            }
            EditorMode::Edit(id) => {
                self.state
                    .read(self.service.replace_routine(id, routine), |err| {
                        err.user_message(UPDATE_FAILED)
                    })
                    .await
            }
        }
    }

    /// Close the modal. Responses of calls still in flight are discarded.
    pub fn close(&self) {
        self.state.scope.close();
    }
}
