use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use rutina_domain::{
    Exercise, ExerciseFolder, ExerciseID, ExerciseService, Fetched, MuscleGroup, MuscleGroupID,
    MuscleGroupService, Name, NewExercise, catalog, selectable_muscle_groups,
};

use crate::{SubmitError, view::ViewState};

const SAVE_MUSCLE_GROUP_FAILED: &str = "Could not save the muscle group";
const DELETE_MUSCLE_GROUP_FAILED: &str = "Could not delete the muscle group";
const SAVE_EXERCISE_FAILED: &str = "Could not save the exercise";
const DELETE_EXERCISE_FAILED: &str = "Could not delete the exercise";
const FOLDERS_FAILED: &str = "Could not load the exercise folders";
const IMAGE_FAILED: &str = "Could not load the exercise image";
const MUSCLE_GROUP_MISSING: &str = "Select an active muscle group";

/// Management view of the muscle groups.
pub struct MuscleGroupsView<S> {
    service: Rc<S>,
    muscle_groups: RefCell<Fetched<Vec<MuscleGroup>>>,
    state: ViewState,
}

impl<S: MuscleGroupService> MuscleGroupsView<S> {
    #[must_use]
    pub fn new(service: Rc<S>) -> Self {
        Self {
            service,
            muscle_groups: RefCell::new(Fetched::Live(vec![])),
            state: ViewState::default(),
        }
    }

    /// Fetch the muscle groups. If that fails, the fallback dataset is displayed instead.
    pub async fn load(&self) -> Result<(), SubmitError> {
        let muscle_groups = self
            .state
            .scope
            .run(self.service.get_muscle_groups())
            .await
            .ok_or(SubmitError::Closed)?;
        *self.muscle_groups.borrow_mut() = muscle_groups;
        Ok(())
    }

    pub fn muscle_groups(&self) -> Ref<'_, Vec<MuscleGroup>> {
        Ref::map(self.muscle_groups.borrow(), Fetched::as_inner)
    }

    /// The fallback dataset is displayed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.muscle_groups.borrow().is_fallback()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    pub fn dismiss_error(&self) {
        self.state.dismiss_error();
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<(), SubmitError> {
        let name = self.check_writable(name, None)?;
        let muscle_group = self
            .state
            .write(
                self.service
                    .create_muscle_group(name, description.trim().to_string()),
                |err| err.user_message(SAVE_MUSCLE_GROUP_FAILED),
            )
            .await?;
        self.patch(muscle_group);
        Ok(())
    }

    pub async fn update(
        &self,
        id: MuscleGroupID,
        name: &str,
        description: &str,
    ) -> Result<(), SubmitError> {
        let name = self.check_writable(name, Some(&id))?;
        let Some(is_active) = self.find(&id).map(|g| g.is_active) else {
            return self.state.reject(SubmitError::Invalid(format!(
                "Muscle group {id} does not exist"
            )));
        };
        let muscle_group = self
            .state
            .write(
                self.service.replace_muscle_group(MuscleGroup {
                    id,
                    name,
                    description: description.trim().to_string(),
                    is_active,
                }),
                |err| err.user_message(SAVE_MUSCLE_GROUP_FAILED),
            )
            .await?;
        self.patch(muscle_group);
        Ok(())
    }

    /// Activate an inactive muscle group or deactivate an active one.
    pub async fn toggle_status(&self, id: MuscleGroupID) -> Result<(), SubmitError> {
        if self.is_degraded() {
            return self.state.reject(SubmitError::Degraded);
        }
        let Some(is_active) = self.find(&id).map(|g| g.is_active) else {
            return self.state.reject(SubmitError::Invalid(format!(
                "Muscle group {id} does not exist"
            )));
        };
        let muscle_group = self
            .state
            .write(
                self.service.set_muscle_group_status(id, !is_active),
                |err| err.user_message(SAVE_MUSCLE_GROUP_FAILED),
            )
            .await?;
        self.patch(muscle_group);
        Ok(())
    }

    pub async fn delete(&self, id: MuscleGroupID) -> Result<(), SubmitError> {
        if self.is_degraded() {
            return self.state.reject(SubmitError::Degraded);
        }
        let deleted = self
            .state
            .write(self.service.delete_muscle_group(id), |err| {
                err.user_message(DELETE_MUSCLE_GROUP_FAILED)
            })
            .await?;
        if let Fetched::Live(muscle_groups) = &mut *self.muscle_groups.borrow_mut() {
            muscle_groups.retain(|g| g.id != deleted);
        }
        Ok(())
    }

    pub fn close(&self) {
        self.state.scope.close();
    }

    fn find(&self, id: &MuscleGroupID) -> Option<MuscleGroup> {
        self.muscle_groups()
            .iter()
            .find(|g| &g.id == id)
            .cloned()
    }

    fn check_writable(&self, name: &str, id: Option<&MuscleGroupID>) -> Result<Name, SubmitError> {
        if self.is_degraded() {
            return self.state.reject(SubmitError::Degraded);
        }
        let muscle_groups = self.muscle_groups();
        let others = muscle_groups
            .iter()
            .filter(|g| Some(&g.id) != id)
            .map(|g| &g.name);
        match Name::new_unique(name, others) {
            Ok(name) => Ok(name),
            Err(err) => self.state.reject(SubmitError::Invalid(err.to_string())),
        }
    }

    fn patch(&self, muscle_group: MuscleGroup) {
        if let Fetched::Live(muscle_groups) = &mut *self.muscle_groups.borrow_mut() {
            match muscle_groups.iter_mut().find(|g| g.id == muscle_group.id) {
                Some(existing) => *existing = muscle_group,
                None => muscle_groups.push(muscle_group),
            }
        }
    }
}

/// Management view of the catalog exercises.
pub struct ExercisesView<S> {
    service: Rc<S>,
    exercises: RefCell<Fetched<Vec<Exercise>>>,
    muscle_groups: RefCell<Fetched<Vec<MuscleGroup>>>,
    state: ViewState,
}

impl<S: ExerciseService + MuscleGroupService> ExercisesView<S> {
    #[must_use]
    pub fn new(service: Rc<S>) -> Self {
        Self {
            service,
            exercises: RefCell::new(Fetched::Live(vec![])),
            muscle_groups: RefCell::new(Fetched::Live(vec![])),
            state: ViewState::default(),
        }
    }

    /// Fetch the exercises and the muscle groups they can be assigned to. Each falls back to
    /// the fallback dataset independently.
    pub async fn load(&self) -> Result<(), SubmitError> {
        let (exercises, muscle_groups) = self
            .state
            .scope
            .run(async {
                futures_util::join!(
                    self.service.get_exercises(),
                    self.service.get_muscle_groups()
                )
            })
            .await
            .ok_or(SubmitError::Closed)?;
        *self.exercises.borrow_mut() = exercises;
        *self.muscle_groups.borrow_mut() = muscle_groups;
        Ok(())
    }

    pub fn exercises(&self) -> Ref<'_, Vec<Exercise>> {
        Ref::map(self.exercises.borrow(), Fetched::as_inner)
    }

    /// Muscle groups offered when authoring an exercise.
    #[must_use]
    pub fn selectable_muscle_groups(&self) -> Vec<MuscleGroup> {
        selectable_muscle_groups(self.muscle_groups.borrow().as_inner())
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.exercises.borrow().is_fallback()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    pub fn dismiss_error(&self) {
        self.state.dismiss_error();
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        muscle_group_id: Option<MuscleGroupID>,
        image_url: Option<String>,
    ) -> Result<(), SubmitError> {
        let name = self.check_writable(name, None)?;
        self.check_linkable(muscle_group_id.as_ref())?;
        let Some(muscle_group_id) = muscle_group_id.filter(|id| self.is_selectable(id)) else {
            return self
                .state
                .reject(SubmitError::Invalid(MUSCLE_GROUP_MISSING.to_string()));
        };
        let exercise = self
            .state
            .write(
                self.service.create_exercise(NewExercise {
                    name,
                    description: description.trim().to_string(),
                    muscle_group_id,
                    image_url: image_url.filter(|url| !url.trim().is_empty()),
                }),
                |err| err.user_message(SAVE_EXERCISE_FAILED),
            )
            .await?;
        self.patch(exercise);
        Ok(())
    }

    /// Replace an exercise. Its name must stay unique within the catalog.
    pub async fn update(&self, exercise: Exercise) -> Result<(), SubmitError> {
        let name = self.check_writable(&exercise.name.to_string(), Some(&exercise.id))?;
        self.check_linkable(exercise.muscle_group_id.as_ref())?;
        let exercise = self
            .state
            .write(
                self.service.replace_exercise(Exercise {
                    name,
                    description: exercise.description.trim().to_string(),
                    ..exercise
                }),
                |err| err.user_message(SAVE_EXERCISE_FAILED),
            )
            .await?;
        self.patch(exercise);
        Ok(())
    }

    pub async fn toggle_status(&self, id: ExerciseID) -> Result<(), SubmitError> {
        if self.is_degraded() {
            return self.state.reject(SubmitError::Degraded);
        }
        let Some(is_active) = self
            .exercises()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.is_active)
        else {
            return self
                .state
                .reject(SubmitError::Invalid(format!("Exercise {id} does not exist")));
        };
        let exercise = self
            .state
            .write(self.service.set_exercise_status(id, !is_active), |err| {
                err.user_message(SAVE_EXERCISE_FAILED)
            })
            .await?;
        self.patch(exercise);
        Ok(())
    }

    pub async fn delete(&self, id: ExerciseID) -> Result<(), SubmitError> {
        if self.is_degraded() {
            return self.state.reject(SubmitError::Degraded);
        }
        let deleted = self
            .state
            .write(self.service.delete_exercise(id), |err| {
                err.user_message(DELETE_EXERCISE_FAILED)
            })
            .await?;
        if let Fetched::Live(exercises) = &mut *self.exercises.borrow_mut() {
            exercises.retain(|e| e.id != deleted);
        }
        Ok(())
    }

    /// Exercises grouped by muscle group.
    pub async fn folders(&self) -> Result<Vec<ExerciseFolder>, SubmitError> {
        self.state
            .read(self.service.get_exercise_folders(), |err| {
                err.user_message(FOLDERS_FAILED)
            })
            .await
    }

    /// URL of the reference image of an exercise.
    pub async fn image(&self, id: ExerciseID) -> Result<Option<String>, SubmitError> {
        self.state
            .read(self.service.get_exercise_image(id), |err| {
                err.user_message(IMAGE_FAILED)
            })
            .await
    }

    pub fn close(&self) {
        self.state.scope.close();
    }

    fn is_selectable(&self, id: &MuscleGroupID) -> bool {
        self.muscle_groups
            .borrow()
            .as_inner()
            .iter()
            .any(|g| &g.id == id && g.is_active)
    }

    /// Example muscle groups are never linked to a stored exercise.
    fn check_linkable(&self, muscle_group_id: Option<&MuscleGroupID>) -> Result<(), SubmitError> {
        if self.muscle_groups.borrow().is_fallback()
            || muscle_group_id.is_some_and(|id| catalog::is_fallback_id(id))
        {
            return self.state.reject(SubmitError::Degraded);
        }
        Ok(())
    }

    fn check_writable(&self, name: &str, id: Option<&ExerciseID>) -> Result<Name, SubmitError> {
        if self.is_degraded() {
            return self.state.reject(SubmitError::Degraded);
        }
        let exercises = self.exercises();
        let others = exercises
            .iter()
            .filter(|e| Some(&e.id) != id)
            .map(|e| &e.name);
        match Name::new_unique(name, others) {
            Ok(name) => Ok(name),
            Err(err) => self.state.reject(SubmitError::Invalid(err.to_string())),
        }
    }

    fn patch(&self, exercise: Exercise) {
        if let Fetched::Live(exercises) = &mut *self.exercises.borrow_mut() {
            match exercises.iter_mut().find(|e| e.id == exercise.id) {
                Some(existing) => *existing = exercise,
                None => exercises.push(exercise),
            }
        }
    }
}
