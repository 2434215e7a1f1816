use log::{debug, error, warn};

use crate::{
    Assignment, AssignmentRepository, AssignmentRequest, AssignmentService, CreateError,
    DeleteError, Exercise, ExerciseFolder, ExerciseID, ExerciseRepository, ExerciseService,
    Fetched, MuscleGroup, MuscleGroupID, MuscleGroupRepository, MuscleGroupService, Name,
    NewExercise, ReadError, Routine, RoutineID, RoutineRepository, RoutineService,
    RoutineSummary, TrainerID, UpdateError, User, UserRepository, UserService, ValidRoutine,
    catalog,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: UserRepository> UserService for Service<R> {
    async fn get_users(&self) -> Result<Vec<User>, ReadError> {
        log_on_error!(self.repository.read_users(), ReadError, "get", "users")
    }
}

impl<R: RoutineRepository> RoutineService for Service<R> {
    async fn get_routines(&self, trainer_id: TrainerID) -> Result<Vec<RoutineSummary>, ReadError> {
        log_on_error!(
            self.repository.read_routines(trainer_id),
            ReadError,
            "get",
            "routines"
        )
    }

    async fn get_routine(&self, id: RoutineID) -> Result<Routine, ReadError> {
        log_on_error!(
            self.repository.read_routine(id),
            ReadError,
            "get",
            "routine"
        )
    }

    async fn create_routine(&self, routine: ValidRoutine) -> Result<Routine, CreateError> {
        log_on_error!(
            self.repository.create_routine(routine),
            CreateError,
            "create",
            "routine"
        )
    }

    async fn replace_routine(
        &self,
        id: RoutineID,
        routine: ValidRoutine,
    ) -> Result<Routine, UpdateError> {
        log_on_error!(
            self.repository.replace_routine(id, routine),
            UpdateError,
            "replace",
            "routine"
        )
    }

    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
        log_on_error!(
            self.repository.delete_routine(id),
            DeleteError,
            "delete",
            "routine"
        )
    }
}

impl<R: AssignmentRepository> AssignmentService for Service<R> {
    async fn assign_routine(&self, request: AssignmentRequest) -> Result<Assignment, CreateError> {
        log_on_error!(
            self.repository.create_assignment(request),
            CreateError,
            "create",
            "assignment"
        )
    }

    async fn get_assignments_by_email(
        &self,
        email: String,
    ) -> Result<Vec<Assignment>, ReadError> {
        log_on_error!(
            self.repository.read_assignments_by_email(email),
            ReadError,
            "get",
            "assignments"
        )
    }
}

impl<R: MuscleGroupRepository> MuscleGroupService for Service<R> {
    async fn get_muscle_groups(&self) -> Fetched<Vec<MuscleGroup>> {
        match log_on_error!(
            self.repository.read_muscle_groups(),
            ReadError,
            "get",
            "muscle groups"
        ) {
            Ok(muscle_groups) => Fetched::Live(muscle_groups),
            Err(_) => {
                warn!("showing fallback muscle groups");
                Fetched::Fallback(catalog::fallback_muscle_groups())
            }
        }
    }

    async fn create_muscle_group(
        &self,
        name: Name,
        description: String,
    ) -> Result<MuscleGroup, CreateError> {
        log_on_error!(
            self.repository.create_muscle_group(name, description),
            CreateError,
            "create",
            "muscle group"
        )
    }

    async fn replace_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<MuscleGroup, UpdateError> {
        log_on_error!(
            self.repository.replace_muscle_group(muscle_group),
            UpdateError,
            "replace",
            "muscle group"
        )
    }

    async fn set_muscle_group_status(
        &self,
        id: MuscleGroupID,
        is_active: bool,
    ) -> Result<MuscleGroup, UpdateError> {
        log_on_error!(
            self.repository.set_muscle_group_status(id, is_active),
            UpdateError,
            "change status of",
            "muscle group"
        )
    }

    async fn delete_muscle_group(&self, id: MuscleGroupID) -> Result<MuscleGroupID, DeleteError> {
        log_on_error!(
            self.repository.delete_muscle_group(id),
            DeleteError,
            "delete",
            "muscle group"
        )
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Fetched<Vec<Exercise>> {
        match log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        ) {
            Ok(exercises) => Fetched::Live(exercises),
            Err(_) => {
                warn!("showing fallback exercises");
                Fetched::Fallback(catalog::fallback_exercises())
            }
        }
    }

    async fn get_exercise_folders(&self) -> Result<Vec<ExerciseFolder>, ReadError> {
        log_on_error!(
            self.repository.read_exercise_folders(),
            ReadError,
            "get",
            "exercise folders"
        )
    }

    async fn get_exercise_image(&self, id: ExerciseID) -> Result<Option<String>, ReadError> {
        log_on_error!(
            self.repository.read_exercise_image(id),
            ReadError,
            "get",
            "exercise image"
        )
    }

    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(exercise),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn set_exercise_status(
        &self,
        id: ExerciseID,
        is_active: bool,
    ) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.set_exercise_status(id, is_active),
            UpdateError,
            "change status of",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use crate::StorageError;

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        muscle_groups: Option<Vec<MuscleGroup>>,
        status_calls: RefCell<Vec<(MuscleGroupID, bool)>>,
    }

    impl MuscleGroupRepository for FakeRepository {
        async fn read_muscle_groups(&self) -> Result<Vec<MuscleGroup>, ReadError> {
            self.muscle_groups
                .clone()
                .ok_or(ReadError::Storage(StorageError::NoConnection))
        }

        async fn create_muscle_group(
            &self,
            _: Name,
            _: String,
        ) -> Result<MuscleGroup, CreateError> {
            Err(CreateError::Conflict)
        }

        async fn replace_muscle_group(
            &self,
            muscle_group: MuscleGroup,
        ) -> Result<MuscleGroup, UpdateError> {
            Ok(muscle_group)
        }

        async fn set_muscle_group_status(
            &self,
            id: MuscleGroupID,
            is_active: bool,
        ) -> Result<MuscleGroup, UpdateError> {
            self.status_calls.borrow_mut().push((id.clone(), is_active));
            Ok(MuscleGroup {
                id,
                name: Name::new("Pecho").unwrap(),
                description: String::new(),
                is_active,
            })
        }

        async fn delete_muscle_group(
            &self,
            id: MuscleGroupID,
        ) -> Result<MuscleGroupID, DeleteError> {
            Ok(id)
        }
    }

    #[tokio::test]
    async fn test_get_muscle_groups_live() {
        let groups = vec![MuscleGroup {
            id: "m1".into(),
            name: Name::new("Pecho").unwrap(),
            description: String::new(),
            is_active: false,
        }];
        let service = Service::new(FakeRepository {
            muscle_groups: Some(groups.clone()),
            ..FakeRepository::default()
        });

        assert_eq!(service.get_muscle_groups().await, Fetched::Live(groups));
    }

    #[tokio::test]
    async fn test_get_muscle_groups_fallback() {
        let service = Service::new(FakeRepository::default());

        let fetched = service.get_muscle_groups().await;

        assert!(fetched.is_fallback());
        assert_eq!(fetched.into_inner(), catalog::fallback_muscle_groups());
        assert!(service.repository.status_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_set_muscle_group_status() {
        let service = Service::new(FakeRepository::default());

        let group = service
            .set_muscle_group_status("m1".into(), false)
            .await
            .unwrap();

        assert!(!group.is_active);
        assert_eq!(
            *service.repository.status_calls.borrow(),
            vec![(MuscleGroupID::from("m1"), false)]
        );
    }

    #[tokio::test]
    async fn test_create_muscle_group_error_is_passed_through() {
        let service = Service::new(FakeRepository::default());

        assert!(matches!(
            service
                .create_muscle_group(Name::new("Pecho").unwrap(), String::new())
                .await,
            Err(CreateError::Conflict)
        ));
    }
}
