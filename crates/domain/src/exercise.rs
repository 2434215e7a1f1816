use derive_more::{AsRef, Deref, Display};

use crate::{CreateError, DeleteError, Fetched, MuscleGroupID, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    /// Catalog exercises from the backend, or the fallback dataset if they cannot be read.
    async fn get_exercises(&self) -> Fetched<Vec<Exercise>>;
    async fn get_exercise_folders(&self) -> Result<Vec<ExerciseFolder>, ReadError>;
    async fn get_exercise_image(&self, id: ExerciseID) -> Result<Option<String>, ReadError>;
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn set_exercise_status(
        &self,
        id: ExerciseID,
        is_active: bool,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercise_folders(&self) -> Result<Vec<ExerciseFolder>, ReadError>;
    async fn read_exercise_image(&self, id: ExerciseID) -> Result<Option<String>, ReadError>;
    async fn create_exercise(&self, exercise: NewExercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn set_exercise_status(
        &self,
        id: ExerciseID,
        is_active: bool,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

/// Reusable exercise definition of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: String,
    pub muscle_group_id: Option<MuscleGroupID>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Catalog exercise that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub name: Name,
    pub description: String,
    pub muscle_group_id: MuscleGroupID,
    pub image_url: Option<String>,
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Catalog exercises grouped by muscle group, used for browsing the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseFolder {
    pub muscle_group_id: MuscleGroupID,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// Exercises belonging to the given muscle group, in catalog order.
#[must_use]
pub fn exercises_of<'a>(
    exercises: &'a [Exercise],
    muscle_group_id: &MuscleGroupID,
) -> Vec<&'a Exercise> {
    exercises
        .iter()
        .filter(|e| e.muscle_group_id.as_ref() == Some(muscle_group_id))
        .collect()
}
