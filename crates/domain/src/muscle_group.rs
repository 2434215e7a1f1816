use derive_more::{AsRef, Deref, Display};

use crate::{CreateError, DeleteError, Fetched, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait MuscleGroupService {
    /// Muscle groups from the backend, or the fallback dataset if they cannot be read.
    async fn get_muscle_groups(&self) -> Fetched<Vec<MuscleGroup>>;
    async fn create_muscle_group(
        &self,
        name: Name,
        description: String,
    ) -> Result<MuscleGroup, CreateError>;
    async fn replace_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<MuscleGroup, UpdateError>;
    async fn set_muscle_group_status(
        &self,
        id: MuscleGroupID,
        is_active: bool,
    ) -> Result<MuscleGroup, UpdateError>;
    async fn delete_muscle_group(&self, id: MuscleGroupID) -> Result<MuscleGroupID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait MuscleGroupRepository {
    async fn read_muscle_groups(&self) -> Result<Vec<MuscleGroup>, ReadError>;
    async fn create_muscle_group(
        &self,
        name: Name,
        description: String,
    ) -> Result<MuscleGroup, CreateError>;
    async fn replace_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<MuscleGroup, UpdateError>;
    async fn set_muscle_group_status(
        &self,
        id: MuscleGroupID,
        is_active: bool,
    ) -> Result<MuscleGroup, UpdateError>;
    async fn delete_muscle_group(&self, id: MuscleGroupID) -> Result<MuscleGroupID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroup {
    pub id: MuscleGroupID,
    pub name: Name,
    pub description: String,
    pub is_active: bool,
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MuscleGroupID(String);

impl From<&str> for MuscleGroupID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MuscleGroupID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Muscle groups that may be chosen for a new catalog exercise.
///
/// Inactive groups stay visible in the management view, but are not offered for selection.
#[must_use]
pub fn selectable_muscle_groups(muscle_groups: &[MuscleGroup]) -> Vec<&MuscleGroup> {
    muscle_groups.iter().filter(|g| g.is_active).collect()
}
