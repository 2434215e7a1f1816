use crate::{StorageError, TrainerID};

/// Credentials of the signed-in trainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// Serialized user record as handed out by the authentication service.
    pub user: String,
    pub trainer_id: Option<TrainerID>,
}

/// Persistence of the single session slot.
pub trait SessionRepository {
    fn read_session(&self) -> Result<Option<Session>, StorageError>;
    fn write_session(&self, session: &Session) -> Result<(), StorageError>;
    fn clear_session(&self) -> Result<(), StorageError>;
}

/// Navigation to the login route after the session ended.
pub trait LoginRedirect {
    fn redirect_to_login(&self);
}
