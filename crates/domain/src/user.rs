use derive_more::{AsRef, Deref, Display};

use crate::ReadError;

#[allow(async_fn_in_trait)]
pub trait UserService {
    async fn get_users(&self) -> Result<Vec<User>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait UserRepository {
    async fn read_users(&self) -> Result<Vec<User>, ReadError>;
}

/// Client of the training service, target of routine assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub name: String,
    pub email: String,
}

impl User {
    /// Label shown in the user picker.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.name.trim(), self.email.trim()) {
            ("", email) => email.to_string(),
            (name, "") => name.to_string(),
            (name, email) => format!("{name} ({email})"),
        }
    }
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserID(String);

impl From<&str> for UserID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserID {
    fn from(value: String) -> Self {
        Self(value)
    }
}
