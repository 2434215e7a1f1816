#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Conflict => CreateError::Conflict,
            UpdateError::NotFound => CreateError::Other("not found".into()),
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("conflict")]
    Conflict,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("session expired")]
    Unauthorized,
    #[error("{}", backend_display(.status, .message))]
    Backend {
        status: u16,
        message: Option<String>,
    },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl StorageError {
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            StorageError::Backend {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

fn backend_display(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("unexpected response ({status})"),
    }
}

macro_rules! user_message {
    ($($error: ident),*) => {
        $(
            impl $error {
                /// Message suitable for an error banner: the text supplied by the backend if
                /// there is one, else `fallback`.
                #[must_use]
                pub fn user_message(&self, fallback: &str) -> String {
                    match self {
                        $error::Storage(storage) => storage
                            .backend_message()
                            .unwrap_or(fallback)
                            .to_string(),
                        _ => fallback.to_string(),
                    }
                }
            }
        )*
    };
}

user_message!(ReadError, CreateError, UpdateError, DeleteError);
