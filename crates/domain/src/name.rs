use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Like [`Name::new`], but also rejects names already used by `others` (case-insensitive).
    pub fn new_unique<'a>(
        name: &str,
        others: impl IntoIterator<Item = &'a Name>,
    ) -> Result<Self, NameError> {
        let name = Self::new(name)?;
        let lowercase = name.0.to_lowercase();
        if others.into_iter().any(|n| n.0.to_lowercase() == lowercase) {
            return Err(NameError::Duplicate(name.0));
        }
        Ok(name)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name \"{0}\" is already in use")]
    Duplicate(String),
}
