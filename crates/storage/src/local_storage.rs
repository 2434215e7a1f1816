use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use rutina_domain::{Session, SessionRepository, StorageError};
use rutina_web_app::{Settings, SettingsRepository, log};

/// Browser local storage.
///
/// The credentials are kept as plain strings under the keys shared with the login page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

const KEY_TOKEN: &str = "token";
const KEY_USER: &str = "user";
const KEY_TRAINER_ID: &str = "trainerId";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

fn local_storage_error(err: &impl std::fmt::Debug) -> StorageError {
    StorageError::Other(format!("local storage: {err:?}").into())
}

fn read_item(key: &str) -> Result<Option<String>, StorageError> {
    gloo_storage::LocalStorage::raw()
        .get_item(key)
        .map_err(|err| local_storage_error(&err))
}

fn write_item(key: &str, value: &str) -> Result<(), StorageError> {
    gloo_storage::LocalStorage::raw()
        .set_item(key, value)
        .map_err(|err| local_storage_error(&err))
}

fn remove_item(key: &str) -> Result<(), StorageError> {
    gloo_storage::LocalStorage::raw()
        .remove_item(key)
        .map_err(|err| local_storage_error(&err))
}

impl SessionRepository for LocalStorage {
    fn read_session(&self) -> Result<Option<Session>, StorageError> {
        let Some(token) = read_item(KEY_TOKEN)?.filter(|token| !token.is_empty()) else {
            return Ok(None);
        };
        Ok(Some(Session {
            token,
            user: read_item(KEY_USER)?.unwrap_or_default(),
            trainer_id: read_item(KEY_TRAINER_ID)?
                .filter(|id| !id.is_empty())
                .map(Into::into),
        }))
    }

    fn write_session(&self, session: &Session) -> Result<(), StorageError> {
        write_item(KEY_TOKEN, &session.token)?;
        write_item(KEY_USER, &session.user)?;
        match &session.trainer_id {
            Some(trainer_id) => write_item(KEY_TRAINER_ID, trainer_id.as_str()),
            None => remove_item(KEY_TRAINER_ID),
        }
    }

    fn clear_session(&self) -> Result<(), StorageError> {
        for key in [KEY_TOKEN, KEY_USER, KEY_TRAINER_ID] {
            remove_item(key)?;
        }
        Ok(())
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        match gloo_storage::LocalStorage::get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(Settings::default()),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::prepend(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
