use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

/// Number of entries kept by a log repository.
pub const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn add_log_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Put `entry` in front of `entries` and drop the oldest entries beyond [`MAX_ENTRIES`].
pub fn prepend(entries: &mut VecDeque<Entry>, entry: Entry) {
    entries.push_front(entry);
    entries.truncate(MAX_ENTRIES);
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(repository: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        match record.level() {
            Level::Error => gloo_console::error!(message.clone()),
            Level::Warn => gloo_console::warn!(message.clone()),
            Level::Info => gloo_console::info!(message.clone()),
            Level::Debug | Level::Trace => gloo_console::debug!(message.clone()),
        }

        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(repository) = log.as_ref() {
            if let Ok(repository) = repository.lock() {
                let _ = repository.write_entry(Entry {
                    time: Utc::now().format("%b %d %H:%M:%S").to_string(),
                    level: record.level(),
                    message,
                });
            }
        }
    }

    fn flush(&self) {}
}
