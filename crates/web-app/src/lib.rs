#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod log;

mod assignment;
mod catalog;
mod redirect;
mod routine_editor;
mod routines;
mod scope;
mod service;
mod settings;
mod submit;
mod view;

pub use assignment::AssignmentModal;
pub use catalog::{ExercisesView, MuscleGroupsView};
pub use redirect::{BrowserRedirect, LOGIN_ROUTE};
pub use routine_editor::RoutineEditorModal;
pub use routines::RoutinesView;
pub use scope::ViewScope;
pub use service::Service;
pub use settings::{
    DEFAULT_API_BASE_URL, Settings, SettingsRepository, SettingsService, load_settings,
};
pub use submit::{SubmitError, SubmitGuard, SubmitTicket};

#[cfg(test)]
mod tests {
    pub mod service;
}
