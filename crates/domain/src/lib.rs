#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod assignment;
mod editor;
mod error;
mod exercise;
mod muscle_group;
mod name;
mod routine;
mod service;
mod session;
mod user;
mod validation;

pub use assignment::*;
pub use catalog::Fetched;
pub use editor::*;
pub use error::*;
pub use exercise::*;
pub use muscle_group::*;
pub use name::*;
pub use routine::*;
pub use service::*;
pub use session::*;
pub use user::*;
pub use validation::*;
