use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use derive_more::{AsRef, Deref, Display};

use crate::{CreateError, ReadError, RoutineID, UserID};

/// Length of the assignment period proposed by a fresh form.
pub const DEFAULT_ASSIGNMENT_DAYS: u64 = 30;

#[allow(async_fn_in_trait)]
pub trait AssignmentService {
    async fn assign_routine(&self, request: AssignmentRequest) -> Result<Assignment, CreateError>;
    async fn get_assignments_by_email(&self, email: String)
    -> Result<Vec<Assignment>, ReadError>;

    /// Routine assignment a user currently follows.
    async fn get_user_routine(&self, email: String) -> Result<Option<Assignment>, ReadError> {
        Ok(current_assignment(
            self.get_assignments_by_email(email).await?,
        ))
    }
}

#[allow(async_fn_in_trait)]
pub trait AssignmentRepository {
    async fn create_assignment(&self, request: AssignmentRequest)
    -> Result<Assignment, CreateError>;
    async fn read_assignments_by_email(
        &self,
        email: String,
    ) -> Result<Vec<Assignment>, ReadError>;
}

/// Binding of a persisted routine to a user for a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: Option<AssignmentID>,
    pub routine_id: RoutineID,
    pub routine_name: Option<String>,
    pub user_id: Option<UserID>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: String,
    pub is_active: bool,
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssignmentID(String);

impl From<&str> for AssignmentID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AssignmentID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The active assignment, or the first one if none is active.
#[must_use]
pub fn current_assignment(assignments: Vec<Assignment>) -> Option<Assignment> {
    let active = assignments.iter().position(|a| a.is_active).unwrap_or(0);
    assignments.into_iter().nth(active)
}

/// State of the assignment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentForm {
    pub routine_id: Option<RoutineID>,
    pub user_id: Option<UserID>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: String,
}

impl AssignmentForm {
    /// Form for a period starting `today` and lasting [`DEFAULT_ASSIGNMENT_DAYS`].
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            routine_id: None,
            user_id: None,
            start_date: today,
            end_date: today
                .checked_add_days(Days::new(DEFAULT_ASSIGNMENT_DAYS))
                .unwrap_or(today),
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<AssignmentRequest, AssignmentError> {
        let Some(routine_id) = self.routine_id.clone() else {
            return Err(AssignmentError::RoutineMissing);
        };
        let Some(user_id) = self.user_id.clone() else {
            return Err(AssignmentError::UserMissing);
        };
        if self.end_date < self.start_date {
            return Err(AssignmentError::EndBeforeStart);
        }
        Ok(AssignmentRequest {
            routine_id,
            user_id,
            start: midnight_utc(self.start_date),
            end: midnight_utc(self.end_date),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Validated assignment, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub routine_id: RoutineID,
    pub user_id: UserID,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub notes: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Select a routine")]
    RoutineMissing,
    #[error("Select a user")]
    UserMissing,
    #[error("The end date must not be before the start date")]
    EndBeforeStart,
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
