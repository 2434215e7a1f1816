use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use log::{error, warn};
use rutina_domain::{LoginRedirect, Session, SessionRepository, StorageError, TrainerID};

/// The single session slot of the client.
///
/// The session is set on login, cleared on logout or expiry and only read in between. Clones
/// share the same slot.
#[derive(Clone)]
pub struct SessionContext(Rc<Inner>);

struct Inner {
    repository: Box<dyn SessionRepository>,
    redirect: Box<dyn LoginRedirect>,
    session: RefCell<Option<Session>>,
    expired: Cell<bool>,
}

impl SessionContext {
    /// Context initialized with the session persisted in `repository`.
    pub fn new(
        repository: impl SessionRepository + 'static,
        redirect: impl LoginRedirect + 'static,
    ) -> Self {
        let session = repository.read_session().unwrap_or_else(|err| {
            error!("failed to read session: {err}");
            None
        });
        Self(Rc::new(Inner {
            repository: Box::new(repository),
            redirect: Box::new(redirect),
            session: RefCell::new(session),
            expired: Cell::new(false),
        }))
    }

    pub fn establish(&self, session: Session) -> Result<(), StorageError> {
        self.0.repository.write_session(&session)?;
        *self.0.session.borrow_mut() = Some(session);
        self.0.expired.set(false);
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        *self.0.session.borrow_mut() = None;
        self.0.repository.clear_session()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.0.session.borrow().clone()
    }

    #[must_use]
    pub fn trainer_id(&self) -> Option<TrainerID> {
        self.0
            .session
            .borrow()
            .as_ref()
            .and_then(|s| s.trainer_id.clone())
    }

    /// Token for the `Authorization` header of a request sent at `now`.
    ///
    /// A token that has already expired ends the session before any request is made.
    pub fn bearer_token(&self, now: DateTime<Utc>) -> Result<String, StorageError> {
        let token = self.0.session.borrow().as_ref().map(|s| s.token.clone());
        let Some(token) = token else {
            return Err(StorageError::NoSession);
        };
        if token_expiry(&token).is_some_and(|expiry| expiry <= now) {
            self.expire();
            return Err(StorageError::Unauthorized);
        }
        Ok(token)
    }

    /// End the session after the backend rejected the credentials.
    ///
    /// Only the first call after a session was established clears the stored credentials and
    /// redirects to the login route.
    pub fn expire(&self) {
        if self.0.expired.replace(true) {
            return;
        }
        warn!("session expired");
        *self.0.session.borrow_mut() = None;
        if let Err(err) = self.0.repository.clear_session() {
            error!("failed to clear session: {err}");
        }
        self.0.redirect.redirect_to_login();
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0.expired.get()
    }
}

#[derive(serde::Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Expiry time of a JWT, `None` if the token carries no readable `exp` claim.
#[must_use]
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims = serde_json::from_slice::<Claims>(&decoded).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}
