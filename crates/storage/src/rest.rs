use chrono::Utc;
use log::debug;
use rutina_domain as domain;
use rutina_web_app::{Settings, SettingsService, load_settings};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;

use crate::{session::SessionContext, wire};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        let url = request.url.as_str();
        let mut builder = match request.method {
            Method::Get => gloo_net::http::Request::get(url),
            Method::Post => gloo_net::http::Request::post(url),
            Method::Put => gloo_net::http::Request::put(url),
            Method::Patch => gloo_net::http::Request::patch(url),
            Method::Delete => gloo_net::http::Request::delete(url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let response = match &request.body {
            Some(body) => builder.json(body)?,
            None => builder.build()?,
        }
        .send()
        .await?;
        Ok(Response {
            status: response.status(),
            body: response.text().await?,
        })
    }
}

/// Backend collaborator.
///
/// Every request carries the bearer token of the session. A `401` response ends the session.
pub struct REST<S: SendRequest> {
    sender: S,
    settings: Settings,
    session: SessionContext,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(settings: Settings, session: SessionContext) -> Self {
        Self::with_sender(GlooNetSendRequest, settings, session)
    }
}

impl<S: SendRequest> REST<S> {
    #[must_use]
    pub fn with_sender(sender: S, settings: Settings, session: SessionContext) -> Self {
        Self {
            sender,
            settings,
            session,
        }
    }

    /// Adapter for the backend named in the settings stored on this device.
    pub async fn configure(
        sender: S,
        settings: &impl SettingsService,
        session: SessionContext,
    ) -> Self {
        Self::with_sender(sender, load_settings(settings).await, session)
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, domain::StorageError> {
        let bearer = self.session.bearer_token(Utc::now())?;
        let request = Request {
            method,
            url: self.settings.endpoint(path),
            bearer: Some(bearer),
            body,
        };
        debug!("{} {}", method.as_ref(), request.url);
        let response = self.sender.send_request(request).await.map_err(|err| {
            debug!("failed to send request: {err}");
            domain::StorageError::NoConnection
        })?;
        match response.status {
            200..=299 => Ok(response.body),
            401 => {
                self.session.expire();
                Err(domain::StorageError::Unauthorized)
            }
            status => Err(domain::StorageError::Backend {
                status,
                message: wire::ErrorPayload::message(&response.body),
            }),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, domain::StorageError> {
        let body = self.send(method, path, body).await?;
        wire::from_json(&body).map_err(|err| domain::StorageError::Other(err.into()))
    }

    async fn fetch_no_content<T>(
        &self,
        method: Method,
        path: &str,
        result: T,
    ) -> Result<T, domain::StorageError> {
        self.send(method, path, None).await?;
        Ok(result)
    }
}

fn payload(value: &impl Serialize) -> Result<Option<serde_json::Value>, domain::StorageError> {
    serde_json::to_value(value)
        .map(Some)
        .map_err(|err| domain::StorageError::Other(err.into()))
}

fn read_error(err: domain::StorageError) -> domain::ReadError {
    match err {
        domain::StorageError::Backend { status: 404, .. } => domain::ReadError::NotFound,
        err => domain::ReadError::Storage(err),
    }
}

fn create_error(err: domain::StorageError) -> domain::CreateError {
    match err {
        domain::StorageError::Backend { status: 409, .. } => domain::CreateError::Conflict,
        err => domain::CreateError::Storage(err),
    }
}

fn update_error(err: domain::StorageError) -> domain::UpdateError {
    match err {
        domain::StorageError::Backend { status: 404, .. } => domain::UpdateError::NotFound,
        domain::StorageError::Backend { status: 409, .. } => domain::UpdateError::Conflict,
        err => domain::UpdateError::Storage(err),
    }
}

impl<S: SendRequest> domain::UserRepository for REST<S> {
    async fn read_users(&self) -> Result<Vec<domain::User>, domain::ReadError> {
        let users: Vec<wire::User> = self
            .fetch(Method::Get, "/users", None)
            .await
            .map_err(read_error)?;
        Ok(users.into_iter().map(domain::User::from).collect())
    }
}

impl<S: SendRequest> domain::RoutineRepository for REST<S> {
    async fn read_routines(
        &self,
        trainer_id: domain::TrainerID,
    ) -> Result<Vec<domain::RoutineSummary>, domain::ReadError> {
        let routines: Vec<wire::Routine> = self
            .fetch(Method::Get, &format!("/routines/trainer/{trainer_id}"), None)
            .await
            .map_err(read_error)?;
        routines
            .into_iter()
            .map(|r| {
                domain::RoutineSummary::try_from(r)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn read_routine(
        &self,
        id: domain::RoutineID,
    ) -> Result<domain::Routine, domain::ReadError> {
        let routine: wire::Routine = self
            .fetch(Method::Get, &format!("/routines/{id}"), None)
            .await
            .map_err(read_error)?;
        Ok(routine.into())
    }

    async fn create_routine(
        &self,
        routine: domain::ValidRoutine,
    ) -> Result<domain::Routine, domain::CreateError> {
        let mut body = wire::Routine::create_payload(&routine);
        if body.trainer_id.is_none() {
            body.trainer_id = self.session.trainer_id().map(|id| id.to_string());
        }
        let routine: wire::Routine = self
            .fetch(Method::Post, "/routines", payload(&body)?)
            .await
            .map_err(create_error)?;
        Ok(routine.into())
    }

    async fn replace_routine(
        &self,
        id: domain::RoutineID,
        routine: domain::ValidRoutine,
    ) -> Result<domain::Routine, domain::UpdateError> {
        let routine: wire::Routine = self
            .fetch(
                Method::Put,
                &format!("/routines/{id}"),
                payload(&wire::Routine::update_payload(&routine))?,
            )
            .await
            .map_err(update_error)?;
        Ok(routine.into())
    }

    async fn delete_routine(
        &self,
        id: domain::RoutineID,
    ) -> Result<domain::RoutineID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Method::Delete, &format!("/routines/{id}"), id)
            .await?)
    }
}

impl<S: SendRequest> domain::AssignmentRepository for REST<S> {
    async fn create_assignment(
        &self,
        request: domain::AssignmentRequest,
    ) -> Result<domain::Assignment, domain::CreateError> {
        let assignment: wire::Assignment = self
            .fetch(
                Method::Post,
                &format!("/routines/{}/assign", request.routine_id),
                payload(&wire::AssignmentRequest::from(&request))?,
            )
            .await
            .map_err(create_error)?;
        domain::Assignment::try_from(assignment)
            .map_err(|err| domain::CreateError::Other(err.into()))
    }

    async fn read_assignments_by_email(
        &self,
        email: String,
    ) -> Result<Vec<domain::Assignment>, domain::ReadError> {
        let assignments: Vec<wire::Assignment> = self
            .fetch(
                Method::Get,
                &format!("/routines/user/email/{}", urlencoding::encode(email.trim())),
                None,
            )
            .await
            .map_err(read_error)?;
        assignments
            .into_iter()
            .map(|a| {
                domain::Assignment::try_from(a)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }
}

impl<S: SendRequest> domain::MuscleGroupRepository for REST<S> {
    async fn read_muscle_groups(&self) -> Result<Vec<domain::MuscleGroup>, domain::ReadError> {
        let muscle_groups: Vec<wire::MuscleGroup> = self
            .fetch(Method::Get, "/muscle-groups", None)
            .await
            .map_err(read_error)?;
        muscle_groups
            .into_iter()
            .map(|g| {
                domain::MuscleGroup::try_from(g)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn create_muscle_group(
        &self,
        name: domain::Name,
        description: String,
    ) -> Result<domain::MuscleGroup, domain::CreateError> {
        let muscle_group: wire::MuscleGroup = self
            .fetch(
                Method::Post,
                "/muscle-groups",
                payload(&wire::MuscleGroup {
                    id: None,
                    name: name.to_string(),
                    description: description.trim().to_string(),
                    is_active: true,
                })?,
            )
            .await
            .map_err(create_error)?;
        domain::MuscleGroup::try_from(muscle_group)
            .map_err(|err| domain::CreateError::Other(err.into()))
    }

    async fn replace_muscle_group(
        &self,
        muscle_group: domain::MuscleGroup,
    ) -> Result<domain::MuscleGroup, domain::UpdateError> {
        let muscle_group: wire::MuscleGroup = self
            .fetch(
                Method::Put,
                &format!("/muscle-groups/{}", muscle_group.id),
                payload(&wire::MuscleGroup::from(&muscle_group))?,
            )
            .await
            .map_err(update_error)?;
        domain::MuscleGroup::try_from(muscle_group)
            .map_err(|err| domain::UpdateError::Other(err.into()))
    }

    async fn set_muscle_group_status(
        &self,
        id: domain::MuscleGroupID,
        is_active: bool,
    ) -> Result<domain::MuscleGroup, domain::UpdateError> {
        let muscle_group: wire::MuscleGroup = self
            .fetch(
                Method::Patch,
                &format!("/muscle-groups/{id}/status"),
                Some(json!({ "isActive": is_active })),
            )
            .await
            .map_err(update_error)?;
        domain::MuscleGroup::try_from(muscle_group)
            .map_err(|err| domain::UpdateError::Other(err.into()))
    }

    async fn delete_muscle_group(
        &self,
        id: domain::MuscleGroupID,
    ) -> Result<domain::MuscleGroupID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Method::Delete, &format!("/muscle-groups/{id}"), id)
            .await?)
    }
}

impl<S: SendRequest> domain::ExerciseRepository for REST<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let exercises: Vec<wire::Exercise> = self
            .fetch(Method::Get, "/exercises", None)
            .await
            .map_err(read_error)?;
        exercises
            .into_iter()
            .map(|e| {
                domain::Exercise::try_from(e)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn read_exercise_folders(
        &self,
    ) -> Result<Vec<domain::ExerciseFolder>, domain::ReadError> {
        let folders: Vec<wire::ExerciseFolder> = self
            .fetch(Method::Get, "/exercises/folders", None)
            .await
            .map_err(read_error)?;
        folders
            .into_iter()
            .map(|f| {
                domain::ExerciseFolder::try_from(f)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn read_exercise_image(
        &self,
        id: domain::ExerciseID,
    ) -> Result<Option<String>, domain::ReadError> {
        let body = self
            .send(Method::Get, &format!("/exercises/{id}/image"), None)
            .await
            .map_err(read_error)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let image: Option<wire::ExerciseImage> = wire::from_json(&body)
            .map_err(|err| domain::ReadError::Storage(domain::StorageError::Other(err.into())))?;
        Ok(image
            .and_then(|image| image.image_url)
            .filter(|url| !url.is_empty()))
    }

    async fn create_exercise(
        &self,
        exercise: domain::NewExercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let exercise: wire::Exercise = self
            .fetch(
                Method::Post,
                "/exercises",
                payload(&wire::Exercise::from(&exercise))?,
            )
            .await
            .map_err(create_error)?;
        domain::Exercise::try_from(exercise).map_err(|err| domain::CreateError::Other(err.into()))
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let exercise: wire::Exercise = self
            .fetch(
                Method::Put,
                &format!("/exercises/{}", exercise.id),
                payload(&wire::Exercise::from(&exercise))?,
            )
            .await
            .map_err(update_error)?;
        domain::Exercise::try_from(exercise).map_err(|err| domain::UpdateError::Other(err.into()))
    }

    async fn set_exercise_status(
        &self,
        id: domain::ExerciseID,
        is_active: bool,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let exercise: wire::Exercise = self
            .fetch(
                Method::Patch,
                &format!("/exercises/{id}/status"),
                Some(json!({ "isActive": is_active })),
            )
            .await
            .map_err(update_error)?;
        domain::Exercise::try_from(exercise).map_err(|err| domain::UpdateError::Other(err.into()))
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Method::Delete, &format!("/exercises/{id}"), id)
            .await?)
    }
}
