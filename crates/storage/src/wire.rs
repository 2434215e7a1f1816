//! Records as exchanged with the backend.
//!
//! Inbound records are read leniently: identifiers are accepted as `id` or `_id`, counts as
//! numbers, numeric strings or floats, and missing or `null` text as an empty string. Outbound
//! routines always carry numbering derived from the position of each element.

use chrono::{DateTime, NaiveDate, SecondsFormat};
use rutina_domain as domain;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Parse a response body.
///
/// A record may carry both `id` and `_id`, in which case `id` is used unless it is `null`.
pub fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let mut value: Value = serde_json::from_str(body)?;
    drop_duplicate_ids(&mut value);
    serde_json::from_value(value)
}

fn drop_duplicate_ids(value: &mut Value) {
    match value {
        Value::Object(record) => {
            match record.get("id") {
                Some(Value::Null) => {
                    record.remove("id");
                }
                Some(_) => {
                    record.remove("_id");
                }
                None => {}
            }
            record.values_mut().for_each(drop_duplicate_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_duplicate_ids),
        _ => {}
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "text")]
    pub comments: String,
    #[serde(default, deserialize_with = "count")]
    pub total_weeks: u32,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(
        rename = "trainer_id",
        alias = "trainerId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trainer_id: Option<String>,
    #[serde(default)]
    pub weeks: Vec<Week>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "count")]
    pub week_number: u32,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub comments: String,
    #[serde(default)]
    pub days: Vec<Day>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "count")]
    pub day_number: u32,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub comments: String,
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "count")]
    pub sets: u32,
    #[serde(default, deserialize_with = "count")]
    pub repetitions: u32,
    #[serde(default, deserialize_with = "count")]
    pub rest_between_sets: u32,
    #[serde(default, deserialize_with = "count")]
    pub rest_between_exercises: u32,
    #[serde(default, deserialize_with = "text")]
    pub comments: String,
    #[serde(default, deserialize_with = "count")]
    pub order: u32,
    #[serde(default)]
    pub exercise_id: Option<String>,
}

impl Routine {
    /// Body of a create request. Nodes are sent without identifiers.
    #[must_use]
    pub fn create_payload(routine: &domain::Routine) -> Self {
        let mut payload = Self::from(routine);
        payload.id = None;
        for week in &mut payload.weeks {
            week.id = None;
            for day in &mut week.days {
                day.id = None;
                for exercise in &mut day.exercises {
                    exercise.id = None;
                }
            }
        }
        payload
    }

    /// Body of a replace request. Every node carries its identifier, draft nodes a `temp-`
    /// identifier, and the owner is left unchanged.
    #[must_use]
    pub fn update_payload(routine: &domain::Routine) -> Self {
        let mut payload = Self::from(routine);
        payload.id = None;
        payload.trainer_id = None;
        payload
    }
}

impl From<&domain::Routine> for Routine {
    fn from(value: &domain::Routine) -> Self {
        Self {
            id: value.id.as_ref().map(ToString::to_string),
            name: value.name.trim().to_string(),
            description: value.description.trim().to_string(),
            comments: value.comments.trim().to_string(),
            total_weeks: value.total_weeks(),
            is_active: value.is_active,
            trainer_id: value.trainer_id.as_ref().map(ToString::to_string),
            weeks: value
                .weeks
                .iter()
                .enumerate()
                .map(|(index, week)| Week {
                    id: Some(week.id.to_string()),
                    week_number: domain::position_number(index),
                    name: week.name.trim().to_string(),
                    comments: week.comments.trim().to_string(),
                    days: week
                        .days
                        .iter()
                        .enumerate()
                        .map(|(index, day)| Day {
                            id: Some(day.id.to_string()),
                            day_number: domain::position_number(index),
                            name: day.name.trim().to_string(),
                            comments: day.comments.trim().to_string(),
                            exercises: day
                                .exercises
                                .iter()
                                .enumerate()
                                .map(|(index, exercise)| RoutineExercise {
                                    id: Some(exercise.id.to_string()),
                                    name: exercise.name.trim().to_string(),
                                    sets: exercise.sets,
                                    repetitions: exercise.repetitions,
                                    rest_between_sets: exercise.rest_between_sets,
                                    rest_between_exercises: exercise.rest_between_exercises,
                                    comments: exercise.comments.trim().to_string(),
                                    order: domain::position_number(index),
                                    exercise_id: exercise
                                        .exercise_id
                                        .as_ref()
                                        .map(ToString::to_string),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<Routine> for domain::Routine {
    fn from(value: Routine) -> Self {
        let mut drafts = DraftIDs::default();
        Self {
            id: value.id.map(domain::RoutineID::from),
            name: value.name,
            description: value.description,
            comments: value.comments,
            is_active: value.is_active,
            trainer_id: value.trainer_id.map(domain::TrainerID::from),
            weeks: value
                .weeks
                .into_iter()
                .map(|week| domain::Week {
                    id: drafts.node_id(week.id),
                    name: week.name,
                    comments: week.comments,
                    days: week
                        .days
                        .into_iter()
                        .map(|day| domain::Day {
                            id: drafts.node_id(day.id),
                            name: day.name,
                            comments: day.comments,
                            exercises: day
                                .exercises
                                .into_iter()
                                .map(|exercise| domain::RoutineExercise {
                                    id: drafts.node_id(exercise.id),
                                    name: exercise.name,
                                    sets: exercise.sets,
                                    repetitions: exercise.repetitions,
                                    rest_between_sets: exercise.rest_between_sets,
                                    rest_between_exercises: exercise.rest_between_exercises,
                                    comments: exercise.comments,
                                    exercise_id: exercise
                                        .exercise_id
                                        .map(domain::ExerciseID::from),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Routine> for domain::RoutineSummary {
    type Error = MissingID;

    fn try_from(value: Routine) -> Result<Self, Self::Error> {
        let total_weeks = if value.weeks.is_empty() {
            value.total_weeks
        } else {
            u32::try_from(value.weeks.len()).unwrap_or(u32::MAX)
        };
        Ok(Self {
            id: value.id.ok_or(MissingID("routine"))?.into(),
            name: value.name,
            description: value.description,
            total_weeks,
            is_active: value.is_active,
            trainer_id: value.trainer_id.map(domain::TrainerID::from),
        })
    }
}

/// Nodes without a backend identifier get numbered draft identifiers.
#[derive(Default)]
struct DraftIDs {
    next: u32,
}

impl DraftIDs {
    fn node_id(&mut self, id: Option<String>) -> domain::NodeID {
        match id {
            Some(id) if !id.is_empty() => domain::NodeID::Persisted(id),
            _ => {
                self.next += 1;
                domain::NodeID::Draft(self.next)
            }
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} without identifier")]
pub struct MissingID(pub &'static str);

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
    pub notes: String,
}

impl From<&domain::AssignmentRequest> for AssignmentRequest {
    fn from(value: &domain::AssignmentRequest) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            start_date: value.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_date: value.end.to_rfc3339_opts(SecondsFormat::Millis, true),
            notes: value.notes.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    pub routine_id: Reference,
    #[serde(default)]
    pub routine_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<Reference>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, deserialize_with = "text")]
    pub notes: String,
    #[serde(default = "active")]
    pub is_active: bool,
}

/// Foreign key, either as plain identifier or as embedded document.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Reference {
    ID(String),
    Document {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Reference {
    fn into_parts(self) -> (String, Option<String>) {
        match self {
            Reference::ID(id) => (id, None),
            Reference::Document { id, name } => (id, name),
        }
    }
}

impl TryFrom<Assignment> for domain::Assignment {
    type Error = InvalidDate;

    fn try_from(value: Assignment) -> Result<Self, Self::Error> {
        let (routine_id, embedded_name) = value.routine_id.into_parts();
        Ok(Self {
            id: value.id.map(domain::AssignmentID::from),
            routine_id: routine_id.into(),
            routine_name: value.routine_name.or(embedded_name),
            user_id: value
                .user_id
                .map(|user| domain::UserID::from(user.into_parts().0)),
            start_date: calendar_date(&value.start_date)?,
            end_date: calendar_date(&value.end_date)?,
            notes: value.notes,
            is_active: value.is_active,
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date \"{0}\"")]
pub struct InvalidDate(pub String);

/// Calendar date of an ISO 8601 timestamp or date.
fn calendar_date(value: &str) -> Result<NaiveDate, InvalidDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .ok_or_else(|| InvalidDate(value.to_string()))
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
}

impl From<User> for domain::User {
    fn from(value: User) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroup {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default = "active")]
    pub is_active: bool,
}

impl From<&domain::MuscleGroup> for MuscleGroup {
    fn from(value: &domain::MuscleGroup) -> Self {
        Self {
            id: None,
            name: value.name.to_string(),
            description: value.description.trim().to_string(),
            is_active: value.is_active,
        }
    }
}

impl TryFrom<MuscleGroup> for domain::MuscleGroup {
    type Error = ConversionError;

    fn try_from(value: MuscleGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.ok_or(MissingID("muscle group"))?.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            is_active: value.is_active,
        })
    }
}

/// Catalog exercise. The backend calls the exercise name `title`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "name", default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default)]
    pub muscle_group_id: Option<Reference>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

impl Serialize for Reference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reference::ID(id) | Reference::Document { id, .. } => serializer.serialize_str(id),
        }
    }
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: None,
            title: value.name.to_string(),
            description: value.description.trim().to_string(),
            muscle_group_id: value
                .muscle_group_id
                .as_ref()
                .map(|id| Reference::ID(id.to_string())),
            image_url: value.image_url.clone(),
            is_active: value.is_active,
        }
    }
}

impl From<&domain::NewExercise> for Exercise {
    fn from(value: &domain::NewExercise) -> Self {
        Self {
            id: None,
            title: value.name.to_string(),
            description: value.description.trim().to_string(),
            muscle_group_id: Some(Reference::ID(value.muscle_group_id.to_string())),
            image_url: value.image_url.clone(),
            is_active: true,
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ConversionError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.ok_or(MissingID("exercise"))?.into(),
            name: domain::Name::new(&value.title)?,
            description: value.description,
            muscle_group_id: value
                .muscle_group_id
                .map(|r| domain::MuscleGroupID::from(r.into_parts().0)),
            image_url: value.image_url.filter(|url| !url.is_empty()),
            is_active: value.is_active,
        })
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseFolder {
    #[serde(alias = "_id")]
    pub muscle_group_id: String,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl TryFrom<ExerciseFolder> for domain::ExerciseFolder {
    type Error = ConversionError;

    fn try_from(value: ExerciseFolder) -> Result<Self, Self::Error> {
        Ok(Self {
            muscle_group_id: value.muscle_group_id.into(),
            name: value.name,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseImage {
    #[serde(alias = "url", default)]
    pub image_url: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error(transparent)]
    MissingID(#[from] MissingID),
    #[error(transparent)]
    Name(#[from] domain::NameError),
}

/// Body of an unsuccessful response.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    List(Vec<String>),
}

impl ErrorPayload {
    /// Human-readable message of an error response body, if the body contains one.
    #[must_use]
    pub fn message(body: &str) -> Option<String> {
        let payload = serde_json::from_str::<ErrorPayload>(body).ok()?;
        let message = match payload.message {
            Some(Message::Text(text)) => Some(text),
            Some(Message::List(items)) if !items.is_empty() => Some(items.join(", ")),
            _ => None,
        };
        message
            .or(payload.error)
            .filter(|message| !message.trim().is_empty())
    }
}

fn active() -> bool {
    true
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match Option::<Number>::deserialize(deserializer)? {
        Some(Number::Unsigned(value)) => u32::try_from(value).unwrap_or(u32::MAX),
        Some(Number::Signed(_)) | None => 0,
        Some(Number::Float(value)) => domain::coerce_count(&value.to_string()),
        Some(Number::Text(value)) => domain::coerce_count(&value),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::tests::data::{ROUTINE, USER};

    use super::*;

    #[test]
    fn test_routine_create_payload() {
        assert_eq!(
            serde_json::to_value(Routine::create_payload(&ROUTINE)).unwrap(),
            json!({
                "name": "Fuerza",
                "description": "desc",
                "comments": "",
                "totalWeeks": 2,
                "isActive": true,
                "trainer_id": "t1",
                "weeks": [
                    {
                        "weekNumber": 1,
                        "name": "Semana 1",
                        "comments": "",
                        "days": [
                            {
                                "dayNumber": 1,
                                "name": "Día 1",
                                "comments": "",
                                "exercises": [
                                    {
                                        "name": "Sentadilla",
                                        "sets": 3,
                                        "repetitions": 10,
                                        "restBetweenSets": 60,
                                        "restBetweenExercises": 120,
                                        "comments": "",
                                        "order": 1,
                                        "exerciseId": "e1"
                                    },
                                    {
                                        "name": "Plancha",
                                        "sets": 4,
                                        "repetitions": 10,
                                        "restBetweenSets": 60,
                                        "restBetweenExercises": 120,
                                        "comments": "al fallo",
                                        "order": 2,
                                        "exerciseId": null
                                    }
                                ]
                            }
                        ]
                    },
                    {
                        "weekNumber": 2,
                        "name": "Semana 2",
                        "comments": "",
                        "days": [
                            {
                                "dayNumber": 1,
                                "name": "Día 1",
                                "comments": "",
                                "exercises": [
                                    {
                                        "name": "Sentadilla",
                                        "sets": 3,
                                        "repetitions": 10,
                                        "restBetweenSets": 60,
                                        "restBetweenExercises": 120,
                                        "comments": "",
                                        "order": 1,
                                        "exerciseId": "e1"
                                    }
                                ]
                            }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_routine_update_payload() {
        let payload = serde_json::to_value(Routine::update_payload(&ROUTINE)).unwrap();

        assert_eq!(payload.get("trainer_id"), None);
        assert_eq!(payload.get("id"), None);
        assert_eq!(payload["weeks"][0]["id"], json!("w1"));
        assert_eq!(payload["weeks"][0]["days"][0]["exercises"][1]["id"], json!("x2"));
        assert_eq!(payload["weeks"][1]["id"], json!("temp-1"));
        assert_eq!(payload["weeks"][1]["days"][0]["id"], json!("temp-2"));
        assert_eq!(
            payload["weeks"][1]["days"][0]["exercises"][0]["id"],
            json!("temp-3")
        );
    }

    #[test]
    fn test_routine_payload_trims_text_and_numbers_by_position() {
        let mut routine = ROUTINE.clone();
        routine.name = String::from("  Fuerza  ");
        routine.weeks.swap(0, 1);
        routine.weeks[1].days[0].exercises.swap(0, 1);

        let payload = Routine::create_payload(&routine);

        assert_eq!(payload.name, "Fuerza");
        assert_eq!(
            payload.weeks.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(payload.weeks[0].name, "Semana 2");
        assert_eq!(
            payload.weeks[1].days[0]
                .exercises
                .iter()
                .map(|e| (e.name.as_str(), e.order))
                .collect::<Vec<_>>(),
            vec![("Plancha", 1), ("Sentadilla", 2)]
        );
    }

    #[test]
    fn test_routine_reserialization_is_stable() {
        let sent = serde_json::to_string(&Routine::create_payload(&ROUTINE)).unwrap();
        let loaded = domain::Routine::from(serde_json::from_str::<Routine>(&sent).unwrap());
        let resent = serde_json::to_string(&Routine::create_payload(&loaded)).unwrap();

        assert_eq!(resent, sent);
    }

    #[test]
    fn test_routine_from_backend() {
        let routine = domain::Routine::from(
            serde_json::from_value::<Routine>(json!({
                "_id": "r1",
                "name": "Fuerza",
                "description": "desc",
                "comments": null,
                "totalWeeks": 7,
                "isActive": true,
                "trainerId": "t1",
                "weeks": [
                    {
                        "_id": "w1",
                        "weekNumber": 1,
                        "name": "Semana 1",
                        "days": [
                            {
                                "dayNumber": "1",
                                "name": "Día 1",
                                "exercises": [
                                    {
                                        "_id": "x1",
                                        "name": "Sentadilla",
                                        "sets": "4",
                                        "repetitions": 8.9,
                                        "restBetweenSets": -5,
                                        "order": 1,
                                        "exerciseId": "e1"
                                    },
                                    {
                                        "name": "Plancha",
                                        "sets": 3,
                                        "repetitions": "diez"
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }))
            .unwrap(),
        );

        assert_eq!(routine.id, Some("r1".into()));
        assert_eq!(routine.trainer_id, Some("t1".into()));
        assert_eq!(routine.comments, "");
        assert_eq!(routine.total_weeks(), 1);
        let day = &routine.weeks[0].days[0];
        assert_eq!(routine.weeks[0].id, domain::NodeID::Persisted("w1".to_string()));
        assert_eq!(day.id, domain::NodeID::Draft(1));
        assert_eq!(
            day.exercises[0],
            domain::RoutineExercise {
                id: domain::NodeID::Persisted("x1".to_string()),
                name: String::from("Sentadilla"),
                sets: 4,
                repetitions: 8,
                rest_between_sets: 0,
                rest_between_exercises: 0,
                comments: String::new(),
                exercise_id: Some("e1".into()),
            }
        );
        assert_eq!(day.exercises[1].id, domain::NodeID::Draft(2));
        assert_eq!(day.exercises[1].repetitions, 0);
    }

    #[rstest]
    #[case(json!(3), 3)]
    #[case(json!("12"), 12)]
    #[case(json!(" 7 "), 7)]
    #[case(json!(2.75), 2)]
    #[case(json!("4.5"), 4)]
    #[case(json!(-1), 0)]
    #[case(json!("abc"), 0)]
    #[case(json!(null), 0)]
    fn test_count(#[case] value: serde_json::Value, #[case] expected: u32) {
        let exercise: RoutineExercise =
            serde_json::from_value(json!({ "name": "Remo", "sets": value })).unwrap();
        assert_eq!(exercise.sets, expected);
    }

    #[test]
    fn test_routine_summary() {
        let summary = domain::RoutineSummary::try_from(
            serde_json::from_value::<Routine>(json!({
                "id": "r2",
                "name": "Hipertrofia",
                "description": "desc",
                "totalWeeks": "4",
                "isActive": false,
                "trainer_id": "t1"
            }))
            .unwrap(),
        )
        .unwrap();

        assert_eq!(
            summary,
            domain::RoutineSummary {
                id: "r2".into(),
                name: String::from("Hipertrofia"),
                description: String::from("desc"),
                total_weeks: 4,
                is_active: false,
                trainer_id: Some("t1".into()),
            }
        );
        assert_eq!(
            domain::RoutineSummary::try_from(
                serde_json::from_value::<Routine>(json!({ "name": "Sin id" })).unwrap()
            ),
            Err(MissingID("routine"))
        );
    }

    #[test]
    fn test_assignment_request() {
        let request = domain::AssignmentForm {
            routine_id: Some("r1".into()),
            user_id: Some("u1".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            notes: String::from(" 3x por semana "),
        }
        .validate()
        .unwrap();

        assert_eq!(
            serde_json::to_value(AssignmentRequest::from(&request)).unwrap(),
            json!({
                "userId": "u1",
                "startDate": "2024-01-01T00:00:00.000Z",
                "endDate": "2024-01-31T00:00:00.000Z",
                "notes": "3x por semana"
            })
        );
    }

    #[rstest]
    #[case(json!({
        "_id": "a1",
        "routineId": "r1",
        "userId": "u1",
        "startDate": "2024-01-01T00:00:00.000Z",
        "endDate": "2024-01-31",
        "notes": null,
        "isActive": true
    }), None)]
    #[case(json!({
        "_id": "a1",
        "routineId": { "_id": "r1", "name": "Fuerza" },
        "userId": { "_id": "u1" },
        "startDate": "2024-01-01T00:00:00Z",
        "endDate": "2024-01-31T00:00:00.000Z",
        "isActive": true
    }), Some("Fuerza"))]
    fn test_assignment_from_backend(
        #[case] value: serde_json::Value,
        #[case] routine_name: Option<&str>,
    ) {
        assert_eq!(
            domain::Assignment::try_from(serde_json::from_value::<Assignment>(value).unwrap()),
            Ok(domain::Assignment {
                id: Some("a1".into()),
                routine_id: "r1".into(),
                routine_name: routine_name.map(str::to_string),
                user_id: Some("u1".into()),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                notes: String::new(),
                is_active: true,
            })
        );
    }

    #[test]
    fn test_assignment_invalid_date() {
        let assignment = serde_json::from_value::<Assignment>(json!({
            "routineId": "r1",
            "startDate": "soon",
            "endDate": "2024-01-31"
        }))
        .unwrap();

        assert_eq!(
            domain::Assignment::try_from(assignment),
            Err(InvalidDate(String::from("soon")))
        );
    }

    #[test]
    fn test_from_json_prefers_id() {
        let body = json!({
            "id": "r1",
            "_id": "665f1c2a",
            "name": "Fuerza",
            "description": "desc",
            "weeks": [
                {
                    "id": null,
                    "_id": "w1",
                    "days": [
                        {
                            "_id": "d1",
                            "exercises": [{ "id": "x1", "_id": "665f1c2b", "name": "Remo" }]
                        }
                    ]
                }
            ]
        })
        .to_string();

        let routine = from_json::<Routine>(&body).unwrap();

        assert_eq!(routine.id, Some(String::from("r1")));
        assert_eq!(routine.weeks[0].id, Some(String::from("w1")));
        assert_eq!(routine.weeks[0].days[0].id, Some(String::from("d1")));
        assert_eq!(
            routine.weeks[0].days[0].exercises[0].id,
            Some(String::from("x1"))
        );
        assert!(serde_json::from_str::<Routine>(&body).is_err());
    }

    #[test]
    fn test_from_json_users() {
        let users = from_json::<Vec<User>>(
            r#"[{"id":"u1","_id":"665f1c2c","name":"Ana","email":"ana@example.com"}]"#,
        )
        .unwrap();

        assert_eq!(
            users.into_iter().map(domain::User::from).collect::<Vec<_>>(),
            vec![USER.clone()]
        );
    }

    #[test]
    fn test_user_from_backend() {
        assert_eq!(
            domain::User::from(
                serde_json::from_value::<User>(json!({
                    "_id": "u1",
                    "name": "Ana",
                    "email": "ana@example.com",
                    "role": "client"
                }))
                .unwrap()
            ),
            USER.clone()
        );
    }

    #[test]
    fn test_muscle_group() {
        let muscle_group = domain::MuscleGroup::try_from(
            serde_json::from_value::<MuscleGroup>(json!({
                "_id": "m1",
                "name": "Pecho",
                "description": "Pectorales"
            }))
            .unwrap(),
        )
        .unwrap();

        assert_eq!(
            muscle_group,
            domain::MuscleGroup {
                id: "m1".into(),
                name: domain::Name::new("Pecho").unwrap(),
                description: String::from("Pectorales"),
                is_active: true,
            }
        );
        assert_eq!(
            serde_json::to_value(MuscleGroup::from(&muscle_group)).unwrap(),
            json!({ "name": "Pecho", "description": "Pectorales", "isActive": true })
        );
        assert_eq!(
            domain::MuscleGroup::try_from(
                serde_json::from_value::<MuscleGroup>(json!({ "id": "m2", "name": " " }))
                    .unwrap()
            ),
            Err(ConversionError::Name(domain::NameError::Empty))
        );
    }

    #[test]
    fn test_exercise_maps_title_to_name() {
        let exercise = domain::Exercise::try_from(
            serde_json::from_value::<Exercise>(json!({
                "id": "e1",
                "title": "Press banca",
                "description": "Con barra",
                "muscleGroupId": { "_id": "m1", "name": "Pecho" },
                "imageUrl": "",
                "isActive": false
            }))
            .unwrap(),
        )
        .unwrap();

        assert_eq!(
            exercise,
            domain::Exercise {
                id: "e1".into(),
                name: domain::Name::new("Press banca").unwrap(),
                description: String::from("Con barra"),
                muscle_group_id: Some("m1".into()),
                image_url: None,
                is_active: false,
            }
        );
        assert_eq!(
            serde_json::to_value(Exercise::from(&exercise)).unwrap(),
            json!({
                "title": "Press banca",
                "description": "Con barra",
                "muscleGroupId": "m1",
                "imageUrl": null,
                "isActive": false
            })
        );
    }

    #[test]
    fn test_new_exercise_payload() {
        let exercise = domain::NewExercise {
            name: domain::Name::new("Remo").unwrap(),
            description: String::from(" Con mancuerna "),
            muscle_group_id: "m2".into(),
            image_url: Some(String::from("/img/remo.png")),
        };

        assert_eq!(
            serde_json::to_value(Exercise::from(&exercise)).unwrap(),
            json!({
                "title": "Remo",
                "description": "Con mancuerna",
                "muscleGroupId": "m2",
                "imageUrl": "/img/remo.png",
                "isActive": true
            })
        );
    }

    #[rstest]
    #[case(json!({ "imageUrl": "/img/e1.png" }), Some("/img/e1.png"))]
    #[case(json!({ "url": "/img/e1.png" }), Some("/img/e1.png"))]
    #[case(json!({ "imageUrl": null }), None)]
    fn test_exercise_image(#[case] value: serde_json::Value, #[case] expected: Option<&str>) {
        assert_eq!(
            serde_json::from_value::<ExerciseImage>(value)
                .unwrap()
                .image_url
                .as_deref(),
            expected
        );
    }

    #[rstest]
    #[case(r#"{"message":"Routine not found"}"#, Some("Routine not found"))]
    #[case(
        r#"{"message":["name should not be empty","sets must be a number"]}"#,
        Some("name should not be empty, sets must be a number")
    )]
    #[case(r#"{"error":"Bad Request","statusCode":400}"#, Some("Bad Request"))]
    #[case(r#"{"message":[],"error":"Bad Request"}"#, Some("Bad Request"))]
    #[case(r#"{"statusCode":500}"#, None)]
    #[case("<html>Bad Gateway</html>", None)]
    #[case("", None)]
    fn test_error_payload_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(ErrorPayload::message(body).as_deref(), expected);
    }
}
