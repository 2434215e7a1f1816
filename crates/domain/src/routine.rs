use std::{collections::BTreeSet, fmt};

use derive_more::{AsRef, Deref, Display};

use crate::{CreateError, DeleteError, ExerciseID, ReadError, UpdateError, ValidRoutine};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPETITIONS: u32 = 10;
pub const DEFAULT_REST_BETWEEN_SETS: u32 = 60;
pub const DEFAULT_REST_BETWEEN_EXERCISES: u32 = 120;

/// Prefix of identifiers handed out for nodes that have not been persisted yet.
pub const DRAFT_ID_PREFIX: &str = "temp-";

#[allow(async_fn_in_trait)]
pub trait RoutineService {
    async fn get_routines(&self, trainer_id: TrainerID) -> Result<Vec<RoutineSummary>, ReadError>;
    async fn get_routine(&self, id: RoutineID) -> Result<Routine, ReadError>;
    async fn create_routine(&self, routine: ValidRoutine) -> Result<Routine, CreateError>;
    async fn replace_routine(
        &self,
        id: RoutineID,
        routine: ValidRoutine,
    ) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait RoutineRepository {
    async fn read_routines(&self, trainer_id: TrainerID)
    -> Result<Vec<RoutineSummary>, ReadError>;
    async fn read_routine(&self, id: RoutineID) -> Result<Routine, ReadError>;
    async fn create_routine(&self, routine: ValidRoutine) -> Result<Routine, CreateError>;
    async fn replace_routine(
        &self,
        id: RoutineID,
        routine: ValidRoutine,
    ) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

/// A multi-week training program.
///
/// Week, day and exercise numbers are not stored. They are always derived from the position
/// inside the containing sequence, see [`position_number`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    pub id: Option<RoutineID>,
    pub name: String,
    pub description: String,
    pub comments: String,
    pub is_active: bool,
    pub trainer_id: Option<TrainerID>,
    pub weeks: Vec<Week>,
}

impl Routine {
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        u32::try_from(self.weeks.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises().map(|e| e.sets).sum()
    }

    /// Catalog exercises referenced by any entry of the routine.
    #[must_use]
    pub fn catalog_exercises(&self) -> BTreeSet<ExerciseID> {
        self.exercises()
            .filter_map(|e| e.exercise_id.clone())
            .collect()
    }

    /// Summary of a persisted routine, `None` if the routine has not been saved yet.
    #[must_use]
    pub fn summary(&self) -> Option<RoutineSummary> {
        Some(RoutineSummary {
            id: self.id.clone()?,
            name: self.name.clone(),
            description: self.description.clone(),
            total_weeks: self.total_weeks(),
            is_active: self.is_active,
            trainer_id: self.trainer_id.clone(),
        })
    }

    fn exercises(&self) -> impl Iterator<Item = &RoutineExercise> {
        self.weeks
            .iter()
            .flat_map(|w| &w.days)
            .flat_map(|d| &d.exercises)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub id: NodeID,
    pub name: String,
    pub comments: String,
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub id: NodeID,
    pub name: String,
    pub comments: String,
    pub exercises: Vec<RoutineExercise>,
}

/// One prescribed movement of a day, optionally referring to a catalog exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineExercise {
    pub id: NodeID,
    pub name: String,
    pub sets: u32,
    pub repetitions: u32,
    pub rest_between_sets: u32,
    pub rest_between_exercises: u32,
    pub comments: String,
    pub exercise_id: Option<ExerciseID>,
}

impl RoutineExercise {
    #[must_use]
    pub fn new(id: NodeID) -> Self {
        Self {
            id,
            name: String::new(),
            sets: DEFAULT_SETS,
            repetitions: DEFAULT_REPETITIONS,
            rest_between_sets: DEFAULT_REST_BETWEEN_SETS,
            rest_between_exercises: DEFAULT_REST_BETWEEN_EXERCISES,
            comments: String::new(),
            exercise_id: None,
        }
    }

    /// A reference image is available for entries linked to the catalog.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.exercise_id.is_some()
    }
}

/// Identifier of a week, day or exercise node.
///
/// Nodes loaded from the backend keep their backend identifier. Nodes inserted locally get a
/// draft identifier, which is rendered with [`DRAFT_ID_PREFIX`] so that the backend can tell
/// insertions from updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeID {
    Persisted(String),
    Draft(u32),
}

impl NodeID {
    #[must_use]
    pub fn is_draft(&self) -> bool {
        matches!(self, NodeID::Draft(_))
    }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeID::Persisted(id) => write!(f, "{id}"),
            NodeID::Draft(n) => write!(f, "{DRAFT_ID_PREFIX}{n}"),
        }
    }
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutineID(String);

impl From<&str> for RoutineID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RoutineID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainerID(String);

impl From<&str> for TrainerID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TrainerID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// List representation of a routine, without the nested weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineSummary {
    pub id: RoutineID,
    pub name: String,
    pub description: String,
    pub total_weeks: u32,
    pub is_active: bool,
    pub trainer_id: Option<TrainerID>,
}

/// 1-based number of the element at `index`.
#[must_use]
pub fn position_number(index: usize) -> u32 {
    u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX)
}

#[must_use]
pub fn default_week_name(number: u32) -> String {
    format!("Semana {number}")
}

#[must_use]
pub fn default_day_name(number: u32) -> String {
    format!("Día {number}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    static ROUTINE: std::sync::LazyLock<Routine> = std::sync::LazyLock::new(|| Routine {
        id: Some("r1".into()),
        name: String::from("Fuerza"),
        description: String::from("desc"),
        comments: String::new(),
        is_active: true,
        trainer_id: Some("t1".into()),
        weeks: vec![
            Week {
                id: NodeID::Persisted("w1".to_string()),
                name: default_week_name(1),
                comments: String::new(),
                days: vec![Day {
                    id: NodeID::Persisted("d1".to_string()),
                    name: default_day_name(1),
                    comments: String::new(),
                    exercises: vec![
                        RoutineExercise {
                            name: String::from("Sentadilla"),
                            exercise_id: Some("e1".into()),
                            ..RoutineExercise::new(NodeID::Persisted("x1".to_string()))
                        },
                        RoutineExercise {
                            name: String::from("Plancha"),
                            sets: 4,
                            ..RoutineExercise::new(NodeID::Persisted("x2".to_string()))
                        },
                    ],
                }],
            },
            Week {
                id: NodeID::Draft(1),
                name: default_week_name(2),
                comments: String::new(),
                days: vec![Day {
                    id: NodeID::Draft(2),
                    name: default_day_name(1),
                    comments: String::new(),
                    exercises: vec![RoutineExercise {
                        name: String::from("Sentadilla"),
                        exercise_id: Some("e1".into()),
                        ..RoutineExercise::new(NodeID::Draft(3))
                    }],
                }],
            },
        ],
    });

    #[test]
    fn test_routine_total_weeks() {
        assert_eq!(ROUTINE.total_weeks(), 2);
    }

    #[test]
    fn test_routine_num_sets() {
        assert_eq!(ROUTINE.num_sets(), 10);
    }

    #[test]
    fn test_routine_catalog_exercises() {
        assert_eq!(ROUTINE.catalog_exercises(), BTreeSet::from(["e1".into()]));
    }

    #[test]
    fn test_routine_summary() {
        assert_eq!(
            ROUTINE.summary(),
            Some(RoutineSummary {
                id: "r1".into(),
                name: String::from("Fuerza"),
                description: String::from("desc"),
                total_weeks: 2,
                is_active: true,
                trainer_id: Some("t1".into()),
            })
        );
        let unsaved = Routine {
            id: None,
            ..ROUTINE.clone()
        };
        assert_eq!(unsaved.summary(), None);
    }

    #[test]
    fn test_routine_exercise_new() {
        let exercise = RoutineExercise::new(NodeID::Draft(7));
        assert_eq!(exercise.sets, 3);
        assert_eq!(exercise.repetitions, 10);
        assert_eq!(exercise.rest_between_sets, 60);
        assert_eq!(exercise.rest_between_exercises, 120);
        assert!(exercise.name.is_empty());
        assert!(!exercise.has_image());
    }

    #[rstest]
    #[case(NodeID::Persisted("665f1c".to_string()), "665f1c", false)]
    #[case(NodeID::Draft(3), "temp-3", true)]
    fn test_node_id(#[case] id: NodeID, #[case] string: &str, #[case] is_draft: bool) {
        assert_eq!(id.to_string(), string);
        assert_eq!(id.is_draft(), is_draft);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 2)]
    #[case(41, 42)]
    fn test_position_number(#[case] index: usize, #[case] number: u32) {
        assert_eq!(position_number(index), number);
    }

    #[test]
    fn test_default_names() {
        assert_eq!(default_week_name(2), "Semana 2");
        assert_eq!(default_day_name(3), "Día 3");
    }
}
