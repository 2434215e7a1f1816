use std::collections::BTreeSet;

use crate::{
    Day, Exercise, ExerciseID, NodeID, Routine, RoutineExercise, RoutineID, TrainerID,
    ValidRoutine, ValidationError, Week, default_day_name, default_week_name, position_number,
    validate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RoutineID),
}

/// Position of a node inside the edited routine (0-based indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Path {
    Routine,
    Week(usize),
    Day(usize, usize),
    Exercise(usize, usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name(String),
    Description(String),
    Comments(String),
    IsActive(bool),
    Sets(u32),
    Repetitions(u32),
    RestBetweenSets(u32),
    RestBetweenExercises(u32),
    CatalogExercise(Option<ExerciseID>),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Week {week} does not exist")]
    WeekNotFound { week: u32 },
    #[error("Day {day} of week {week} does not exist")]
    DayNotFound { week: u32, day: u32 },
    #[error("Exercise {exercise} of day {day} in week {week} does not exist")]
    ExerciseNotFound { week: u32, day: u32, exercise: u32 },
    #[error("The last week cannot be removed")]
    LastWeek,
    #[error("The last day of a week cannot be removed")]
    LastDay,
    #[error("The last exercise of a day cannot be removed")]
    LastExercise,
    #[error("Field cannot be set on this element")]
    FieldNotApplicable,
}

/// In-memory state of a routine while it is created or edited.
///
/// The editor exclusively owns its document. In create mode the last remaining week, day or
/// exercise cannot be removed, in edit mode the structure may be emptied (validation rejects
/// such a document before submission).
#[derive(Debug, Clone)]
pub struct RoutineEditor {
    mode: EditorMode,
    routine: Routine,
    next_draft_id: u32,
    collapsed: BTreeSet<NodeID>,
}

impl RoutineEditor {
    #[must_use]
    pub fn create(trainer_id: Option<TrainerID>) -> Self {
        let mut editor = Self {
            mode: EditorMode::Create,
            routine: Routine {
                id: None,
                name: String::new(),
                description: String::new(),
                comments: String::new(),
                is_active: true,
                trainer_id,
                weeks: vec![],
            },
            next_draft_id: 1,
            collapsed: BTreeSet::new(),
        };
        editor.add_week();
        editor
    }

    /// Start editing a routine returned by the backend.
    #[must_use]
    pub fn edit(routine: Routine) -> Self {
        let next_draft_id = routine
            .weeks
            .iter()
            .flat_map(|w| {
                std::iter::once(&w.id).chain(w.days.iter().flat_map(|d| {
                    std::iter::once(&d.id).chain(d.exercises.iter().map(|e| &e.id))
                }))
            })
            .filter_map(|id| match id {
                NodeID::Draft(n) => Some(*n),
                NodeID::Persisted(_) => None,
            })
            .max()
            .map_or(1, |n| n.saturating_add(1));
        Self {
            mode: routine
                .id
                .clone()
                .map_or(EditorMode::Create, EditorMode::Edit),
            routine,
            next_draft_id,
            collapsed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    #[must_use]
    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    #[must_use]
    pub fn into_routine(self) -> Routine {
        self.routine
    }

    pub fn validate(&self) -> Result<ValidRoutine, ValidationError> {
        validate(&self.routine)
    }

    /// Append a week containing one day with one exercise. Returns the index of the new week.
    pub fn add_week(&mut self) -> usize {
        let number = position_number(self.routine.weeks.len());
        let id = self.next_id();
        let day = self.new_day(1);
        self.routine.weeks.push(Week {
            id,
            name: default_week_name(number),
            comments: String::new(),
            days: vec![day],
        });
        self.routine.weeks.len() - 1
    }

    pub fn remove_week(&mut self, week: usize) -> Result<Week, EditorError> {
        self.week(week)?;
        if self.routine.weeks.len() == 1 && !self.allows_emptying() {
            return Err(EditorError::LastWeek);
        }
        let removed = self.routine.weeks.remove(week);
        self.forget(&removed.id);
        for day in &removed.days {
            self.forget(&day.id);
        }
        Ok(removed)
    }

    /// Append a day containing one exercise to a week. Returns the index of the new day.
    pub fn add_day(&mut self, week: usize) -> Result<usize, EditorError> {
        let number = position_number(self.week(week)?.days.len());
        let day = self.new_day(number);
        let days = &mut self.routine.weeks[week].days;
        days.push(day);
        Ok(days.len() - 1)
    }

    pub fn remove_day(&mut self, week: usize, day: usize) -> Result<Day, EditorError> {
        self.day(week, day)?;
        if self.routine.weeks[week].days.len() == 1 && !self.allows_emptying() {
            return Err(EditorError::LastDay);
        }
        let removed = self.routine.weeks[week].days.remove(day);
        self.forget(&removed.id);
        Ok(removed)
    }

    /// Append an exercise with default values to a day. Returns the index of the new exercise.
    pub fn add_exercise(&mut self, week: usize, day: usize) -> Result<usize, EditorError> {
        self.day(week, day)?;
        let exercise = RoutineExercise::new(self.next_id());
        let exercises = &mut self.routine.weeks[week].days[day].exercises;
        exercises.push(exercise);
        Ok(exercises.len() - 1)
    }

    pub fn remove_exercise(
        &mut self,
        week: usize,
        day: usize,
        exercise: usize,
    ) -> Result<RoutineExercise, EditorError> {
        self.exercise(week, day, exercise)?;
        let allows_emptying = self.allows_emptying();
        let exercises = &mut self.routine.weeks[week].days[day].exercises;
        if exercises.len() == 1 && !allows_emptying {
            return Err(EditorError::LastExercise);
        }
        Ok(exercises.remove(exercise))
    }

    /// Set a single field of the node at `path`. Values are not validated.
    pub fn update_field(&mut self, path: Path, field: Field) -> Result<(), EditorError> {
        match path {
            Path::Routine => {
                let routine = &mut self.routine;
                match field {
                    Field::Name(value) => routine.name = value,
                    Field::Description(value) => routine.description = value,
                    Field::Comments(value) => routine.comments = value,
                    Field::IsActive(value) => routine.is_active = value,
                    _ => return Err(EditorError::FieldNotApplicable),
                }
            }
            Path::Week(w) => {
                let week = self.week_mut(w)?;
                match field {
                    Field::Name(value) => week.name = value,
                    Field::Comments(value) => week.comments = value,
                    _ => return Err(EditorError::FieldNotApplicable),
                }
            }
            Path::Day(w, d) => {
                let day = self.day_mut(w, d)?;
                match field {
                    Field::Name(value) => day.name = value,
                    Field::Comments(value) => day.comments = value,
                    _ => return Err(EditorError::FieldNotApplicable),
                }
            }
            Path::Exercise(w, d, e) => {
                let exercise = self.exercise_mut(w, d, e)?;
                match field {
                    Field::Name(value) => exercise.name = value,
                    Field::Comments(value) => exercise.comments = value,
                    Field::Sets(value) => exercise.sets = value,
                    Field::Repetitions(value) => exercise.repetitions = value,
                    Field::RestBetweenSets(value) => exercise.rest_between_sets = value,
                    Field::RestBetweenExercises(value) => exercise.rest_between_exercises = value,
                    Field::CatalogExercise(value) => exercise.exercise_id = value,
                    Field::Description(_) | Field::IsActive(_) => {
                        return Err(EditorError::FieldNotApplicable);
                    }
                }
            }
        }
        Ok(())
    }

    /// Link an entry to a catalog exercise and take over its name.
    pub fn select_catalog_exercise(
        &mut self,
        week: usize,
        day: usize,
        exercise: usize,
        catalog_exercise: &Exercise,
    ) -> Result<(), EditorError> {
        let entry = self.exercise_mut(week, day, exercise)?;
        entry.exercise_id = Some(catalog_exercise.id.clone());
        entry.name = catalog_exercise.name.to_string();
        Ok(())
    }

    /// Flip the expanded state of a week or day and return the new state.
    pub fn toggle_expanded(&mut self, path: Path) -> Result<bool, EditorError> {
        let id = match path {
            Path::Week(w) => self.week(w)?.id.clone(),
            Path::Day(w, d) => self.day(w, d)?.id.clone(),
            Path::Routine | Path::Exercise(..) => return Err(EditorError::FieldNotApplicable),
        };
        if self.collapsed.remove(&id) {
            Ok(true)
        } else {
            self.collapsed.insert(id);
            Ok(false)
        }
    }

    #[must_use]
    pub fn is_expanded(&self, path: Path) -> bool {
        let id = match path {
            Path::Week(w) => self.week(w).map(|week| &week.id),
            Path::Day(w, d) => self.day(w, d).map(|day| &day.id),
            Path::Routine => return true,
            Path::Exercise(..) => return false,
        };
        id.is_ok_and(|id| !self.collapsed.contains(id))
    }

    fn allows_emptying(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    fn next_id(&mut self) -> NodeID {
        let id = NodeID::Draft(self.next_draft_id);
        self.next_draft_id += 1;
        id
    }

    fn new_day(&mut self, number: u32) -> Day {
        let id = self.next_id();
        let exercise = RoutineExercise::new(self.next_id());
        Day {
            id,
            name: default_day_name(number),
            comments: String::new(),
            exercises: vec![exercise],
        }
    }

    fn forget(&mut self, id: &NodeID) {
        self.collapsed.remove(id);
    }

    fn week(&self, week: usize) -> Result<&Week, EditorError> {
        self.routine
            .weeks
            .get(week)
            .ok_or(EditorError::WeekNotFound {
                week: position_number(week),
            })
    }

    fn day(&self, week: usize, day: usize) -> Result<&Day, EditorError> {
        self.week(week)?
            .days
            .get(day)
            .ok_or(EditorError::DayNotFound {
                week: position_number(week),
                day: position_number(day),
            })
    }

    fn exercise(
        &self,
        week: usize,
        day: usize,
        exercise: usize,
    ) -> Result<&RoutineExercise, EditorError> {
        self.day(week, day)?
            .exercises
            .get(exercise)
            .ok_or(EditorError::ExerciseNotFound {
                week: position_number(week),
                day: position_number(day),
                exercise: position_number(exercise),
            })
    }

    fn week_mut(&mut self, week: usize) -> Result<&mut Week, EditorError> {
        self.routine
            .weeks
            .get_mut(week)
            .ok_or(EditorError::WeekNotFound {
                week: position_number(week),
            })
    }

    fn day_mut(&mut self, week: usize, day: usize) -> Result<&mut Day, EditorError> {
        self.week_mut(week)?
            .days
            .get_mut(day)
            .ok_or(EditorError::DayNotFound {
                week: position_number(week),
                day: position_number(day),
            })
    }

    fn exercise_mut(
        &mut self,
        week: usize,
        day: usize,
        exercise: usize,
    ) -> Result<&mut RoutineExercise, EditorError> {
        self.day_mut(week, day)?
            .exercises
            .get_mut(exercise)
            .ok_or(EditorError::ExerciseNotFound {
                week: position_number(week),
                day: position_number(day),
                exercise: position_number(exercise),
            })
    }
}

/// Interpret form input as a non-negative integer.
///
/// Surrounding whitespace is ignored and decimals are truncated. Input that is not a number
/// or is negative yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_count(input: &str) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {
            let value = value.trunc();
            if value >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                value as u32
            }
        }
        _ => 0,
    }
}
