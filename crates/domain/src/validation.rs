use derive_more::Deref;

use crate::{Routine, position_number};

/// A routine that passed [`validate`] and may be submitted.
#[derive(Deref, Debug, Clone, PartialEq, Eq)]
pub struct ValidRoutine(Routine);

impl ValidRoutine {
    #[must_use]
    pub fn into_inner(self) -> Routine {
        self.0
    }
}

/// First rule violated by a routine. Positions are 1-based, as displayed to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The routine needs a name")]
    NameRequired,
    #[error("The routine needs a description")]
    DescriptionRequired,
    #[error("The routine needs at least one week")]
    NoWeeks,
    #[error("Week {week} needs at least one day")]
    WeekMissingDays { week: u32 },
    #[error("Day {day} of week {week} needs at least one exercise")]
    DayMissingExercises { week: u32, day: u32 },
    #[error("Exercise {exercise} of day {day} in week {week} needs a name")]
    ExerciseNameRequired { week: u32, day: u32, exercise: u32 },
    #[error("Exercise {exercise} of day {day} in week {week} needs at least one set")]
    ExerciseSetsInvalid { week: u32, day: u32, exercise: u32 },
    #[error("Exercise {exercise} of day {day} in week {week} needs at least one repetition")]
    ExerciseRepsInvalid { week: u32, day: u32, exercise: u32 },
}

/// Check a routine before submission.
///
/// Rules are evaluated in a fixed order and the first violation is returned. Each rule is
/// checked across the whole routine before the next one: every week needs a day, then every
/// day needs an exercise, then every exercise needs valid fields.
pub fn validate(routine: &Routine) -> Result<ValidRoutine, ValidationError> {
    if routine.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if routine.description.trim().is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    if routine.weeks.is_empty() {
        return Err(ValidationError::NoWeeks);
    }

    if let Some(w) = routine.weeks.iter().position(|week| week.days.is_empty()) {
        return Err(ValidationError::WeekMissingDays {
            week: position_number(w),
        });
    }

    for (w, week) in routine.weeks.iter().enumerate() {
        if let Some(d) = week.days.iter().position(|day| day.exercises.is_empty()) {
            return Err(ValidationError::DayMissingExercises {
                week: position_number(w),
                day: position_number(d),
            });
        }
    }

    for (w, week) in routine.weeks.iter().enumerate() {
        for (d, day) in week.days.iter().enumerate() {
            for (e, exercise) in day.exercises.iter().enumerate() {
                let (week, day, exercise_number) =
                    (position_number(w), position_number(d), position_number(e));

                if exercise.name.trim().is_empty() {
                    return Err(ValidationError::ExerciseNameRequired {
                        week,
                        day,
                        exercise: exercise_number,
                    });
                }

                if exercise.sets < 1 {
                    return Err(ValidationError::ExerciseSetsInvalid {
                        week,
                        day,
                        exercise: exercise_number,
                    });
                }

                if exercise.repetitions < 1 {
                    return Err(ValidationError::ExerciseRepsInvalid {
                        week,
                        day,
                        exercise: exercise_number,
                    });
                }
            }
        }
    }

    Ok(ValidRoutine(routine.clone()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Day, NodeID, RoutineExercise, Week};

    use super::*;

    fn exercise(name: &str, sets: u32, repetitions: u32) -> RoutineExercise {
        RoutineExercise {
            name: name.to_string(),
            sets,
            repetitions,
            ..RoutineExercise::new(NodeID::Draft(0))
        }
    }

    fn day(exercises: Vec<RoutineExercise>) -> Day {
        Day {
            id: NodeID::Draft(0),
            name: String::new(),
            comments: String::new(),
            exercises,
        }
    }

    fn week(days: Vec<Day>) -> Week {
        Week {
            id: NodeID::Draft(0),
            name: String::new(),
            comments: String::new(),
            days,
        }
    }

    fn routine(name: &str, description: &str, weeks: Vec<Week>) -> Routine {
        Routine {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            comments: String::new(),
            is_active: true,
            trainer_id: None,
            weeks,
        }
    }

    #[test]
    fn test_validate_minimal_routine() {
        let routine = routine(
            "Fuerza",
            "desc",
            vec![week(vec![day(vec![exercise("Sentadilla", 3, 10)])])],
        );

        let valid = validate(&routine).unwrap();

        assert_eq!(*valid, routine);
        assert_eq!(valid.total_weeks(), 1);
    }

    #[rstest]
    #[case::name_missing(
        routine(" ", "desc", vec![]),
        ValidationError::NameRequired
    )]
    #[case::description_missing(
        routine("Fuerza", "", vec![]),
        ValidationError::DescriptionRequired
    )]
    #[case::no_weeks(
        routine("Fuerza", "desc", vec![]),
        ValidationError::NoWeeks
    )]
    #[case::week_without_days(
        routine("Fuerza", "desc", vec![
            week(vec![day(vec![exercise("A", 3, 10)])]),
            week(vec![]),
        ]),
        ValidationError::WeekMissingDays { week: 2 }
    )]
    #[case::day_without_exercises(
        routine("Fuerza", "desc", vec![
            week(vec![day(vec![exercise("A", 3, 10)]), day(vec![])]),
        ]),
        ValidationError::DayMissingExercises { week: 1, day: 2 }
    )]
    #[case::exercise_name_missing(
        routine("Fuerza", "desc", vec![week(vec![day(vec![exercise("", 3, 10)])])]),
        ValidationError::ExerciseNameRequired { week: 1, day: 1, exercise: 1 }
    )]
    #[case::exercise_without_sets(
        routine("Fuerza", "desc", vec![week(vec![day(vec![
            exercise("A", 3, 10),
            exercise("B", 0, 10),
        ])])]),
        ValidationError::ExerciseSetsInvalid { week: 1, day: 1, exercise: 2 }
    )]
    #[case::exercise_without_repetitions(
        routine("Fuerza", "desc", vec![
            week(vec![day(vec![exercise("A", 3, 10)])]),
            week(vec![day(vec![exercise("A", 3, 10)]), day(vec![exercise("B", 3, 0)])]),
        ]),
        ValidationError::ExerciseRepsInvalid { week: 2, day: 2, exercise: 1 }
    )]
    fn test_validate_error(#[case] routine: Routine, #[case] expected: ValidationError) {
        assert_eq!(validate(&routine), Err(expected));
    }

    #[rstest]
    #[case::week_structure_before_exercise_fields(
        vec![
            week(vec![day(vec![exercise("", 0, 0)])]),
            week(vec![]),
        ],
        ValidationError::WeekMissingDays { week: 2 }
    )]
    #[case::week_structure_before_day_structure(
        vec![
            week(vec![day(vec![])]),
            week(vec![]),
        ],
        ValidationError::WeekMissingDays { week: 2 }
    )]
    #[case::day_structure_before_exercise_fields(
        vec![
            week(vec![day(vec![exercise("", 3, 10)])]),
            week(vec![day(vec![exercise("A", 3, 10)]), day(vec![])]),
        ],
        ValidationError::DayMissingExercises { week: 2, day: 2 }
    )]
    #[case::first_exercise_field(
        vec![
            week(vec![day(vec![exercise("A", 3, 0)])]),
            week(vec![day(vec![exercise("", 0, 0)])]),
        ],
        ValidationError::ExerciseRepsInvalid { week: 1, day: 1, exercise: 1 }
    )]
    fn test_validate_reports_first_failure(
        #[case] weeks: Vec<Week>,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(validate(&routine("Fuerza", "desc", weeks)), Err(expected));
    }

    #[test]
    fn test_validate_accepted_documents_are_complete() {
        let routines = [
            routine(
                "Fuerza",
                "desc",
                vec![week(vec![day(vec![exercise("A", 1, 1)])])],
            ),
            routine(
                "Hipertrofia",
                "desc",
                vec![
                    week(vec![
                        day(vec![exercise("A", 4, 8), exercise("B", 3, 12)]),
                        day(vec![exercise("C", 5, 5)]),
                    ]),
                    week(vec![day(vec![exercise("D", 2, 20)])]),
                ],
            ),
        ];

        for routine in &routines {
            let valid = validate(routine).unwrap();
            for week in &valid.weeks {
                assert!(!week.days.is_empty());
                for day in &week.days {
                    assert!(!day.exercises.is_empty());
                    for exercise in &day.exercises {
                        assert!(!exercise.name.trim().is_empty());
                        assert!(exercise.sets >= 1);
                        assert!(exercise.repetitions >= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::ExerciseNameRequired {
                week: 1,
                day: 2,
                exercise: 3
            }
            .to_string(),
            "Exercise 3 of day 2 in week 1 needs a name"
        );
    }
}
