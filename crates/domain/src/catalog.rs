use crate::{Exercise, ExerciseID, MuscleGroup, MuscleGroupID, Name};

/// Result of a catalog read that falls back to illustrative data when the backend is not
/// reachable.
///
/// Fallback data is only meant for display. It must never be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Live(T),
    Fallback(T),
}

impl<T> Fetched<T> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }

    #[must_use]
    pub fn as_inner(&self) -> &T {
        match self {
            Fetched::Live(value) | Fetched::Fallback(value) => value,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(value) | Fetched::Fallback(value) => value,
        }
    }
}

struct FallbackMuscleGroup {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

struct FallbackExercise {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    muscle_group_id: &'static str,
}

const FALLBACK_MUSCLE_GROUPS: [FallbackMuscleGroup; 6] = [
    FallbackMuscleGroup {
        id: "fallback-1",
        name: "Pecho",
        description: "Pectoral mayor y menor",
    },
    FallbackMuscleGroup {
        id: "fallback-2",
        name: "Espalda",
        description: "Dorsales, trapecio y romboides",
    },
    FallbackMuscleGroup {
        id: "fallback-3",
        name: "Piernas",
        description: "Cuádriceps, isquiotibiales y glúteos",
    },
    FallbackMuscleGroup {
        id: "fallback-4",
        name: "Hombros",
        description: "Deltoides anterior, lateral y posterior",
    },
    FallbackMuscleGroup {
        id: "fallback-5",
        name: "Brazos",
        description: "Bíceps, tríceps y antebrazos",
    },
    FallbackMuscleGroup {
        id: "fallback-6",
        name: "Abdomen",
        description: "Recto abdominal y oblicuos",
    },
];

const FALLBACK_EXERCISES: [FallbackExercise; 6] = [
    FallbackExercise {
        id: "fallback-exercise-1",
        name: "Press de banca",
        description: "Empuje horizontal con barra",
        muscle_group_id: "fallback-1",
    },
    FallbackExercise {
        id: "fallback-exercise-2",
        name: "Dominadas",
        description: "Tracción vertical con peso corporal",
        muscle_group_id: "fallback-2",
    },
    FallbackExercise {
        id: "fallback-exercise-3",
        name: "Sentadilla",
        description: "Flexión de rodilla y cadera con barra",
        muscle_group_id: "fallback-3",
    },
    FallbackExercise {
        id: "fallback-exercise-4",
        name: "Press militar",
        description: "Empuje vertical con barra",
        muscle_group_id: "fallback-4",
    },
    FallbackExercise {
        id: "fallback-exercise-5",
        name: "Curl de bíceps",
        description: "Flexión de codo con mancuernas",
        muscle_group_id: "fallback-5",
    },
    FallbackExercise {
        id: "fallback-exercise-6",
        name: "Plancha",
        description: "Isometría abdominal",
        muscle_group_id: "fallback-6",
    },
];

#[must_use]
pub fn fallback_muscle_groups() -> Vec<MuscleGroup> {
    FALLBACK_MUSCLE_GROUPS
        .iter()
        .filter_map(|g| {
            Some(MuscleGroup {
                id: MuscleGroupID::from(g.id),
                name: Name::new(g.name).ok()?,
                description: g.description.to_string(),
                is_active: true,
            })
        })
        .collect()
}

#[must_use]
pub fn fallback_exercises() -> Vec<Exercise> {
    FALLBACK_EXERCISES
        .iter()
        .filter_map(|e| {
            Some(Exercise {
                id: ExerciseID::from(e.id),
                name: Name::new(e.name).ok()?,
                description: e.description.to_string(),
                muscle_group_id: Some(MuscleGroupID::from(e.muscle_group_id)),
                image_url: None,
                is_active: true,
            })
        })
        .collect()
}

/// Fallback data is recognizable by its identifiers.
#[must_use]
pub fn is_fallback_id(id: &str) -> bool {
    id.starts_with("fallback-")
}
