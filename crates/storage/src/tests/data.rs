use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rutina_domain as domain;

pub static ROUTINE: std::sync::LazyLock<domain::Routine> =
    std::sync::LazyLock::new(|| domain::Routine {
        id: Some("r1".into()),
        name: String::from("Fuerza"),
        description: String::from("desc"),
        comments: String::new(),
        is_active: true,
        trainer_id: Some("t1".into()),
        weeks: vec![
            domain::Week {
                id: domain::NodeID::Persisted(String::from("w1")),
                name: domain::default_week_name(1),
                comments: String::new(),
                days: vec![domain::Day {
                    id: domain::NodeID::Persisted(String::from("d1")),
                    name: domain::default_day_name(1),
                    comments: String::new(),
                    exercises: vec![
                        domain::RoutineExercise {
                            name: String::from("Sentadilla"),
                            exercise_id: Some("e1".into()),
                            ..domain::RoutineExercise::new(domain::NodeID::Persisted(
                                String::from("x1"),
                            ))
                        },
                        domain::RoutineExercise {
                            name: String::from("Plancha"),
                            sets: 4,
                            comments: String::from(" al fallo "),
                            ..domain::RoutineExercise::new(domain::NodeID::Persisted(
                                String::from("x2"),
                            ))
                        },
                    ],
                }],
            },
            domain::Week {
                id: domain::NodeID::Draft(1),
                name: domain::default_week_name(2),
                comments: String::new(),
                days: vec![domain::Day {
                    id: domain::NodeID::Draft(2),
                    name: domain::default_day_name(1),
                    comments: String::new(),
                    exercises: vec![domain::RoutineExercise {
                        name: String::from("Sentadilla"),
                        exercise_id: Some("e1".into()),
                        ..domain::RoutineExercise::new(domain::NodeID::Draft(3))
                    }],
                }],
            },
        ],
    });

pub static USER: std::sync::LazyLock<domain::User> = std::sync::LazyLock::new(|| domain::User {
    id: "u1".into(),
    name: String::from("Ana"),
    email: String::from("ana@example.com"),
});

pub static SESSION: std::sync::LazyLock<domain::Session> =
    std::sync::LazyLock::new(|| domain::Session {
        token: token(Some(4_000_000_000)),
        user: String::from(r#"{"name":"Tomás","role":"trainer"}"#),
        trainer_id: Some("t1".into()),
    });

/// Unsigned JWT with the given `exp` claim.
pub fn token(exp: Option<i64>) -> String {
    let claims = match exp {
        Some(exp) => format!(r#"{{"sub":"t1","exp":{exp}}}"#),
        None => String::from(r#"{"sub":"t1"}"#),
    };
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}
