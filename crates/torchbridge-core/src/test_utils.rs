//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use serde_json::{Value, json};

use crate::actor::{Actor, ActorTemplate};
use crate::fixed::{Elapsed, Minutes, f64_to_minutes};
use crate::id::ActorId;
use crate::preset::Preset;
use crate::side::Side;

pub fn minutes(v: f64) -> Minutes {
    f64_to_minutes(v)
}

/// Elapsed time, for comparing against clocks and plan scores.
pub fn elapsed(v: f64) -> Elapsed {
    Elapsed::from_num(v)
}

/// A start-side template.
pub fn template(name: &str, cross_duration: f64) -> ActorTemplate {
    ActorTemplate::new(name, minutes(cross_duration))
}

/// A start-side actor named after its id.
pub fn actor(id: u32, cross_duration: f64) -> Actor {
    Actor {
        id: ActorId(id),
        name: format!("actor{id}"),
        cross_duration: minutes(cross_duration),
        side: Side::Start,
    }
}

/// The well-known four-actor roster: 1, 2, 5 and 8 minutes.
pub fn classic_templates() -> Vec<ActorTemplate> {
    vec![
        template("Louise", 1.0),
        template("Mark", 2.0),
        template("Anne", 5.0),
        template("John", 8.0),
    ]
}

pub fn classic_preset() -> Preset {
    Preset::new("Classic", 2, classic_templates(), Side::Start)
        .expect("classic preset is valid")
}

/// The classic preset in the external configuration format.
pub fn classic_json() -> Value {
    json!({
        "name": "Classic",
        "bridgeWidth": 2,
        "torchSide": "start",
        "people": [
            { "name": "Louise", "crossTime": 1 },
            { "name": "Mark", "crossTime": 2 },
            { "name": "Anne", "crossTime": 5 },
            { "name": "John", "crossTime": 8 }
        ]
    })
}

/// Start-side roster with the given durations, named `p0`, `p1`, ...
pub fn roster(durations: &[f64]) -> Vec<ActorTemplate> {
    durations
        .iter()
        .enumerate()
        .map(|(i, d)| template(&format!("p{i}"), *d))
        .collect()
}

/// Three actors at the start (3, 7, 8) and one (2) already at the end.
pub fn prepositioned_preset() -> Preset {
    Preset::new(
        "Prepositioned",
        2,
        vec![
            template("Three", 3.0),
            template("Seven", 7.0),
            template("Eight", 8.0),
            template("Two", 2.0).on(Side::End),
        ],
        Side::Start,
    )
    .expect("prepositioned preset is valid")
}
