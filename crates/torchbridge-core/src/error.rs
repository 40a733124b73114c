//! The three error kinds of the engine.
//!
//! - [`ValueError`]: a single supplied scalar is out of domain. Returned
//!   synchronously by the call that received it.
//! - [`ObjectError`]: a structural defect in an externally supplied object.
//!   Collected by the importer, never returned as a hard failure.
//! - [`ResourceError`]: a named resource does not exist.
//! - [`SimulationError`]: a turn could not be applied.
//!
//! Every error exposes a stable machine-readable [`code`](ValueError::code).

use serde_json::Value;

use crate::fixed::{Elapsed, Minutes};

/// Smallest bridge capacity a configuration may declare.
pub const MIN_BRIDGE_WIDTH: u32 = 2;

/// A scalar argument is out of its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("preset name must not be empty")]
    EmptyPresetName,

    #[error("bridge width {value} is below the minimum of 2")]
    BridgeWidthTooSmall { value: i64 },

    #[error("cross time {value} must be positive")]
    NonPositiveCrossTime { value: Minutes },
}

impl ValueError {
    pub fn code(&self) -> &'static str {
        match self {
            ValueError::EmptyPresetName => "PRESET_EMPTY_NAME",
            ValueError::BridgeWidthTooSmall { .. } => "PRESET_BRIDGE_WIDTH_TOO_SMALL",
            ValueError::NonPositiveCrossTime { .. } => "ACTOR_NON_POSITIVE_CROSS_TIME",
        }
    }
}

/// What is wrong with an imported object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectErrorKind {
    #[error("configuration is not an object")]
    NotAnObject,
    #[error("missing `name`")]
    NameMissing,
    #[error("`name` is not a string")]
    NameNotString,
    #[error("missing `bridgeWidth`")]
    BridgeWidthMissing,
    #[error("`bridgeWidth` is not a number")]
    BridgeWidthNotNumber,
    #[error("`bridgeWidth` is not a representable whole number")]
    BridgeWidthNotInteger,
    #[error("missing `people`")]
    PeopleMissing,
    #[error("`people` is not an array")]
    PeopleNotArray,
    #[error("person is not an object")]
    PersonNotObject,
    #[error("person is missing `name`")]
    PersonNameMissing,
    #[error("person `name` is not a string")]
    PersonNameNotString,
    #[error("person is missing `crossTime`")]
    PersonCrossTimeMissing,
    #[error("person `crossTime` is not a number")]
    PersonCrossTimeNotNumber,
    #[error("person `crossTime` must be positive")]
    PersonCrossTimeNotPositive,
    #[error("person `crossTime` is out of range")]
    PersonCrossTimeOutOfRange,
    #[error("person `side` must be \"start\" or \"end\"")]
    PersonInvalidSide,
    #[error("missing `torchSide`")]
    TorchSideMissing,
    #[error("`torchSide` must be \"start\" or \"end\"")]
    TorchSideInvalid,
    /// The object was well-formed but construction rejected one of its values.
    #[error("{0}")]
    Rejected(ValueError),
}

impl ObjectErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ObjectErrorKind::NotAnObject => "NOT_AN_OBJECT",
            ObjectErrorKind::NameMissing => "NAME_MISSING",
            ObjectErrorKind::NameNotString => "NAME_NOT_STRING",
            ObjectErrorKind::BridgeWidthMissing => "BRIDGE_WIDTH_MISSING",
            ObjectErrorKind::BridgeWidthNotNumber => "BRIDGE_WIDTH_NOT_NUMBER",
            ObjectErrorKind::BridgeWidthNotInteger => "BRIDGE_WIDTH_NOT_INTEGER",
            ObjectErrorKind::PeopleMissing => "PEOPLE_MISSING",
            ObjectErrorKind::PeopleNotArray => "PEOPLE_NOT_ARRAY",
            ObjectErrorKind::PersonNotObject => "PERSON_NOT_OBJECT",
            ObjectErrorKind::PersonNameMissing => "PERSON_NAME_MISSING",
            ObjectErrorKind::PersonNameNotString => "PERSON_NAME_NOT_STRING",
            ObjectErrorKind::PersonCrossTimeMissing => "PERSON_CROSS_TIME_MISSING",
            ObjectErrorKind::PersonCrossTimeNotNumber => "PERSON_CROSS_TIME_NOT_NUMBER",
            ObjectErrorKind::PersonCrossTimeNotPositive => "PERSON_CROSS_TIME_NOT_POSITIVE",
            ObjectErrorKind::PersonCrossTimeOutOfRange => "PERSON_CROSS_TIME_OUT_OF_RANGE",
            ObjectErrorKind::PersonInvalidSide => "PERSON_INVALID_SIDE",
            ObjectErrorKind::TorchSideMissing => "TORCH_SIDE_MISSING",
            ObjectErrorKind::TorchSideInvalid => "TORCH_SIDE_INVALID",
            ObjectErrorKind::Rejected(e) => e.code(),
        }
    }
}

/// A structural defect found while importing an external object.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} (at `{path}`)")]
pub struct ObjectError {
    pub kind: ObjectErrorKind,
    /// Location of the defect inside the object, e.g. `/people/1/crossTime`.
    pub path: String,
    /// The offending field value, when there is one.
    pub value: Option<Value>,
    /// The whole input object the defect was found in.
    pub object: Value,
}

impl ObjectError {
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// A named resource does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("preset '{name}' not found")]
    PresetNotFound { name: String },
}

impl ResourceError {
    pub fn code(&self) -> &'static str {
        match self {
            ResourceError::PresetNotFound { .. } => "PRESET_NOT_FOUND",
        }
    }
}

/// A turn could not be applied to the counters. The state is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("elapsed time {elapsed} cannot absorb a turn of {duration}")]
    ClockOverflow { elapsed: Elapsed, duration: Minutes },
}

impl SimulationError {
    pub fn code(&self) -> &'static str {
        match self {
            SimulationError::ClockOverflow { .. } => "SIMULATION_CLOCK_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_error_codes_are_stable() {
        assert_eq!(ValueError::EmptyPresetName.code(), "PRESET_EMPTY_NAME");
        assert_eq!(
            ValueError::BridgeWidthTooSmall { value: 1 }.code(),
            "PRESET_BRIDGE_WIDTH_TOO_SMALL"
        );
    }

    #[test]
    fn rejected_object_error_reuses_value_code() {
        let err = ObjectError {
            kind: ObjectErrorKind::Rejected(ValueError::BridgeWidthTooSmall { value: 1 }),
            path: "/bridgeWidth".into(),
            value: Some(json!(1)),
            object: json!({ "bridgeWidth": 1 }),
        };
        assert_eq!(err.code(), "PRESET_BRIDGE_WIDTH_TOO_SMALL");
        assert_eq!(
            err.to_string(),
            "bridge width 1 is below the minimum of 2 (at `/bridgeWidth`)"
        );
    }

    #[test]
    fn resource_error_message() {
        let err = ResourceError::PresetNotFound {
            name: "Missing".into(),
        };
        assert_eq!(err.code(), "PRESET_NOT_FOUND");
        assert_eq!(err.to_string(), "preset 'Missing' not found");
    }
}
