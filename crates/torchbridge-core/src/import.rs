//! Bulk import of configurations from untrusted data.
//!
//! Input is a list of raw JSON values shaped like
//!
//! ```json
//! { "name": "Classic", "bridgeWidth": 2, "torchSide": "start",
//!   "people": [ { "name": "Louise", "crossTime": 1, "side": "start" } ] }
//! ```
//!
//! Each object is run through an ordered list of rules. A rule inspects one
//! field and reports at most one defect; every rule runs, so an object
//! collects all of its defects at once. Objects with no defects are then
//! constructed, and a construction failure becomes a single wrapped defect.
//! Import never fails as a whole: defects are reported per object.

use serde_json::{Map, Value};
use tracing::warn;

use crate::actor::ActorTemplate;
use crate::error::{ObjectError, ObjectErrorKind, ValueError};
use crate::fixed::{Minutes, checked_f64_to_minutes};
use crate::preset::Preset;
use crate::side::Side;

/// Outcome of an import: one entry in `failed` per rejected input object,
/// each holding every defect found in it.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub successful: Vec<Preset>,
    pub failed: Vec<Vec<ObjectError>>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A defect before it is bound to its input object.
struct Defect {
    kind: ObjectErrorKind,
    path: String,
    value: Option<Value>,
}

impl Defect {
    fn new(kind: ObjectErrorKind, path: impl Into<String>, value: Option<&Value>) -> Self {
        Self {
            kind,
            path: path.into(),
            value: value.cloned(),
        }
    }

    fn bind(self, object: &Value) -> ObjectError {
        ObjectError {
            kind: self.kind,
            path: self.path,
            value: self.value,
            object: object.clone(),
        }
    }
}

type TopLevelRule = fn(&Map<String, Value>) -> Option<Defect>;
type PersonRule = fn(&Map<String, Value>, &str) -> Option<Defect>;

/// Checked in order, before and after the roster respectively.
const LEADING_RULES: &[TopLevelRule] = &[check_name, check_bridge_width, check_people];
const TRAILING_RULES: &[TopLevelRule] = &[check_torch_side];
const PERSON_RULES: &[PersonRule] = &[check_person_name, check_cross_time, check_person_side];

/// Validate and construct presets from raw objects.
pub fn import_configurations(raw: &[Value]) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, object) in raw.iter().enumerate() {
        match import_one(object) {
            Ok(preset) => report.successful.push(preset),
            Err(errors) => {
                warn!(
                    index,
                    defects = errors.len(),
                    first = %errors[0],
                    "configuration rejected"
                );
                report.failed.push(errors);
            }
        }
    }
    report
}

/// Validate and construct one preset, or return every defect found.
pub fn import_one(object: &Value) -> Result<Preset, Vec<ObjectError>> {
    let Some(map) = object.as_object() else {
        return Err(vec![
            Defect::new(ObjectErrorKind::NotAnObject, "", Some(object)).bind(object),
        ]);
    };

    let defects = collect_defects(map);
    if !defects.is_empty() {
        return Err(defects.into_iter().map(|d| d.bind(object)).collect());
    }

    construct(map).map_err(|d| vec![d.bind(object)])
}

fn collect_defects(map: &Map<String, Value>) -> Vec<Defect> {
    let mut defects: Vec<Defect> = LEADING_RULES.iter().filter_map(|rule| rule(map)).collect();

    if let Some(Value::Array(people)) = map.get("people") {
        for (i, person) in people.iter().enumerate() {
            let base = format!("/people/{i}");
            match person.as_object() {
                Some(person) => {
                    defects.extend(PERSON_RULES.iter().filter_map(|rule| rule(person, &base)));
                }
                None => defects.push(Defect::new(
                    ObjectErrorKind::PersonNotObject,
                    base,
                    Some(person),
                )),
            }
        }
    }

    defects.extend(TRAILING_RULES.iter().filter_map(|rule| rule(map)));
    defects
}

// ---------------------------------------------------------------------------
// Top-level rules
// ---------------------------------------------------------------------------

fn check_name(map: &Map<String, Value>) -> Option<Defect> {
    match map.get("name") {
        None => Some(Defect::new(ObjectErrorKind::NameMissing, "/name", None)),
        Some(Value::String(_)) => None,
        Some(v) => Some(Defect::new(ObjectErrorKind::NameNotString, "/name", Some(v))),
    }
}

fn check_bridge_width(map: &Map<String, Value>) -> Option<Defect> {
    let path = "/bridgeWidth";
    match map.get("bridgeWidth") {
        None => Some(Defect::new(ObjectErrorKind::BridgeWidthMissing, path, None)),
        Some(v) if !v.is_number() => {
            Some(Defect::new(ObjectErrorKind::BridgeWidthNotNumber, path, Some(v)))
        }
        Some(v) => match whole_number(v) {
            Some(n) if n <= i64::from(u32::MAX) => None,
            _ => Some(Defect::new(ObjectErrorKind::BridgeWidthNotInteger, path, Some(v))),
        },
    }
}

fn check_people(map: &Map<String, Value>) -> Option<Defect> {
    match map.get("people") {
        None => Some(Defect::new(ObjectErrorKind::PeopleMissing, "/people", None)),
        Some(Value::Array(_)) => None,
        Some(v) => Some(Defect::new(ObjectErrorKind::PeopleNotArray, "/people", Some(v))),
    }
}

fn check_torch_side(map: &Map<String, Value>) -> Option<Defect> {
    match map.get("torchSide") {
        None => Some(Defect::new(ObjectErrorKind::TorchSideMissing, "/torchSide", None)),
        Some(v) if parse_side(v).is_some() => None,
        Some(v) => Some(Defect::new(ObjectErrorKind::TorchSideInvalid, "/torchSide", Some(v))),
    }
}

// ---------------------------------------------------------------------------
// Person rules
// ---------------------------------------------------------------------------

fn check_person_name(person: &Map<String, Value>, base: &str) -> Option<Defect> {
    let path = format!("{base}/name");
    match person.get("name") {
        None => Some(Defect::new(ObjectErrorKind::PersonNameMissing, path, None)),
        Some(Value::String(_)) => None,
        Some(v) => Some(Defect::new(ObjectErrorKind::PersonNameNotString, path, Some(v))),
    }
}

fn check_cross_time(person: &Map<String, Value>, base: &str) -> Option<Defect> {
    let path = format!("{base}/crossTime");
    let v = match person.get("crossTime") {
        None => return Some(Defect::new(ObjectErrorKind::PersonCrossTimeMissing, path, None)),
        Some(v) => v,
    };
    let Some(raw) = v.as_f64() else {
        return Some(Defect::new(ObjectErrorKind::PersonCrossTimeNotNumber, path, Some(v)));
    };
    if raw <= 0.0 {
        return Some(Defect::new(ObjectErrorKind::PersonCrossTimeNotPositive, path, Some(v)));
    }
    match checked_f64_to_minutes(raw) {
        None => Some(Defect::new(ObjectErrorKind::PersonCrossTimeOutOfRange, path, Some(v))),
        // Too small to register at fixed-point precision.
        Some(m) if m <= Minutes::ZERO => Some(Defect::new(
            ObjectErrorKind::PersonCrossTimeNotPositive,
            path,
            Some(v),
        )),
        Some(_) => None,
    }
}

fn check_person_side(person: &Map<String, Value>, base: &str) -> Option<Defect> {
    match person.get("side") {
        None | Some(Value::Null) => None,
        Some(v) if parse_side(v).is_some() => None,
        Some(v) => Some(Defect::new(
            ObjectErrorKind::PersonInvalidSide,
            format!("{base}/side"),
            Some(v),
        )),
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build the preset from an object that passed every rule.
fn construct(map: &Map<String, Value>) -> Result<Preset, Defect> {
    let name = map.get("name").and_then(Value::as_str).unwrap_or_default();
    let width_value = map.get("bridgeWidth");
    let width = width_value.and_then(whole_number).unwrap_or_default();
    let torch_side = map
        .get("torchSide")
        .and_then(parse_side)
        .unwrap_or_default();

    let actors: Vec<ActorTemplate> = map
        .get("people")
        .and_then(Value::as_array)
        .map(|people| people.iter().filter_map(person_template).collect())
        .unwrap_or_default();

    Preset::checked(name.to_string(), width, actors, torch_side).map_err(|e| {
        let (path, value) = match e {
            ValueError::EmptyPresetName => ("/name", map.get("name")),
            _ => ("/bridgeWidth", width_value),
        };
        Defect::new(ObjectErrorKind::Rejected(e), path, value)
    })
}

fn person_template(person: &Value) -> Option<ActorTemplate> {
    let person = person.as_object()?;
    let name = person.get("name")?.as_str()?;
    let cross_duration = checked_f64_to_minutes(person.get("crossTime")?.as_f64()?)?;
    let side = person.get("side").and_then(parse_side).unwrap_or_default();
    Some(ActorTemplate {
        name: name.to_string(),
        cross_duration,
        side,
    })
}

fn parse_side(v: &Value) -> Option<Side> {
    v.as_str().and_then(Side::parse)
}

/// Integers, and floats with no fractional part, as i64.
fn whole_number(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
