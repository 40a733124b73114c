//! On-disk shape of a preset.
//!
//! Reading goes through the core importer, which validates raw values field
//! by field. [`PresetData`] is the typed form used when writing files.
//! [`RawPreset`] is the loose form RON entries are read into before they are
//! handed to the importer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use torchbridge_core::actor::ActorTemplate;
use torchbridge_core::fixed::{f64_to_minutes, minutes_to_f64};
use torchbridge_core::preset::Preset;
use torchbridge_core::side::Side;

/// A preset as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetData {
    pub name: String,
    pub bridge_width: u32,
    #[serde(default)]
    pub people: Vec<PersonData>,
    pub torch_side: Side,
}

/// One roster entry. A missing side means the start bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonData {
    pub name: String,
    pub cross_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl From<&ActorTemplate> for PersonData {
    fn from(template: &ActorTemplate) -> Self {
        Self {
            name: template.name.clone(),
            cross_time: minutes_to_f64(template.cross_duration),
            // Start is the default; leave it implicit.
            side: (template.side == Side::End).then_some(Side::End),
        }
    }
}

impl From<&PersonData> for ActorTemplate {
    fn from(person: &PersonData) -> Self {
        ActorTemplate::new(person.name.clone(), f64_to_minutes(person.cross_time))
            .on(person.side.unwrap_or_default())
    }
}

impl From<&Preset> for PresetData {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name().to_string(),
            bridge_width: preset.bridge_width(),
            people: preset.actors().iter().map(PersonData::from).collect(),
            torch_side: preset.torch_side(),
        }
    }
}

/// Top-level table of a TOML preset library. TOML has no bare top-level
/// arrays, so the list lives under `presets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlLibrary {
    #[serde(default)]
    pub presets: Vec<PresetData>,
}

// ===========================================================================
// Loose RON entries
// ===========================================================================

/// A RON preset entry read without judging its contents.
///
/// RON struct syntax only deserializes into named fields, so entries are read
/// field by field into untyped values. A missing field stays missing, which
/// lets the importer report it exactly as it would for JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPreset {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub name: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub bridge_width: Value,
    #[serde(
        default,
        deserialize_with = "present",
        serialize_with = "people_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub people: Option<Vec<RawPerson>>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub torch_side: Value,
}

/// A RON roster entry, as loose as [`RawPreset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub name: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub cross_time: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub side: Value,
}

/// A list that is present in the file, as opposed to defaulted.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<RawPerson>>, D::Error> {
    Vec::deserialize(d).map(Some)
}

fn people_list<S: Serializer>(people: &Option<Vec<RawPerson>>, s: S) -> Result<S::Ok, S::Error> {
    people.as_deref().unwrap_or_default().serialize(s)
}

/// Insert `value` under `key` unless it is absent.
fn insert_present(map: &mut Map<String, Value>, key: &str, value: Value) {
    if !value.is_null() {
        map.insert(key.to_string(), value);
    }
}

impl From<RawPerson> for Value {
    fn from(person: RawPerson) -> Self {
        let mut map = Map::new();
        insert_present(&mut map, "name", person.name);
        insert_present(&mut map, "crossTime", person.cross_time);
        insert_present(&mut map, "side", person.side);
        Value::Object(map)
    }
}

impl From<RawPreset> for Value {
    fn from(preset: RawPreset) -> Self {
        let mut map = Map::new();
        insert_present(&mut map, "name", preset.name);
        insert_present(&mut map, "bridgeWidth", preset.bridge_width);
        if let Some(people) = preset.people {
            let people = people.into_iter().map(Value::from).collect();
            map.insert("people".to_string(), Value::Array(people));
        }
        insert_present(&mut map, "torchSide", preset.torch_side);
        Value::Object(map)
    }
}

impl From<&PresetData> for RawPreset {
    fn from(data: &PresetData) -> Self {
        let people = data
            .people
            .iter()
            .map(|p| RawPerson {
                name: Value::from(p.name.clone()),
                cross_time: Value::from(p.cross_time),
                side: p.side.map_or(Value::Null, |s| Value::from(s.as_str())),
            })
            .collect();
        Self {
            name: Value::from(data.name.clone()),
            bridge_width: Value::from(data.bridge_width),
            people: Some(people),
            torch_side: Value::from(data.torch_side.as_str()),
        }
    }
}
