//! Named puzzle configurations.

use serde::Serialize;

use crate::actor::ActorTemplate;
use crate::error::{MIN_BRIDGE_WIDTH, ValueError};
use crate::side::Side;

/// A named, immutable bundle of bridge capacity, starting roster and torch
/// side.
///
/// Accessors hand out owned copies. Equality ignores the name: two presets
/// are equal when capacity, torch side and the ordered roster all match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    name: String,
    bridge_width: u32,
    actors: Vec<ActorTemplate>,
    torch_side: Side,
}

/// Check a bridge width against the minimum a configuration may declare.
pub fn validate_bridge_width(value: i64) -> Result<u32, ValueError> {
    if value < i64::from(MIN_BRIDGE_WIDTH) {
        return Err(ValueError::BridgeWidthTooSmall { value });
    }
    u32::try_from(value).map_err(|_| ValueError::BridgeWidthTooSmall { value })
}

impl Preset {
    /// Build a preset. The name must be non-empty and the bridge must carry
    /// at least two actors. The roster is trusted as given.
    pub fn new(
        name: impl Into<String>,
        bridge_width: u32,
        actors: Vec<ActorTemplate>,
        torch_side: Side,
    ) -> Result<Self, ValueError> {
        Self::checked(name.into(), i64::from(bridge_width), actors, torch_side)
    }

    /// Construction with a signed width, for callers holding untrusted
    /// numbers. The name is checked before the width.
    pub(crate) fn checked(
        name: String,
        bridge_width: i64,
        actors: Vec<ActorTemplate>,
        torch_side: Side,
    ) -> Result<Self, ValueError> {
        if name.is_empty() {
            return Err(ValueError::EmptyPresetName);
        }
        let bridge_width = validate_bridge_width(bridge_width)?;
        Ok(Self {
            name,
            bridge_width,
            actors,
            torch_side,
        })
    }

    /// Construction without validation, for values the engine already
    /// validated (live state snapshots, the built-in library).
    pub(crate) fn from_trusted(
        name: String,
        bridge_width: u32,
        actors: Vec<ActorTemplate>,
        torch_side: Side,
    ) -> Self {
        Self {
            name,
            bridge_width,
            actors,
            torch_side,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bridge_width(&self) -> u32 {
        self.bridge_width
    }

    /// Copy of the roster, in declaration order.
    pub fn actors(&self) -> Vec<ActorTemplate> {
        self.actors.clone()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn torch_side(&self) -> Side {
        self.torch_side
    }

    /// The same configuration under another name.
    pub fn clone_named(&self, name: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(name, self.bridge_width, self.actors.clone(), self.torch_side)
    }

    /// Iterate the roster without copying it.
    pub(crate) fn templates(&self) -> &[ActorTemplate] {
        &self.actors
    }
}

impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.bridge_width == other.bridge_width
            && self.torch_side == other.torch_side
            && self.actors == other.actors
    }
}

impl Eq for Preset {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn new_keeps_provided_values() {
        let people = vec![
            template("Zazu", 7.0),
            template("Mufasa", 6.0),
            template("Scar", 5.0),
        ];
        let preset = Preset::new("preset1", 2, people.clone(), Side::Start).unwrap();
        assert_eq!(preset.name(), "preset1");
        assert_eq!(preset.bridge_width(), 2);
        assert_eq!(preset.actors(), people);
        assert_eq!(preset.torch_side(), Side::Start);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Preset::new("", 2, vec![], Side::Start).unwrap_err();
        assert_eq!(err, ValueError::EmptyPresetName);
        assert_eq!(err.code(), "PRESET_EMPTY_NAME");
    }

    #[test]
    fn narrow_bridge_is_rejected() {
        for width in [0, 1] {
            let err = Preset::new("narrow", width, vec![], Side::Start).unwrap_err();
            assert_eq!(
                err,
                ValueError::BridgeWidthTooSmall {
                    value: i64::from(width)
                }
            );
        }
    }

    #[test]
    fn validate_bridge_width_bounds() {
        assert_eq!(validate_bridge_width(2), Ok(2));
        assert_eq!(validate_bridge_width(40), Ok(40));
        assert_eq!(
            validate_bridge_width(-3),
            Err(ValueError::BridgeWidthTooSmall { value: -3 })
        );
    }

    #[test]
    fn accessor_returns_independent_copy() {
        let preset = classic_preset();
        let mut actors = preset.actors();
        actors[0].name = "Renamed".into();
        actors.pop();
        assert_eq!(preset.actors()[0].name, "Louise");
        assert_eq!(preset.actor_count(), 4);
    }

    #[test]
    fn equality_ignores_name() {
        let a = Preset::new("preset1", 2, vec![], Side::Start).unwrap();
        let b = Preset::new("preset2", 2, vec![], Side::Start).unwrap();
        let c = Preset::new("preset3", 3, vec![], Side::Start).unwrap();
        let d = Preset::new("preset4", 2, vec![], Side::End).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn equality_compares_roster_in_order() {
        let base = vec![
            template("Optimus Prime", 13.0),
            template("Megatron", 12.0).on(Side::End),
        ];
        let renamed = vec![
            template("Optimus Prime", 13.0),
            template("Starscream", 12.0).on(Side::End),
        ];
        let slower = vec![
            template("Optimus Prime", 13.0),
            template("Megatron", 11.0).on(Side::End),
        ];
        let moved = vec![
            template("Optimus Prime", 13.0).on(Side::End),
            template("Megatron", 12.0).on(Side::End),
        ];
        let longer = {
            let mut v = base.clone();
            v.push(template("Bumblebee", 8.0));
            v
        };
        let reordered = vec![base[1].clone(), base[0].clone()];

        let p = |actors: Vec<ActorTemplate>| Preset::new("p", 2, actors, Side::Start).unwrap();
        let reference = p(base.clone());
        assert_eq!(reference, p(base));
        for other in [renamed, slower, moved, longer, reordered] {
            let other = p(other);
            assert_ne!(reference, other);
            assert_ne!(other, reference);
        }
    }

    #[test]
    fn clone_named_copies_configuration() {
        let original = classic_preset();
        let copy = original.clone_named("Copy").unwrap();
        assert_eq!(copy.name(), "Copy");
        assert_eq!(copy, original);
        assert!(original.clone_named("").is_err());
    }
}
