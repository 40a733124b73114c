//! Actor types: the live [`Actor`] held by the registry and the id-less
//! [`ActorTemplate`] used by presets and "add actor" requests.

use serde::{Deserialize, Serialize};

use crate::fixed::Minutes;
use crate::id::ActorId;
use crate::side::Side;

/// A registered actor. Values handed out by the engine are always owned
/// copies; changing one never reaches back into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    /// Time this actor needs to cross the bridge.
    pub cross_duration: Minutes,
    pub side: Side,
}

impl Actor {
    /// The id-less description of this actor, keeping its current side.
    pub fn to_template(&self) -> ActorTemplate {
        ActorTemplate {
            name: self.name.clone(),
            cross_duration: self.cross_duration,
            side: self.side,
        }
    }
}

/// Describes an actor before it is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorTemplate {
    pub name: String,
    pub cross_duration: Minutes,
    #[serde(default)]
    pub side: Side,
}

impl ActorTemplate {
    /// A template placed on the start side.
    pub fn new(name: impl Into<String>, cross_duration: Minutes) -> Self {
        Self {
            name: name.into(),
            cross_duration,
            side: Side::Start,
        }
    }

    /// Same template, placed on `side`.
    pub fn on(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}
