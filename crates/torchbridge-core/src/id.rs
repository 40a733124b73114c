use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a live actor in the registry. Cheap to copy and compare.
///
/// Ids are assigned by the registry, never supplied by callers, and stay
/// stable for the lifetime of the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
