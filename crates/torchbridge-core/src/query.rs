//! Read-only snapshots of simulation state.
//!
//! A [`ModelState`] is what observers (renderers, broadcast layers, UIs)
//! receive after every mutation. It is an owned copy: no references into the
//! registry survive the call that produced it.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::fixed::Elapsed;
use crate::registry::ActorRegistry;
use crate::side::Side;
use crate::sim::SimState;
use crate::termination;

/// Snapshot of the puzzle after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelState {
    /// No further turns will be scheduled.
    pub is_final: bool,
    /// Everyone has reached the end.
    pub is_successful: bool,
    /// Actors at the start, in registration order.
    pub actors_at_start: Vec<Actor>,
    /// Actors at the end, in registration order.
    pub actors_at_end: Vec<Actor>,
    pub time_elapsed: Elapsed,
    pub turns_elapsed: u64,
    pub torch_side: Side,
}

impl ModelState {
    /// Assemble a snapshot from the registry, the bridge capacity and the
    /// counters.
    pub fn project(registry: &ActorRegistry, capacity: u32, sim: &SimState) -> Self {
        Self {
            is_final: termination::is_final(registry, capacity, sim.torch_side),
            is_successful: termination::is_successful(registry),
            actors_at_start: registry.at_start(),
            actors_at_end: registry.at_end(),
            time_elapsed: sim.time_elapsed,
            turns_elapsed: sim.turns_elapsed,
            torch_side: sim.torch_side,
        }
    }

    pub fn actor_count(&self) -> usize {
        self.actors_at_start.len() + self.actors_at_end.len()
    }
}
