//! Simulation counters and torch position.

use serde::{Deserialize, Serialize};

use crate::fixed::Elapsed;
use crate::side::Side;

/// Mutable simulation state tracked alongside the actor registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimState {
    /// Sum of the binding crossing duration of every turn so far.
    pub time_elapsed: Elapsed,
    /// Number of turns scheduled so far.
    pub turns_elapsed: u64,
    /// Where the torch currently is.
    pub torch_side: Side,
}

impl SimState {
    /// Fresh counters with the torch on `torch_side`.
    pub fn new(torch_side: Side) -> Self {
        Self {
            time_elapsed: Elapsed::ZERO,
            turns_elapsed: 0,
            torch_side,
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Side::Start)
    }
}
