//! Torchbridge Core -- the decision and bookkeeping engine for the bridge and
//! torch puzzle.
//!
//! A group of actors, each with a crossing duration, must move from the start
//! to the end over a bridge that carries a limited number at a time, always
//! together with the single torch. This crate decides, turn by turn, who
//! crosses, and keeps an inspectable account of elapsed time, turns taken and
//! whether the puzzle is solved.
//!
//! # Turn Pipeline
//!
//! Each call to [`model::Model::step_forward`]:
//!
//! 1. **Check** -- stop if the state is final ([`termination`]).
//! 2. **Select** -- pick the crossing group ([`scheduler`]).
//! 3. **Move** -- move the group and the torch to the other side.
//! 4. **Bookkeeping** -- add one turn and the slowest crosser's duration.
//!    The clock addition is checked; a turn it cannot absorb is refused.
//! 5. **Project** -- return a detached [`query::ModelState`] snapshot.
//!
//! # Key Types
//!
//! - [`model::Model`] -- Composition root owning one simulation.
//! - [`registry::ActorRegistry`] -- Actor storage with id assignment.
//! - [`preset::Preset`] -- Immutable named configuration.
//! - [`repository::PresetRepository`] -- Named preset storage.
//! - [`import`] -- Validation of untrusted configuration data.
//! - [`fixed::Minutes`] -- Q32.32 fixed-point crossing durations.
//! - [`fixed::Elapsed`] -- Q64.64 accumulator for elapsed time.
//! - [`error`] -- `ValueError`, `ObjectError`, `ResourceError` and
//!   `SimulationError`.

pub mod actor;
pub mod error;
pub mod fixed;
pub mod id;
pub mod import;
pub mod model;
pub mod preset;
pub mod query;
pub mod registry;
pub mod repository;
pub mod scheduler;
pub mod side;
pub mod sim;
pub mod termination;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
