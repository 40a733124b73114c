//! The composition root: one independent simulation.
//!
//! A [`Model`] owns a preset repository, the active preset, the actor
//! registry and the counters. Every mutation runs to completion and the
//! caller receives either a [`ModelState`] snapshot or a small result it can
//! forward to observers. Models share nothing, so any number can coexist.

use serde_json::Value;
use tracing::{debug, warn};

use crate::actor::{Actor, ActorTemplate};
use crate::error::{MIN_BRIDGE_WIDTH, ResourceError, SimulationError, ValueError};
use crate::fixed::{Elapsed, Minutes};
use crate::id::ActorId;
use crate::import::ImportReport;
use crate::preset::Preset;
use crate::query::ModelState;
use crate::registry::ActorRegistry;
use crate::repository::{self, PresetRepository};
use crate::scheduler::{self, Turn};
use crate::side::Side;
use crate::sim::SimState;
use crate::termination::{self, FinalReason};

#[derive(Debug, Clone)]
pub struct Model {
    repository: PresetRepository,
    active: Preset,
    registry: ActorRegistry,
    capacity: u32,
    sim: SimState,
}

impl Default for Model {
    /// The built-in library with the classic puzzle active.
    fn default() -> Self {
        Self::from_parts(PresetRepository::builtin(), repository::classic())
    }
}

impl Model {
    /// Build a model over `repository` and activate the preset named
    /// `active`.
    pub fn new(repository: PresetRepository, active: &str) -> Result<Self, ResourceError> {
        let preset = repository.require(active)?;
        Ok(Self::from_parts(repository, preset))
    }

    /// A model whose repository holds just `preset`, which is active.
    pub fn with_preset(preset: Preset) -> Self {
        let repository = PresetRepository::from_presets([preset.clone()]);
        Self::from_parts(repository, preset)
    }

    fn from_parts(repository: PresetRepository, active: Preset) -> Self {
        let mut model = Self {
            repository,
            registry: ActorRegistry::new(),
            capacity: active.bridge_width(),
            sim: SimState::new(active.torch_side()),
            active,
        };
        model.reset();
        model
    }

    // -----------------------------------------------------------------------
    // Configuration lifecycle
    // -----------------------------------------------------------------------

    /// Activate `preset` and rebuild the registry and counters from it. Each
    /// template is registered with a fresh id, in template order.
    pub fn load_configuration(&mut self, preset: Preset) -> ModelState {
        self.active = preset;
        self.reset()
    }

    /// Activate a stored preset by name.
    pub fn load_preset(&mut self, name: &str) -> Result<ModelState, ResourceError> {
        let preset = self.repository.require(name)?;
        Ok(self.load_configuration(preset))
    }

    /// Rebuild live state from the active preset.
    pub fn reset(&mut self) -> ModelState {
        self.registry = ActorRegistry::from_templates(self.active.templates());
        self.capacity = self.active.bridge_width();
        self.sim = SimState::new(self.active.torch_side());
        debug!(
            preset = self.active.name(),
            actors = self.registry.len(),
            capacity = self.capacity,
            "configuration loaded"
        );
        self.state()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Register a new actor. `side` defaults to start.
    pub fn add_actor(
        &mut self,
        name: impl Into<String>,
        cross_duration: Minutes,
        side: Option<Side>,
    ) -> Result<ActorId, ValueError> {
        self.add_actor_template(ActorTemplate {
            name: name.into(),
            cross_duration,
            side: side.unwrap_or_default(),
        })
    }

    pub fn add_actor_template(&mut self, template: ActorTemplate) -> Result<ActorId, ValueError> {
        if template.cross_duration <= Minutes::ZERO {
            return Err(ValueError::NonPositiveCrossTime {
                value: template.cross_duration,
            });
        }
        let id = self.registry.add(template);
        debug!(%id, "actor added");
        Ok(id)
    }

    /// Remove an actor. Unknown ids are a reported no-op.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<ActorId> {
        let removed = self.registry.remove(id);
        if removed.is_none() {
            warn!(%id, "remove_actor: no such actor");
        }
        removed
    }

    /// Change the bridge capacity. Widths below two are rejected.
    pub fn set_capacity(&mut self, capacity: u32) -> Result<u32, ValueError> {
        if capacity < MIN_BRIDGE_WIDTH {
            return Err(ValueError::BridgeWidthTooSmall {
                value: i64::from(capacity),
            });
        }
        self.capacity = capacity;
        Ok(capacity)
    }

    /// Put an actor on `side` without advancing time.
    pub fn set_actor_side(&mut self, id: ActorId, side: Side) -> Option<ActorId> {
        let moved = self.registry.set_side(id, side);
        if moved.is_none() {
            warn!(%id, "set_actor_side: no such actor");
        }
        moved
    }

    /// Schedule one turn. A final state is returned unchanged. Fails only
    /// when the elapsed clock is exhausted, leaving the state as it was.
    pub fn step_forward(&mut self) -> Result<ModelState, SimulationError> {
        self.step_turn()?;
        Ok(self.state())
    }

    /// Schedule one turn and report who crossed, or `None` once final.
    pub fn step_turn(&mut self) -> Result<Option<Turn>, SimulationError> {
        scheduler::step(&mut self.registry, self.capacity, &mut self.sim)
    }

    /// Schedule up to `n` turns, stopping early at a final state.
    pub fn step_n(&mut self, n: u64) -> Result<ModelState, SimulationError> {
        for _ in 0..n {
            if self.step_turn()?.is_none() {
                break;
            }
        }
        Ok(self.state())
    }

    /// Step until the state is final or `max_turns` turns were taken by this
    /// call.
    pub fn run_to_completion(&mut self, max_turns: u64) -> Result<ModelState, SimulationError> {
        let state = self.step_n(max_turns)?;
        if !state.is_final {
            warn!(max_turns, "run_to_completion: turn limit reached before a final state");
        }
        Ok(state)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> ModelState {
        ModelState::project(&self.registry, self.capacity, &self.sim)
    }

    pub fn actor(&self, id: ActorId) -> Option<Actor> {
        self.registry.by_id(id)
    }

    pub fn actor_by_name(&self, name: &str) -> Option<Actor> {
        self.registry.by_name(name)
    }

    pub fn actors(&self) -> Vec<Actor> {
        self.registry.all()
    }

    pub fn actors_at(&self, side: Side) -> Vec<Actor> {
        self.registry.at_side(side)
    }

    pub fn actor_count(&self) -> usize {
        self.registry.len()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn torch_side(&self) -> Side {
        self.sim.torch_side
    }

    pub fn time_elapsed(&self) -> Elapsed {
        self.sim.time_elapsed
    }

    pub fn turns_elapsed(&self) -> u64 {
        self.sim.turns_elapsed
    }

    pub fn is_final(&self) -> bool {
        termination::is_final(&self.registry, self.capacity, self.sim.torch_side)
    }

    pub fn is_successful(&self) -> bool {
        termination::is_successful(&self.registry)
    }

    pub fn final_reason(&self) -> Option<FinalReason> {
        termination::final_reason(&self.registry, self.capacity, self.sim.torch_side)
    }

    // -----------------------------------------------------------------------
    // Presets
    // -----------------------------------------------------------------------

    pub fn presets(&self) -> Vec<Preset> {
        self.repository.list()
    }

    pub fn repository(&self) -> &PresetRepository {
        &self.repository
    }

    pub fn active_preset(&self) -> Preset {
        self.active.clone()
    }

    pub fn save_preset(&mut self, preset: Preset, overwrite: bool) -> bool {
        self.repository.save(preset, overwrite)
    }

    /// Import raw configurations into the repository without overwriting.
    pub fn import_presets(&mut self, raw: &[Value]) -> ImportReport {
        self.repository.import(raw)
    }

    /// Live state as a preset under the active name. Actors keep their
    /// current sides, in registration order.
    pub fn current_configuration(&self) -> Preset {
        Preset::from_trusted(
            self.active.name().to_string(),
            self.capacity,
            self.registry.templates(),
            self.sim.torch_side,
        )
    }

    /// Replace the active preset, under its name, with the live state, and
    /// store it in the repository.
    pub fn update_active_preset(&mut self) -> Preset {
        let snapshot = self.current_configuration();
        self.repository.save(snapshot.clone(), true);
        self.active = snapshot.clone();
        debug!(preset = snapshot.name(), "active preset updated from live state");
        snapshot
    }

    /// Whether live state differs from the active preset.
    pub fn has_been_modified(&self) -> bool {
        self.current_configuration() != self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{CLASSIC_PRESET, EMPTY_PRESET};
    use crate::test_utils::*;

    fn empty_model() -> Model {
        Model::new(PresetRepository::builtin(), EMPTY_PRESET).unwrap()
    }

    #[test]
    fn default_model_runs_classic_puzzle() {
        let model = Model::default();
        assert_eq!(model.active_preset().name(), CLASSIC_PRESET);
        assert_eq!(model.actor_count(), 4);
        assert_eq!(model.capacity(), 2);
        assert_eq!(model.torch_side(), Side::Start);
        assert_eq!(model.turns_elapsed(), 0);
        assert!(!model.has_been_modified());
    }

    #[test]
    fn new_with_unknown_preset_fails() {
        let err = Model::new(PresetRepository::builtin(), "Nope").unwrap_err();
        assert_eq!(err.code(), "PRESET_NOT_FOUND");
    }

    #[test]
    fn empty_model_starts_final_and_successful() {
        let model = empty_model();
        let state = model.state();
        assert!(state.is_final);
        assert!(state.is_successful);
        assert!(state.actors_at_start.is_empty());
        assert!(state.actors_at_end.is_empty());
    }

    #[test]
    fn add_actor_from_template_and_parts() {
        let mut model = empty_model();
        let joe = model
            .add_actor_template(template("Joe", 5.0))
            .unwrap();
        assert_eq!(joe, ActorId(0));
        let jeff = model.add_actor("Jeff", minutes(3.0), Some(Side::End)).unwrap();
        let jim = model.add_actor("Jim", minutes(2.0), None).unwrap();

        assert_eq!(model.actor(jeff).unwrap().side, Side::End);
        assert_eq!(model.actor(jim).unwrap().side, Side::Start);
        assert_eq!(model.actor_by_name("Joe").unwrap().id, joe);
    }

    #[test]
    fn add_actor_rejects_non_positive_duration() {
        let mut model = empty_model();
        let err = model.add_actor("Ghost", Minutes::ZERO, None).unwrap_err();
        assert_eq!(err.code(), "ACTOR_NON_POSITIVE_CROSS_TIME");
        assert_eq!(model.actor_count(), 0);
    }

    #[test]
    fn remove_unknown_actor_is_noop() {
        let mut model = Model::default();
        assert_eq!(model.remove_actor(ActorId(42)), None);
        assert_eq!(model.actor_count(), 4);
        assert_eq!(model.remove_actor(ActorId(1)), Some(ActorId(1)));
        assert_eq!(model.actor_count(), 3);
    }

    #[test]
    fn set_capacity_validates() {
        let mut model = Model::default();
        assert_eq!(model.set_capacity(3), Ok(3));
        assert_eq!(model.capacity(), 3);
        let err = model.set_capacity(1).unwrap_err();
        assert_eq!(err, ValueError::BridgeWidthTooSmall { value: 1 });
        assert_eq!(model.capacity(), 3);
    }

    #[test]
    fn set_actor_side_does_not_advance_time() {
        let mut model = Model::default();
        assert_eq!(model.set_actor_side(ActorId(0), Side::End), Some(ActorId(0)));
        assert_eq!(model.set_actor_side(ActorId(9), Side::End), None);
        assert_eq!(model.turns_elapsed(), 0);
        assert_eq!(model.time_elapsed(), Elapsed::ZERO);
        assert_eq!(model.torch_side(), Side::Start);
        assert_eq!(model.actors_at(Side::End).len(), 1);
    }

    #[test]
    fn single_actor_solves_in_one_step() {
        let mut model = empty_model();
        let id = model.add_actor("Solo", minutes(2.0), None).unwrap();
        let state = model.step_forward().unwrap();
        assert!(state.is_successful);
        assert!(state.is_final);
        assert_eq!(state.time_elapsed, elapsed(2.0));
        assert_eq!(state.turns_elapsed, 1);
        assert_eq!(model.actor(id).unwrap().side, Side::End);
    }

    #[test]
    fn step_forward_is_idempotent_when_final() {
        let mut model = empty_model();
        model.add_actor("Solo", minutes(2.0), None).unwrap();
        let first = model.step_forward().unwrap();
        let second = model.step_forward().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn step_turn_reports_crossers() {
        let mut model = Model::default();
        let turn = model.step_turn().unwrap().unwrap();
        assert_eq!(turn.crossers, vec![ActorId(0), ActorId(3)]);
        assert_eq!(turn.from, Side::Start);
    }

    #[test]
    fn run_to_completion_solves_classic() {
        let mut model = Model::default();
        let state = model.run_to_completion(100).unwrap();
        assert!(state.is_final);
        assert!(state.is_successful);
        assert_eq!(state.turns_elapsed, 5);
        assert_eq!(state.time_elapsed, elapsed(17.0));
    }

    #[test]
    fn run_to_completion_honours_turn_limit() {
        let mut model = Model::default();
        let state = model.run_to_completion(2).unwrap();
        assert!(!state.is_final);
        assert_eq!(state.turns_elapsed, 2);
    }

    #[test]
    fn imported_billion_minute_crossers_are_timed_exactly() {
        let mut model = empty_model();
        let raw = serde_json::json!({
            "name": "Glacial",
            "bridgeWidth": 2,
            "torchSide": "start",
            "people": [
                { "name": "A", "crossTime": 1e9 },
                { "name": "B", "crossTime": 1e9 },
                { "name": "C", "crossTime": 1e9 }
            ]
        });
        assert!(model.import_presets(&[raw]).is_clean());
        model.load_preset("Glacial").unwrap();

        let state = model.run_to_completion(10).unwrap();
        assert!(state.is_successful);
        assert_eq!(state.turns_elapsed, 3);
        assert_eq!(state.time_elapsed, elapsed(3e9));
    }

    #[test]
    fn exhausted_clock_is_an_error_not_a_clamp() {
        let mut model = Model::default();
        model.sim.time_elapsed = Elapsed::MAX - elapsed(1.0);
        let before = model.state();

        let err = model.step_forward().unwrap_err();
        assert!(matches!(err, SimulationError::ClockOverflow { .. }));
        assert_eq!(model.state(), before);
        assert!(model.run_to_completion(10).is_err());
        assert!(!model.is_final());
    }

    #[test]
    fn load_preset_resets_ids_and_counters() {
        let mut model = Model::default();
        model.step_n(3).unwrap();
        model.remove_actor(ActorId(0));
        model.add_actor("Extra", minutes(4.0), None).unwrap();

        let state = model.load_preset(CLASSIC_PRESET).unwrap();
        assert_eq!(state.turns_elapsed, 0);
        assert_eq!(state.time_elapsed, Elapsed::ZERO);
        let ids: Vec<_> = model.actors().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![ActorId(0), ActorId(1), ActorId(2), ActorId(3)]);
    }

    #[test]
    fn load_missing_preset_leaves_state_alone() {
        let mut model = Model::default();
        model.step_forward().unwrap();
        let err = model.load_preset("Nope").unwrap_err();
        assert_eq!(err, ResourceError::PresetNotFound { name: "Nope".into() });
        assert_eq!(model.turns_elapsed(), 1);
    }

    #[test]
    fn load_configuration_activates_unsaved_preset() {
        let mut model = Model::default();
        let state = model.load_configuration(prepositioned_preset());
        assert_eq!(state.actors_at_start.len(), 3);
        assert_eq!(state.actors_at_end.len(), 1);
        assert_eq!(model.active_preset().name(), "Prepositioned");
        assert!(!model.repository().contains("Prepositioned"));
    }

    #[test]
    fn modifications_are_detected() {
        let mut model = Model::default();
        assert!(!model.has_been_modified());

        model.set_capacity(3).unwrap();
        assert!(model.has_been_modified());
        model.set_capacity(2).unwrap();
        assert!(!model.has_been_modified());

        model.add_actor("Extra", minutes(4.0), None).unwrap();
        assert!(model.has_been_modified());
    }

    #[test]
    fn update_active_preset_captures_live_state() {
        let mut model = Model::default();
        model.add_actor("Extra", minutes(4.0), Some(Side::End)).unwrap();
        model.set_capacity(3).unwrap();

        let updated = model.update_active_preset();
        assert_eq!(updated.name(), CLASSIC_PRESET);
        assert_eq!(updated.bridge_width(), 3);
        assert_eq!(updated.actor_count(), 5);
        assert!(!model.has_been_modified());

        let stored = model.repository().get(CLASSIC_PRESET).unwrap();
        assert_eq!(stored, updated);

        // Reloading reproduces the captured roster.
        let state = model.load_preset(CLASSIC_PRESET).unwrap();
        assert_eq!(state.actors_at_end.len(), 1);
        assert_eq!(model.capacity(), 3);
    }

    #[test]
    fn save_and_import_presets() {
        let mut model = Model::default();
        let copy = classic_preset().clone_named("Copy").unwrap();
        assert!(model.save_preset(copy.clone(), false));
        assert!(!model.save_preset(copy, false));

        let report = model.import_presets(&[classic_json()]);
        assert_eq!(report.successful.len(), 1);
        assert_eq!(model.presets().len(), 3);
    }

    #[test]
    fn independent_models_share_nothing() {
        let mut a = Model::default();
        let b = Model::default();
        a.step_forward().unwrap();
        a.set_capacity(4).unwrap();
        assert_eq!(b.turns_elapsed(), 0);
        assert_eq!(b.capacity(), 2);
    }

    #[test]
    fn accessors_return_copies() {
        let model = Model::default();
        let mut actors = model.actors();
        actors[0].side = Side::End;
        let mut preset = model.active_preset().actors();
        preset[0].name = "Changed".into();
        let mut state = model.state();
        state.actors_at_start.clear();

        assert_eq!(model.actors_at(Side::End).len(), 0);
        assert_eq!(model.active_preset().actors()[0].name, "Louise");
        assert_eq!(model.state().actors_at_start.len(), 4);
    }
}
