//! Named preset storage.

use serde_json::Value;
use tracing::{debug, warn};

use crate::actor::ActorTemplate;
use crate::error::ResourceError;
use crate::fixed::f64_to_minutes;
use crate::import::{ImportReport, import_configurations};
use crate::preset::Preset;
use crate::side::Side;

/// Name of the built-in four-actor puzzle.
pub const CLASSIC_PRESET: &str = "Classic";
/// Name of the built-in empty roster.
pub const EMPTY_PRESET: &str = "Empty";

/// The classic puzzle: Louise, Mark, Anne and John crossing in 1, 2, 5 and
/// 8 minutes over a bridge that carries two.
pub fn classic() -> Preset {
    let actors = [("Louise", 1.0), ("Mark", 2.0), ("Anne", 5.0), ("John", 8.0)]
        .into_iter()
        .map(|(name, t)| ActorTemplate::new(name, f64_to_minutes(t)))
        .collect();
    Preset::from_trusted(CLASSIC_PRESET.to_string(), 2, actors, Side::Start)
}

/// Ordered collection of presets with unique names. Lookups return copies.
#[derive(Debug, Clone, Default)]
pub struct PresetRepository {
    presets: Vec<Preset>,
}

impl PresetRepository {
    pub fn new() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    /// The library shipped with the engine: the classic 1-2-5-8 puzzle and
    /// an empty roster.
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                classic(),
                Preset::from_trusted(EMPTY_PRESET.to_string(), 2, Vec::new(), Side::Start),
            ],
        }
    }

    /// Build from presets. Later duplicates of a name are dropped.
    pub fn from_presets(presets: impl IntoIterator<Item = Preset>) -> Self {
        let mut repository = Self::new();
        for preset in presets {
            repository.save(preset, false);
        }
        repository
    }

    pub fn get(&self, name: &str) -> Option<Preset> {
        self.presets.iter().find(|p| p.name() == name).cloned()
    }

    /// Like [`get`](Self::get), but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<Preset, ResourceError> {
        self.get(name).ok_or_else(|| ResourceError::PresetNotFound {
            name: name.to_string(),
        })
    }

    /// Copies of every preset, in insertion order.
    pub fn list(&self) -> Vec<Preset> {
        self.presets.clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Store a preset. An existing preset with the same name is replaced
    /// only when `overwrite` is set; otherwise storage is left untouched and
    /// `false` is returned.
    pub fn save(&mut self, preset: Preset, overwrite: bool) -> bool {
        match self.presets.iter().position(|p| p.name() == preset.name()) {
            Some(index) if overwrite => {
                debug!(name = preset.name(), "preset overwritten");
                self.presets[index] = preset;
                true
            }
            Some(_) => false,
            None => {
                debug!(name = preset.name(), "preset saved");
                self.presets.push(preset);
                true
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        let index = self.presets.iter().position(|p| p.name() == name)?;
        Some(self.presets.remove(index))
    }

    /// Import raw configurations and store every valid one that does not
    /// clash with an existing name. The full report is returned.
    pub fn import(&mut self, raw: &[Value]) -> ImportReport {
        let report = import_configurations(raw);
        for preset in &report.successful {
            if !self.save(preset.clone(), false) {
                warn!(name = preset.name(), "imported preset skipped: name already taken");
            }
        }
        report
    }
}
