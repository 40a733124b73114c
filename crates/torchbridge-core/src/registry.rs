//! The authoritative actor list.
//!
//! Owns every live [`Actor`], assigns identities and answers side-filtered
//! queries. All query results are owned copies in insertion order.

use crate::actor::{Actor, ActorTemplate};
use crate::fixed::Minutes;
use crate::id::ActorId;
use crate::side::Side;

/// Ordered store of live actors.
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self { actors: Vec::new() }
    }

    /// Build a registry from templates, assigning fresh ids in template order.
    pub fn from_templates<'a>(templates: impl IntoIterator<Item = &'a ActorTemplate>) -> Self {
        let mut registry = Self::new();
        for template in templates {
            registry.add(template.clone());
        }
        registry
    }

    /// Register an actor. The id is one past the largest live id, or 0 when
    /// the registry is empty; gaps left by removals are never back-filled.
    pub fn add(&mut self, template: ActorTemplate) -> ActorId {
        let id = self.next_id();
        self.actors.push(Actor {
            id,
            name: template.name,
            cross_duration: template.cross_duration,
            side: template.side,
        });
        id
    }

    /// Positional form of [`add`](Self::add). `side` defaults to start.
    pub fn add_parts(
        &mut self,
        name: impl Into<String>,
        cross_duration: Minutes,
        side: Option<Side>,
    ) -> ActorId {
        self.add(ActorTemplate {
            name: name.into(),
            cross_duration,
            side: side.unwrap_or_default(),
        })
    }

    /// Remove an actor. Returns `None` if no actor has this id.
    pub fn remove(&mut self, id: ActorId) -> Option<ActorId> {
        let index = self.actors.iter().position(|a| a.id == id)?;
        self.actors.remove(index);
        Some(id)
    }

    /// Move an actor to `side` in place. Returns `None` if no actor has this id.
    pub fn set_side(&mut self, id: ActorId, side: Side) -> Option<ActorId> {
        let actor = self.actors.iter_mut().find(|a| a.id == id)?;
        actor.side = side;
        Some(id)
    }

    pub fn by_id(&self, id: ActorId) -> Option<Actor> {
        self.actors.iter().find(|a| a.id == id).cloned()
    }

    /// First actor registered under `name`.
    pub fn by_name(&self, name: &str) -> Option<Actor> {
        self.actors.iter().find(|a| a.name == name).cloned()
    }

    pub fn side_of(&self, id: ActorId) -> Option<Side> {
        self.actors.iter().find(|a| a.id == id).map(|a| a.side)
    }

    pub fn at_side(&self, side: Side) -> Vec<Actor> {
        self.actors
            .iter()
            .filter(|a| a.side == side)
            .cloned()
            .collect()
    }

    pub fn at_start(&self) -> Vec<Actor> {
        self.at_side(Side::Start)
    }

    pub fn at_end(&self) -> Vec<Actor> {
        self.at_side(Side::End)
    }

    /// Number of actors on `side`, without copying them.
    pub fn count_at(&self, side: Side) -> usize {
        self.actors.iter().filter(|a| a.side == side).count()
    }

    pub fn all(&self) -> Vec<Actor> {
        self.actors.clone()
    }

    /// Templates describing the live roster, in insertion order.
    pub fn templates(&self) -> Vec<ActorTemplate> {
        self.actors.iter().map(Actor::to_template).collect()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    fn next_id(&self) -> ActorId {
        ActorId(self.actors.iter().map(|a| a.id.0 + 1).max().unwrap_or(0))
    }
}
