//! Turn advancement: decides who crosses on each turn.
//!
//! # Standard rule
//!
//! The actors on the torch's side are sorted by crossing duration (stable, so
//! ties keep registration order). The fastest always crosses. When leaving
//! the start with company available, the slowest actors fill the remaining
//! capacity. When leaving the end, the fastest returns alone.
//!
//! # First-turn rule
//!
//! A roster can start with actors already on the far side. On the very first
//! turn, when the far side is occupied and the near side holds more actors
//! than the bridge carries, two plans are compared:
//!
//! - **Slowest only**: the `capacity` slowest near actors cross. The fastest
//!   actor of that group plus the far side is expected to bring the torch
//!   back, so its duration is not counted as secured.
//! - **Fastest with slowest**: the near-side fastest crosses with the
//!   `capacity - 1` slowest and will return next turn.
//!
//! Each plan is scored as `secured - elapsed`; the first plan wins only if it
//! scores strictly higher. After the first turn the standard rule applies.

use tracing::debug;

use crate::actor::Actor;
use crate::error::SimulationError;
use crate::fixed::{Elapsed, Minutes, widen};
use crate::id::ActorId;
use crate::registry::ActorRegistry;
use crate::side::Side;
use crate::sim::SimState;
use crate::termination;

/// Which selection rule produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingPlan {
    Standard,
    SlowestOnly,
    FastestWithSlowest,
}

/// The outcome of one scheduled turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub from: Side,
    pub to: Side,
    /// Actors that crossed, fastest first.
    pub crossers: Vec<ActorId>,
    /// Binding time of the turn: the slowest crosser's duration.
    pub duration: Minutes,
    pub plan: CrossingPlan,
}

/// Net scores of the two first-turn plans, in the wide elapsed unit so sums
/// over the whole roster stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanScores {
    pub secured_slowest_only: Elapsed,
    pub elapsed_slowest_only: Elapsed,
    pub secured_fastest_with_slowest: Elapsed,
    pub elapsed_fastest_with_slowest: Elapsed,
}

impl PlanScores {
    pub fn net_slowest_only(&self) -> Elapsed {
        self.secured_slowest_only - self.elapsed_slowest_only
    }

    pub fn net_fastest_with_slowest(&self) -> Elapsed {
        self.secured_fastest_with_slowest - self.elapsed_fastest_with_slowest
    }

    /// The slowest-only plan must be strictly better to be chosen.
    pub fn prefers_slowest_only(&self) -> bool {
        self.net_slowest_only() > self.net_fastest_with_slowest()
    }
}

/// Choose who crosses next without mutating anything.
///
/// Returns `None` when nobody is on the torch's side. Callers are expected to
/// check [`termination::is_final`] first; a non-final state always has
/// someone next to the torch.
pub fn select(registry: &ActorRegistry, capacity: u32, sim: &SimState) -> Option<Turn> {
    let from = sim.torch_side;
    let to = from.opposite();

    let mut near = registry.at_side(from);
    if near.is_empty() {
        return None;
    }
    near.sort_by_key(|a| a.cross_duration);
    let far = registry.at_side(to);

    // The torch always needs a carrier, whatever the configured width.
    let cap = (capacity as usize).max(1);

    let (selected, plan): (Vec<&Actor>, CrossingPlan) =
        if sim.turns_elapsed == 0 && !far.is_empty() && near.len() > cap {
            let scores = score_first_turn(&near, &far, cap);
            debug!(
                net_slowest_only = %scores.net_slowest_only(),
                net_fastest_with_slowest = %scores.net_fastest_with_slowest(),
                "first-turn plans scored"
            );
            if scores.prefers_slowest_only() {
                (slowest(&near, cap).iter().collect(), CrossingPlan::SlowestOnly)
            } else {
                (fastest_with_slowest(&near, cap), CrossingPlan::FastestWithSlowest)
            }
        } else if from == Side::Start {
            (fastest_with_slowest(&near, cap), CrossingPlan::Standard)
        } else {
            (vec![&near[0]], CrossingPlan::Standard)
        };

    let duration = selected
        .iter()
        .map(|a| a.cross_duration)
        .max()
        .unwrap_or(Minutes::ZERO);

    Some(Turn {
        from,
        to,
        crossers: selected.iter().map(|a| a.id).collect(),
        duration,
        plan,
    })
}

/// Run one turn: move the selected actors and the torch, then bump the
/// counters. A final state is left untouched and yields `Ok(None)`.
///
/// If the elapsed clock cannot absorb the turn, nothing is moved and
/// [`SimulationError::ClockOverflow`] is returned.
pub fn step(
    registry: &mut ActorRegistry,
    capacity: u32,
    sim: &mut SimState,
) -> Result<Option<Turn>, SimulationError> {
    if termination::is_final(registry, capacity, sim.torch_side) {
        return Ok(None);
    }
    let Some(turn) = select(registry, capacity, sim) else {
        return Ok(None);
    };
    let time_elapsed = sim
        .time_elapsed
        .checked_add(widen(turn.duration))
        .ok_or(SimulationError::ClockOverflow {
            elapsed: sim.time_elapsed,
            duration: turn.duration,
        })?;

    for &id in &turn.crossers {
        registry.set_side(id, turn.to);
    }
    sim.torch_side = turn.to;
    sim.turns_elapsed += 1;
    sim.time_elapsed = time_elapsed;

    debug!(
        turn = sim.turns_elapsed,
        from = %turn.from,
        to = %turn.to,
        crossers = ?turn.crossers,
        duration = %turn.duration,
        plan = ?turn.plan,
        "turn scheduled"
    );
    Ok(Some(turn))
}

/// Score the two first-turn plans. `near` must be sorted ascending and hold
/// more than `cap` actors.
pub fn score_first_turn(near: &[Actor], far: &[Actor], cap: usize) -> PlanScores {
    let group = slowest(near, cap);
    let slowest_near = widen(near[near.len() - 1].cross_duration);

    let far_total = sum(far);
    let group_total = sum(group);
    // Everyone in the group except its fastest, who stays behind in the
    // comparison plan to make room for the near-side fastest.
    let group_without_fastest = sum(&group[1..]);

    // Whoever is quickest among the crossing group and the far side carries
    // the torch back after the slowest-only plan.
    let ferry = group
        .iter()
        .chain(far)
        .map(|a| widen(a.cross_duration))
        .min()
        .unwrap_or(slowest_near);

    PlanScores {
        secured_slowest_only: group_total + far_total - ferry,
        elapsed_slowest_only: slowest_near + ferry,
        secured_fastest_with_slowest: group_without_fastest + far_total,
        elapsed_fastest_with_slowest: slowest_near + widen(near[0].cross_duration),
    }
}

/// The `cap` slowest actors of an ascending slice.
fn slowest(near: &[Actor], cap: usize) -> &[Actor] {
    &near[near.len().saturating_sub(cap)..]
}

/// The fastest actor plus the slowest actors needed to fill `cap`.
fn fastest_with_slowest(near: &[Actor], cap: usize) -> Vec<&Actor> {
    let fill = cap.saturating_sub(1);
    let start = near.len().saturating_sub(fill).max(1);
    std::iter::once(&near[0]).chain(&near[start..]).collect()
}

/// Exact for any roster under 2^32 actors, since each term is below 2^31.
fn sum(actors: &[Actor]) -> Elapsed {
    actors
        .iter()
        .fold(Elapsed::ZERO, |acc, a| acc + widen(a.cross_duration))
}
