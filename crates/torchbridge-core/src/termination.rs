//! Pure predicates deciding whether the puzzle has reached a final state.

use crate::registry::ActorRegistry;
use crate::side::Side;

/// Why a state is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalReason {
    /// Nobody is left at the start.
    Solved,
    /// Capacity below 2 with more than one actor still at the start: the
    /// torch carrier can never bring anyone else across.
    CapacityDeadlock,
    /// The torch is at the end with nobody there to carry it back.
    StrandedTorch,
}

/// True iff every actor has reached the end. Vacuously true with no actors.
pub fn is_successful(registry: &ActorRegistry) -> bool {
    registry.count_at(Side::Start) == 0
}

/// The reason the state is final, or `None` if another turn can be scheduled.
pub fn final_reason(registry: &ActorRegistry, capacity: u32, torch: Side) -> Option<FinalReason> {
    if is_successful(registry) {
        return Some(FinalReason::Solved);
    }
    if capacity < 2 && registry.count_at(Side::Start) > 1 {
        return Some(FinalReason::CapacityDeadlock);
    }
    if torch == Side::End && registry.count_at(Side::End) == 0 {
        return Some(FinalReason::StrandedTorch);
    }
    None
}

pub fn is_final(registry: &ActorRegistry, capacity: u32, torch: Side) -> bool {
    final_reason(registry, capacity, torch).is_some()
}
