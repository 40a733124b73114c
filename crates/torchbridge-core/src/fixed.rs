use fixed::types::{I32F32, I64F64};

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Simulated time. Crossing durations and elapsed time share this unit.
pub type Minutes = Fixed64;

/// Q64.64 accumulator for elapsed time. Every turn adds at most
/// `Minutes::MAX`, so it takes over 2^32 turns to exhaust.
pub type Elapsed = I64F64;

/// Convert an f64 to Minutes. Use only at the edges (construction, import).
#[inline]
pub fn f64_to_minutes(v: f64) -> Minutes {
    Minutes::from_num(v)
}

/// Checked conversion for untrusted input. Returns None for NaN, infinities
/// and values outside the Q32.32 range.
#[inline]
pub fn checked_f64_to_minutes(v: f64) -> Option<Minutes> {
    Minutes::checked_from_num(v)
}

/// Convert Minutes to f64. Use only for display and export.
#[inline]
pub fn minutes_to_f64(v: Minutes) -> f64 {
    v.to_num::<f64>()
}

/// Widen a duration to the elapsed-time accumulator. Lossless.
#[inline]
pub fn widen(v: Minutes) -> Elapsed {
    Elapsed::from_num(v)
}

/// Convert Elapsed to f64. Use only for display and export.
#[inline]
pub fn elapsed_to_f64(v: Elapsed) -> f64 {
    v.to_num::<f64>()
}
