//! Tolerance helpers for floating point comparisons.

/// Values closer to zero than this are treated as zero.
pub const EPSILON: f32 = 1e-5;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f32) -> bool {
    x.abs() < EPSILON
}

/// Snaps values within [`EPSILON`] of zero to exactly zero.
///
/// Sign tests (`> 0`, `< 0`) on the result then treat near-zero as neither.
#[inline]
pub fn align_zero(x: f32) -> f32 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
