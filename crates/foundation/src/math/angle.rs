use core::f64::consts::{PI, TAU};

/// Wrap an angle in radians into `[0, 2π)`.
#[inline]
pub fn wrap_full_turn(rad: f64) -> f64 {
    let w = rad.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if w >= TAU { 0.0 } else { w }
}

/// Wrap `value` into `[lo, lo + range)` by whole multiples of `range`.
///
/// Values already inside `[lo, hi]` are returned untouched, so an inclusive
/// upper bound is preserved.
#[inline]
pub fn wrap_into(value: f64, lo: f64, hi: f64) -> f64 {
    if value >= lo && value <= hi {
        return value;
    }
    let range = hi - lo;
    let w = lo + (value - lo).rem_euclid(range);
    if w >= lo + range { lo } else { w }
}

/// Signed shortest difference `a - b`, in `(-π, π]`.
#[inline]
pub fn angular_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}
