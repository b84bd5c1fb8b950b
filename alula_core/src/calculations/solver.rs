//! # Speed Solver
//!
//! Integer-speed scans over a power (or thrust) balance. Both searches walk
//! whole ft/s steps, which keeps the reported speeds reproducible across
//! archetypes and matches how the curves were tuned.
//!
//! ## Assumptions
//!
//! - Required power crosses the available budget at most once in the scanned
//!   range. A non-monotonic curve reports its first crossing.
//! - Available power does not depend on airspeed unless the caller's closure
//!   says so (the gyrocopter's thrust balance does).
//!
//! - No scan runs past [`MAX_SCAN_SPEED_FPS`], whatever bound the caller
//!   passes. Extreme inputs therefore cost at most a few hundred steps.
//!
//! ## Example
//!
//! ```rust
//! use alula_core::calculations::solver::max_level_speed;
//!
//! // Cubic drag power against a flat 1000 ft·lb/s budget
//! let vh = max_level_speed(1, 300, |v| v.powi(3) / 1000.0, |_| 1000.0);
//! assert_eq!(vh, 100.0);
//! ```

/// Ceiling on every speed scan (ft/s)
pub const MAX_SCAN_SPEED_FPS: i64 = 300;

/// Highest integer speed (ft/s) at which required power stays within budget.
///
/// Scans `v = max(lower, 1) .. min(upper, MAX_SCAN_SPEED_FPS)` and returns `v - 1` at the
/// first speed where `required(v) > available(v)`. Returns 0 when the range
/// is empty or the curve never crosses the budget.
pub fn max_level_speed<R, A>(lower: i64, upper: i64, required: R, available: A) -> f64
where
    R: Fn(f64) -> f64,
    A: Fn(f64) -> f64,
{
    (lower.max(1)..upper.min(MAX_SCAN_SPEED_FPS))
        .map(|v| v as f64)
        .find(|&v| required(v) > available(v))
        .map_or(0.0, |v| v - 1.0)
}

/// Best excess power over an integer speed range.
///
/// Scans `v = max(lower, 1) .. min(upper, MAX_SCAN_SPEED_FPS)` and returns the largest
/// `available - required(v)` found, or `None` when the range is empty.
pub fn max_excess_power<R>(lower: i64, upper: i64, available: f64, required: R) -> Option<f64>
where
    R: Fn(f64) -> f64,
{
    (lower.max(1)..upper.min(MAX_SCAN_SPEED_FPS))
        .map(|v| available - required(v as f64))
        .fold(None, |best: Option<f64>, excess| match best {
            Some(b) if b >= excess => Some(b),
            _ => Some(excess),
        })
}

/// Truncate a speed toward zero for use as a scan bound.
///
/// Non-finite speeds collapse to 0 so the resulting range is empty.
pub fn scan_bound(speed_fps: f64) -> i64 {
    if speed_fps.is_finite() {
        speed_fps.trunc() as i64
    } else {
        0
    }
}
