//! # Unit Types
//!
//! Lightweight newtype wrappers for the handful of unit conversions the engine
//! performs. Internally every aerodynamic formula works in feet, pounds,
//! slugs and seconds; results are reported in the units pilots read off a
//! placard (knots for speeds, feet per minute for climb and sink).
//!
//! ## Example
//!
//! ```rust
//! use alula_core::units::{FeetPerSecond, Knots};
//!
//! let stall = FeetPerSecond(33.76);
//! let stall_kn: Knots = stall.into();
//! assert!((stall_kn.0 - 20.0).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Feet per second in one knot
pub const KNOTS_TO_FPS: f64 = 1.68781;

/// Shaft power of one horsepower in ft·lb/s
pub const HP_TO_FTLB_PER_S: f64 = 550.0;

/// Standard gravitational acceleration (ft/s²)
pub const GRAVITY_FPS2: f64 = 32.174;

// ============================================================================
// Speed Units
// ============================================================================

/// True airspeed in feet per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeetPerSecond(pub f64);

/// Airspeed in knots
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Knots(pub f64);

/// Vertical speed in feet per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeetPerMinute(pub f64);

impl From<FeetPerSecond> for Knots {
    fn from(fps: FeetPerSecond) -> Self {
        Knots(fps.0 / KNOTS_TO_FPS)
    }
}

impl From<Knots> for FeetPerSecond {
    fn from(kn: Knots) -> Self {
        FeetPerSecond(kn.0 * KNOTS_TO_FPS)
    }
}

impl From<FeetPerSecond> for FeetPerMinute {
    fn from(fps: FeetPerSecond) -> Self {
        FeetPerMinute(fps.0 * 60.0)
    }
}

// ============================================================================
// Power Units
// ============================================================================

/// Shaft power in horsepower
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Horsepower(pub f64);

/// Power in foot-pounds per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtLbPerSec(pub f64);

impl From<Horsepower> for FtLbPerSec {
    fn from(hp: Horsepower) -> Self {
        FtLbPerSec(hp.0 * HP_TO_FTLB_PER_S)
    }
}

// ============================================================================
// Raw Access
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(FeetPerSecond, Knots, FeetPerMinute, Horsepower, FtLbPerSec);

/// Derate shaft power by an efficiency factor
impl Mul<f64> for Horsepower {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Horsepower(self.0 * rhs)
    }
}

/// Convert a true airspeed in ft/s straight to knots.
pub fn fps_to_knots(fps: f64) -> f64 {
    Knots::from(FeetPerSecond(fps)).value()
}

/// Convert a vertical speed in ft/s straight to ft/min.
pub fn fps_to_fpm(fps: f64) -> f64 {
    FeetPerMinute::from(FeetPerSecond(fps)).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knots_roundtrip() {
        let kn = Knots(55.0);
        let fps: FeetPerSecond = kn.into();
        assert!((fps.0 - 92.82955).abs() < 1e-6);
        let back: Knots = fps.into();
        assert!((back.0 - 55.0).abs() < 1e-12);
    }

    #[test]
    fn test_horsepower_to_ftlb() {
        let power: FtLbPerSec = (Horsepower(20.0) * 0.75).into();
        assert_eq!(power.0, 8250.0);
    }

    #[test]
    fn test_fpm_conversion() {
        assert_eq!(fps_to_fpm(2.5), 150.0);
    }

    #[test]
    fn test_raw_values() {
        assert!((FeetPerSecond::from(Knots(10.0)).value() - 16.8781).abs() < 1e-9);
        assert_eq!((Horsepower(40.0) * 0.5).value(), 20.0);
    }

    #[test]
    fn test_serialization() {
        let kn = Knots(24.0);
        let json = serde_json::to_string(&kn).unwrap();
        assert_eq!(json, "24.0");
        let roundtrip: Knots = serde_json::from_str(&json).unwrap();
        assert_eq!(kn, roundtrip);
    }
}
