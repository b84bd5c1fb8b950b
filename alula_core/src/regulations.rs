//! # Regulatory Constants
//!
//! FAA FAR Part 103 limits together with the standard-day fluid properties the
//! engine needs. A [`Regulations`] value is built once at startup (usually via
//! `Regulations::default()`) and passed by reference into every calculation
//! and compliance call; nothing in the engine reads ambient statics.
//!
//! ```rust
//! use alula_core::regulations::Regulations;
//!
//! let regs = Regulations::default();
//! assert_eq!(regs.max_fuel_weight_lb(), 30.0);
//! assert_eq!(regs.empty_weight_limit_lb(false), 155.0);
//! ```

use serde::{Deserialize, Serialize};

/// FAR 103 limits and fluid densities, read-only for the engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regulations {
    /// Max empty weight of a powered ultralight (lb)
    pub empty_weight_powered_lb: f64,
    /// Max empty weight of an unpowered ultralight (lb)
    pub empty_weight_unpowered_lb: f64,
    /// Max fuel capacity (US gallons)
    pub max_fuel_gal: f64,
    /// Fuel density used to turn capacity into weight (lb/gal)
    pub fuel_lb_per_gal: f64,
    /// Max full-power level flight speed (knots CAS)
    pub max_level_speed_kn: f64,
    /// Max power-off stall speed (knots CAS)
    pub max_stall_speed_kn: f64,
    /// Sea-level standard air density (slug/ft³)
    pub air_density_slug: f64,
    /// Helium density at sea level (slug/ft³)
    pub helium_density_slug: f64,
}

impl Default for Regulations {
    fn default() -> Self {
        Regulations {
            empty_weight_powered_lb: 254.0,
            empty_weight_unpowered_lb: 155.0,
            max_fuel_gal: 5.0,
            fuel_lb_per_gal: 6.0,
            max_level_speed_kn: 55.0,
            max_stall_speed_kn: 24.0,
            air_density_slug: 0.002377,
            helium_density_slug: 0.000332,
        }
    }
}

impl Regulations {
    /// Weight of a full legal fuel load (lb)
    pub fn max_fuel_weight_lb(&self) -> f64 {
        self.max_fuel_gal * self.fuel_lb_per_gal
    }

    /// Empty weight limit for a powered or unpowered vehicle (lb)
    pub fn empty_weight_limit_lb(&self, powered: bool) -> f64 {
        if powered {
            self.empty_weight_powered_lb
        } else {
            self.empty_weight_unpowered_lb
        }
    }

    /// Human-readable rule summary, one `(rule, limit)` pair per line.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Max Empty Weight (Powered)", format!("{} lbs", self.empty_weight_powered_lb)),
            ("Max Empty Weight (Unpowered)", format!("{} lbs", self.empty_weight_unpowered_lb)),
            ("Max Fuel Capacity", format!("{} U.S. Gallons", self.max_fuel_gal)),
            (
                "Max Speed (level flight)",
                format!("{} knots ({:.0} mph)", self.max_level_speed_kn, knots_to_mph(self.max_level_speed_kn)),
            ),
            (
                "Max Stall Speed (power-off)",
                format!("{} knots ({:.0} mph)", self.max_stall_speed_kn, knots_to_mph(self.max_stall_speed_kn)),
            ),
            ("Occupants", "Single (1)".to_string()),
        ]
    }
}

fn knots_to_mph(kn: f64) -> f64 {
    kn * 1.15078
}
