//! # Rotorcraft Performance
//!
//! Shared rotor geometry for gyrocopters and helicopters, plus the two
//! different ways they balance forces in forward flight.
//!
//! ## Assumptions
//!
//! - Fuselage drag area = (Cd0 + cockpit increment) × 15 ft² reference
//! - Blade profile power `(σ/8)·ρ·A·V_tip³·Cd_blade`
//! - Helicopter: momentum-theory induced power in hover and forward flight
//! - Gyrocopter: thrust balance against fuselage plus 5% of disc area as rotor
//!   drag; autorotating rotors give no vertical climb
//! - Minimum forward speed is a fixed 15 knots for both

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::fixed_wing::Powerplant;
use super::solver::max_level_speed;
use crate::config::VehicleConfiguration;
use crate::regulations::Regulations;
use crate::report::{Metric, PerformanceReport};
use crate::units::{fps_to_fpm, fps_to_knots, FeetPerSecond, Knots};
use crate::weight_balance::Loading;

/// Reference area the fuselage drag coefficient is applied to (ft²)
pub const FUSELAGE_REFERENCE_AREA_SQFT: f64 = 15.0;

/// Rotor drag area as a fraction of disc area (gyrocopter)
pub const ROTOR_DRAG_AREA_FRACTION: f64 = 0.05;

/// Reported minimum forward speed (knots)
pub const MIN_FORWARD_SPEED_KN: f64 = 15.0;

/// Upper bound (exclusive) of the forward-speed scan (ft/s)
const SCAN_LIMIT_FPS: i64 = 250;

/// Rotor, fuselage and engine of a gyrocopter or helicopter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rotorcraft {
    pub rotor_diameter_ft: f64,
    pub blade_chord_ft: f64,
    pub num_blades: f64,
    pub rotor_rpm: f64,
    pub blade_cd: f64,
    /// Cd0 plus the cockpit increment
    pub fuselage_cd0: f64,
    pub powerplant: Powerplant,
}

impl Rotorcraft {
    pub fn from_config(config: &VehicleConfiguration) -> Self {
        let cockpit = config.cockpit_style.map_or(0.0, |c| c.drag_increment());
        Rotorcraft {
            rotor_diameter_ft: config.rotor_diameter_ft,
            blade_chord_ft: config.rotor_blade_chord_ft,
            num_blades: config.num_blades,
            rotor_rpm: config.rotor_rpm,
            blade_cd: config.rotor_blade_cd,
            fuselage_cd0: config.cd0 + cockpit,
            powerplant: Powerplant::from_config(config),
        }
    }

    /// Disc area `π(D/2)²` (ft²)
    pub fn disc_area_sqft(&self) -> f64 {
        PI * (self.rotor_diameter_ft / 2.0).powi(2)
    }

    /// Blade area over disc area, zero without a diameter
    pub fn solidity(&self) -> f64 {
        if self.rotor_diameter_ft > 0.0 {
            self.num_blades * self.blade_chord_ft / (PI * self.rotor_diameter_ft)
        } else {
            0.0
        }
    }

    /// Blade tip speed (ft/s)
    pub fn tip_speed_fps(&self) -> f64 {
        self.rotor_rpm * 2.0 * PI / 60.0 * (self.rotor_diameter_ft / 2.0)
    }

    /// Profile power of the blades (ft·lb/s)
    pub fn profile_power(&self, rho: f64) -> f64 {
        self.solidity() / 8.0 * rho * self.disc_area_sqft() * self.tip_speed_fps().powi(3) * self.blade_cd
    }

    pub fn fuselage_drag_area(&self) -> f64 {
        self.fuselage_cd0 * FUSELAGE_REFERENCE_AREA_SQFT
    }

    /// Ideal hover induced power `W^1.5 / sqrt(2ρA)`; infinite without a disc.
    pub fn hover_induced_power(&self, weight_lb: f64, rho: f64) -> f64 {
        let denom = (2.0 * rho * self.disc_area_sqft()).sqrt();
        if denom > 0.0 && weight_lb >= 0.0 {
            weight_lb.powf(1.5) / denom
        } else {
            f64::INFINITY
        }
    }

    /// Forward-flight induced power `W² / (2ρAv)`; infinite without a disc.
    pub fn forward_induced_power(&self, weight_lb: f64, rho: f64, v_fps: f64) -> f64 {
        let denom = 2.0 * rho * self.disc_area_sqft() * v_fps;
        if denom > 0.0 {
            weight_lb.powi(2) / denom
        } else {
            f64::INFINITY
        }
    }

    /// Hover climb rate (ft/min), unclamped. Zero when hover power is undefined.
    pub fn helicopter_hover_roc(&self, weight_lb: f64, rho: f64) -> f64 {
        let required = self.hover_induced_power(weight_lb, rho) + self.profile_power(rho);
        if weight_lb > 0.0 && required.is_finite() {
            fps_to_fpm((self.powerplant.available_power() - required) / weight_lb)
        } else {
            0.0
        }
    }

    /// Max level speed of a helicopter (ft/s): power balance.
    pub fn helicopter_vh(&self, weight_lb: f64, rho: f64) -> f64 {
        let profile = self.profile_power(rho);
        let drag_area = self.fuselage_drag_area();
        let available = self.powerplant.available_power();
        max_level_speed(
            1,
            SCAN_LIMIT_FPS,
            |v| 0.5 * rho * v.powi(3) * drag_area + profile + self.forward_induced_power(weight_lb, rho, v),
            |_| available,
        )
    }

    /// Max level speed of a gyrocopter (ft/s): thrust balance.
    pub fn gyrocopter_vh(&self, rho: f64) -> f64 {
        let drag_area = self.fuselage_drag_area() + self.disc_area_sqft() * ROTOR_DRAG_AREA_FRACTION;
        let available = self.powerplant.available_power();
        max_level_speed(1, SCAN_LIMIT_FPS, |v| 0.5 * rho * v.powi(2) * drag_area, |v| available / v)
    }

    /// Add rotorcraft metrics to the report.
    pub fn add_metrics(&self, helicopter: bool, loading: &Loading, regs: &Regulations, report: &mut PerformanceReport) {
        let weight = loading.gross_weight_lb;
        let rho = regs.air_density_slug;
        let area = self.disc_area_sqft();

        let (vh_fps, roc_fpm) = if helicopter {
            (self.helicopter_vh(weight, rho), self.helicopter_hover_roc(weight, rho))
        } else {
            (self.gyrocopter_vh(rho), 0.0)
        };
        let min_speed_fps = FeetPerSecond::from(Knots(MIN_FORWARD_SPEED_KN));

        report.set(Metric::DiscLoading, if area > 0.0 { weight / area } else { 0.0 });
        report.set(
            Metric::PowerLoading,
            if self.powerplant.engine_hp > 0.0 { weight / self.powerplant.engine_hp } else { 0.0 },
        );
        report.set(Metric::TipSpeed, self.tip_speed_fps());
        report.set(Metric::MinFwdSpeed, fps_to_knots(min_speed_fps.value()));
        report.set(Metric::Vh, fps_to_knots(vh_fps));
        report.set(Metric::Roc, roc_fpm.max(0.0));
        report.set_not_applicable(Metric::StaticMargin);
        report.set_not_applicable(Metric::CgMacPercent);
    }
}
