//! # Lighter Than Air Performance
//!
//! Helium buoyancy and a closed-form top speed. Drag power is a pure cube law
//! in airspeed, so VH needs no scan.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::fixed_wing::Powerplant;
use crate::config::VehicleConfiguration;
use crate::regulations::Regulations;
use crate::report::{Metric, PerformanceReport, StaticCondition};
use crate::units::{fps_to_knots, GRAVITY_FPS2};
use crate::weight_balance::Loading;

/// Gas envelope, hull drag and engine of an airship or blimp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LighterThanAir {
    pub envelope_volume_cuft: f64,
    pub cd0: f64,
    pub powerplant: Powerplant,
}

impl LighterThanAir {
    pub fn from_config(config: &VehicleConfiguration) -> Self {
        LighterThanAir {
            envelope_volume_cuft: config.envelope_volume_cuft,
            cd0: config.cd0,
            powerplant: Powerplant::from_config(config),
        }
    }

    /// Gross buoyant lift of the helium volume (lb)
    pub fn buoyant_lift_lb(&self, regs: &Regulations) -> f64 {
        (regs.air_density_slug - regs.helium_density_slug) * GRAVITY_FPS2 * self.envelope_volume_cuft
    }

    /// Frontal area of a sphere holding 0.75 × the envelope volume (ft²).
    pub fn frontal_area_sqft(&self) -> f64 {
        let volume = self.envelope_volume_cuft * 0.75;
        if volume <= 0.0 {
            return 0.0;
        }
        PI * (volume / PI).cbrt().powi(2)
    }

    /// `(P / (0.5·ρ·A·Cd0))^(1/3)` in ft/s, zero when any term is not positive.
    pub fn max_level_speed_fps(&self, rho: f64) -> f64 {
        let available = self.powerplant.available_power();
        let denom = 0.5 * rho * self.frontal_area_sqft() * self.cd0;
        if self.cd0 > 0.0 && denom > 0.0 && available > 0.0 {
            (available / denom).cbrt()
        } else {
            0.0
        }
    }

    pub fn add_metrics(&self, loading: &Loading, regs: &Regulations, report: &mut PerformanceReport) {
        let buoyant = self.buoyant_lift_lb(regs);
        let net = buoyant - loading.gross_weight_lb;

        report.set(Metric::BuoyantLift, buoyant);
        report.set(Metric::NetLift, net);
        report.set(Metric::StaticHeaviness, StaticCondition::from_net_lift(net));
        report.set(Metric::Vh, fps_to_knots(self.max_level_speed_fps(regs.air_density_slug)));
        for metric in [Metric::Roc, Metric::StallSpeed, Metric::StaticMargin, Metric::CgMacPercent] {
            report.set_not_applicable(metric);
        }
    }
}
