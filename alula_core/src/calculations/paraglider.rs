//! # Paraglider Performance
//!
//! Paragliders have no user-entered airfoil data. The EN safety class selects
//! a representative polar instead, and the flat aspect ratio is used directly.
//! There is no fixed CG datum, so static margin and %MAC are not applicable.

use serde::{Deserialize, Serialize};

use super::fixed_wing::{induced_drag_factor, stall_speed_fps, GlidePolar};
use crate::config::{GliderClass, VehicleConfiguration};
use crate::regulations::Regulations;
use crate::report::{Metric, PerformanceReport};
use crate::units::{fps_to_fpm, fps_to_knots};
use crate::weight_balance::Loading;

/// Representative aerodynamic coefficients for an EN class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassPolar {
    pub cl_trim: f64,
    pub cl_max: f64,
    pub cd0: f64,
    pub oswald: f64,
}

impl GliderClass {
    /// Lookup table; higher classes trade lift margin for lower drag
    pub fn polar(&self) -> ClassPolar {
        let (cl_trim, cl_max, cd0, oswald) = match self {
            GliderClass::EnA => (1.2, 2.2, 0.08, 0.4),
            GliderClass::EnB => (1.1, 2.0, 0.06, 0.5),
            GliderClass::EnC => (1.0, 1.8, 0.04, 0.6),
            GliderClass::EnD => (0.9, 1.7, 0.03, 0.7),
        };
        ClassPolar {
            cl_trim,
            cl_max,
            cd0,
            oswald,
        }
    }
}

/// Canopy geometry and class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paraglider {
    pub wing_area_sqft: f64,
    pub aspect_ratio: f64,
    /// `None` when the class name was not recognised
    pub glider_class: Option<GliderClass>,
}

impl Paraglider {
    pub fn from_config(config: &VehicleConfiguration) -> Self {
        Paraglider {
            wing_area_sqft: config.wing_area_sqft,
            aspect_ratio: config.aspect_ratio,
            glider_class: config.glider_class,
        }
    }

    pub fn add_metrics(&self, loading: &Loading, regs: &Regulations, report: &mut PerformanceReport) {
        const CLASS_METRICS: [Metric; 6] = [
            Metric::LdMax,
            Metric::MinSinkRate,
            Metric::TrimSpeed,
            Metric::StallSpeed,
            Metric::WingLoading,
            Metric::Vh,
        ];

        report.set_not_applicable(Metric::StaticMargin);
        report.set_not_applicable(Metric::CgMacPercent);

        let polar = match self.glider_class {
            Some(class) => class.polar(),
            None => {
                for metric in CLASS_METRICS {
                    report.set_not_applicable(metric);
                }
                return;
            }
        };

        let weight = loading.gross_weight_lb;
        let rho = regs.air_density_slug;
        let stall_fps = stall_speed_fps(weight, rho, self.wing_area_sqft, polar.cl_max);
        let trim_fps = stall_speed_fps(weight, rho, self.wing_area_sqft, polar.cl_trim);
        let k = induced_drag_factor(self.aspect_ratio, polar.oswald);
        let glide = GlidePolar::new(weight, rho, self.wing_area_sqft, polar.cd0, k);

        report.set(Metric::LdMax, glide.ld_max);
        report.set(Metric::MinSinkRate, fps_to_fpm(glide.min_sink_fps));
        report.set(Metric::TrimSpeed, fps_to_knots(trim_fps));
        report.set(Metric::StallSpeed, fps_to_knots(stall_fps));
        report.set(
            Metric::WingLoading,
            if self.wing_area_sqft > 0.0 { weight / self.wing_area_sqft } else { 0.0 },
        );
        // Accelerated (speed bar) top speed
        report.set(Metric::Vh, fps_to_knots(trim_fps * 1.4));
    }
}
