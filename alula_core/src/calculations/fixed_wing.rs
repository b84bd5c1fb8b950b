//! # Fixed Wing and Glider Performance
//!
//! Classic drag-polar performance for a wing of given area and span.
//!
//! ## Assumptions
//!
//! - Parabolic polar: `Cd = Cd0 + k·Cl²` with `k = 1/(π·AR·e)`
//! - Sea-level standard density, full legal fuel for powered aircraft
//! - Mean chord approximated as `S / b`
//! - Glider top speed estimated as 1.5 × the best-glide speed
//!
//! ## Example
//!
//! ```rust
//! use alula_core::calculations::fixed_wing::stall_speed_fps;
//!
//! let vs = stall_speed_fps(425.0, 0.002377, 250.0, 1.5);
//! assert!((vs - 30.88).abs() < 0.01);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::solver::{max_excess_power, max_level_speed, scan_bound, MAX_SCAN_SPEED_FPS};
use crate::config::VehicleConfiguration;
use crate::drag::DragBreakdown;
use crate::regulations::Regulations;
use crate::report::{Metric, PerformanceReport};
use crate::units::{fps_to_fpm, fps_to_knots, FtLbPerSec, Horsepower};
use crate::weight_balance::Loading;

/// Level-flight stall speed (ft/s): `sqrt(2W / (ρ·S·Cl))`.
///
/// Returns 0 when `S·Cl` is not positive or the weight is negative.
pub fn stall_speed_fps(weight_lb: f64, rho: f64, area_sqft: f64, cl: f64) -> f64 {
    let denom = rho * area_sqft * cl;
    if area_sqft * cl <= 0.0 || denom <= 0.0 {
        return 0.0;
    }
    let radicand = 2.0 * weight_lb / denom;
    if radicand >= 0.0 {
        radicand.sqrt()
    } else {
        0.0
    }
}

/// Induced drag factor `1/(π·AR·e)`; `None` when `AR·e` is not positive.
pub fn induced_drag_factor(aspect_ratio: f64, oswald: f64) -> Option<f64> {
    let product = aspect_ratio * oswald;
    if product > 0.0 {
        Some(1.0 / (PI * product))
    } else {
        None
    }
}

/// Best-glide figures from a parabolic polar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlidePolar {
    /// Maximum lift-to-drag ratio
    pub ld_max: f64,
    /// Airspeed for L/D max (ft/s)
    pub best_glide_fps: f64,
    /// Sink rate at the best-glide speed (ft/s)
    pub min_sink_fps: f64,
}

impl GlidePolar {
    /// All zeros when `k` is undefined or `Cd0` is not positive.
    pub fn new(weight_lb: f64, rho: f64, area_sqft: f64, cd0: f64, k: Option<f64>) -> Self {
        let k = match k {
            Some(k) if k > 0.0 && cd0 > 0.0 => k,
            _ => return GlidePolar::default(),
        };
        let cl_opt = (cd0 / k).sqrt();
        let ld_max = cl_opt / (2.0 * cd0);

        let denom = rho * area_sqft * cl_opt;
        let radicand = if denom > 0.0 { 2.0 * weight_lb / denom } else { -1.0 };
        let best_glide_fps = if radicand >= 0.0 { radicand.sqrt() } else { 0.0 };

        let min_sink_fps = if ld_max > 0.0 { best_glide_fps / ld_max } else { 0.0 };
        GlidePolar {
            ld_max,
            best_glide_fps,
            min_sink_fps,
        }
    }
}

/// Wing geometry, lift and drag shared by powered aircraft and gliders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airframe {
    pub wing_area_sqft: f64,
    pub wing_span_ft: f64,
    pub cl_max: f64,
    /// `None` when the wing has no flaps
    pub cl_max_flaps: Option<f64>,
    pub oswald_efficiency: f64,
    pub lemac_ft: f64,
    pub neutral_point_ft: f64,
    pub drag: DragBreakdown,
}

impl Airframe {
    pub fn from_config(config: &VehicleConfiguration) -> Self {
        Airframe {
            wing_area_sqft: config.wing_area_sqft,
            wing_span_ft: config.wing_span_ft,
            cl_max: config.cl_max,
            cl_max_flaps: config.flaps_present.then_some(config.cl_max_flaps),
            oswald_efficiency: config.oswald_efficiency,
            lemac_ft: config.lemac_ft,
            neutral_point_ft: config.neutral_point_ft,
            drag: DragBreakdown::from_config(config),
        }
    }

    /// `b²/S`, zero without wing area
    pub fn aspect_ratio(&self) -> f64 {
        if self.wing_area_sqft > 0.0 {
            self.wing_span_ft.powi(2) / self.wing_area_sqft
        } else {
            0.0
        }
    }

    pub fn induced_drag_factor(&self) -> Option<f64> {
        induced_drag_factor(self.aspect_ratio(), self.oswald_efficiency)
    }

    /// Mean chord `S/b`, zero without span
    pub fn mean_chord_ft(&self) -> f64 {
        if self.wing_span_ft > 0.0 {
            self.wing_area_sqft / self.wing_span_ft
        } else {
            0.0
        }
    }

    /// Clean and flapped stall speeds (ft/s). Without flaps both are clean.
    pub fn stall_speeds_fps(&self, weight_lb: f64, rho: f64) -> (f64, f64) {
        let clean = stall_speed_fps(weight_lb, rho, self.wing_area_sqft, self.cl_max);
        let flaps = match self.cl_max_flaps {
            Some(cl) => stall_speed_fps(weight_lb, rho, self.wing_area_sqft, cl),
            None => clean,
        };
        (clean, flaps)
    }

    /// Power required for level flight at `v` (ft·lb/s)
    pub fn power_required(&self, weight_lb: f64, rho: f64, k: f64, v_fps: f64) -> f64 {
        let cl = 2.0 * weight_lb / (rho * self.wing_area_sqft * v_fps.powi(2));
        let cd = self.drag.total_cd0 + k * cl.powi(2);
        0.5 * rho * v_fps.powi(3) * self.wing_area_sqft * cd
    }

    /// Static margin and CG position, both in % of mean chord.
    pub fn stability(&self, cg_ft: f64) -> (f64, f64) {
        let chord = self.mean_chord_ft();
        if chord <= 0.0 {
            return (0.0, 0.0);
        }
        let static_margin = (self.neutral_point_ft - cg_ft) / chord * 100.0;
        let cg_mac = (cg_ft - self.lemac_ft) / chord * 100.0;
        (static_margin, cg_mac)
    }

    fn add_common_metrics(&self, loading: &Loading, report: &mut PerformanceReport) {
        let (static_margin, cg_mac) = self.stability(loading.cg_ft);
        report.set(Metric::StaticMargin, static_margin);
        report.set(Metric::CgMacPercent, cg_mac);
        report.set(Metric::TotalCd0, self.drag.total_cd0);
        report.set(Metric::BaseCd0, self.drag.base_cd0);
        report.set(Metric::CockpitDrag, self.drag.cockpit_cd0);
        report.set(Metric::TailDrag, self.drag.tail_cd0);
    }

    fn wing_loading(&self, weight_lb: f64) -> f64 {
        if self.wing_area_sqft > 0.0 {
            weight_lb / self.wing_area_sqft
        } else {
            0.0
        }
    }
}

/// Engine and propeller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerplant {
    pub engine_hp: f64,
    pub prop_efficiency: f64,
}

impl Powerplant {
    pub fn from_config(config: &VehicleConfiguration) -> Self {
        Powerplant {
            engine_hp: config.engine_hp,
            prop_efficiency: config.prop_efficiency,
        }
    }

    /// Thrust power at the propeller (ft·lb/s)
    pub fn available_power(&self) -> f64 {
        FtLbPerSec::from(Horsepower(self.engine_hp) * self.prop_efficiency).value()
    }
}

/// Max level speed and best rate of climb of a powered aircraft (ft/s, ft/min).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClimbPerformance {
    pub vh_fps: f64,
    pub roc_fpm: f64,
}

/// Scan for VH from stall up to the solver ceiling, then search the best climb speed.
///
/// VH and ROC are 0 when the induced drag factor is undefined.
pub fn climb_performance(
    airframe: &Airframe,
    powerplant: &Powerplant,
    weight_lb: f64,
    rho: f64,
    vs_fps: f64,
) -> ClimbPerformance {
    let k = match airframe.induced_drag_factor() {
        Some(k) => k,
        None => return ClimbPerformance::default(),
    };
    let available = powerplant.available_power();
    let required = |v: f64| airframe.power_required(weight_lb, rho, k, v);

    let vh_fps = if vs_fps > 0.0 {
        max_level_speed(scan_bound(vs_fps), MAX_SCAN_SPEED_FPS, required, |_| available)
    } else {
        0.0
    };

    let climb_end = if vh_fps > vs_fps { vh_fps * 1.05 } else { vs_fps * 1.5 };
    let best_excess = max_excess_power(scan_bound(vs_fps * 1.05), scan_bound(climb_end), available, required);
    let roc_fpm = match best_excess {
        Some(excess) if weight_lb > 0.0 => fps_to_fpm(excess / weight_lb),
        _ => 0.0,
    };

    ClimbPerformance { vh_fps, roc_fpm }
}

/// Add powered fixed-wing metrics to the report.
pub fn add_powered_metrics(
    airframe: &Airframe,
    powerplant: &Powerplant,
    loading: &Loading,
    regs: &Regulations,
    report: &mut PerformanceReport,
) {
    let weight = loading.gross_weight_lb;
    let rho = regs.air_density_slug;
    let (vs_fps, vs_flaps_fps) = airframe.stall_speeds_fps(weight, rho);
    let climb = climb_performance(airframe, powerplant, weight, rho, vs_fps);

    report.set(Metric::WingLoading, airframe.wing_loading(weight));
    report.set(
        Metric::PowerLoading,
        if powerplant.engine_hp > 0.0 { weight / powerplant.engine_hp } else { 0.0 },
    );
    report.set(
        Metric::SpanLoading,
        if airframe.wing_span_ft > 0.0 { weight / airframe.wing_span_ft } else { 0.0 },
    );
    report.set(Metric::StallSpeed, fps_to_knots(vs_fps));
    report.set(Metric::StallSpeedFlaps, fps_to_knots(vs_flaps_fps));
    report.set(Metric::Vh, fps_to_knots(climb.vh_fps));
    report.set(Metric::Roc, climb.roc_fpm.max(0.0));
    airframe.add_common_metrics(loading, report);
}

/// Add glider metrics to the report.
pub fn add_glider_metrics(airframe: &Airframe, loading: &Loading, regs: &Regulations, report: &mut PerformanceReport) {
    let weight = loading.gross_weight_lb;
    let rho = regs.air_density_slug;
    let (vs_fps, vs_flaps_fps) = airframe.stall_speeds_fps(weight, rho);
    let polar = GlidePolar::new(
        weight,
        rho,
        airframe.wing_area_sqft,
        airframe.drag.total_cd0,
        airframe.induced_drag_factor(),
    );

    report.set(Metric::LdMax, polar.ld_max);
    report.set(Metric::MinSinkRate, fps_to_fpm(polar.min_sink_fps));
    report.set(Metric::SpeedAtMinSink, fps_to_knots(polar.best_glide_fps));
    report.set(Metric::StallSpeed, fps_to_knots(vs_fps));
    report.set(Metric::StallSpeedFlaps, fps_to_knots(vs_flaps_fps));
    report.set(Metric::WingLoading, airframe.wing_loading(weight));
    report.set(Metric::Vh, fps_to_knots(polar.best_glide_fps) * 1.5);
    airframe.add_common_metrics(loading, report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleType;
    use crate::units::KNOTS_TO_FPS;

    const RHO: f64 = 0.002377;

    fn loading(gross: f64, cg: f64) -> Loading {
        Loading {
            empty_weight_lb: 215.0,
            pilot_weight_lb: 180.0,
            fuel_weight_lb: gross - 395.0,
            gross_weight_lb: gross,
            cg_ft: cg,
            power_system_weight_lb: 45.0,
        }
    }

    #[test]
    fn test_stall_speed_formula() {
        let vs = stall_speed_fps(425.0, RHO, 250.0, 1.5);
        let expected = (850.0_f64 / (RHO * 250.0 * 1.5)).sqrt();
        assert!((vs - expected).abs() < 1e-12);
        assert!(fps_to_knots(vs) < 24.0);
    }

    #[test]
    fn test_stall_speed_guards() {
        assert_eq!(stall_speed_fps(425.0, RHO, 0.0, 1.5), 0.0);
        assert_eq!(stall_speed_fps(425.0, RHO, 250.0, 0.0), 0.0);
        assert_eq!(stall_speed_fps(425.0, RHO, -10.0, -1.5), 0.0);
        assert_eq!(stall_speed_fps(-5.0, RHO, 250.0, 1.5), 0.0);
    }

    #[test]
    fn test_stall_speed_1000lb_150sqft() {
        let vs = stall_speed_fps(1000.0, RHO, 150.0, 1.5);
        assert!((vs - 61.15).abs() < 0.01);
        assert!((fps_to_knots(vs) - 36.23).abs() < 0.01);
    }

    #[test]
    fn test_induced_factor_guard() {
        assert!(induced_drag_factor(0.0, 0.8).is_none());
        assert!(induced_drag_factor(4.9, -0.8).is_none());
        let k = induced_drag_factor(4.9, 0.8).unwrap();
        assert!((k - 1.0 / (PI * 3.92)).abs() < 1e-12);
    }

    #[test]
    fn test_glide_polar_zero_when_undefined() {
        assert_eq!(GlidePolar::new(400.0, RHO, 160.0, 0.0, Some(0.05)), GlidePolar::default());
        assert_eq!(GlidePolar::new(400.0, RHO, 160.0, 0.02, None), GlidePolar::default());
        let no_area = GlidePolar::new(400.0, RHO, 0.0, 0.02, Some(0.05));
        assert_eq!(no_area.best_glide_fps, 0.0);
        assert!(no_area.ld_max > 0.0);
    }

    #[test]
    fn test_glide_polar_values() {
        let k = 0.05;
        let cd0 = 0.02;
        let polar = GlidePolar::new(400.0, RHO, 160.0, cd0, Some(k));
        let ld = (cd0 / k).sqrt() / (2.0 * cd0);
        assert!((polar.ld_max - ld).abs() < 1e-12);
        assert!((polar.min_sink_fps * polar.ld_max - polar.best_glide_fps).abs() < 1e-9);
    }

    #[test]
    fn test_default_airframe_geometry() {
        let airframe = Airframe::from_config(&VehicleConfiguration::default());
        assert!((airframe.aspect_ratio() - 4.9).abs() < 1e-12);
        assert!((airframe.mean_chord_ft() - 250.0 / 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_stability_percentages() {
        let airframe = Airframe::from_config(&VehicleConfiguration::default());
        let cg = 1177.5 / 215.0;
        let (sm, mac) = airframe.stability(cg);
        assert!((sm - 0.3256).abs() < 1e-3);
        assert!((mac - 20.674).abs() < 1e-3);
    }

    #[test]
    fn test_no_flaps_mirrors_clean_stall() {
        let mut config = VehicleConfiguration::default();
        config.flaps_present = false;
        let airframe = Airframe::from_config(&config);
        let (clean, flaps) = airframe.stall_speeds_fps(425.0, RHO);
        assert_eq!(clean, flaps);

        config.flaps_present = true;
        let (clean, flaps) = Airframe::from_config(&config).stall_speeds_fps(425.0, RHO);
        assert!(flaps < clean);
    }

    #[test]
    fn test_vh_is_last_speed_within_budget() {
        let airframe = Airframe::from_config(&VehicleConfiguration::default());
        let powerplant = Powerplant::from_config(&VehicleConfiguration::default());
        let k = airframe.induced_drag_factor().unwrap();
        let (vs, _) = airframe.stall_speeds_fps(425.0, RHO);
        let climb = climb_performance(&airframe, &powerplant, 425.0, RHO, vs);

        assert!(climb.vh_fps > vs);
        let available = powerplant.available_power();
        assert!(airframe.power_required(425.0, RHO, k, climb.vh_fps + 1.0) > available);
        assert!(airframe.power_required(425.0, RHO, k, climb.vh_fps) <= available);
        assert!(climb.roc_fpm > 0.0);
    }

    #[test]
    fn test_zero_span_zeroes_vh_and_roc() {
        let mut config = VehicleConfiguration::default();
        config.wing_span_ft = 0.0;
        let airframe = Airframe::from_config(&config);
        let climb = climb_performance(&airframe, &Powerplant::from_config(&config), 425.0, RHO, 30.0);
        assert_eq!(climb, ClimbPerformance::default());
    }

    #[test]
    fn test_extreme_weight_finishes_with_zero_climb() {
        let config = VehicleConfiguration::default();
        let airframe = Airframe::from_config(&config);
        let weight = 1e33;
        let (vs, _) = airframe.stall_speeds_fps(weight, RHO);
        assert!(vs > 1e16);

        let climb = climb_performance(&airframe, &Powerplant::from_config(&config), weight, RHO, vs);
        assert_eq!(climb, ClimbPerformance::default());
    }

    #[test]
    fn test_powered_metrics_with_zero_area() {
        let mut config = VehicleConfiguration::default();
        config.wing_area_sqft = 0.0;
        let airframe = Airframe::from_config(&config);
        let powerplant = Powerplant::from_config(&config);
        let mut report = PerformanceReport::new(VehicleType::FixedWing);
        add_powered_metrics(&airframe, &powerplant, &loading(425.0, 5.0), &Regulations::default(), &mut report);

        for metric in [Metric::WingLoading, Metric::StallSpeed, Metric::Vh, Metric::Roc] {
            assert_eq!(report.number(metric), Some(0.0), "{}", metric);
        }
        assert_eq!(report.number(Metric::StaticMargin), Some(0.0));
    }

    #[test]
    fn test_glider_vh_from_best_glide() {
        let config = VehicleConfiguration::for_vehicle(VehicleType::Glider);
        let airframe = Airframe::from_config(&config);
        let mut report = PerformanceReport::new(VehicleType::Glider);
        add_glider_metrics(&airframe, &loading(395.0, 5.0), &Regulations::default(), &mut report);

        let best = report.number(Metric::SpeedAtMinSink).unwrap();
        assert!((report.number(Metric::Vh).unwrap() - best * 1.5).abs() < 1e-9);
        assert!(!report.contains(Metric::PowerLoading));
        assert!(!report.contains(Metric::Roc));

        let sink = report.number(Metric::MinSinkRate).unwrap();
        let ld = report.number(Metric::LdMax).unwrap();
        assert!((sink - best * KNOTS_TO_FPS / ld * 60.0).abs() < 1e-6);
    }
}
