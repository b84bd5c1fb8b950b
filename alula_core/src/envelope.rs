//! # V-g Envelope
//!
//! Derives the operating envelope (airspeed against load factor) from a
//! [`PerformanceReport`] as plain numbers; drawing it is up to the caller.
//!
//! ## Construction
//!
//! - Stall boundary `g = (v / Vs)²` from Vs up to the maneuvering speed
//!   `Va = Vs·sqrt(g+)`
//! - Positive limit `g+` from Va to `Vne = max(1.1·VH, VH + 10 kn)`
//! - Negative limit `g-` from Vne back to Vs
//!
//! Speeds are knots. Lighter-than-air vehicles have no envelope, and neither
//! does a design whose stall speed comes out as zero.

use serde::{Deserialize, Serialize};

use crate::config::VehicleType;
use crate::report::{Metric, PerformanceReport};

/// Stall speed assumed when the report carries neither a stall nor a
/// minimum forward speed (knots)
pub const DEFAULT_STALL_SPEED_KN: f64 = 25.0;

/// VH assumed when the report has no numeric VH (knots)
pub const DEFAULT_VH_KN: f64 = 55.0;

/// Most interior points a single boundary carries
pub const MAX_CURVE_POINTS: usize = 500;

/// Structural load factor limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadLimits {
    pub positive_g: f64,
    pub negative_g: f64,
}

impl LoadLimits {
    pub fn for_vehicle(vehicle_type: VehicleType) -> Self {
        match vehicle_type {
            // A canopy unloads rather than flying negative g
            VehicleType::Paraglider => LoadLimits {
                positive_g: 2.5,
                negative_g: 0.0,
            },
            _ => LoadLimits {
                positive_g: 3.8,
                negative_g: -2.0,
            },
        }
    }
}

/// One (airspeed, load factor) point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub speed_kn: f64,
    pub load_factor: f64,
}

impl EnvelopePoint {
    pub fn new(speed_kn: f64, load_factor: f64) -> Self {
        EnvelopePoint { speed_kn, load_factor }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEnvelope {
    pub limits: LoadLimits,
    pub stall_speed_kn: f64,
    /// Present when the report carries a positive flapped stall speed
    pub stall_speed_flaps_kn: Option<f64>,
    pub maneuvering_speed_kn: f64,
    pub never_exceed_speed_kn: f64,
    pub max_level_speed_kn: f64,
    /// Clean stall boundary from Vs to Va
    pub stall_curve: Vec<EnvelopePoint>,
    /// Flapped stall boundary from Vs(flaps) to Va
    pub flaps_stall_curve: Option<Vec<EnvelopePoint>>,
    /// Closed operating envelope outline
    pub polygon: Vec<EnvelopePoint>,
    /// VH marker at 1 g
    pub vh_point: EnvelopePoint,
}

/// Ascending speeds strictly between `from` and `to`.
///
/// Whole knots while they fit in [`MAX_CURVE_POINTS`], otherwise that many
/// evenly spaced speeds.
fn interior_speeds(from: f64, to: f64) -> Vec<f64> {
    let span = to - from;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }
    let whole = span.ceil();
    let mut speeds: Vec<f64> = if whole <= MAX_CURVE_POINTS as f64 {
        let first = from.floor() + 1.0;
        (0..whole as usize).map(|i| first + i as f64).collect()
    } else {
        let step = span / (MAX_CURVE_POINTS + 1) as f64;
        (1..=MAX_CURVE_POINTS).map(|i| from + step * i as f64).collect()
    };
    speeds.retain(|v| *v > from && *v < to);
    speeds.dedup();
    speeds
}

/// Stall boundary `g = (v/vs)²` from `vs` to `end` inclusive.
///
/// Both ends are exact; whole knots in between, thinned to
/// [`MAX_CURVE_POINTS`] on very wide spans. Empty when `vs` is not positive
/// or `end` is below `vs`.
pub fn stall_curve(vs: f64, end: f64) -> Vec<EnvelopePoint> {
    if vs <= 0.0 || end < vs {
        return Vec::new();
    }
    let g = |v: f64| (v / vs).powi(2);
    let mut points = vec![EnvelopePoint::new(vs, 1.0)];
    points.extend(interior_speeds(vs, end).into_iter().map(|v| EnvelopePoint::new(v, g(v))));
    if end > vs {
        points.push(EnvelopePoint::new(end, g(end)));
    }
    points
}

fn negative_boundary(va: f64, vs: f64, negative_g: f64) -> Vec<EnvelopePoint> {
    let mut points = vec![EnvelopePoint::new(va, negative_g)];
    points.extend(interior_speeds(vs, va).into_iter().rev().map(|v| EnvelopePoint::new(v, negative_g)));
    if va > vs {
        points.push(EnvelopePoint::new(vs, negative_g));
    }
    points
}

fn resolve_stall_speed(report: &PerformanceReport) -> Option<f64> {
    let stall = report.number(Metric::StallSpeed);
    let min_fwd = report.number(Metric::MinFwdSpeed);
    match (stall, min_fwd) {
        (Some(v), _) if v > 0.0 => Some(v),
        (_, Some(v)) if v > 0.0 => Some(v),
        _ if !report.contains(Metric::StallSpeed) && !report.contains(Metric::MinFwdSpeed) => {
            Some(DEFAULT_STALL_SPEED_KN)
        }
        _ => None,
    }
}

/// Build the V-g envelope, or `None` where it does not apply.
pub fn generate(report: &PerformanceReport) -> Option<FlightEnvelope> {
    if report.vehicle_type == VehicleType::LighterThanAir {
        return None;
    }
    let vs = resolve_stall_speed(report)?;
    let vh = report.number(Metric::Vh).unwrap_or(DEFAULT_VH_KN);
    let limits = LoadLimits::for_vehicle(report.vehicle_type);

    let va = vs * limits.positive_g.sqrt();
    let vne = (vh * 1.1).max(vh + 10.0);

    let stall_speed_flaps_kn = report.number(Metric::StallSpeedFlaps).filter(|v| *v > 0.0);
    let flaps_stall_curve = stall_speed_flaps_kn.map(|vsf| stall_curve(vsf, va));

    let curve = stall_curve(vs, va);
    let mut polygon = curve.clone();
    polygon.push(EnvelopePoint::new(vne, limits.positive_g));
    polygon.push(EnvelopePoint::new(vne, limits.negative_g));
    polygon.extend(negative_boundary(va, vs, limits.negative_g));

    Some(FlightEnvelope {
        limits,
        stall_speed_kn: vs,
        stall_speed_flaps_kn,
        maneuvering_speed_kn: va,
        never_exceed_speed_kn: vne,
        max_level_speed_kn: vh,
        stall_curve: curve,
        flaps_stall_curve,
        polygon,
        vh_point: EnvelopePoint::new(vh, 1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(vehicle: VehicleType, stall: f64, vh: f64) -> PerformanceReport {
        let mut report = PerformanceReport::new(vehicle);
        report.set(Metric::StallSpeed, stall);
        report.set(Metric::Vh, vh);
        report
    }

    #[test]
    fn test_key_speeds() {
        let env = generate(&report(VehicleType::FixedWing, 20.0, 50.0)).unwrap();
        assert!((env.maneuvering_speed_kn - 20.0 * 3.8_f64.sqrt()).abs() < 1e-12);
        assert!((env.never_exceed_speed_kn - 60.0).abs() < 1e-12);
        assert_eq!(env.vh_point, EnvelopePoint::new(50.0, 1.0));
    }

    #[test]
    fn test_vne_uses_larger_margin() {
        let env = generate(&report(VehicleType::FixedWing, 20.0, 150.0)).unwrap();
        assert!((env.never_exceed_speed_kn - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_stall_curve_shape() {
        let curve = stall_curve(18.3, 35.67);
        assert_eq!(curve.first().unwrap().speed_kn, 18.3);
        assert_eq!(curve.first().unwrap().load_factor, 1.0);
        assert_eq!(curve[1].speed_kn, 19.0);
        assert_eq!(curve.last().unwrap().speed_kn, 35.67);
        assert!(curve.windows(2).all(|w| w[0].speed_kn < w[1].speed_kn));
        for p in &curve {
            assert!((p.load_factor - (p.speed_kn / 18.3).powi(2)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_wide_stall_curve_is_thinned() {
        let curve = stall_curve(1e7, 1.95e7);
        assert!(curve.len() <= MAX_CURVE_POINTS + 2);
        assert_eq!(curve.first().unwrap().speed_kn, 1e7);
        assert_eq!(curve.last().unwrap().speed_kn, 1.95e7);
        assert!(curve.windows(2).all(|w| w[0].speed_kn < w[1].speed_kn));
    }

    #[test]
    fn test_huge_stall_speed_envelope_is_bounded() {
        let env = generate(&report(VehicleType::FixedWing, 2.8e16, 0.0)).unwrap();
        assert!(env.stall_curve.len() <= MAX_CURVE_POINTS + 2);
        assert!(env.polygon.len() <= 2 * MAX_CURVE_POINTS + 6);
        assert!(env.polygon.iter().all(|p| p.speed_kn.is_finite() && p.load_factor.is_finite()));
        assert_eq!(env.polygon[0], EnvelopePoint::new(2.8e16, 1.0));
    }

    #[test]
    fn test_negative_boundary_runs_back_to_stall() {
        let points = negative_boundary(3.5, 1.2, -2.0);
        let speeds: Vec<f64> = points.iter().map(|p| p.speed_kn).collect();
        assert_eq!(speeds, vec![3.5, 3.0, 2.0, 1.2]);
        assert!(points.iter().all(|p| p.load_factor == -2.0));
    }

    #[test]
    fn test_stall_curve_ends_at_positive_limit() {
        let env = generate(&report(VehicleType::FixedWing, 18.3, 50.0)).unwrap();
        let last = env.stall_curve.last().unwrap();
        assert!((last.load_factor - 3.8).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_is_closed_outline() {
        let env = generate(&report(VehicleType::FixedWing, 20.0, 50.0)).unwrap();
        let n = env.stall_curve.len();
        assert_eq!(env.polygon[n], EnvelopePoint::new(60.0, 3.8));
        assert_eq!(env.polygon[n + 1], EnvelopePoint::new(60.0, -2.0));
        assert_eq!(*env.polygon.last().unwrap(), EnvelopePoint::new(20.0, -2.0));
        assert_eq!(env.polygon[0], EnvelopePoint::new(20.0, 1.0));
    }

    #[test]
    fn test_paraglider_limits() {
        let env = generate(&report(VehicleType::Paraglider, 11.27, 21.3)).unwrap();
        assert_eq!(env.limits.positive_g, 2.5);
        assert_eq!(env.limits.negative_g, 0.0);
        assert!(env.polygon.iter().all(|p| p.load_factor >= 0.0));
    }

    #[test]
    fn test_flaps_curve() {
        let mut r = report(VehicleType::FixedWing, 18.3, 50.0);
        r.set(Metric::StallSpeedFlaps, 16.3);
        let env = generate(&r).unwrap();
        let flaps = env.flaps_stall_curve.unwrap();
        assert_eq!(flaps[0].speed_kn, 16.3);
        assert_eq!(flaps.last().unwrap().speed_kn, env.maneuvering_speed_kn);

        r.set(Metric::StallSpeedFlaps, 0.0);
        assert!(generate(&r).unwrap().flaps_stall_curve.is_none());
    }

    #[test]
    fn test_not_applicable_cases() {
        assert!(generate(&report(VehicleType::LighterThanAir, 20.0, 30.0)).is_none());
        assert!(generate(&report(VehicleType::FixedWing, 0.0, 0.0)).is_none());

        let mut na = PerformanceReport::new(VehicleType::Paraglider);
        na.set_not_applicable(Metric::StallSpeed);
        assert!(generate(&na).is_none());
    }

    #[test]
    fn test_defaults_when_absent() {
        let env = generate(&PerformanceReport::new(VehicleType::FixedWing)).unwrap();
        assert_eq!(env.stall_speed_kn, DEFAULT_STALL_SPEED_KN);
        assert_eq!(env.max_level_speed_kn, DEFAULT_VH_KN);
    }

    #[test]
    fn test_rotorcraft_uses_min_forward_speed() {
        let mut r = PerformanceReport::new(VehicleType::Gyrocopter);
        r.set(Metric::MinFwdSpeed, 15.0);
        r.set(Metric::Vh, 40.3);
        let env = generate(&r).unwrap();
        assert_eq!(env.stall_speed_kn, 15.0);
    }
}
