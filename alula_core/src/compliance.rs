//! # FAR Part 103 Compliance
//!
//! Compares a [`PerformanceReport`] against the [`Regulations`] limits and
//! adds a few design advisories (drag build-up, pitch stability, handling).
//!
//! Total over every archetype: a metric the report does not carry simply
//! produces no finding, and a metric reported as "not applicable" produces a
//! check with status [`CheckStatus::NotApplicable`].
//!
//! ## Example
//!
//! ```rust
//! use alula_core::compliance::{evaluate, CheckStatus, Rule};
//! use alula_core::config::VehicleType;
//! use alula_core::regulations::Regulations;
//! use alula_core::report::{Metric, PerformanceReport};
//!
//! let mut report = PerformanceReport::new(VehicleType::FixedWing);
//! report.set(Metric::EmptyWeight, 300.0);
//! report.set(Metric::StallSpeed, 22.0);
//!
//! let findings = evaluate(&report, &Regulations::default());
//! assert_eq!(findings.check(Rule::EmptyWeight).unwrap().status, CheckStatus::ExceedsLimit);
//! assert_eq!(findings.check(Rule::StallSpeed).unwrap().status, CheckStatus::WithinLimit);
//! assert!(findings.check(Rule::MaxLevelSpeed).is_none());
//! assert!(!findings.is_compliant());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::regulations::Regulations;
use crate::report::{Metric, MetricValue, PerformanceReport};

/// Ideal static margin band (% MAC)
pub const STATIC_MARGIN_RANGE: (f64, f64) = (5.0, 15.0);

/// Loading below this is sensitive to turbulence (lb/ft²)
pub const LOW_LOADING_PSF: f64 = 2.5;

/// Loading above this means higher landing speeds (lb/ft²)
pub const HIGH_LOADING_PSF: f64 = 5.0;

/// A Part 103 rule the evaluator checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    EmptyWeight,
    FuelCapacity,
    StallSpeed,
    MaxLevelSpeed,
}

impl Rule {
    pub fn display_name(&self) -> &'static str {
        match self {
            Rule::EmptyWeight => "Empty Weight",
            Rule::FuelCapacity => "Fuel Capacity",
            Rule::StallSpeed => "Stall Speed",
            Rule::MaxLevelSpeed => "Max Level Speed",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    WithinLimit,
    ExceedsLimit,
    NotApplicable,
}

impl CheckStatus {
    fn compare(value: f64, limit: f64) -> Self {
        if value <= limit {
            CheckStatus::WithinLimit
        } else {
            CheckStatus::ExceedsLimit
        }
    }
}

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub rule: Rule,
    /// Metric the value was read from
    pub metric: Metric,
    pub status: CheckStatus,
    /// `None` when not applicable
    pub value: Option<f64>,
    pub limit: f64,
}

impl ComplianceCheck {
    fn from_value(rule: Rule, metric: Metric, value: MetricValue, limit: f64) -> Self {
        let (status, value) = match value.as_number() {
            Some(v) => (CheckStatus::compare(v, limit), Some(v)),
            None => (CheckStatus::NotApplicable, None),
        };
        ComplianceCheck {
            rule,
            metric,
            status,
            value,
            limit,
        }
    }

    /// One-line summary, e.g. `Stall Speed: 18.3 knots (limit 24 knots) - OK`
    pub fn describe(&self) -> String {
        let unit = self.metric.unit();
        match (self.status, self.value) {
            (CheckStatus::NotApplicable, _) | (_, None) => format!("{}: not applicable", self.rule),
            (status, Some(v)) => format!(
                "{}: {:.1} {} (limit {} {}) - {}",
                self.rule,
                v,
                unit,
                self.limit,
                unit,
                if status == CheckStatus::WithinLimit { "OK" } else { "EXCEEDS" }
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryKind {
    Aerodynamics,
    Stability,
    Handling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Good,
    Poor,
}

/// Free-text design feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub severity: Severity,
    pub message: String,
}

/// All findings for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub checks: Vec<ComplianceCheck>,
    pub advisories: Vec<Advisory>,
}

impl ComplianceReport {
    pub fn check(&self, rule: Rule) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|c| c.rule == rule)
    }

    /// No check exceeds its limit
    pub fn is_compliant(&self) -> bool {
        self.checks.iter().all(|c| c.status != CheckStatus::ExceedsLimit)
    }

    pub fn violations(&self) -> impl Iterator<Item = &ComplianceCheck> {
        self.checks.iter().filter(|c| c.status == CheckStatus::ExceedsLimit)
    }
}

/// Evaluate a report against the Part 103 limits.
pub fn evaluate(report: &PerformanceReport, regs: &Regulations) -> ComplianceReport {
    let mut findings = ComplianceReport::default();

    if let Some(empty) = report.get(Metric::EmptyWeight) {
        let limit = regs.empty_weight_limit_lb(report.vehicle_type.is_powered());
        findings
            .checks
            .push(ComplianceCheck::from_value(Rule::EmptyWeight, Metric::EmptyWeight, empty, limit));
    }

    if let Some(fuel) = report.get(Metric::FuelWeight) {
        findings.checks.push(ComplianceCheck::from_value(
            Rule::FuelCapacity,
            Metric::FuelWeight,
            fuel,
            regs.max_fuel_weight_lb(),
        ));
    }

    // Rotorcraft report a minimum forward speed instead of a stall speed
    let stall = [Metric::StallSpeed, Metric::MinFwdSpeed]
        .into_iter()
        .find_map(|m| report.get(m).map(|v| (m, v)));
    if let Some((metric, value)) = stall {
        findings.checks.push(ComplianceCheck::from_value(
            Rule::StallSpeed,
            metric,
            value,
            regs.max_stall_speed_kn,
        ));
    }

    if let Some(vh) = report.get(Metric::Vh) {
        findings.checks.push(ComplianceCheck::from_value(
            Rule::MaxLevelSpeed,
            Metric::Vh,
            vh,
            regs.max_level_speed_kn,
        ));
    }

    findings.advisories = advisories(report);
    findings
}

fn advisories(report: &PerformanceReport) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if let Some(total) = report.number(Metric::TotalCd0).filter(|t| *t != 0.0) {
        let base = report.number(Metric::BaseCd0).unwrap_or(0.0);
        let cockpit = report.number(Metric::CockpitDrag).unwrap_or(0.0);
        let tail = report.number(Metric::TailDrag).unwrap_or(0.0);
        advisories.push(Advisory {
            kind: AdvisoryKind::Aerodynamics,
            severity: Severity::Info,
            message: format!(
                "Base Cd0 ({:.3}) + Cockpit ({:.4}) + Tail ({:.4}) = Total Cd0 ({:.3}).",
                base, cockpit, tail, total
            ),
        });
    }

    if let Some(sm) = report.number(Metric::StaticMargin) {
        let (low, high) = STATIC_MARGIN_RANGE;
        advisories.push(if (low..=high).contains(&sm) {
            Advisory {
                kind: AdvisoryKind::Stability,
                severity: Severity::Good,
                message: "Good. Static margin is in the ideal 5-15% range.".to_string(),
            }
        } else {
            Advisory {
                kind: AdvisoryKind::Stability,
                severity: Severity::Poor,
                message: "Poor. Static margin is outside the ideal range. Check CG and Neutral Point.".to_string(),
            }
        });
    }

    let loading = [Metric::WingLoading, Metric::DiscLoading]
        .into_iter()
        .filter_map(|m| report.number(m))
        .find(|l| *l > 0.0);
    if let Some(loading) = loading {
        let message = if loading < LOW_LOADING_PSF {
            Some("Very low loading suggests high sensitivity to turbulence.")
        } else if loading > HIGH_LOADING_PSF {
            Some("High loading suggests higher landing speeds.")
        } else {
            None
        };
        if let Some(message) = message {
            advisories.push(Advisory {
                kind: AdvisoryKind::Handling,
                severity: Severity::Info,
                message: message.to_string(),
            });
        }
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleType;

    fn regs() -> Regulations {
        Regulations::default()
    }

    #[test]
    fn test_empty_report_has_no_findings() {
        let findings = evaluate(&PerformanceReport::new(VehicleType::Helicopter), &regs());
        assert!(findings.checks.is_empty());
        assert!(findings.advisories.is_empty());
        assert!(findings.is_compliant());
    }

    #[test]
    fn test_unpowered_weight_limit() {
        let mut report = PerformanceReport::new(VehicleType::Glider);
        report.set(Metric::EmptyWeight, 160.0);
        let check = evaluate(&report, &regs()).check(Rule::EmptyWeight).cloned().unwrap();
        assert_eq!(check.limit, 155.0);
        assert_eq!(check.status, CheckStatus::ExceedsLimit);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let mut report = PerformanceReport::new(VehicleType::FixedWing);
        report.set(Metric::Vh, 55.0);
        report.set(Metric::FuelWeight, 30.0);
        let findings = evaluate(&report, &regs());
        assert_eq!(findings.check(Rule::MaxLevelSpeed).unwrap().status, CheckStatus::WithinLimit);
        assert_eq!(findings.check(Rule::FuelCapacity).unwrap().status, CheckStatus::WithinLimit);
    }

    #[test]
    fn test_not_applicable_stall() {
        let mut report = PerformanceReport::new(VehicleType::LighterThanAir);
        report.set_not_applicable(Metric::StallSpeed);
        let check = evaluate(&report, &regs()).check(Rule::StallSpeed).cloned().unwrap();
        assert_eq!(check.status, CheckStatus::NotApplicable);
        assert_eq!(check.value, None);
        assert_eq!(check.describe(), "Stall Speed: not applicable");
    }

    #[test]
    fn test_rotorcraft_uses_min_forward_speed() {
        let mut report = PerformanceReport::new(VehicleType::Gyrocopter);
        report.set(Metric::MinFwdSpeed, 15.0);
        let check = evaluate(&report, &regs()).check(Rule::StallSpeed).cloned().unwrap();
        assert_eq!(check.metric, Metric::MinFwdSpeed);
        assert_eq!(check.status, CheckStatus::WithinLimit);
    }

    #[test]
    fn test_stability_banding() {
        let mut report = PerformanceReport::new(VehicleType::FixedWing);
        report.set(Metric::StaticMargin, 10.0);
        let good = evaluate(&report, &regs());
        assert_eq!(good.advisories[0].severity, Severity::Good);

        report.set(Metric::StaticMargin, 0.33);
        let poor = evaluate(&report, &regs());
        assert_eq!(poor.advisories[0].severity, Severity::Poor);

        report.set_not_applicable(Metric::StaticMargin);
        assert!(evaluate(&report, &regs()).advisories.is_empty());
    }

    #[test]
    fn test_handling_banding() {
        let mut report = PerformanceReport::new(VehicleType::Paraglider);
        report.set(Metric::WingLoading, 0.86);
        let advisories = evaluate(&report, &regs()).advisories;
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].kind, AdvisoryKind::Handling);
        assert!(advisories[0].message.contains("turbulence"));

        report.set(Metric::WingLoading, 3.0);
        assert!(evaluate(&report, &regs()).advisories.is_empty());

        report.set(Metric::WingLoading, 0.0);
        assert!(evaluate(&report, &regs()).advisories.is_empty());
    }

    #[test]
    fn test_aerodynamics_summary() {
        let mut report = PerformanceReport::new(VehicleType::FixedWing);
        report.set(Metric::TotalCd0, 0.0415);
        report.set(Metric::BaseCd0, 0.025);
        report.set(Metric::CockpitDrag, 0.015);
        report.set(Metric::TailDrag, 0.0015);
        let advisories = evaluate(&report, &regs()).advisories;
        assert_eq!(
            advisories[0].message,
            "Base Cd0 (0.025) + Cockpit (0.0150) + Tail (0.0015) = Total Cd0 (0.042)."
        );
    }

    #[test]
    fn test_describe_check() {
        let mut report = PerformanceReport::new(VehicleType::FixedWing);
        report.set(Metric::EmptyWeight, 300.0);
        let findings = evaluate(&report, &regs());
        assert_eq!(
            findings.check(Rule::EmptyWeight).unwrap().describe(),
            "Empty Weight: 300.0 lbs (limit 254 lbs) - EXCEEDS"
        );
        assert_eq!(findings.violations().count(), 1);
    }
}
