//! # Performance Report
//!
//! The result of one calculation: a map from named metric to either a number,
//! a static condition (lighter-than-air only) or "not applicable". Which
//! metrics appear depends on the archetype; consumers must treat every metric
//! as optional.
//!
//! ## JSON shape
//!
//! ```json
//! {
//!   "vehicle_type": "Paraglider",
//!   "metrics": {
//!     "Empty Weight": 35.0,
//!     "Static Margin": null,
//!     "Stall Speed": 11.27
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::VehicleType;

/// Every metric any archetype can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Empty Weight")]
    EmptyWeight,
    #[serde(rename = "Gross Weight")]
    GrossWeight,
    #[serde(rename = "Fuel Weight")]
    FuelWeight,
    #[serde(rename = "Power System Weight")]
    PowerSystemWeight,
    #[serde(rename = "Pilot Weight")]
    PilotWeight,
    #[serde(rename = "CG Location")]
    CgLocation,
    #[serde(rename = "Wing Loading")]
    WingLoading,
    #[serde(rename = "Disc Loading")]
    DiscLoading,
    #[serde(rename = "Power Loading")]
    PowerLoading,
    #[serde(rename = "Span Loading")]
    SpanLoading,
    #[serde(rename = "Stall Speed")]
    StallSpeed,
    #[serde(rename = "Stall Speed Flaps")]
    StallSpeedFlaps,
    #[serde(rename = "Min. Fwd Speed")]
    MinFwdSpeed,
    #[serde(rename = "Trim Speed")]
    TrimSpeed,
    #[serde(rename = "Speed @ Min Sink")]
    SpeedAtMinSink,
    #[serde(rename = "VH")]
    Vh,
    #[serde(rename = "ROC")]
    Roc,
    #[serde(rename = "L/D Max")]
    LdMax,
    #[serde(rename = "Min Sink Rate")]
    MinSinkRate,
    #[serde(rename = "Tip Speed")]
    TipSpeed,
    #[serde(rename = "Static Margin")]
    StaticMargin,
    #[serde(rename = "CG MAC Percent")]
    CgMacPercent,
    #[serde(rename = "Total Cd0")]
    TotalCd0,
    #[serde(rename = "Base Cd0")]
    BaseCd0,
    #[serde(rename = "Cockpit Drag")]
    CockpitDrag,
    #[serde(rename = "Tail Drag")]
    TailDrag,
    #[serde(rename = "Buoyant Lift")]
    BuoyantLift,
    #[serde(rename = "Net Lift")]
    NetLift,
    #[serde(rename = "Static Heaviness")]
    StaticHeaviness,
}

impl Metric {
    /// Report key, identical to the serialized name
    pub fn label(&self) -> &'static str {
        match self {
            Metric::EmptyWeight => "Empty Weight",
            Metric::GrossWeight => "Gross Weight",
            Metric::FuelWeight => "Fuel Weight",
            Metric::PowerSystemWeight => "Power System Weight",
            Metric::PilotWeight => "Pilot Weight",
            Metric::CgLocation => "CG Location",
            Metric::WingLoading => "Wing Loading",
            Metric::DiscLoading => "Disc Loading",
            Metric::PowerLoading => "Power Loading",
            Metric::SpanLoading => "Span Loading",
            Metric::StallSpeed => "Stall Speed",
            Metric::StallSpeedFlaps => "Stall Speed Flaps",
            Metric::MinFwdSpeed => "Min. Fwd Speed",
            Metric::TrimSpeed => "Trim Speed",
            Metric::SpeedAtMinSink => "Speed @ Min Sink",
            Metric::Vh => "VH",
            Metric::Roc => "ROC",
            Metric::LdMax => "L/D Max",
            Metric::MinSinkRate => "Min Sink Rate",
            Metric::TipSpeed => "Tip Speed",
            Metric::StaticMargin => "Static Margin",
            Metric::CgMacPercent => "CG MAC Percent",
            Metric::TotalCd0 => "Total Cd0",
            Metric::BaseCd0 => "Base Cd0",
            Metric::CockpitDrag => "Cockpit Drag",
            Metric::TailDrag => "Tail Drag",
            Metric::BuoyantLift => "Buoyant Lift",
            Metric::NetLift => "Net Lift",
            Metric::StaticHeaviness => "Static Heaviness",
        }
    }

    /// Display unit (empty for dimensionless values)
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::EmptyWeight
            | Metric::GrossWeight
            | Metric::FuelWeight
            | Metric::PowerSystemWeight
            | Metric::PilotWeight
            | Metric::BuoyantLift
            | Metric::NetLift => "lbs",
            Metric::CgLocation => "ft",
            Metric::WingLoading | Metric::DiscLoading => "lbs/sqft",
            Metric::PowerLoading => "lbs/HP",
            Metric::SpanLoading => "lbs/ft",
            Metric::StallSpeed
            | Metric::StallSpeedFlaps
            | Metric::MinFwdSpeed
            | Metric::TrimSpeed
            | Metric::SpeedAtMinSink
            | Metric::Vh => "knots",
            Metric::Roc | Metric::MinSinkRate => "fpm",
            Metric::LdMax => ":1",
            Metric::TipSpeed => "ft/s",
            Metric::StaticMargin | Metric::CgMacPercent => "% MAC",
            Metric::TotalCd0
            | Metric::BaseCd0
            | Metric::CockpitDrag
            | Metric::TailDrag
            | Metric::StaticHeaviness => "",
        }
    }

    /// Decimal places used when formatting
    pub fn precision(&self) -> usize {
        match self {
            Metric::TotalCd0 | Metric::BaseCd0 | Metric::CockpitDrag | Metric::TailDrag => 4,
            _ => 1,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether a lighter-than-air vehicle floats on gas lift alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaticCondition {
    /// Net lift below zero
    Heavy,
    Light,
}

impl StaticCondition {
    pub fn from_net_lift(net_lift_lb: f64) -> Self {
        if net_lift_lb < 0.0 {
            StaticCondition::Heavy
        } else {
            StaticCondition::Light
        }
    }
}

impl fmt::Display for StaticCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticCondition::Heavy => write!(f, "Heavy"),
            StaticCondition::Light => write!(f, "Light"),
        }
    }
}

/// A metric's value. `NotApplicable` serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Condition(StaticCondition),
    NotApplicable,
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<StaticCondition> for MetricValue {
    fn from(c: StaticCondition) -> Self {
        MetricValue::Condition(c)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(v) => write!(f, "{:.1}", v),
            MetricValue::Condition(c) => write!(f, "{}", c),
            MetricValue::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Metrics produced by one recalculation. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub vehicle_type: VehicleType,
    pub metrics: BTreeMap<Metric, MetricValue>,
}

impl PerformanceReport {
    pub fn new(vehicle_type: VehicleType) -> Self {
        PerformanceReport {
            vehicle_type,
            metrics: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, metric: Metric, value: impl Into<MetricValue>) {
        self.metrics.insert(metric, value.into());
    }

    pub fn set_not_applicable(&mut self, metric: Metric) {
        self.metrics.insert(metric, MetricValue::NotApplicable);
    }

    /// Raw value, `None` when the archetype does not report this metric
    pub fn get(&self, metric: Metric) -> Option<MetricValue> {
        self.metrics.get(&metric).copied()
    }

    /// Numeric value, `None` when absent or not numeric
    pub fn number(&self, metric: Metric) -> Option<f64> {
        self.get(metric).and_then(|v| v.as_number())
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.metrics.contains_key(&metric)
    }

    /// `value unit` text as shown in a results panel
    pub fn formatted(&self, metric: Metric) -> String {
        let text = match self.get(metric) {
            Some(MetricValue::Number(v)) => format!("{:.*}", metric.precision(), v),
            Some(value @ MetricValue::Condition(_)) => value.to_string(),
            Some(MetricValue::NotApplicable) | None => return "N/A".to_string(),
        };
        if metric.unit().is_empty() {
            text
        } else {
            format!("{} {}", text, metric.unit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let mut report = PerformanceReport::new(VehicleType::LighterThanAir);
        report.set(Metric::Vh, 21.5);
        report.set(Metric::StaticHeaviness, StaticCondition::Heavy);
        report.set_not_applicable(Metric::Roc);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["vehicle_type"], "Lighter Than Air");
        assert_eq!(json["metrics"]["VH"], 21.5);
        assert_eq!(json["metrics"]["Static Heaviness"], "Heavy");
        assert!(json["metrics"]["ROC"].is_null());

        let roundtrip: PerformanceReport = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, report);
    }

    #[test]
    fn test_number_lookup() {
        let mut report = PerformanceReport::new(VehicleType::Paraglider);
        report.set(Metric::StallSpeed, 11.3);
        report.set_not_applicable(Metric::StaticMargin);
        assert_eq!(report.number(Metric::StallSpeed), Some(11.3));
        assert_eq!(report.number(Metric::StaticMargin), None);
        assert!(report.contains(Metric::StaticMargin));
        assert!(!report.contains(Metric::Roc));
    }

    #[test]
    fn test_formatting() {
        let mut report = PerformanceReport::new(VehicleType::FixedWing);
        report.set(Metric::GrossWeight, 425.0);
        report.set(Metric::TotalCd0, 0.0415);
        assert_eq!(report.formatted(Metric::GrossWeight), "425.0 lbs");
        assert_eq!(report.formatted(Metric::TotalCd0), "0.0415");
        assert_eq!(report.formatted(Metric::Vh), "N/A");
    }

    #[test]
    fn test_static_condition_threshold() {
        assert_eq!(StaticCondition::from_net_lift(-0.1), StaticCondition::Heavy);
        assert_eq!(StaticCondition::from_net_lift(0.0), StaticCondition::Light);
    }
}
