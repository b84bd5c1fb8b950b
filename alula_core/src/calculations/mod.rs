//! # Performance Calculations
//!
//! One model per vehicle archetype. Every model follows the same pattern:
//!
//! - a parameter struct built from a [`VehicleConfiguration`] (`from_config`)
//! - `add_metrics(loading, regs, report)`, adding its archetype-specific
//!   metrics on top of the common weight figures
//!
//! [`calculate`] runs the whole pipeline for one configuration and weight
//! table, and [`analyze`] adds the compliance findings, the V-g envelope and
//! the weight fractions. Both are pure: the same inputs always give an equal
//! result, and malformed inputs degrade to zeros or "not applicable" instead
//! of failing.
//!
//! ## Available Models
//!
//! - [`fixed_wing`] - Powered fixed wing and glider (drag polar)
//! - [`paraglider`] - EN-class polar lookup
//! - [`rotorcraft`] - Gyrocopter and helicopter
//! - [`lighter_than_air`] - Helium buoyancy
//! - [`solver`] - Integer-speed VH and best-climb scans
//!
//! ## Example
//!
//! ```rust
//! use alula_core::calculations::calculate;
//! use alula_core::config::{VehicleConfiguration, VehicleType};
//! use alula_core::design::default_components;
//! use alula_core::regulations::Regulations;
//! use alula_core::report::Metric;
//!
//! let config = VehicleConfiguration::for_vehicle(VehicleType::FixedWing);
//! let report = calculate(&config, &default_components(VehicleType::FixedWing), &Regulations::default());
//!
//! assert_eq!(report.number(Metric::GrossWeight), Some(425.0));
//! assert!(report.number(Metric::StallSpeed).unwrap() < 24.0);
//! ```

pub mod fixed_wing;
pub mod lighter_than_air;
pub mod paraglider;
pub mod rotorcraft;
pub mod solver;

use serde::{Deserialize, Serialize};

use crate::compliance::{self, ComplianceReport};
use crate::config::{VehicleConfiguration, VehicleType};
use crate::envelope::{self, FlightEnvelope};
use crate::regulations::Regulations;
use crate::report::{Metric, PerformanceReport};
use crate::weight_balance::{ComponentRow, Loading, WeightBalance, WeightFractions};

pub use fixed_wing::{Airframe, Powerplant};
pub use lighter_than_air::LighterThanAir;
pub use paraglider::Paraglider;
pub use rotorcraft::Rotorcraft;

/// Archetype-specific performance model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VehicleModel {
    FixedWing { airframe: Airframe, powerplant: Powerplant },
    Glider { airframe: Airframe },
    Paraglider(Paraglider),
    Gyrocopter(Rotorcraft),
    Helicopter(Rotorcraft),
    LighterThanAir(LighterThanAir),
}

impl VehicleModel {
    /// Pick the model for the configuration's archetype
    pub fn from_config(config: &VehicleConfiguration) -> Self {
        match config.vehicle_type {
            VehicleType::FixedWing => VehicleModel::FixedWing {
                airframe: Airframe::from_config(config),
                powerplant: Powerplant::from_config(config),
            },
            VehicleType::Glider => VehicleModel::Glider {
                airframe: Airframe::from_config(config),
            },
            VehicleType::Paraglider => VehicleModel::Paraglider(Paraglider::from_config(config)),
            VehicleType::Gyrocopter => VehicleModel::Gyrocopter(Rotorcraft::from_config(config)),
            VehicleType::Helicopter => VehicleModel::Helicopter(Rotorcraft::from_config(config)),
            VehicleType::LighterThanAir => VehicleModel::LighterThanAir(LighterThanAir::from_config(config)),
        }
    }

    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            VehicleModel::FixedWing { .. } => VehicleType::FixedWing,
            VehicleModel::Glider { .. } => VehicleType::Glider,
            VehicleModel::Paraglider(_) => VehicleType::Paraglider,
            VehicleModel::Gyrocopter(_) => VehicleType::Gyrocopter,
            VehicleModel::Helicopter(_) => VehicleType::Helicopter,
            VehicleModel::LighterThanAir(_) => VehicleType::LighterThanAir,
        }
    }

    /// Full report for one loading condition
    pub fn evaluate(&self, loading: &Loading, regs: &Regulations) -> PerformanceReport {
        let mut report = PerformanceReport::new(self.vehicle_type());
        report.set(Metric::EmptyWeight, loading.empty_weight_lb);
        report.set(Metric::GrossWeight, loading.gross_weight_lb);
        report.set(Metric::FuelWeight, loading.fuel_weight_lb);
        report.set(Metric::PowerSystemWeight, loading.power_system_weight_lb);
        report.set(Metric::CgLocation, loading.cg_ft);
        report.set(Metric::PilotWeight, loading.pilot_weight_lb);

        match self {
            VehicleModel::FixedWing { airframe, powerplant } => {
                fixed_wing::add_powered_metrics(airframe, powerplant, loading, regs, &mut report)
            }
            VehicleModel::Glider { airframe } => fixed_wing::add_glider_metrics(airframe, loading, regs, &mut report),
            VehicleModel::Paraglider(wing) => wing.add_metrics(loading, regs, &mut report),
            VehicleModel::Gyrocopter(rotor) => rotor.add_metrics(false, loading, regs, &mut report),
            VehicleModel::Helicopter(rotor) => rotor.add_metrics(true, loading, regs, &mut report),
            VehicleModel::LighterThanAir(lta) => lta.add_metrics(loading, regs, &mut report),
        }
        report
    }
}

/// Compute the performance report for a configuration and weight table.
pub fn calculate(config: &VehicleConfiguration, components: &[ComponentRow], regs: &Regulations) -> PerformanceReport {
    let wb = WeightBalance::from_rows(components);
    let loading = Loading::new(&wb, config, regs);
    VehicleModel::from_config(config).evaluate(&loading, regs)
}

/// Everything a presentation layer renders after one recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignAnalysis {
    pub report: PerformanceReport,
    pub compliance: ComplianceReport,
    /// `None` where a V-g diagram does not apply
    pub envelope: Option<FlightEnvelope>,
    pub weight_fractions: WeightFractions,
}

/// Report, compliance findings, V-g envelope and weight fractions in one pass.
pub fn analyze(config: &VehicleConfiguration, components: &[ComponentRow], regs: &Regulations) -> DesignAnalysis {
    let wb = WeightBalance::from_rows(components);
    let loading = Loading::new(&wb, config, regs);
    let report = VehicleModel::from_config(config).evaluate(&loading, regs);
    DesignAnalysis {
        compliance: compliance::evaluate(&report, regs),
        envelope: envelope::generate(&report),
        weight_fractions: WeightFractions::from_loading(&loading),
        report,
    }
}
