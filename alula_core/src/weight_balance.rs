//! # Weight & Balance
//!
//! Sums the component table into an empty weight, moment and CG, then builds
//! the loaded condition (pilot plus fuel) the performance routines fly at.
//!
//! The table is kept as raw text because that is how users edit it and how
//! design files persist it. Rows whose weight or arm do not parse are skipped
//! rather than rejected.
//!
//! ## Example
//!
//! ```rust
//! use alula_core::weight_balance::{ComponentRow, WeightBalance};
//!
//! let rows = vec![
//!     ComponentRow::new("Wing", "60", "4.5"),
//!     ComponentRow::new("Engine & Mount", "45", "1.0"),
//!     ComponentRow::new("Scratch", "n/a", "2"),
//! ];
//! let wb = WeightBalance::from_rows(&rows);
//! assert_eq!(wb.empty_weight_lb, 105.0);
//! assert_eq!(wb.power_system_weight_lb, 45.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{parse_number_text, VehicleConfiguration};
use crate::regulations::Regulations;

/// One editable row of the component table, exactly as entered.
///
/// Deserialization accepts numbers or `null` in any cell so hand-edited
/// files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub arm: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl ComponentRow {
    pub fn new(name: impl Into<String>, weight: impl Into<String>, arm: impl Into<String>) -> Self {
        ComponentRow {
            name: name.into(),
            weight: weight.into(),
            arm: arm.into(),
        }
    }

    /// Parse into a numeric entry; `None` when either cell is not a finite number.
    pub fn parse(&self) -> Option<ComponentWeightEntry> {
        let weight_lb = parse_number_text(&self.weight)?;
        let arm_ft = parse_number_text(&self.arm)?;
        Some(ComponentWeightEntry {
            name: self.name.clone(),
            weight_lb,
            arm_ft,
        })
    }
}

/// A parsed component: weight (lb) at an arm (ft aft of datum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeightEntry {
    pub name: String,
    pub weight_lb: f64,
    pub arm_ft: f64,
}

impl ComponentWeightEntry {
    /// Moment about the datum (ft·lb)
    pub fn moment(&self) -> f64 {
        self.weight_lb * self.arm_ft
    }

    /// Counts towards the power-system weight
    pub fn is_power_system(&self) -> bool {
        self.name.to_lowercase().contains("engine")
    }
}

/// Empty-airframe totals over the valid rows of the component table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightBalance {
    /// Σ weight (lb)
    pub empty_weight_lb: f64,
    /// Σ weight·arm (ft·lb)
    pub total_moment: f64,
    /// Empty CG (ft aft of datum), zero for a weightless table
    pub cg_ft: f64,
    /// Weight of rows whose name mentions "engine" (lb)
    pub power_system_weight_lb: f64,
    /// Number of rows that contributed
    pub valid_rows: usize,
}

impl WeightBalance {
    /// Sum already-parsed entries.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ComponentWeightEntry>,
    {
        let mut wb = WeightBalance::default();
        for entry in entries {
            wb.empty_weight_lb += entry.weight_lb;
            wb.total_moment += entry.moment();
            if entry.is_power_system() {
                wb.power_system_weight_lb += entry.weight_lb;
            }
            wb.valid_rows += 1;
        }
        wb.cg_ft = if wb.empty_weight_lb > 0.0 {
            wb.total_moment / wb.empty_weight_lb
        } else {
            0.0
        };
        wb
    }

    /// Parse and sum a raw table, skipping unusable rows.
    pub fn from_rows(rows: &[ComponentRow]) -> Self {
        let entries = parse_rows(rows);
        Self::from_entries(&entries)
    }
}

/// Parse every usable row of a raw table.
pub fn parse_rows(rows: &[ComponentRow]) -> Vec<ComponentWeightEntry> {
    rows.iter().filter_map(ComponentRow::parse).collect()
}

/// The flight condition every performance routine evaluates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loading {
    pub empty_weight_lb: f64,
    pub pilot_weight_lb: f64,
    /// Full legal fuel load for powered archetypes, zero otherwise
    pub fuel_weight_lb: f64,
    pub gross_weight_lb: f64,
    pub cg_ft: f64,
    pub power_system_weight_lb: f64,
}

impl Loading {
    /// Load the empty airframe with the pilot and, when powered, full fuel.
    pub fn new(wb: &WeightBalance, config: &VehicleConfiguration, regs: &Regulations) -> Self {
        let fuel_weight_lb = if config.vehicle_type.is_powered() {
            regs.max_fuel_weight_lb()
        } else {
            0.0
        };
        Loading {
            empty_weight_lb: wb.empty_weight_lb,
            pilot_weight_lb: config.pilot_weight_lb,
            fuel_weight_lb,
            gross_weight_lb: wb.empty_weight_lb + config.pilot_weight_lb + fuel_weight_lb,
            cg_ft: wb.cg_ft,
            power_system_weight_lb: wb.power_system_weight_lb,
        }
    }
}

/// Share of gross weight taken by each load group (0-1).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightFractions {
    pub structure: f64,
    pub power_system: f64,
    pub pilot: f64,
    pub fuel: f64,
}

impl WeightFractions {
    /// All zeros when gross weight is not positive.
    pub fn from_loading(loading: &Loading) -> Self {
        let gross = loading.gross_weight_lb;
        if gross <= 0.0 {
            return WeightFractions::default();
        }
        WeightFractions {
            structure: (loading.empty_weight_lb - loading.power_system_weight_lb) / gross,
            power_system: loading.power_system_weight_lb / gross,
            pilot: loading.pilot_weight_lb / gross,
            fuel: loading.fuel_weight_lb / gross,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleType;

    fn standard_rows() -> Vec<ComponentRow> {
        vec![
            ComponentRow::new("Wing", "60", "4.5"),
            ComponentRow::new("Fuselage", "50", "8.5"),
            ComponentRow::new("Empennage", "15", "16.0"),
            ComponentRow::new("Engine & Mount", "45", "1.0"),
            ComponentRow::new("Landing Gear", "25", "4.0"),
            ComponentRow::new("Fuel System", "5", "1.5"),
            ComponentRow::new("Misc Systems", "15", "6.0"),
        ]
    }

    #[test]
    fn test_standard_table_totals() {
        let wb = WeightBalance::from_rows(&standard_rows());
        assert_eq!(wb.empty_weight_lb, 215.0);
        assert!((wb.total_moment - 1177.5).abs() < 1e-9);
        assert!((wb.cg_ft - 1177.5 / 215.0).abs() < 1e-12);
        assert_eq!(wb.power_system_weight_lb, 45.0);
        assert_eq!(wb.valid_rows, 7);
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let rows = vec![
            ComponentRow::new("Wing", "60", "4.5"),
            ComponentRow::new("Bad", "abc", "4.5"),
            ComponentRow::new("Blank", "", ""),
            ComponentRow::new("Nan", "NaN", "1"),
        ];
        let wb = WeightBalance::from_rows(&rows);
        assert_eq!(wb.empty_weight_lb, 60.0);
        assert_eq!(wb.valid_rows, 1);
    }

    #[test]
    fn test_zero_weight_gives_zero_cg() {
        let wb = WeightBalance::from_rows(&[ComponentRow::new("Empty", "0", "12")]);
        assert_eq!(wb.cg_ft, 0.0);
        assert_eq!(WeightBalance::from_rows(&[]).cg_ft, 0.0);
    }

    #[test]
    fn test_cg_independent_of_row_order() {
        let mut rows = standard_rows();
        let forward = WeightBalance::from_rows(&rows);
        rows.reverse();
        let reversed = WeightBalance::from_rows(&rows);
        assert!((forward.cg_ft - reversed.cg_ft).abs() < 1e-12);
    }

    #[test]
    fn test_engine_match_is_case_insensitive() {
        let rows = vec![
            ComponentRow::new("ENGINE", "30", "1"),
            ComponentRow::new("Twin engines", "20", "1"),
            ComponentRow::new("Prop", "5", "0"),
        ];
        assert_eq!(WeightBalance::from_rows(&rows).power_system_weight_lb, 50.0);
    }

    #[test]
    fn test_row_deserializes_numbers_and_nulls() {
        let row: ComponentRow = serde_json::from_str(r#"{"name": "Wing", "weight": 60, "arm": 4.5}"#).unwrap();
        assert_eq!(row, ComponentRow::new("Wing", "60", "4.5"));

        let row: ComponentRow = serde_json::from_str(r#"{"name": null, "weight": "12"}"#).unwrap();
        assert_eq!(row, ComponentRow::new("", "12", ""));
        assert!(row.parse().is_none());
    }

    #[test]
    fn test_loading_adds_fuel_only_when_powered() {
        let regs = Regulations::default();
        let wb = WeightBalance::from_rows(&standard_rows());

        let powered = Loading::new(&wb, &VehicleConfiguration::default(), &regs);
        assert_eq!(powered.fuel_weight_lb, 30.0);
        assert_eq!(powered.gross_weight_lb, 425.0);

        let glider = Loading::new(&wb, &VehicleConfiguration::for_vehicle(VehicleType::Glider), &regs);
        assert_eq!(glider.fuel_weight_lb, 0.0);
        assert_eq!(glider.gross_weight_lb, 395.0);
    }

    #[test]
    fn test_weight_fractions_sum_to_one() {
        let regs = Regulations::default();
        let wb = WeightBalance::from_rows(&standard_rows());
        let loading = Loading::new(&wb, &VehicleConfiguration::default(), &regs);
        let f = WeightFractions::from_loading(&loading);
        let sum = f.structure + f.power_system + f.pilot + f.fuel;
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((f.pilot - 180.0 / 425.0).abs() < 1e-12);
    }
}
