//! # Design Data Model
//!
//! A [`Design`] is everything a user edits: the vehicle configuration and the
//! component weight table, plus file metadata. It is the unit that gets saved
//! to and loaded from disk (see [`crate::file_io`]).
//!
//! ## File Format
//!
//! ```json
//! {
//!   "meta": { "version": "0.1.0", "created": "...", "modified": "..." },
//!   "main_inputs": { "vehicle_type": "Fixed Wing", "wing_area": "250", ... },
//!   "component_weights": [ { "name": "Wing", "weight": "60", "arm": "4.5" } ]
//! }
//! ```
//!
//! The `meta` block is optional; files written without it load normally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{self, DesignAnalysis};
use crate::config::{VehicleConfiguration, VehicleType};
use crate::file_io::DesignFile;
use crate::regulations::Regulations;
use crate::report::PerformanceReport;
use crate::weight_balance::{ComponentRow, Loading, WeightBalance};

/// Current design file schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMeta {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl DesignMeta {
    pub fn new() -> Self {
        let now = Utc::now();
        DesignMeta {
            version: SCHEMA_VERSION.to_string(),
            created: now,
            modified: now,
        }
    }
}

impl Default for DesignMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Default component table for an archetype.
///
/// Paragliders get canopy and harness items with no arms; every other
/// archetype starts from the standard airframe table (215 lb empty).
pub fn default_components(vehicle_type: VehicleType) -> Vec<ComponentRow> {
    let table: &[(&str, &str, &str)] = match vehicle_type {
        VehicleType::Paraglider => &[
            ("Canopy", "15", "0"),
            ("Harness", "10", "0"),
            ("Reserve", "5", "0"),
            ("Container", "2", "0"),
            ("Misc", "3", "0"),
        ],
        _ => &[
            ("Wing", "60", "4.5"),
            ("Fuselage", "50", "8.5"),
            ("Empennage", "15", "16.0"),
            ("Engine & Mount", "45", "1.0"),
            ("Landing Gear", "25", "4.0"),
            ("Fuel System", "5", "1.5"),
            ("Misc Systems", "15", "6.0"),
        ],
    };
    table
        .iter()
        .map(|(name, weight, arm)| ComponentRow::new(*name, *weight, *arm))
        .collect()
}

/// A complete editable design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub meta: DesignMeta,
    pub config: VehicleConfiguration,
    pub components: Vec<ComponentRow>,
}

impl Default for Design {
    fn default() -> Self {
        Self::new(VehicleType::default())
    }
}

impl Design {
    /// Fresh design with the archetype's default inputs and component table.
    pub fn new(vehicle_type: VehicleType) -> Self {
        Design {
            meta: DesignMeta::new(),
            config: VehicleConfiguration::for_vehicle(vehicle_type),
            components: default_components(vehicle_type),
        }
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.config.vehicle_type
    }

    /// Change archetype; the weight table is reset to the new archetype's default.
    pub fn switch_vehicle_type(&mut self, vehicle_type: VehicleType) {
        self.config.vehicle_type = vehicle_type;
        self.components = default_components(vehicle_type);
        self.touch();
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn add_component(&mut self, row: ComponentRow) {
        self.components.push(row);
        self.touch();
    }

    /// Remove the last row, if any
    pub fn remove_last_component(&mut self) -> Option<ComponentRow> {
        let removed = self.components.pop();
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn weight_balance(&self) -> WeightBalance {
        WeightBalance::from_rows(&self.components)
    }

    pub fn loading(&self, regs: &Regulations) -> Loading {
        Loading::new(&self.weight_balance(), &self.config, regs)
    }

    pub fn calculate(&self, regs: &Regulations) -> PerformanceReport {
        calculations::calculate(&self.config, &self.components, regs)
    }

    pub fn analyze(&self, regs: &Regulations) -> DesignAnalysis {
        calculations::analyze(&self.config, &self.components, regs)
    }

    /// Persisted form of this design
    pub fn to_file(&self) -> DesignFile {
        DesignFile {
            meta: Some(self.meta.clone()),
            main_inputs: self.config.to_inputs(),
            component_weights: Some(self.components.clone()),
        }
    }

    /// Merge a loaded file into this design.
    ///
    /// Inputs are merged key by key; a present component list replaces the
    /// whole table. The table is never reset to an archetype default here,
    /// even when the file changes the vehicle type.
    pub fn apply_file(&mut self, file: &DesignFile) {
        self.config.apply_inputs(&file.main_inputs);
        if let Some(rows) = &file.component_weights {
            self.components = rows.clone();
        }
        match &file.meta {
            Some(meta) => self.meta = meta.clone(),
            None => self.touch(),
        }
    }

    /// Build a design from a file, starting from Fixed Wing defaults
    pub fn from_file(file: &DesignFile) -> Self {
        let mut design = Design::default();
        design.apply_file(file);
        design
    }
}
