//! # alula_core - Ultralight Aircraft Calculation Engine
//!
//! `alula_core` is the computational heart of ALULA. It turns a vehicle
//! configuration and a component weight table into a performance report,
//! checks that report against FAR Part 103 limits, and derives the V-g
//! envelope. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Forgiving inputs**: Bad numbers fall back to defaults, bad rows are skipped
//! - **No panics**: Degenerate geometry yields zeros or N/A, never NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use alula_core::design::Design;
//! use alula_core::config::VehicleType;
//! use alula_core::regulations::Regulations;
//! use alula_core::report::Metric;
//!
//! let design = Design::new(VehicleType::FixedWing);
//! let analysis = design.analyze(&Regulations::default());
//!
//! assert_eq!(analysis.report.number(Metric::GrossWeight), Some(425.0));
//! assert!(analysis.envelope.is_some());
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Vehicle archetypes, style options and numeric inputs
//! - [`weight_balance`] - Component table, empty weight, CG and loading
//! - [`drag`] - Parasite drag build-up
//! - [`calculations`] - Per-archetype performance models and the speed solver
//! - [`report`] - Labelled metrics produced by a calculation
//! - [`compliance`] - FAR 103 checks and design advisories
//! - [`envelope`] - V-g envelope geometry
//! - [`design`] - Editable design container
//! - [`file_io`] - Design files with atomic saves
//! - [`regulations`] - Regulatory limits and atmosphere constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod compliance;
pub mod config;
pub mod design;
pub mod drag;
pub mod envelope;
pub mod errors;
pub mod file_io;
pub mod regulations;
pub mod report;
pub mod units;
pub mod weight_balance;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, calculate, DesignAnalysis, VehicleModel};
pub use config::{VehicleConfiguration, VehicleType};
pub use design::Design;
pub use errors::{AlulaError, AlulaResult};
pub use file_io::{load_design, load_design_into, save_design};
pub use regulations::Regulations;
pub use report::{Metric, MetricValue, PerformanceReport};
