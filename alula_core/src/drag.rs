//! # Drag Model
//!
//! Total zero-lift drag is the user's base Cd0 plus fixed increments for the
//! tail layout and the cockpit enclosure. An unset style contributes nothing.

use serde::{Deserialize, Serialize};

use crate::config::{CockpitStyle, TailStyle, VehicleConfiguration};

impl TailStyle {
    /// Zero-lift drag increment of the empennage layout
    pub fn drag_increment(&self) -> f64 {
        match self {
            TailStyle::Tailless => 0.0,
            TailStyle::VTail => 0.0010,
            TailStyle::Conventional => 0.0015,
            TailStyle::Cruciform => 0.0018,
            TailStyle::TTail => 0.0025,
            TailStyle::TwinTail => 0.0030,
        }
    }
}

impl CockpitStyle {
    /// Zero-lift drag increment of the cockpit enclosure
    pub fn drag_increment(&self) -> f64 {
        match self {
            CockpitStyle::OpenFrame => 0.025,
            CockpitStyle::Windshield => 0.015,
            CockpitStyle::Closed => 0.008,
            CockpitStyle::Streamlined => 0.003,
        }
    }
}

/// Zero-lift drag split into its contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragBreakdown {
    pub base_cd0: f64,
    pub cockpit_cd0: f64,
    pub tail_cd0: f64,
    pub total_cd0: f64,
}

impl DragBreakdown {
    pub fn new(base_cd0: f64, cockpit: Option<CockpitStyle>, tail: Option<TailStyle>) -> Self {
        let cockpit_cd0 = cockpit.map_or(0.0, |c| c.drag_increment());
        let tail_cd0 = tail.map_or(0.0, |t| t.drag_increment());
        DragBreakdown {
            base_cd0,
            cockpit_cd0,
            tail_cd0,
            total_cd0: base_cd0 + cockpit_cd0 + tail_cd0,
        }
    }

    pub fn from_config(config: &VehicleConfiguration) -> Self {
        Self::new(config.cd0, config.cockpit_style, config.tail_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let drag = DragBreakdown::from_config(&VehicleConfiguration::default());
        assert_eq!(drag.cockpit_cd0, 0.015);
        assert_eq!(drag.tail_cd0, 0.0015);
        assert!((drag.total_cd0 - 0.0415).abs() < 1e-12);
    }

    #[test]
    fn test_unset_styles_add_nothing() {
        let drag = DragBreakdown::new(0.03, None, None);
        assert_eq!(drag.total_cd0, 0.03);
    }

    #[test]
    fn test_increments_are_ordered() {
        let tails: Vec<f64> = TailStyle::ALL.iter().map(|t| t.drag_increment()).collect();
        assert!(tails.windows(2).all(|w| w[0] < w[1]));
        let cockpits: Vec<f64> = CockpitStyle::ALL.iter().map(|c| c.drag_increment()).collect();
        assert!(cockpits.windows(2).all(|w| w[0] > w[1]));
    }
}
