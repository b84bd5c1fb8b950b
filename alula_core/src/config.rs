//! # Vehicle Configuration
//!
//! The immutable snapshot of user inputs that a calculation runs against:
//! the vehicle archetype, three styling options that feed fixed lookup tables,
//! the flaps toggle and nineteen numeric fields.
//!
//! Inputs arrive as loosely-typed text (form fields, JSON strings). Parsing is
//! forgiving by contract: a missing key keeps the value already held, and an
//! unparsable value falls back to the field's published default. Nothing in
//! here ever returns an error to the caller except the explicitly strict
//! `from_str_flexible` helpers.
//!
//! ## Example
//!
//! ```rust
//! use alula_core::config::{InputField, InputMap, VehicleConfiguration, VehicleType};
//! use serde_json::json;
//!
//! let mut inputs = InputMap::new();
//! inputs.insert("vehicle_type".into(), json!("Glider"));
//! inputs.insert("wing_area".into(), json!("160"));
//! inputs.insert("cd0".into(), json!("not a number"));
//!
//! let mut config = VehicleConfiguration::default();
//! config.apply_inputs(&inputs);
//!
//! assert_eq!(config.vehicle_type, VehicleType::Glider);
//! assert_eq!(config.wing_area_sqft, 160.0);
//! assert_eq!(config.cd0, InputField::Cd0.default_value());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AlulaError, AlulaResult};

/// Raw `main_inputs` block: persisted key → JSON value (usually a string).
pub type InputMap = BTreeMap<String, Value>;

// ============================================================================
// Vehicle Archetype
// ============================================================================

/// The six ultralight vehicle archetypes the engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum VehicleType {
    #[default]
    #[serde(rename = "Fixed Wing")]
    FixedWing,
    Gyrocopter,
    Helicopter,
    #[serde(rename = "Lighter Than Air")]
    LighterThanAir,
    Glider,
    Paraglider,
}

impl VehicleType {
    /// All vehicle types in selector order
    pub const ALL: [VehicleType; 6] = [
        VehicleType::FixedWing,
        VehicleType::Gyrocopter,
        VehicleType::Helicopter,
        VehicleType::LighterThanAir,
        VehicleType::Glider,
        VehicleType::Paraglider,
    ];

    /// Display name, identical to the persisted value
    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleType::FixedWing => "Fixed Wing",
            VehicleType::Gyrocopter => "Gyrocopter",
            VehicleType::Helicopter => "Helicopter",
            VehicleType::LighterThanAir => "Lighter Than Air",
            VehicleType::Glider => "Glider",
            VehicleType::Paraglider => "Paraglider",
        }
    }

    /// Parse from common string representations ("Fixed Wing", "fixed-wing", "lta", ...)
    pub fn from_str_flexible(s: &str) -> AlulaResult<Self> {
        match normalize(s).as_str() {
            "FIXEDWING" | "AIRPLANE" => Ok(VehicleType::FixedWing),
            "GYROCOPTER" | "GYRO" | "AUTOGYRO" => Ok(VehicleType::Gyrocopter),
            "HELICOPTER" | "HELI" => Ok(VehicleType::Helicopter),
            "LIGHTERTHANAIR" | "LTA" | "BLIMP" | "AIRSHIP" => Ok(VehicleType::LighterThanAir),
            "GLIDER" => Ok(VehicleType::Glider),
            "PARAGLIDER" => Ok(VehicleType::Paraglider),
            _ => Err(AlulaError::unknown_option("vehicle type", s)),
        }
    }

    /// Whether the archetype carries an engine and fuel.
    ///
    /// Unpowered archetypes get zero fuel weight and the lower empty-weight limit.
    pub fn is_powered(&self) -> bool {
        !matches!(self, VehicleType::Glider | VehicleType::Paraglider)
    }

    /// Geometry inputs that affect this archetype
    pub fn sizing_fields(&self) -> &'static [InputField] {
        use InputField::*;
        match self {
            VehicleType::FixedWing | VehicleType::Glider => &[WingArea, WingSpan, FuselageLength, LemacFt],
            VehicleType::Gyrocopter | VehicleType::Helicopter => {
                &[RotorDiameter, RotorBladeChord, NumBlades, FuselageLength]
            }
            VehicleType::LighterThanAir => &[EnvelopeVolume, FuselageLength],
            VehicleType::Paraglider => &[WingArea, AspectRatio],
        }
    }

    /// Aerodynamic and powerplant inputs that affect this archetype
    pub fn aero_fields(&self) -> &'static [InputField] {
        use InputField::*;
        match self {
            VehicleType::FixedWing => &[
                ClMax,
                ClMaxFlaps,
                Cd0,
                NeutralPointFt,
                EngineHp,
                PropEfficiency,
                OswaldEfficiency,
            ],
            VehicleType::Glider => &[ClMax, ClMaxFlaps, Cd0, OswaldEfficiency],
            VehicleType::Gyrocopter => &[RotorBladeCd, Cd0, EngineHp, PropEfficiency, RotorRpm],
            VehicleType::Helicopter => &[RotorBladeCd, Cd0, EngineHp, RotorRpm],
            VehicleType::LighterThanAir => &[Cd0, EngineHp, PropEfficiency],
            // Paraglider polars come from the EN class table
            VehicleType::Paraglider => &[],
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Styling Options
// ============================================================================

/// Empennage layout (drives the tail drag increment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TailStyle {
    Tailless,
    #[serde(rename = "V-Tail")]
    VTail,
    Conventional,
    Cruciform,
    #[serde(rename = "T-Tail")]
    TTail,
    #[serde(rename = "Twin Tail")]
    TwinTail,
}

impl TailStyle {
    /// All tail styles in selector order
    pub const ALL: [TailStyle; 6] = [
        TailStyle::Tailless,
        TailStyle::VTail,
        TailStyle::Conventional,
        TailStyle::Cruciform,
        TailStyle::TTail,
        TailStyle::TwinTail,
    ];

    /// Display name, identical to the persisted value
    pub fn display_name(&self) -> &'static str {
        match self {
            TailStyle::Tailless => "Tailless",
            TailStyle::VTail => "V-Tail",
            TailStyle::Conventional => "Conventional",
            TailStyle::Cruciform => "Cruciform",
            TailStyle::TTail => "T-Tail",
            TailStyle::TwinTail => "Twin Tail",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> AlulaResult<Self> {
        match normalize(s).as_str() {
            "TAILLESS" | "FLYINGWING" => Ok(TailStyle::Tailless),
            "VTAIL" => Ok(TailStyle::VTail),
            "CONVENTIONAL" => Ok(TailStyle::Conventional),
            "CRUCIFORM" => Ok(TailStyle::Cruciform),
            "TTAIL" => Ok(TailStyle::TTail),
            "TWINTAIL" => Ok(TailStyle::TwinTail),
            _ => Err(AlulaError::unknown_option("tail style", s)),
        }
    }
}

impl fmt::Display for TailStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Cockpit enclosure (drives the cockpit drag increment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CockpitStyle {
    #[serde(rename = "Open Frame Fuselage")]
    OpenFrame,
    #[serde(rename = "Cockpit with Windshield")]
    Windshield,
    #[serde(rename = "Closed Cockpit")]
    Closed,
    #[serde(rename = "Streamlined Glider Type Cockpit")]
    Streamlined,
}

impl CockpitStyle {
    /// All cockpit styles in selector order
    pub const ALL: [CockpitStyle; 4] = [
        CockpitStyle::OpenFrame,
        CockpitStyle::Windshield,
        CockpitStyle::Closed,
        CockpitStyle::Streamlined,
    ];

    /// Display name, identical to the persisted value
    pub fn display_name(&self) -> &'static str {
        match self {
            CockpitStyle::OpenFrame => "Open Frame Fuselage",
            CockpitStyle::Windshield => "Cockpit with Windshield",
            CockpitStyle::Closed => "Closed Cockpit",
            CockpitStyle::Streamlined => "Streamlined Glider Type Cockpit",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> AlulaResult<Self> {
        match normalize(s).as_str() {
            "OPENFRAMEFUSELAGE" | "OPENFRAME" | "OPEN" => Ok(CockpitStyle::OpenFrame),
            "COCKPITWITHWINDSHIELD" | "WINDSHIELD" => Ok(CockpitStyle::Windshield),
            "CLOSEDCOCKPIT" | "CLOSED" => Ok(CockpitStyle::Closed),
            "STREAMLINEDGLIDERTYPECOCKPIT" | "STREAMLINED" => Ok(CockpitStyle::Streamlined),
            _ => Err(AlulaError::unknown_option("cockpit style", s)),
        }
    }
}

impl fmt::Display for CockpitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// EN 926 paraglider safety class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GliderClass {
    #[serde(rename = "EN A (Beginner)")]
    EnA,
    #[serde(rename = "EN B (Intermediate)")]
    EnB,
    #[serde(rename = "EN C (Advanced)")]
    EnC,
    #[serde(rename = "EN D (Expert)")]
    EnD,
}

impl GliderClass {
    /// All classes in selector order
    pub const ALL: [GliderClass; 4] = [GliderClass::EnA, GliderClass::EnB, GliderClass::EnC, GliderClass::EnD];

    /// Display name, identical to the persisted value
    pub fn display_name(&self) -> &'static str {
        match self {
            GliderClass::EnA => "EN A (Beginner)",
            GliderClass::EnB => "EN B (Intermediate)",
            GliderClass::EnC => "EN C (Advanced)",
            GliderClass::EnD => "EN D (Expert)",
        }
    }

    /// Parse "EN B (Intermediate)", "EN B", "en-b" or just "B"
    pub fn from_str_flexible(s: &str) -> AlulaResult<Self> {
        let key = normalize(s);
        let key = key.split('(').next().unwrap_or_default();
        match key.trim_start_matches("EN") {
            "A" => Ok(GliderClass::EnA),
            "B" => Ok(GliderClass::EnB),
            "C" => Ok(GliderClass::EnC),
            "D" => Ok(GliderClass::EnD),
            _ => Err(AlulaError::unknown_option("glider class", s)),
        }
    }
}

impl fmt::Display for GliderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Uppercase and strip separators so "V-Tail", "v tail" and "V_TAIL" compare equal.
/// Parentheses survive so the glider class parser can cut the descriptive suffix.
fn normalize(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
        .collect()
}

// ============================================================================
// Numeric Inputs
// ============================================================================

/// Every numeric input field, with its persisted key and published default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    PilotWeight,
    WingArea,
    WingSpan,
    AspectRatio,
    FuselageLength,
    LemacFt,
    ClMax,
    ClMaxFlaps,
    Cd0,
    OswaldEfficiency,
    NeutralPointFt,
    EngineHp,
    PropEfficiency,
    RotorDiameter,
    RotorBladeChord,
    RotorRpm,
    NumBlades,
    RotorBladeCd,
    EnvelopeVolume,
}

impl InputField {
    /// All numeric fields in persisted order
    pub const ALL: [InputField; 19] = [
        InputField::PilotWeight,
        InputField::WingArea,
        InputField::WingSpan,
        InputField::AspectRatio,
        InputField::FuselageLength,
        InputField::LemacFt,
        InputField::ClMax,
        InputField::ClMaxFlaps,
        InputField::Cd0,
        InputField::OswaldEfficiency,
        InputField::NeutralPointFt,
        InputField::EngineHp,
        InputField::PropEfficiency,
        InputField::RotorDiameter,
        InputField::RotorBladeChord,
        InputField::RotorRpm,
        InputField::NumBlades,
        InputField::RotorBladeCd,
        InputField::EnvelopeVolume,
    ];

    /// Key used in the `main_inputs` block of a design file
    pub fn key(&self) -> &'static str {
        match self {
            InputField::PilotWeight => "pilot_weight",
            InputField::WingArea => "wing_area",
            InputField::WingSpan => "wing_span",
            InputField::AspectRatio => "aspect_ratio",
            InputField::FuselageLength => "fuselage_length",
            InputField::LemacFt => "lemac_ft",
            InputField::ClMax => "cl_max",
            InputField::ClMaxFlaps => "cl_max_flaps",
            InputField::Cd0 => "cd0",
            InputField::OswaldEfficiency => "oswald_efficiency",
            InputField::NeutralPointFt => "neutral_point_ft",
            InputField::EngineHp => "engine_hp",
            InputField::PropEfficiency => "prop_efficiency",
            InputField::RotorDiameter => "rotor_diameter",
            InputField::RotorBladeChord => "rotor_blade_chord",
            InputField::RotorRpm => "rotor_rpm",
            InputField::NumBlades => "num_blades",
            InputField::RotorBladeCd => "rotor_blade_cd",
            InputField::EnvelopeVolume => "envelope_volume",
        }
    }

    /// Form label including units
    pub fn label(&self) -> &'static str {
        match self {
            InputField::PilotWeight => "Pilot Weight (lbs)",
            InputField::WingArea => "Wing Area (sq ft)",
            InputField::WingSpan => "Wing Span (ft)",
            InputField::AspectRatio => "Aspect Ratio (Flat)",
            InputField::FuselageLength => "Fuselage Length (ft)",
            InputField::LemacFt => "MAC Leading Edge (ft)",
            InputField::ClMax => "Max Lift Coeff (Cl_max)",
            InputField::ClMaxFlaps => "Max Lift Coeff (Flaps)",
            InputField::Cd0 => "Base Zero-Lift Drag (Cd0)",
            InputField::OswaldEfficiency => "Oswald Efficiency (e)",
            InputField::NeutralPointFt => "Wing Neutral Point (ft)",
            InputField::EngineHp => "Engine Power (HP)",
            InputField::PropEfficiency => "Propeller Efficiency (0-1)",
            InputField::RotorDiameter => "Rotor Diameter (ft)",
            InputField::RotorBladeChord => "Rotor Blade Chord (ft)",
            InputField::RotorRpm => "Rotor RPM",
            InputField::NumBlades => "Number of Blades",
            InputField::RotorBladeCd => "Rotor Blade Cd (profile)",
            InputField::EnvelopeVolume => "Envelope Volume (cu ft)",
        }
    }

    /// Unit the field is entered in (empty for coefficients and counts)
    pub fn unit(&self) -> &'static str {
        match self {
            InputField::PilotWeight => "lbs",
            InputField::WingArea => "sq ft",
            InputField::WingSpan
            | InputField::FuselageLength
            | InputField::LemacFt
            | InputField::NeutralPointFt
            | InputField::RotorDiameter
            | InputField::RotorBladeChord => "ft",
            InputField::EngineHp => "HP",
            InputField::RotorRpm => "RPM",
            InputField::EnvelopeVolume => "cu ft",
            InputField::AspectRatio
            | InputField::ClMax
            | InputField::ClMaxFlaps
            | InputField::Cd0
            | InputField::OswaldEfficiency
            | InputField::PropEfficiency
            | InputField::NumBlades
            | InputField::RotorBladeCd => "",
        }
    }

    /// Published default used when the value is absent or unparsable
    pub fn default_value(&self) -> f64 {
        match self {
            InputField::PilotWeight => 180.0,
            InputField::WingArea => 250.0,
            InputField::WingSpan => 35.0,
            InputField::AspectRatio => 5.5,
            InputField::FuselageLength => 17.0,
            InputField::LemacFt => 4.0,
            InputField::ClMax => 1.5,
            InputField::ClMaxFlaps => 1.9,
            InputField::Cd0 => 0.025,
            InputField::OswaldEfficiency => 0.8,
            InputField::NeutralPointFt => 5.5,
            InputField::EngineHp => 20.0,
            InputField::PropEfficiency => 0.75,
            InputField::RotorDiameter => 23.0,
            InputField::RotorBladeChord => 0.6,
            InputField::RotorRpm => 350.0,
            InputField::NumBlades => 2.0,
            InputField::RotorBladeCd => 0.012,
            InputField::EnvelopeVolume => 8000.0,
        }
    }

    /// Look a field up by its persisted key
    pub fn from_key(key: &str) -> Option<Self> {
        InputField::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Parse a loosely-typed numeric cell.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace ignored).
/// Returns `None` for anything else, including NaN and infinities.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number_text(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parse numeric text, rejecting NaN and infinities.
pub fn parse_number_text(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Vehicle Configuration
// ============================================================================

/// Snapshot of every user input a calculation reads.
///
/// Styling options are `Option`s: an unrecognised tail or cockpit name maps to
/// zero drag increment, and an unrecognised glider class makes every
/// paraglider-specific metric "not applicable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfiguration {
    pub vehicle_type: VehicleType,
    pub tail_style: Option<TailStyle>,
    pub cockpit_style: Option<CockpitStyle>,
    pub glider_class: Option<GliderClass>,
    pub flaps_present: bool,

    /// Pilot weight (lb)
    pub pilot_weight_lb: f64,
    /// Reference wing area (ft²)
    pub wing_area_sqft: f64,
    /// Wing span (ft)
    pub wing_span_ft: f64,
    /// Flat aspect ratio, used directly by paragliders
    pub aspect_ratio: f64,
    /// Fuselage length (ft), positions the CG marker
    pub fuselage_length_ft: f64,
    /// MAC leading edge station (ft from datum)
    pub lemac_ft: f64,
    /// Clean max lift coefficient
    pub cl_max: f64,
    /// Max lift coefficient with flaps deployed
    pub cl_max_flaps: f64,
    /// Base zero-lift drag coefficient
    pub cd0: f64,
    /// Oswald span efficiency
    pub oswald_efficiency: f64,
    /// Wing neutral point station (ft from datum)
    pub neutral_point_ft: f64,
    /// Engine shaft power (HP)
    pub engine_hp: f64,
    /// Propeller efficiency (0-1)
    pub prop_efficiency: f64,
    /// Rotor diameter (ft)
    pub rotor_diameter_ft: f64,
    /// Rotor blade chord (ft)
    pub rotor_blade_chord_ft: f64,
    /// Rotor speed (RPM)
    pub rotor_rpm: f64,
    /// Number of rotor blades
    pub num_blades: f64,
    /// Rotor blade profile drag coefficient
    pub rotor_blade_cd: f64,
    /// Lifting gas envelope volume (ft³)
    pub envelope_volume_cuft: f64,
}

impl Default for VehicleConfiguration {
    fn default() -> Self {
        let mut config = VehicleConfiguration {
            vehicle_type: VehicleType::FixedWing,
            tail_style: Some(TailStyle::Conventional),
            cockpit_style: Some(CockpitStyle::Windshield),
            glider_class: Some(GliderClass::EnB),
            flaps_present: true,
            pilot_weight_lb: 0.0,
            wing_area_sqft: 0.0,
            wing_span_ft: 0.0,
            aspect_ratio: 0.0,
            fuselage_length_ft: 0.0,
            lemac_ft: 0.0,
            cl_max: 0.0,
            cl_max_flaps: 0.0,
            cd0: 0.0,
            oswald_efficiency: 0.0,
            neutral_point_ft: 0.0,
            engine_hp: 0.0,
            prop_efficiency: 0.0,
            rotor_diameter_ft: 0.0,
            rotor_blade_chord_ft: 0.0,
            rotor_rpm: 0.0,
            num_blades: 0.0,
            rotor_blade_cd: 0.0,
            envelope_volume_cuft: 0.0,
        };
        for field in InputField::ALL {
            config.set(field, field.default_value());
        }
        config
    }
}

impl VehicleConfiguration {
    /// Default configuration for a given archetype
    pub fn for_vehicle(vehicle_type: VehicleType) -> Self {
        VehicleConfiguration {
            vehicle_type,
            ..Default::default()
        }
    }

    /// Read a numeric field
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::PilotWeight => self.pilot_weight_lb,
            InputField::WingArea => self.wing_area_sqft,
            InputField::WingSpan => self.wing_span_ft,
            InputField::AspectRatio => self.aspect_ratio,
            InputField::FuselageLength => self.fuselage_length_ft,
            InputField::LemacFt => self.lemac_ft,
            InputField::ClMax => self.cl_max,
            InputField::ClMaxFlaps => self.cl_max_flaps,
            InputField::Cd0 => self.cd0,
            InputField::OswaldEfficiency => self.oswald_efficiency,
            InputField::NeutralPointFt => self.neutral_point_ft,
            InputField::EngineHp => self.engine_hp,
            InputField::PropEfficiency => self.prop_efficiency,
            InputField::RotorDiameter => self.rotor_diameter_ft,
            InputField::RotorBladeChord => self.rotor_blade_chord_ft,
            InputField::RotorRpm => self.rotor_rpm,
            InputField::NumBlades => self.num_blades,
            InputField::RotorBladeCd => self.rotor_blade_cd,
            InputField::EnvelopeVolume => self.envelope_volume_cuft,
        }
    }

    /// Write a numeric field
    pub fn set(&mut self, field: InputField, value: f64) {
        let slot = match field {
            InputField::PilotWeight => &mut self.pilot_weight_lb,
            InputField::WingArea => &mut self.wing_area_sqft,
            InputField::WingSpan => &mut self.wing_span_ft,
            InputField::AspectRatio => &mut self.aspect_ratio,
            InputField::FuselageLength => &mut self.fuselage_length_ft,
            InputField::LemacFt => &mut self.lemac_ft,
            InputField::ClMax => &mut self.cl_max,
            InputField::ClMaxFlaps => &mut self.cl_max_flaps,
            InputField::Cd0 => &mut self.cd0,
            InputField::OswaldEfficiency => &mut self.oswald_efficiency,
            InputField::NeutralPointFt => &mut self.neutral_point_ft,
            InputField::EngineHp => &mut self.engine_hp,
            InputField::PropEfficiency => &mut self.prop_efficiency,
            InputField::RotorDiameter => &mut self.rotor_diameter_ft,
            InputField::RotorBladeChord => &mut self.rotor_blade_chord_ft,
            InputField::RotorRpm => &mut self.rotor_rpm,
            InputField::NumBlades => &mut self.num_blades,
            InputField::RotorBladeCd => &mut self.rotor_blade_cd,
            InputField::EnvelopeVolume => &mut self.envelope_volume_cuft,
        };
        *slot = value;
    }

    /// Set a numeric field from text, falling back to the field default.
    pub fn set_text(&mut self, field: InputField, text: &str) {
        self.set(field, parse_number_text(text).unwrap_or_else(|| field.default_value()));
    }

    /// Merge a `main_inputs` block into this configuration.
    ///
    /// Unknown keys are ignored and missing keys keep their current value.
    /// Unparsable numbers fall back to the field's published default, an
    /// unrecognised vehicle type falls back to Fixed Wing, and unrecognised
    /// style names clear the option.
    pub fn apply_inputs(&mut self, inputs: &InputMap) {
        for (key, value) in inputs {
            match key.as_str() {
                "vehicle_type" => {
                    self.vehicle_type = value
                        .as_str()
                        .and_then(|s| VehicleType::from_str_flexible(s).ok())
                        .unwrap_or_default();
                }
                "tail_style" => {
                    self.tail_style = value.as_str().and_then(|s| TailStyle::from_str_flexible(s).ok());
                }
                "cockpit_style" => {
                    self.cockpit_style = value.as_str().and_then(|s| CockpitStyle::from_str_flexible(s).ok());
                }
                "glider_class" => {
                    self.glider_class = value.as_str().and_then(|s| GliderClass::from_str_flexible(s).ok());
                }
                "flaps" => {
                    self.flaps_present = parse_flag(value).unwrap_or(true);
                }
                other => {
                    if let Some(field) = InputField::from_key(other) {
                        self.set(field, parse_number(value).unwrap_or_else(|| field.default_value()));
                    }
                }
            }
        }
    }

    /// Export as a `main_inputs` block (numbers written as strings).
    ///
    /// Unset style options are written as `null` so a reload clears them.
    pub fn to_inputs(&self) -> InputMap {
        let mut inputs = InputMap::new();
        let option = |name: Option<&'static str>| name.map_or(Value::Null, Value::from);
        inputs.insert("vehicle_type".into(), Value::from(self.vehicle_type.display_name()));
        inputs.insert("tail_style".into(), option(self.tail_style.map(|t| t.display_name())));
        inputs.insert("glider_class".into(), option(self.glider_class.map(|c| c.display_name())));
        inputs.insert("flaps".into(), Value::Bool(self.flaps_present));
        inputs.insert("cockpit_style".into(), option(self.cockpit_style.map(|c| c.display_name())));
        for field in InputField::ALL {
            inputs.insert(field.key().into(), Value::from(self.get(field).to_string()));
        }
        inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use serde_json::json;

    #[test]
    fn test_defaults_match_published_values() {
        let config = VehicleConfiguration::default();
        assert_eq!(config.vehicle_type, VehicleType::FixedWing);
        assert_eq!(config.pilot_weight_lb, 180.0);
        assert_eq!(config.wing_area_sqft, 250.0);
        assert_eq!(config.cd0, 0.025);
        assert_eq!(config.envelope_volume_cuft, 8000.0);
        assert!(config.flaps_present);
        assert_eq!(config.glider_class, Some(GliderClass::EnB));
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(VehicleType::from_str_flexible("lighter-than-air").unwrap(), VehicleType::LighterThanAir);
        assert_eq!(VehicleType::from_str_flexible("Fixed Wing").unwrap(), VehicleType::FixedWing);
        assert_eq!(TailStyle::from_str_flexible("t tail").unwrap(), TailStyle::TTail);
        assert_eq!(CockpitStyle::from_str_flexible("Closed Cockpit").unwrap(), CockpitStyle::Closed);
        assert_eq!(GliderClass::from_str_flexible("EN C (Advanced)").unwrap(), GliderClass::EnC);
        assert_eq!(GliderClass::from_str_flexible("en-d").unwrap(), GliderClass::EnD);
        assert_eq!(GliderClass::from_str_flexible("A").unwrap(), GliderClass::EnA);
        assert!(GliderClass::from_str_flexible("EN Z").is_err());
        assert!(VehicleType::from_str_flexible("Hovercraft").is_err());
    }

    #[test]
    fn test_display_names_roundtrip() {
        for vt in VehicleType::ALL {
            assert_eq!(VehicleType::from_str_flexible(vt.display_name()).unwrap(), vt);
        }
        for tail in TailStyle::ALL {
            assert_eq!(TailStyle::from_str_flexible(tail.display_name()).unwrap(), tail);
        }
        for cockpit in CockpitStyle::ALL {
            assert_eq!(CockpitStyle::from_str_flexible(cockpit.display_name()).unwrap(), cockpit);
        }
        for class in GliderClass::ALL {
            assert_eq!(GliderClass::from_str_flexible(class.display_name()).unwrap(), class);
        }
    }

    #[test]
    fn test_parse_number_rejects_junk() {
        assert_eq!(parse_number(&json!(" 42.5 ")), Some(42.5));
        assert_eq!(parse_number(&json!(7)), Some(7.0));
        assert_eq!(parse_number(&json!("")), None);
        assert_eq!(parse_number(&json!("abc")), None);
        assert_eq!(parse_number(&json!("NaN")), None);
        assert_eq!(parse_number(&json!("inf")), None);
        assert_eq!(parse_number(&json!(null)), None);
    }

    #[test]
    fn test_apply_inputs_fallbacks() {
        let mut config = VehicleConfiguration::default();
        config.wing_span_ft = 28.0;

        let mut inputs = InputMap::new();
        inputs.insert("wing_area".into(), json!("garbage"));
        inputs.insert("engine_hp".into(), json!("28"));
        inputs.insert("tail_style".into(), json!("Butterfly"));
        inputs.insert("unknown_key".into(), json!("whatever"));
        config.apply_inputs(&inputs);

        assert_eq!(config.wing_area_sqft, 250.0);
        assert_eq!(config.engine_hp, 28.0);
        // Missing key keeps the prior value
        assert_eq!(config.wing_span_ft, 28.0);
        assert_eq!(config.tail_style, None);
    }

    #[test]
    fn test_unknown_vehicle_type_falls_back() {
        let mut config = VehicleConfiguration::for_vehicle(VehicleType::Helicopter);
        let mut inputs = InputMap::new();
        inputs.insert("vehicle_type".into(), json!("Hovercraft"));
        config.apply_inputs(&inputs);
        assert_eq!(config.vehicle_type, VehicleType::FixedWing);
    }

    #[test]
    fn test_flaps_accepts_bool_and_text() {
        let mut config = VehicleConfiguration::default();
        let mut inputs = InputMap::new();
        inputs.insert("flaps".into(), json!(false));
        config.apply_inputs(&inputs);
        assert!(!config.flaps_present);

        inputs.insert("flaps".into(), json!("1"));
        config.apply_inputs(&inputs);
        assert!(config.flaps_present);
    }

    #[test]
    fn test_inputs_roundtrip() {
        let mut config = VehicleConfiguration::for_vehicle(VehicleType::Paraglider);
        config.glider_class = Some(GliderClass::EnD);
        config.aspect_ratio = 6.3;
        config.cd0 = 0.0312;
        config.flaps_present = false;
        config.cockpit_style = None;

        let inputs = config.to_inputs();
        assert_eq!(inputs["aspect_ratio"], json!("6.3"));
        assert_eq!(inputs["cockpit_style"], Value::Null);

        let mut reloaded = VehicleConfiguration::default();
        reloaded.apply_inputs(&inputs);
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_archetype_field_visibility() {
        assert!(VehicleType::Paraglider.aero_fields().is_empty());
        assert!(VehicleType::Helicopter.sizing_fields().contains(&InputField::RotorDiameter));
        assert!(!VehicleType::Helicopter.aero_fields().contains(&InputField::PropEfficiency));
        assert!(VehicleType::FixedWing.aero_fields().contains(&InputField::NeutralPointFt));
    }

    #[test]
    fn test_field_units() {
        assert_eq!(InputField::WingArea.unit(), "sq ft");
        assert_eq!(InputField::RotorDiameter.unit(), "ft");
        assert_eq!(InputField::Cd0.unit(), "");
    }

    #[test]
    fn test_powered_archetypes() {
        assert!(VehicleType::FixedWing.is_powered());
        assert!(VehicleType::LighterThanAir.is_powered());
        assert!(!VehicleType::Glider.is_powered());
        assert!(!VehicleType::Paraglider.is_powered());
    }

    #[test]
    fn test_field_keys_are_unique() {
        let keys: HashSet<&str> = InputField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), InputField::ALL.len());
        assert_eq!(keys.len(), 19);
        for field in InputField::ALL {
            assert_eq!(InputField::from_key(field.key()), Some(field));
        }
    }
}
