//! Unit normalization.
//!
//! Box dimensions and weights arrive in whatever units the user typed them in.
//! Everything downstream works in meters and kilograms, so conversion happens
//! once, before any geometry runs. Unknown unit strings are not an error: they
//! fall through to the base unit (meters / kilograms) unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

const CENTIMETERS_PER_METER: f64 = 100.0;
const MILLIMETERS_PER_METER: f64 = 1000.0;
const METERS_PER_INCH: f64 = 0.0254;
const KILOGRAMS_PER_POUND: f64 = 0.453592;
const KILOGRAMS_PER_TON: f64 = 1000.0;

/// Length unit of user-entered box dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum LengthUnit {
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "inches")]
    Inches,
    /// Base unit; also what unrecognized strings map to.
    #[default]
    #[serde(rename = "m")]
    Meters,
}

impl LengthUnit {
    /// Parses a unit label. Never fails.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Self::Centimeters,
            "mm" | "millimeter" | "millimeters" => Self::Millimeters,
            "in" | "inch" | "inches" => Self::Inches,
            "m" | "meter" | "meters" | "" => Self::Meters,
            other => {
                tracing::debug!(unit = other, "unrecognized length unit, treating as meters");
                Self::Meters
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
            Self::Inches => "inches",
            Self::Meters => "m",
        }
    }
}

impl From<String> for LengthUnit {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight unit of the user-entered box weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum WeightUnit {
    /// Base unit; also what unrecognized strings map to.
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
    /// Metric ton.
    #[serde(rename = "tons")]
    Tons,
}

impl WeightUnit {
    /// Parses a unit label. Never fails.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Self::Pounds,
            "t" | "ton" | "tons" | "tonne" | "tonnes" => Self::Tons,
            "kg" | "kgs" | "kilogram" | "kilograms" | "" => Self::Kilograms,
            other => {
                tracing::debug!(unit = other, "unrecognized weight unit, treating as kilograms");
                Self::Kilograms
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lbs",
            Self::Tons => "tons",
        }
    }
}

impl From<String> for WeightUnit {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a length to meters. No rounding is applied.
pub fn to_meters(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Centimeters => value / CENTIMETERS_PER_METER,
        LengthUnit::Millimeters => value / MILLIMETERS_PER_METER,
        LengthUnit::Inches => value * METERS_PER_INCH,
        LengthUnit::Meters => value,
    }
}

/// Converts a weight to kilograms. No rounding is applied.
pub fn to_kilograms(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Pounds => value * KILOGRAMS_PER_POUND,
        WeightUnit::Tons => value * KILOGRAMS_PER_TON,
        WeightUnit::Kilograms => value,
    }
}
