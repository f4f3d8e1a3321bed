//! Efficiency tiers shared by the view panels and report exports.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// Lower bound (inclusive) of the "excellent" band, in percent.
pub const EXCELLENT_THRESHOLD: f64 = 85.0;
/// Lower bound (inclusive) of the "good" band, in percent.
pub const GOOD_THRESHOLD: f64 = 70.0;
/// Lower bound (inclusive) of the "fair" band, in percent.
pub const FAIR_THRESHOLD: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl EfficiencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EfficiencyTier::Excellent => "excellent",
            EfficiencyTier::Good => "good",
            EfficiencyTier::Fair => "fair",
            EfficiencyTier::Poor => "poor",
        }
    }
}

impl fmt::Display for EfficiencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a volumetric efficiency percentage. NaN counts as poor.
pub fn classify_efficiency(percent: f64) -> EfficiencyTier {
    if percent >= EXCELLENT_THRESHOLD {
        EfficiencyTier::Excellent
    } else if percent >= GOOD_THRESHOLD {
        EfficiencyTier::Good
    } else if percent >= FAIR_THRESHOLD {
        EfficiencyTier::Fair
    } else {
        EfficiencyTier::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(classify_efficiency(85.0), EfficiencyTier::Excellent);
        assert_eq!(classify_efficiency(84.999), EfficiencyTier::Good);
        assert_eq!(classify_efficiency(70.0), EfficiencyTier::Good);
        assert_eq!(classify_efficiency(69.999), EfficiencyTier::Fair);
        assert_eq!(classify_efficiency(50.0), EfficiencyTier::Fair);
        assert_eq!(classify_efficiency(49.999), EfficiencyTier::Poor);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify_efficiency(100.0), EfficiencyTier::Excellent);
        assert_eq!(classify_efficiency(0.0), EfficiencyTier::Poor);
        assert_eq!(classify_efficiency(f64::NAN), EfficiencyTier::Poor);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EfficiencyTier::Excellent).unwrap(),
            "\"excellent\""
        );
    }
}
