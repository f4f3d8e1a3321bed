//! Common types and traits for container geometry.
//!
//! All geometry here is metric: lengths in meters, weights in kilograms.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Global numerical tolerance for floating-point comparisons.
pub const EPSILON_GENERAL: f64 = 1e-9;

/// A triple of metric extents along the container's length, width and height axes.
///
/// # Examples
/// ```
/// use load_planner::types::Vec3;
///
/// let dims = Vec3::new(1.0, 0.5, 0.25);
/// assert_eq!(dims.volume(), 0.125);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector.
    ///
    /// # Parameters
    /// * `x` - Length-axis component
    /// * `y` - Width-axis component
    /// * `z` - Height-axis component
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Product of all components.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }
}

/// Trait for objects with metric 3D extents.
pub trait Dimensional {
    /// Returns the extents in meters.
    fn dimensions(&self) -> Vec3;

    /// Volume in cubic meters.
    fn volume(&self) -> f64 {
        self.dimensions().volume()
    }
}

/// Validation helpers shared by the model constructors.
pub mod validation {
    /// Validates a single dimension or weight.
    ///
    /// # Returns
    /// `Ok(())` for positive finite values, otherwise error text
    pub fn validate_positive(value: f64, name: &str) -> Result<(), String> {
        if value.is_nan() {
            return Err(format!("{} must not be NaN", name));
        }
        if value.is_infinite() {
            return Err(format!("{} must not be infinite", name));
        }
        if value <= 0.0 {
            return Err(format!("{} must be positive, got: {}", name, value));
        }
        Ok(())
    }

    /// Validates all three extents of a box or container.
    pub fn validate_dimensions_3d(dims: (f64, f64, f64), prefix: &str) -> Result<(), String> {
        validate_positive(dims.0, &format!("{prefix} length"))?;
        validate_positive(dims.1, &format!("{prefix} width"))?;
        validate_positive(dims.2, &format!("{prefix} height"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_volume() {
        let dims = Vec3::new(2.0, 3.0, 4.0);
        assert!((dims.volume() - 24.0).abs() < EPSILON_GENERAL);
        assert_eq!(dims.as_tuple(), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_validation_positive() {
        assert!(validation::validate_positive(10.0, "Width").is_ok());
        assert!(validation::validate_positive(0.0, "Width").is_err());
        assert!(validation::validate_positive(-1.0, "Width").is_err());
        assert!(validation::validate_positive(f64::NAN, "Width").is_err());
        assert!(validation::validate_positive(f64::INFINITY, "Width").is_err());
    }

    #[test]
    fn test_validation_dimensions_names_axis() {
        let err = validation::validate_dimensions_3d((1.0, -2.0, 1.0), "Box").unwrap_err();
        assert!(err.contains("Box width"), "unexpected message: {err}");
    }
}
