//! Data models for the container loading optimizer.
//!
//! - `BoxSpec`: the box the user wants to ship, in user units
//! - `NormalizedBox`: the same box in meters and kilograms
//! - `ContainerSpec`: internal dimensions and payload limit of a container type
//!
//! The constructors validate; plain struct literals do not. The optimizer itself
//! never re-validates and produces meaningless (but non-panicking) numbers for
//! degenerate input.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{Dimensional, Vec3, validation};
use crate::units::{LengthUnit, WeightUnit, to_kilograms, to_meters};

/// Validation error for box and container data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Unknown container type: {0}")]
    UnknownContainer(String),
    #[error("Missing container selection")]
    MissingContainer,
}

fn default_quantity() -> u32 {
    1
}

/// A box as entered by the user.
///
/// `quantity` is the number of boxes the user wants to ship. It is independent of
/// how many the container could hold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "length": 120.0,
        "width": 80.0,
        "height": 100.0,
        "weight": 350.0,
        "unit": "cm",
        "weight_unit": "kg",
        "quantity": 24
    })
)]
pub struct BoxSpec {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    #[schema(value_type = String, example = "cm")]
    pub unit: LengthUnit,
    #[serde(default)]
    #[schema(value_type = String, example = "kg")]
    pub weight_unit: WeightUnit,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl BoxSpec {
    /// Creates a validated box specification.
    ///
    /// # Examples
    /// ```
    /// use load_planner::model::BoxSpec;
    /// use load_planner::units::{LengthUnit, WeightUnit};
    ///
    /// let ok = BoxSpec::new((120.0, 80.0, 100.0), 350.0, LengthUnit::Centimeters, WeightUnit::Kilograms, 10);
    /// assert!(ok.is_ok());
    ///
    /// let bad = BoxSpec::new((0.0, 80.0, 100.0), 350.0, LengthUnit::Centimeters, WeightUnit::Kilograms, 10);
    /// assert!(bad.is_err());
    /// ```
    pub fn new(
        dims: (f64, f64, f64),
        weight: f64,
        unit: LengthUnit,
        weight_unit: WeightUnit,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            length: dims.0,
            width: dims.1,
            height: dims.2,
            weight,
            unit,
            weight_unit,
            quantity,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Convenience constructor for metric input with quantity 1.
    pub fn metric(dims: (f64, f64, f64), weight_kg: f64) -> Self {
        Self {
            length: dims.0,
            width: dims.1,
            height: dims.2,
            weight: weight_kg,
            unit: LengthUnit::Meters,
            weight_unit: WeightUnit::Kilograms,
            quantity: 1,
        }
    }

    /// Returns a copy with a different requested quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Checks dimensions, weight and quantity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_dimensions_3d((self.length, self.width, self.height), "Box")
            .map_err(ValidationError::InvalidDimension)?;
        validation::validate_positive(self.weight, "Box weight")
            .map_err(ValidationError::InvalidWeight)?;
        if self.quantity == 0 {
            return Err(ValidationError::InvalidQuantity(
                "Quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Requested quantity, clamped to at least one box.
    #[inline]
    pub fn requested_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    /// Converts the box into meters and kilograms.
    pub fn normalized(&self) -> NormalizedBox {
        NormalizedBox {
            dims: Vec3::new(
                to_meters(self.length, self.unit),
                to_meters(self.width, self.unit),
                to_meters(self.height, self.unit),
            ),
            weight_kg: to_kilograms(self.weight, self.weight_unit),
        }
    }
}

/// A box in canonical metric units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedBox {
    pub dims: Vec3,
    pub weight_kg: f64,
}

/// A container type with its internal dimensions (meters) and payload limit (kg).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "20ft-standard",
        "name": "20' Standard",
        "internal_length": 5.898,
        "internal_width": 2.352,
        "internal_height": 2.393,
        "max_payload": 28200.0
    })
)]
pub struct ContainerSpec {
    pub id: String,
    pub name: String,
    pub internal_length: f64,
    pub internal_width: f64,
    pub internal_height: f64,
    pub max_payload: f64,
}

impl ContainerSpec {
    /// Creates a validated container specification.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        internal_dims: (f64, f64, f64),
        max_payload: f64,
    ) -> Result<Self, ValidationError> {
        validation::validate_dimensions_3d(internal_dims, "Container")
            .map_err(ValidationError::InvalidDimension)?;
        validation::validate_positive(max_payload, "Container payload")
            .map_err(ValidationError::InvalidWeight)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            internal_length: internal_dims.0,
            internal_width: internal_dims.1,
            internal_height: internal_dims.2,
            max_payload,
        })
    }
}

impl Dimensional for ContainerSpec {
    fn dimensions(&self) -> Vec3 {
        Vec3::new(
            self.internal_length,
            self.internal_width,
            self.internal_height,
        )
    }
}
