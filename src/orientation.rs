//! Axis-aligned box orientations.
//!
//! An orientation decides which box dimension runs along the container's length,
//! width and height axes. All six permutations are always produced, also for
//! cubes; the enumeration order is the tie-break order of the optimizer.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::types::Vec3;

/// One of the six permutations of (length, width, height).
///
/// The variant name reads as the box dimensions placed on the container's
/// length, width and height axes, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Lwh,
    Lhw,
    Wlh,
    Whl,
    Hlw,
    Hwl,
}

impl Rotation {
    /// All rotations in evaluation order.
    pub const ALL: [Rotation; 6] = [
        Rotation::Lwh,
        Rotation::Lhw,
        Rotation::Wlh,
        Rotation::Whl,
        Rotation::Hlw,
        Rotation::Hwl,
    ];

    /// Applies the rotation to box dimensions given as (length, width, height).
    pub fn apply(&self, dims: Vec3) -> Vec3 {
        let Vec3 { x: l, y: w, z: h } = dims;
        match self {
            Rotation::Lwh => Vec3::new(l, w, h),
            Rotation::Lhw => Vec3::new(l, h, w),
            Rotation::Wlh => Vec3::new(w, l, h),
            Rotation::Whl => Vec3::new(w, h, l),
            Rotation::Hlw => Vec3::new(h, l, w),
            Rotation::Hwl => Vec3::new(h, w, l),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Lwh => "lwh",
            Rotation::Lhw => "lhw",
            Rotation::Wlh => "wlh",
            Rotation::Whl => "whl",
            Rotation::Hlw => "hlw",
            Rotation::Hwl => "hwl",
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rotation together with the resulting oriented dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub rotation: Rotation,
    /// Extents along the container's length, width and height axes.
    pub dims: Vec3,
}

/// Enumerates all six orientations of a box, in tie-break order.
pub fn orientations(dims: Vec3) -> [Orientation; 6] {
    Rotation::ALL.map(|rotation| Orientation {
        rotation,
        dims: rotation.apply(dims),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_all_six_permutations_in_order() {
        let result = orientations(Vec3::new(1.0, 2.0, 3.0));
        let dims: Vec<_> = result.iter().map(|o| o.dims.as_tuple()).collect();
        assert_eq!(
            dims,
            vec![
                (1.0, 2.0, 3.0),
                (1.0, 3.0, 2.0),
                (2.0, 1.0, 3.0),
                (2.0, 3.0, 1.0),
                (3.0, 1.0, 2.0),
                (3.0, 2.0, 1.0),
            ]
        );
    }

    #[test]
    fn cubes_are_not_deduplicated() {
        let result = orientations(Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(result.len(), 6);
        assert!(result.iter().all(|o| o.dims == Vec3::new(0.5, 0.5, 0.5)));
        let rotations: Vec<_> = result.iter().map(|o| o.rotation).collect();
        assert_eq!(rotations, Rotation::ALL.to_vec());
    }

    #[test]
    fn rotation_labels_match_serialization() {
        for rotation in Rotation::ALL {
            let json = serde_json::to_string(&rotation).unwrap();
            assert_eq!(json, format!("\"{}\"", rotation));
        }
    }
}
