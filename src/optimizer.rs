//! Container loading optimizer.
//!
//! Packs identical boxes into a single container in a regular grid:
//! - every axis-aligned orientation of the box is evaluated
//! - per container axis, `floor(container / box)` boxes fit
//! - orientations whose full grid exceeds the payload limit are discarded
//! - the orientation with the largest box count wins, first one on ties
//!
//! The winning grid is then clamped to the quantity the user actually asked for.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{BoxSpec, ContainerSpec};
use crate::orientation::{Orientation, Rotation, orientations};
use crate::tier::{EfficiencyTier, classify_efficiency};
use crate::types::{Dimensional, Vec3};

/// Container axis a box dimension is laid along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Length,
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Length => f.write_str("length"),
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Number of boxes along each container axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AxisCounts {
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

impl AxisCounts {
    /// Boxes in the full grid. Saturates instead of overflowing on degenerate input.
    pub fn capacity(&self) -> u64 {
        u64::from(self.length)
            .saturating_mul(u64::from(self.width))
            .saturating_mul(u64::from(self.height))
    }

    fn first_empty_axis(&self) -> Option<Axis> {
        if self.length == 0 {
            Some(Axis::Length)
        } else if self.width == 0 {
            Some(Axis::Width)
        } else if self.height == 0 {
            Some(Axis::Height)
        } else {
            None
        }
    }
}

/// How many whole boxes of `box_len` fit into `container_len`.
fn count_along(container_len: f64, box_len: f64) -> u32 {
    // `as` saturates: NaN becomes 0, infinity becomes u32::MAX.
    (container_len / box_len).floor().max(0.0) as u32
}

/// Outcome of a single orientation that passed the fit and payload checks.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct OrientationEvaluation {
    pub rotation: Rotation,
    /// Box extents along the container's length, width and height axes (meters).
    pub oriented_dims: Vec3,
    pub counts: AxisCounts,
    pub max_capacity: u64,
    /// Weight of the full grid in kg.
    pub total_weight: f64,
    pub efficiency_percent: f64,
}

/// Reasons an orientation is discarded.
#[derive(Clone, Debug, PartialEq)]
pub enum OrientationRejection {
    DoesNotFit { axis: Axis },
    ExceedsPayload { total_weight: f64, max_payload: f64 },
}

impl OrientationRejection {
    pub fn code(&self) -> &'static str {
        match self {
            OrientationRejection::DoesNotFit { .. } => "does_not_fit",
            OrientationRejection::ExceedsPayload { .. } => "exceeds_payload",
        }
    }
}

impl fmt::Display for OrientationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrientationRejection::DoesNotFit { axis } => {
                write!(f, "Box does not fit along the container {}", axis)
            }
            OrientationRejection::ExceedsPayload {
                total_weight,
                max_payload,
            } => write!(
                f,
                "Full load of {:.1} kg exceeds the payload limit of {:.1} kg",
                total_weight, max_payload
            ),
        }
    }
}

/// Evaluates one orientation of a box against a container.
///
/// # Parameters
/// * `container` - Target container
/// * `orientation` - Box orientation, dimensions in meters
/// * `box_weight_kg` - Weight of a single box
///
/// # Returns
/// The full-grid evaluation, or the reason the orientation is infeasible
pub fn evaluate_orientation(
    container: &ContainerSpec,
    orientation: &Orientation,
    box_weight_kg: f64,
) -> Result<OrientationEvaluation, OrientationRejection> {
    let dims = orientation.dims;
    let counts = AxisCounts {
        length: count_along(container.internal_length, dims.x),
        width: count_along(container.internal_width, dims.y),
        height: count_along(container.internal_height, dims.z),
    };

    if let Some(axis) = counts.first_empty_axis() {
        return Err(OrientationRejection::DoesNotFit { axis });
    }

    let max_capacity = counts.capacity();
    let total_weight = max_capacity as f64 * box_weight_kg;
    if total_weight > container.max_payload {
        return Err(OrientationRejection::ExceedsPayload {
            total_weight,
            max_payload: container.max_payload,
        });
    }

    let container_volume = container.volume();
    let efficiency_percent = if container_volume > 0.0 && container_volume.is_finite() {
        max_capacity as f64 * dims.volume() / container_volume * 100.0
    } else {
        0.0
    };

    Ok(OrientationEvaluation {
        rotation: orientation.rotation,
        oriented_dims: dims,
        counts,
        max_capacity,
        total_weight,
        efficiency_percent,
    })
}

/// Leftover linear margin per container axis, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct RemainingSpace {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Relation between the requested quantity and the container's capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapacityStatus {
    /// Requested quantity matches the capacity exactly.
    Full,
    /// Fewer boxes requested than the container could hold.
    Underfilled { unused_slots: u64 },
    /// More boxes requested than fit; the container is full.
    Overflowing { left_behind: u64 },
}

impl CapacityStatus {
    fn from_counts(max_capacity: u64, requested: u64) -> Self {
        match requested.cmp(&max_capacity) {
            Ordering::Equal => CapacityStatus::Full,
            Ordering::Less => CapacityStatus::Underfilled {
                unused_slots: max_capacity - requested,
            },
            Ordering::Greater => CapacityStatus::Overflowing {
                left_behind: requested - max_capacity,
            },
        }
    }

    /// True when every slot of the container is used.
    pub fn is_container_full(&self) -> bool {
        !matches!(self, CapacityStatus::Underfilled { .. })
    }
}

/// Result of the loading optimization for one box type and one container.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct ArrangementResult {
    pub rotation: Rotation,
    /// Box extents along the container's length, width and height axes (meters).
    pub oriented_dims: Vec3,
    pub length_count: u32,
    pub width_count: u32,
    pub height_count: u32,
    /// Boxes the container holds under the winning orientation.
    pub max_capacity: u64,
    /// `min(max_capacity, requested_quantity)`
    pub total_boxes: u64,
    /// Requested quantity after clamping to at least one.
    pub requested_quantity: u32,
    /// Volume share of the full grid, independent of the requested quantity.
    pub efficiency_percent: f64,
    /// Weight of `total_boxes` in kg.
    pub total_weight: f64,
    pub remaining_space: RemainingSpace,
    pub capacity_status: CapacityStatus,
}

impl ArrangementResult {
    pub fn counts(&self) -> AxisCounts {
        AxisCounts {
            length: self.length_count,
            width: self.width_count,
            height: self.height_count,
        }
    }

    /// True when the user asked for fewer boxes than the container could hold.
    pub fn is_below_capacity(&self) -> bool {
        self.max_capacity != self.total_boxes
    }

    pub fn efficiency_tier(&self) -> EfficiencyTier {
        classify_efficiency(self.efficiency_percent)
    }
}

/// Turns the winning orientation into the final arrangement.
///
/// # Parameters
/// * `container` - Target container
/// * `winner` - Evaluation of the winning orientation
/// * `box_weight_kg` - Weight of a single box
/// * `requested_quantity` - Boxes the user wants to ship; 0 is treated as 1
pub fn build_arrangement(
    container: &ContainerSpec,
    winner: &OrientationEvaluation,
    box_weight_kg: f64,
    requested_quantity: u32,
) -> ArrangementResult {
    let requested_quantity = requested_quantity.max(1);
    let total_boxes = winner.max_capacity.min(u64::from(requested_quantity));
    let dims = winner.oriented_dims;
    let counts = winner.counts;

    let remaining_space = RemainingSpace {
        length: container.internal_length - f64::from(counts.length) * dims.x,
        width: container.internal_width - f64::from(counts.width) * dims.y,
        height: container.internal_height - f64::from(counts.height) * dims.z,
    };

    ArrangementResult {
        rotation: winner.rotation,
        oriented_dims: dims,
        length_count: counts.length,
        width_count: counts.width,
        height_count: counts.height,
        max_capacity: winner.max_capacity,
        total_boxes,
        requested_quantity,
        efficiency_percent: winner.efficiency_percent,
        total_weight: total_boxes as f64 * box_weight_kg,
        remaining_space,
        capacity_status: CapacityStatus::from_counts(
            winner.max_capacity,
            u64::from(requested_quantity),
        ),
    }
}

/// Events emitted while the orientations are evaluated.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum EvaluationEvent {
    /// An orientation fits and respects the payload limit.
    OrientationAccepted {
        rotation: Rotation,
        counts: AxisCounts,
        max_capacity: u64,
        efficiency_percent: f64,
    },
    /// An orientation was discarded.
    OrientationRejected {
        rotation: Rotation,
        reason_code: String,
        reason_text: String,
    },
    /// Evaluation finished.
    Finished {
        feasible: bool,
        best_rotation: Option<Rotation>,
        max_capacity: Option<u64>,
    },
}

/// Computes the best arrangement of a box type in a container.
///
/// # Returns
/// `None` when no orientation both fits and respects the payload limit
///
/// # Examples
/// ```
/// use load_planner::model::{BoxSpec, ContainerSpec};
/// use load_planner::optimizer::compute_arrangement;
///
/// let container = ContainerSpec::new("20ft", "20'", (5.898, 2.352, 2.393), 28_200.0).unwrap();
/// let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 500.0).with_quantity(100);
/// let result = compute_arrangement(&boxes, &container).unwrap();
/// assert_eq!(result.max_capacity, 20);
/// ```
pub fn compute_arrangement(
    box_spec: &BoxSpec,
    container: &ContainerSpec,
) -> Option<ArrangementResult> {
    compute_arrangement_with_progress(box_spec, container, |_| {})
}

/// Like [`compute_arrangement`], reporting every evaluated orientation.
pub fn compute_arrangement_with_progress(
    box_spec: &BoxSpec,
    container: &ContainerSpec,
    mut on_event: impl FnMut(&EvaluationEvent),
) -> Option<ArrangementResult> {
    let normalized = box_spec.normalized();
    let mut best: Option<OrientationEvaluation> = None;

    for orientation in orientations(normalized.dims) {
        match evaluate_orientation(container, &orientation, normalized.weight_kg) {
            Ok(evaluation) => {
                on_event(&EvaluationEvent::OrientationAccepted {
                    rotation: evaluation.rotation,
                    counts: evaluation.counts,
                    max_capacity: evaluation.max_capacity,
                    efficiency_percent: evaluation.efficiency_percent,
                });
                // Strict comparison: the first orientation wins ties.
                let is_better = best
                    .as_ref()
                    .is_none_or(|current| evaluation.max_capacity > current.max_capacity);
                if is_better {
                    best = Some(evaluation);
                }
            }
            Err(reason) => {
                on_event(&EvaluationEvent::OrientationRejected {
                    rotation: orientation.rotation,
                    reason_code: reason.code().to_string(),
                    reason_text: reason.to_string(),
                });
            }
        }
    }

    on_event(&EvaluationEvent::Finished {
        feasible: best.is_some(),
        best_rotation: best.as_ref().map(|b| b.rotation),
        max_capacity: best.as_ref().map(|b| b.max_capacity),
    });

    let Some(winner) = best else {
        tracing::debug!(container = %container.id, "no feasible arrangement");
        return None;
    };

    let result = build_arrangement(
        container,
        &winner,
        normalized.weight_kg,
        box_spec.requested_quantity(),
    );
    tracing::debug!(
        container = %container.id,
        rotation = %result.rotation,
        max_capacity = result.max_capacity,
        total_boxes = result.total_boxes,
        efficiency = result.efficiency_percent,
        "arrangement computed"
    );
    if result.is_below_capacity() {
        tracing::debug!(
            requested = result.requested_quantity,
            max_capacity = result.max_capacity,
            "requested quantity is below container capacity"
        );
    }
    Some(result)
}

/// One container type evaluated for a box.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ContainerCandidate {
    pub container: ContainerSpec,
    pub arrangement: Option<ArrangementResult>,
    pub tier: Option<EfficiencyTier>,
}

impl ContainerCandidate {
    pub fn is_feasible(&self) -> bool {
        self.arrangement.is_some()
    }

    /// True when the whole requested quantity fits into this container.
    pub fn holds_requested_quantity(&self) -> bool {
        self.arrangement
            .as_ref()
            .is_some_and(|a| a.max_capacity >= u64::from(a.requested_quantity))
    }

    fn efficiency(&self) -> f64 {
        self.arrangement
            .as_ref()
            .map_or(0.0, |a| a.efficiency_percent)
    }
}

/// Evaluates a box against several container types, best candidates first.
///
/// Feasible containers come before infeasible ones, containers that take the
/// whole requested quantity before those that don't, then higher efficiency.
/// Equal candidates keep their input order.
pub fn rank_containers(box_spec: &BoxSpec, containers: &[ContainerSpec]) -> Vec<ContainerCandidate> {
    let mut candidates: Vec<ContainerCandidate> = containers
        .iter()
        .map(|container| {
            let arrangement = compute_arrangement(box_spec, container);
            let tier = arrangement.as_ref().map(ArrangementResult::efficiency_tier);
            ContainerCandidate {
                container: container.clone(),
                arrangement,
                tier,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.is_feasible()
            .cmp(&a.is_feasible())
            .then_with(|| {
                b.holds_requested_quantity()
                    .cmp(&a.holds_requested_quantity())
            })
            .then_with(|| {
                b.efficiency()
                    .partial_cmp(&a.efficiency())
                    .unwrap_or(Ordering::Equal)
            })
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, WeightUnit};

    fn twenty_foot() -> ContainerSpec {
        ContainerSpec::new("20ft-standard", "20' Standard", (5.898, 2.352, 2.393), 28_200.0)
            .unwrap()
    }

    fn container(dims: (f64, f64, f64), max_payload: f64) -> ContainerSpec {
        ContainerSpec::new("test", "Test", dims, max_payload).unwrap()
    }

    #[test]
    fn scenario_one_meter_cubes_in_twenty_foot_container() {
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 500.0).with_quantity(100);
        let result = compute_arrangement(&boxes, &twenty_foot()).expect("arrangement exists");

        assert_eq!(result.counts(), AxisCounts { length: 5, width: 2, height: 2 });
        assert_eq!(result.max_capacity, 20);
        assert_eq!(result.total_boxes, 20);
        assert!((result.total_weight - 10_000.0).abs() < 1e-9);
        assert_eq!(result.rotation, Rotation::Lwh);

        let expected = 20.0 / (5.898 * 2.352 * 2.393) * 100.0;
        assert!((result.efficiency_percent - expected).abs() < 1e-9);
        assert!(result.efficiency_percent > 60.0 && result.efficiency_percent < 60.5);
        assert_eq!(result.capacity_status, CapacityStatus::Overflowing { left_behind: 80 });
        assert!(!result.is_below_capacity());
    }

    #[test]
    fn scenario_heavy_half_meter_cubes_are_infeasible() {
        let boxes = BoxSpec::metric((0.5, 0.5, 0.5), 2000.0).with_quantity(1000);
        let mut rejected = Vec::new();
        let result = compute_arrangement_with_progress(&boxes, &twenty_foot(), |evt| {
            if let EvaluationEvent::OrientationRejected { reason_code, .. } = evt {
                rejected.push(reason_code.clone());
            }
        });

        assert!(result.is_none());
        assert_eq!(rejected.len(), 6);
        assert!(rejected.iter().all(|code| code == "exceeds_payload"));
    }

    #[test]
    fn scenario_zero_quantity_is_clamped_to_one() {
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 500.0).with_quantity(0);
        let result = compute_arrangement(&boxes, &twenty_foot()).unwrap();
        assert_eq!(result.requested_quantity, 1);
        assert_eq!(result.total_boxes, 1);
        assert!((result.total_weight - 500.0).abs() < 1e-9);
        assert_eq!(result.capacity_status, CapacityStatus::Underfilled { unused_slots: 19 });
    }

    #[test]
    fn below_capacity_is_reported() {
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 500.0).with_quantity(10);
        let result = compute_arrangement(&boxes, &twenty_foot()).unwrap();
        assert_eq!(result.total_boxes, 10);
        assert!(result.is_below_capacity());
        assert!(!result.capacity_status.is_container_full());

        let exact = compute_arrangement(&boxes.with_quantity(20), &twenty_foot()).unwrap();
        assert_eq!(exact.capacity_status, CapacityStatus::Full);
        assert!(exact.capacity_status.is_container_full());
    }

    #[test]
    fn efficiency_does_not_depend_on_quantity() {
        let base = BoxSpec::metric((1.2, 0.8, 1.0), 300.0);
        let reference = compute_arrangement(&base, &twenty_foot()).unwrap();
        for quantity in [1, 5, 17, 1000] {
            let result = compute_arrangement(&base.clone().with_quantity(quantity), &twenty_foot())
                .unwrap();
            assert_eq!(result.efficiency_percent, reference.efficiency_percent);
            assert_eq!(result.max_capacity, reference.max_capacity);
        }
    }

    #[test]
    fn box_too_large_on_every_axis_is_infeasible() {
        let boxes = BoxSpec::metric((3.0, 3.0, 3.0), 1.0);
        let mut codes = Vec::new();
        let result = compute_arrangement_with_progress(&boxes, &twenty_foot(), |evt| {
            if let EvaluationEvent::OrientationRejected { reason_code, .. } = evt {
                codes.push(reason_code.clone());
            }
        });
        assert!(result.is_none());
        assert!(codes.iter().all(|code| code == "does_not_fit"));
    }

    #[test]
    fn ties_keep_first_orientation() {
        let boxes = BoxSpec::metric((1.0, 2.0, 1.0), 1.0);
        let result = compute_arrangement(&boxes, &container((2.0, 2.0, 2.0), 1000.0)).unwrap();
        assert_eq!(result.max_capacity, 4);
        assert_eq!(result.rotation, Rotation::Lwh);
        assert_eq!(result.counts(), AxisCounts { length: 2, width: 1, height: 2 });
    }

    #[test]
    fn picks_orientation_that_fits() {
        let boxes = BoxSpec::metric((2.0, 0.5, 0.5), 1.0);
        let result = compute_arrangement(&boxes, &container((1.0, 3.0, 3.0), 1000.0)).unwrap();
        assert_eq!(result.rotation, Rotation::Wlh);
        assert_eq!(result.counts(), AxisCounts { length: 2, width: 1, height: 6 });
        assert_eq!(result.max_capacity, 12);
        assert!(result.remaining_space.length.abs() < 1e-9);
        assert!((result.remaining_space.width - 1.0).abs() < 1e-9);
        assert!(result.remaining_space.height.abs() < 1e-9);
    }

    #[test]
    fn payload_limit_selects_lighter_orientation() {
        let boxes = BoxSpec::metric((0.6, 1.0, 1.0), 10.0).with_quantity(5);
        let result = compute_arrangement(&boxes, &container((1.2, 1.0, 1.0), 15.0)).unwrap();
        assert_eq!(result.rotation, Rotation::Wlh);
        assert_eq!(result.max_capacity, 1);
        assert!((result.efficiency_percent - 50.0).abs() < 1e-9);
        assert!((result.total_weight - 10.0).abs() < 1e-9);
    }

    #[test]
    fn payload_exactly_at_limit_is_accepted() {
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 25.0);
        let result = compute_arrangement(&boxes, &container((2.0, 2.0, 1.0), 100.0)).unwrap();
        assert_eq!(result.max_capacity, 4);
    }

    #[test]
    fn payload_marginally_over_limit_is_rejected() {
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 100.000_000_000_5);
        let result = compute_arrangement(&boxes, &container((1.0, 1.0, 1.0), 100.0));
        assert!(result.is_none());
    }

    #[test]
    fn counts_floor_without_partial_box_allowance() {
        // 0.7 / 0.1 evaluates to 6.999999999999999 in f64.
        let boxes = BoxSpec::metric((0.1, 0.1, 0.1), 1.0);
        let result = compute_arrangement(&boxes, &container((0.7, 0.1, 0.1), 1000.0)).unwrap();
        assert_eq!(result.counts(), AxisCounts { length: 6, width: 1, height: 1 });
        assert_eq!(result.max_capacity, 6);
        assert!(result.remaining_space.length > 0.09);
    }

    #[test]
    fn box_marginally_longer_than_container_does_not_fit() {
        let edge = 1.000_000_000_5;
        let boxes = BoxSpec::metric((edge, edge, edge), 1.0);
        let mut codes = Vec::new();
        let result = compute_arrangement_with_progress(
            &boxes,
            &container((1.0, 1.0, 1.0), 1000.0),
            |evt| {
                if let EvaluationEvent::OrientationRejected { reason_code, .. } = evt {
                    codes.push(reason_code.clone());
                }
            },
        );
        assert!(result.is_none());
        assert_eq!(codes.len(), 6);
        assert!(codes.iter().all(|code| code == "does_not_fit"));
    }

    #[test]
    fn converts_units_before_packing() {
        let boxes = BoxSpec::new(
            (100.0, 100.0, 100.0),
            1.0,
            LengthUnit::Centimeters,
            WeightUnit::Tons,
            3,
        )
        .unwrap();
        let result = compute_arrangement(&boxes, &twenty_foot()).unwrap();
        assert_eq!(result.max_capacity, 20);
        assert!((result.total_weight - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn invariants_hold_across_box_sizes() {
        let cont = twenty_foot();
        for &l in &[0.25, 0.4, 0.61, 1.0, 1.7] {
            for &w in &[0.3, 0.55, 1.1] {
                for &h in &[0.2, 0.75, 2.2] {
                    for quantity in [1, 50, 5000] {
                        let boxes = BoxSpec::metric((l, w, h), 1.0).with_quantity(quantity);
                        let result = compute_arrangement(&boxes, &cont)
                            .expect("light boxes that fit always have an arrangement");
                        assert_eq!(result.counts().capacity(), result.max_capacity);
                        assert!(result.total_boxes <= result.max_capacity);
                        if u64::from(quantity) >= result.max_capacity {
                            assert_eq!(result.total_boxes, result.max_capacity);
                        }
                        assert!(result.remaining_space.length >= 0.0);
                        assert!(result.remaining_space.width >= 0.0);
                        assert!(result.remaining_space.height >= 0.0);
                        assert!(result.efficiency_percent <= 100.0 + 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn degenerate_input_does_not_panic() {
        let boxes = BoxSpec::metric((0.0, 1.0, 1.0), 0.0);
        let result = compute_arrangement(&boxes, &twenty_foot());
        if let Some(result) = result {
            assert_eq!(result.counts().capacity(), result.max_capacity);
        }

        let flat = ContainerSpec {
            id: "flat".to_string(),
            name: "Flat".to_string(),
            internal_length: 0.0,
            internal_width: 1.0,
            internal_height: 1.0,
            max_payload: 100.0,
        };
        assert!(compute_arrangement(&BoxSpec::metric((1.0, 1.0, 1.0), 1.0), &flat).is_none());
    }

    #[test]
    fn progress_reports_every_orientation_then_finishes() {
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 500.0);
        let mut events = Vec::new();
        compute_arrangement_with_progress(&boxes, &twenty_foot(), |evt| events.push(evt.clone()));

        assert_eq!(events.len(), 7);
        assert!(events[..6]
            .iter()
            .all(|evt| matches!(evt, EvaluationEvent::OrientationAccepted { .. })));
        match events.last() {
            Some(EvaluationEvent::Finished {
                feasible,
                best_rotation,
                max_capacity,
            }) => {
                assert!(*feasible);
                assert_eq!(*best_rotation, Some(Rotation::Lwh));
                assert_eq!(*max_capacity, Some(20));
            }
            other => panic!("unexpected final event: {other:?}"),
        }
    }

    #[test]
    fn rank_prefers_feasible_then_full_quantity_then_efficiency() {
        let small = container((2.0, 1.0, 1.0), 1000.0);
        let tiny = container((0.5, 0.5, 0.5), 1000.0);
        let large = container((4.0, 1.0, 1.0), 1000.0);
        let roomy = container((4.5, 1.0, 1.0), 1000.0);
        let boxes = BoxSpec::metric((1.0, 1.0, 1.0), 1.0).with_quantity(3);

        let ranked = rank_containers(&boxes, &[small, tiny, roomy, large]);
        let order: Vec<_> = ranked
            .iter()
            .map(|c| c.container.internal_length)
            .collect();
        assert_eq!(order, vec![4.0, 4.5, 2.0, 0.5]);
        assert!(ranked[0].holds_requested_quantity());
        assert!(!ranked[2].holds_requested_quantity());
        assert!(!ranked[3].is_feasible());
        assert_eq!(ranked[0].tier, Some(EfficiencyTier::Excellent));
        assert_eq!(ranked[3].tier, None);
    }
}
