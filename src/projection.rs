//! Orthographic view projection of an arrangement.
//!
//! Produces the cell grids the dashboard draws for the side (length × height),
//! front (width × height) and top (length × width) views. Each view is scaled
//! independently into the configured canvas span.
//!
//! Cells are clamped twice: the grid never exceeds the number of whole cells that
//! fit into the drawn outline, and every cell rectangle is checked against that
//! outline before it is emitted.

use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::Rect;
use crate::model::ContainerSpec;
use crate::optimizer::ArrangementResult;
use crate::types::EPSILON_GENERAL;

/// Slack in pixels for the outline containment check.
const PIXEL_TOLERANCE: f64 = 1e-6;

/// Canvas settings shared by all three views.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct CanvasConfig {
    /// Pixel span the larger container extent of a view is scaled to.
    pub target_span: f64,
    /// Empty border around the container outline, in pixels.
    pub padding: f64,
    /// Lower bound (meters) for the extent used in the scale denominator.
    pub min_container_span: f64,
}

impl CanvasConfig {
    pub const DEFAULT_TARGET_SPAN: f64 = 280.0;
    pub const DEFAULT_PADDING: f64 = 10.0;
    pub const DEFAULT_MIN_CONTAINER_SPAN: f64 = 0.1;

    pub fn builder() -> CanvasConfigBuilder {
        CanvasConfigBuilder::default()
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            target_span: Self::DEFAULT_TARGET_SPAN,
            padding: Self::DEFAULT_PADDING,
            min_container_span: Self::DEFAULT_MIN_CONTAINER_SPAN,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CanvasConfigBuilder {
    config: CanvasConfig,
}

impl CanvasConfigBuilder {
    pub fn target_span(mut self, span: f64) -> Self {
        self.config.target_span = span;
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.config.padding = padding;
        self
    }

    pub fn min_container_span(mut self, span: f64) -> Self {
        self.config.min_container_span = span;
        self
    }

    pub fn build(self) -> CanvasConfig {
        self.config
    }
}

/// The three orthographic views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Length × height
    Side,
    /// Width × height
    Front,
    /// Length × width
    Top,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Side, ViewKind::Front, ViewKind::Top];

    /// Rows are stacked from the floor upward in elevation views.
    fn grows_upward(&self) -> bool {
        matches!(self, ViewKind::Side | ViewKind::Front)
    }
}

/// Per-view slice of the 3D data: container extents, box extents and counts
/// along the horizontal and vertical canvas axes.
#[derive(Clone, Copy, Debug)]
struct ViewAxes {
    container: (f64, f64),
    cell: (f64, f64),
    counts: (u32, u32),
}

impl ViewAxes {
    fn for_view(kind: ViewKind, arrangement: &ArrangementResult, container: &ContainerSpec) -> Self {
        let dims = arrangement.oriented_dims;
        match kind {
            ViewKind::Side => Self {
                container: (container.internal_length, container.internal_height),
                cell: (dims.x, dims.z),
                counts: (arrangement.length_count, arrangement.height_count),
            },
            ViewKind::Front => Self {
                container: (container.internal_width, container.internal_height),
                cell: (dims.y, dims.z),
                counts: (arrangement.width_count, arrangement.height_count),
            },
            ViewKind::Top => Self {
                container: (container.internal_length, container.internal_width),
                cell: (dims.x, dims.y),
                counts: (arrangement.length_count, arrangement.width_count),
            },
        }
    }
}

/// A single box slot drawn in a view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct ViewCell {
    /// 1-based row-major index within the view.
    pub index: u64,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    /// Drawn highlighted when the slot is part of the requested quantity.
    pub is_within_requested_quantity: bool,
    /// Always true on emitted cells; slots overflowing the outline are dropped.
    pub in_bounds_of_container_outline: bool,
}

impl ViewCell {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position_x, self.position_y, self.width, self.height)
    }
}

/// Render instructions for one view.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct ViewLayout {
    pub kind: ViewKind,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Pixels per meter.
    pub scale: f64,
    pub outline: Rect,
    pub columns: u32,
    pub rows: u32,
    pub cells: Vec<ViewCell>,
}

/// Why nothing is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    NoFeasibleArrangement,
    InvalidInput,
}

/// Output of the projector.
///
/// `Placeholder` means there is nothing to draw at all. A `Rendered` view with
/// zero cells is a valid arrangement that simply has no visible slots.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProjectedViews {
    Placeholder {
        reason: PlaceholderReason,
    },
    Rendered {
        side: ViewLayout,
        front: ViewLayout,
        top: ViewLayout,
    },
}

impl ProjectedViews {
    /// Placeholder for input that failed validation upstream.
    pub fn invalid_input() -> Self {
        ProjectedViews::Placeholder {
            reason: PlaceholderReason::InvalidInput,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ProjectedViews::Placeholder { .. })
    }

    pub fn view(&self, kind: ViewKind) -> Option<&ViewLayout> {
        match self {
            ProjectedViews::Placeholder { .. } => None,
            ProjectedViews::Rendered { side, front, top } => Some(match kind {
                ViewKind::Side => side,
                ViewKind::Front => front,
                ViewKind::Top => top,
            }),
        }
    }
}

/// Projects an arrangement into side, front and top view layouts.
///
/// # Parameters
/// * `arrangement` - Result of the optimizer, `None` when infeasible
/// * `container` - Container the arrangement was computed for
/// * `canvas` - Canvas settings
pub fn project_views(
    arrangement: Option<&ArrangementResult>,
    container: &ContainerSpec,
    canvas: &CanvasConfig,
) -> ProjectedViews {
    let Some(arrangement) = arrangement else {
        return ProjectedViews::Placeholder {
            reason: PlaceholderReason::NoFeasibleArrangement,
        };
    };

    ProjectedViews::Rendered {
        side: project_view(ViewKind::Side, arrangement, container, canvas),
        front: project_view(ViewKind::Front, arrangement, container, canvas),
        top: project_view(ViewKind::Top, arrangement, container, canvas),
    }
}

/// Pixels per meter for a view.
fn view_scale(canvas: &CanvasConfig, container: (f64, f64)) -> f64 {
    let span = container
        .0
        .max(container.1)
        .max(canvas.min_container_span)
        .max(EPSILON_GENERAL);
    canvas.target_span.max(0.0) / span
}

/// Whole-pixel cell extent, at least one pixel.
fn cell_pixels(meters: f64, scale: f64) -> f64 {
    let pixels = (meters * scale).round();
    if pixels.is_finite() { pixels.max(1.0) } else { 1.0 }
}

/// Number of cells along one axis: the physical count, capped by what fits in the outline.
fn visible_count(count: u32, outline_span: f64, cell_span: f64) -> u32 {
    let fitting = ((outline_span + PIXEL_TOLERANCE) / cell_span).floor().max(0.0) as u32;
    count.min(fitting)
}

/// Grid of equally sized cells laid into an outline.
struct GridSpec {
    columns: u32,
    rows: u32,
    cell_width: f64,
    cell_height: f64,
    grows_upward: bool,
}

/// Lays out the grid row by row and drops every cell that leaves the outline.
fn layout_cells(outline: &Rect, grid: &GridSpec, total_boxes: u64) -> Vec<ViewCell> {
    let mut cells = Vec::with_capacity(grid.columns as usize * grid.rows as usize);
    for row in 0..grid.rows {
        let y = if grid.grows_upward {
            outline.bottom() - f64::from(row + 1) * grid.cell_height
        } else {
            outline.y + f64::from(row) * grid.cell_height
        };
        for column in 0..grid.columns {
            let x = outline.x + f64::from(column) * grid.cell_width;
            let index = u64::from(row) * u64::from(grid.columns) + u64::from(column) + 1;
            let rect = Rect::new(x, y, grid.cell_width, grid.cell_height);
            let in_bounds = outline.contains_rect(&rect, PIXEL_TOLERANCE);
            if !in_bounds {
                continue;
            }
            cells.push(ViewCell {
                index,
                position_x: x,
                position_y: y,
                width: grid.cell_width,
                height: grid.cell_height,
                is_within_requested_quantity: index <= total_boxes,
                in_bounds_of_container_outline: in_bounds,
            });
        }
    }
    cells
}

/// Projects a single view.
pub fn project_view(
    kind: ViewKind,
    arrangement: &ArrangementResult,
    container: &ContainerSpec,
    canvas: &CanvasConfig,
) -> ViewLayout {
    let axes = ViewAxes::for_view(kind, arrangement, container);
    let scale = view_scale(canvas, axes.container);
    let padding = canvas.padding.max(0.0);

    let outline = Rect::new(
        padding,
        padding,
        axes.container.0.max(0.0) * scale,
        axes.container.1.max(0.0) * scale,
    );
    let cell_w = cell_pixels(axes.cell.0, scale);
    let cell_h = cell_pixels(axes.cell.1, scale);

    let columns = visible_count(axes.counts.0, outline.width, cell_w);
    let rows = visible_count(axes.counts.1, outline.height, cell_h);

    let grid = GridSpec {
        columns,
        rows,
        cell_width: cell_w,
        cell_height: cell_h,
        grows_upward: kind.grows_upward(),
    };
    let cells = layout_cells(&outline, &grid, arrangement.total_boxes);

    if columns < axes.counts.0 || rows < axes.counts.1 {
        tracing::debug!(
            view = ?kind,
            columns,
            rows,
            physical_columns = axes.counts.0,
            physical_rows = axes.counts.1,
            "view grid clamped to canvas"
        );
    }

    ViewLayout {
        kind,
        canvas_width: outline.width + 2.0 * padding,
        canvas_height: outline.height + 2.0 * padding,
        scale,
        outline,
        columns,
        rows,
        cells,
    }
}
