//! 2D geometry helpers for the orthographic view projections.
//!
//! Coordinates are canvas pixels with the origin in the top-left corner.

use serde::Serialize;
use utoipa::ToSchema;

/// An axis-aligned rectangle on the rendering canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Checks whether `inner` lies completely inside this rectangle.
    ///
    /// # Parameters
    /// * `inner` - The rectangle to test
    /// * `tolerance` - Slack allowed on every edge
    pub fn contains_rect(&self, inner: &Rect, tolerance: f64) -> bool {
        inner.x + tolerance >= self.x
            && inner.y + tolerance >= self.y
            && inner.right() <= self.right() + tolerance
            && inner.bottom() <= self.bottom() + tolerance
    }
}
