//! Drag surface coordinate frame.
//!
//! Every rectangle the host measures arrives in viewport coordinates. The
//! drag surface converts them into canvas-local coordinates so that all
//! edge distances are computed in one frame, independent of page scroll or
//! where the surface sits on screen.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The bounded container within which canvas-local coordinates are measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSurface {
    /// The surface's own rectangle in viewport coordinates.
    pub viewport_rect: Rect,
}

impl DragSurface {
    /// Create a surface from its measured viewport rectangle.
    ///
    /// Returns `None` when the measurement is not finite (surface not laid out).
    pub fn from_viewport(viewport_rect: Rect) -> Option<Self> {
        if !is_finite(viewport_rect) {
            return None;
        }
        Some(Self {
            viewport_rect: viewport_rect.abs(),
        })
    }

    /// Top-left corner of the surface in viewport coordinates.
    pub fn origin(&self) -> Point {
        self.viewport_rect.origin()
    }

    /// Transform from canvas-local to viewport coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin().to_vec2())
    }

    /// Transform from viewport to canvas-local coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.origin().to_vec2())
    }

    /// Convert a viewport point (e.g. a pointer position) to canvas-local coordinates.
    pub fn to_canvas(&self, viewport_point: Point) -> Point {
        self.inverse_transform() * viewport_point
    }

    /// Convert a canvas-local point to viewport coordinates.
    pub fn to_viewport(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Convert a viewport rectangle into the canvas-local frame.
    ///
    /// Returns `None` for non-finite measurements.
    pub fn to_canvas_rect(&self, viewport_rect: Rect) -> Option<Rect> {
        if !is_finite(viewport_rect) {
            return None;
        }
        let offset: Vec2 = -self.origin().to_vec2();
        Some(viewport_rect.abs() + offset)
    }
}

/// Convert an element's viewport rectangle into the frame of the surface
/// measured at `surface_rect`.
///
/// Returns `None` if either measurement is unusable.
pub fn to_canvas_local(element_rect: Rect, surface_rect: Rect) -> Option<Rect> {
    DragSurface::from_viewport(surface_rect)?.to_canvas_rect(element_rect)
}

/// Check that all four coordinates of a rectangle are finite.
pub fn is_finite(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

/// Check whether two rectangles share any extent on the x axis.
///
/// Touching boundaries count as overlapping.
pub fn overlaps_horizontally(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1)
}

/// Check whether two rectangles share any extent on the y axis.
///
/// Touching boundaries count as overlapping.
pub fn overlaps_vertically(a: Rect, b: Rect) -> bool {
    !(a.y1 < b.y0 || a.y0 > b.y1)
}
