//! Snap functionality for aligning the dragged element to reference edges.

use crate::edges::{Axis, Edge};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance below which an edge snaps (in canvas units).
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// The (possibly clamped) position.
    pub point: Point,
    /// Whether the x coordinate was clamped to a `left`/`right` edge.
    pub snapped_horizontal: bool,
    /// Whether the y coordinate was clamped to a `top`/`bottom` edge.
    pub snapped_vertical: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_horizontal: false,
            snapped_vertical: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_horizontal || self.snapped_vertical
    }
}

/// Snap a proposed position against the current edges.
///
/// Each axis is decided independently. An edge qualifies when its distance
/// is strictly below `threshold`; if two edges on one axis qualify, the one
/// later in `edges` wins. With `override_active` the position passes
/// through untouched.
pub fn snap_position(
    proposed: Point,
    edges: &[Edge],
    threshold: f64,
    override_active: bool,
) -> SnapResult {
    if override_active {
        return SnapResult::none(proposed);
    }

    let mut result = SnapResult::none(proposed);

    // A NaN distance or threshold never qualifies.
    for edge in edges.iter().filter(|e| e.distance.abs() < threshold) {
        match edge.kind.axis() {
            Axis::Horizontal => {
                result.point.x = edge.snap_to;
                result.snapped_horizontal = true;
            }
            Axis::Vertical => {
                result.point.y = edge.snap_to;
                result.snapped_vertical = true;
            }
        }
    }

    result
}
