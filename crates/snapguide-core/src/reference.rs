//! Reference elements and nearest-reference selection.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a reference element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceId(pub Uuid);

impl ReferenceId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReferenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A stationary element eligible for alignment against the dragged element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Identifier of the element.
    pub id: ReferenceId,
    /// Measured rectangle. Viewport coordinates when returned by a
    /// [`Surface`](crate::scene::Surface), canvas-local once extracted.
    pub rect: Rect,
}

impl Reference {
    /// Create a reference with a fresh identifier.
    pub fn new(rect: Rect) -> Self {
        Self {
            id: ReferenceId::new(),
            rect,
        }
    }

    /// Create a reference with a known identifier.
    pub fn with_id(id: ReferenceId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// Euclidean distance between the centers of two rectangles.
pub fn center_distance(a: Rect, b: Rect) -> f64 {
    a.center().distance(b.center())
}

/// Pick the reference whose center is nearest to the dragged rectangle's center.
///
/// Ties go to the first candidate in iteration order. Returns `None` when
/// there are no candidates or no candidate has a finite distance.
pub fn select_nearest(dragged: Rect, references: &[Reference]) -> Option<&Reference> {
    let mut best: Option<&Reference> = None;
    let mut best_distance = f64::INFINITY;

    for reference in references {
        let distance = center_distance(dragged, reference.rect);
        if distance < best_distance {
            best_distance = distance;
            best = Some(reference);
        }
    }

    best
}
