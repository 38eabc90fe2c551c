//! Edge-pair measurement between the dragged element and a reference.
//!
//! For the selected reference this produces exactly two edges, one per
//! axis. Facing edges are used on axes where the rectangles are disjoint;
//! otherwise the edge measures a raw alignment gap. Edges whose
//! rectangles are offset on the perpendicular axis carry an extension line
//! that bridges the measurement line to the reference boundary.

use crate::reference::{Reference, ReferenceId, select_nearest};
use crate::surface::{overlaps_horizontally, overlaps_vertically};
use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The x axis. Edges on it are measured by horizontal lines.
    Horizontal,
    /// The y axis. Edges on it are measured by vertical lines.
    Vertical,
}

/// Which side of the dragged element an edge measures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Left,
    Right,
    Top,
    Bottom,
}

impl EdgeKind {
    /// Axis whose coordinate this edge measures (and snaps).
    pub fn axis(self) -> Axis {
        match self {
            EdgeKind::Left | EdgeKind::Right => Axis::Horizontal,
            EdgeKind::Top | EdgeKind::Bottom => Axis::Vertical,
        }
    }
}

/// One measured alignment relationship between the dragged and reference rects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub kind: EdgeKind,
    /// Gap between the two measured boundaries. Never negative.
    pub distance: f64,
    /// Measurement segment in canvas-local coordinates.
    /// `p0` lies on the dragged element, `p1` on the reference.
    pub line: Line,
    /// Origin coordinate on `kind.axis()` that closes the gap.
    pub snap_to: f64,
    /// Dashed segment joining the measurement line to the reference boundary,
    /// present when the rects are offset on the perpendicular axis.
    pub extension: Option<Line>,
}

impl Edge {
    /// Whether a dashed extension line should be drawn.
    pub fn needs_extension(&self) -> bool {
        self.extension.is_some()
    }

    /// Distance rounded to whole pixels, for label text.
    pub fn rounded_distance(&self) -> i64 {
        self.distance.round() as i64
    }

    /// Label text for the distance, e.g. `"12px"`.
    pub fn label(&self) -> String {
        format!("{}px", self.rounded_distance())
    }
}

/// The edges measured against the selected reference for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSet {
    /// The reference element the edges were measured against.
    pub reference: ReferenceId,
    /// One edge per axis. Order is primary edge first.
    pub edges: [Edge; 2],
}

impl EdgeSet {
    /// Iterate over the edges in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// The edge measured on the x axis.
    pub fn horizontal(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.kind.axis() == Axis::Horizontal)
    }

    /// The edge measured on the y axis.
    pub fn vertical(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.kind.axis() == Axis::Vertical)
    }
}

/// Select the nearest reference and measure edges against it.
///
/// `dragged` and every reference rect must already be canvas-local.
pub fn compute_edge_set(dragged: Rect, references: &[Reference]) -> Option<EdgeSet> {
    let reference = select_nearest(dragged, references)?;
    Some(compute_edges(dragged, reference))
}

/// Measure the edge pair between `dragged` and `reference`.
pub fn compute_edges(dragged: Rect, reference: &Reference) -> EdgeSet {
    let pair = Pair {
        dragged,
        reference: reference.rect,
    };

    let horizontal = pair.facing_horizontal();
    let vertical = pair.facing_vertical();

    let edges = match (horizontal, vertical) {
        (Some(h), Some(v)) => [h, v],
        (Some(h), None) => [h, nearer(pair.top_aligned(), pair.bottom_aligned())],
        (None, Some(v)) => [v, nearer(pair.left_aligned(), pair.right_aligned())],
        (None, None) => [pair.left_aligned(), pair.top_aligned()],
    };

    EdgeSet {
        reference: reference.id,
        edges: edges.map(|edge| pair.with_extension(edge)),
    }
}

/// Keep the candidate with the smaller distance, preferring the first on a tie.
fn nearer(first: Edge, second: Edge) -> Edge {
    if second.distance < first.distance {
        second
    } else {
        first
    }
}

/// The two canvas-local rects being measured.
struct Pair {
    dragged: Rect,
    reference: Rect,
}

impl Pair {
    fn mid_x(&self) -> f64 {
        self.dragged.center().x
    }

    fn mid_y(&self) -> f64 {
        self.dragged.center().y
    }

    /// Horizontal measurement between `from_x` on the dragged rect and
    /// `to_x` on the reference, drawn along the dragged midline.
    fn horizontal_edge(&self, kind: EdgeKind, from_x: f64, to_x: f64, snap_to: f64) -> Edge {
        let y = self.mid_y();
        Edge {
            kind,
            distance: (to_x - from_x).abs(),
            line: Line::new(Point::new(from_x, y), Point::new(to_x, y)),
            snap_to,
            extension: None,
        }
    }

    /// Vertical measurement between `from_y` on the dragged rect and
    /// `to_y` on the reference, drawn along the dragged midline.
    fn vertical_edge(&self, kind: EdgeKind, from_y: f64, to_y: f64, snap_to: f64) -> Edge {
        let x = self.mid_x();
        Edge {
            kind,
            distance: (to_y - from_y).abs(),
            line: Line::new(Point::new(x, from_y), Point::new(x, to_y)),
            snap_to,
            extension: None,
        }
    }

    /// Facing edge on the x axis, if the rects are disjoint there.
    fn facing_horizontal(&self) -> Option<Edge> {
        let (d, r) = (self.dragged, self.reference);
        if d.x1 < r.x0 {
            Some(self.horizontal_edge(EdgeKind::Left, d.x1, r.x0, r.x0 - d.width()))
        } else if d.x0 > r.x1 {
            Some(self.horizontal_edge(EdgeKind::Right, d.x0, r.x1, r.x1))
        } else {
            None
        }
    }

    /// Facing edge on the y axis, if the rects are disjoint there.
    fn facing_vertical(&self) -> Option<Edge> {
        let (d, r) = (self.dragged, self.reference);
        if d.y1 < r.y0 {
            Some(self.vertical_edge(EdgeKind::Top, d.y1, r.y0, r.y0 - d.height()))
        } else if d.y0 > r.y1 {
            Some(self.vertical_edge(EdgeKind::Bottom, d.y0, r.y1, r.y1))
        } else {
            None
        }
    }

    /// Dragged left against reference left.
    fn left_aligned(&self) -> Edge {
        let (d, r) = (self.dragged, self.reference);
        self.horizontal_edge(EdgeKind::Left, d.x0, r.x0, r.x0)
    }

    /// Dragged left against reference right.
    fn right_aligned(&self) -> Edge {
        let (d, r) = (self.dragged, self.reference);
        self.horizontal_edge(EdgeKind::Right, d.x0, r.x1, r.x1)
    }

    /// Dragged top against reference top.
    fn top_aligned(&self) -> Edge {
        let (d, r) = (self.dragged, self.reference);
        self.vertical_edge(EdgeKind::Top, d.y0, r.y0, r.y0)
    }

    /// Dragged top against reference bottom.
    fn bottom_aligned(&self) -> Edge {
        let (d, r) = (self.dragged, self.reference);
        self.vertical_edge(EdgeKind::Bottom, d.y0, r.y1, r.y1)
    }

    /// Attach an extension line when the rects do not overlap on the axis
    /// perpendicular to the edge.
    ///
    /// The extension ends on the reference's near boundary, never on the
    /// dragged rect's, so it always touches the element being aligned to.
    fn with_extension(&self, mut edge: Edge) -> Edge {
        let (d, r) = (self.dragged, self.reference);
        let end = edge.line.p1;

        edge.extension = match edge.kind.axis() {
            Axis::Horizontal if !overlaps_vertically(d, r) => {
                let anchor_y = if d.y1 < r.y0 { r.y0 } else { r.y1 };
                Some(Line::new(Point::new(end.x, anchor_y), end))
            }
            Axis::Vertical if !overlaps_horizontally(d, r) => {
                let anchor_x = if d.x0 > r.x1 { r.x1 } else { r.x0 };
                Some(Line::new(Point::new(anchor_x, end.y), end))
            }
            _ => None,
        };

        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(x0: f64, y0: f64, x1: f64, y1: f64) -> Reference {
        Reference::new(Rect::new(x0, y0, x1, y1))
    }

    fn kinds(set: &EdgeSet) -> [EdgeKind; 2] {
        set.edges.map(|e| e.kind)
    }

    #[test]
    fn test_horizontally_disjoint_supplements_top() {
        let dragged = Rect::new(0.0, 0.0, 100.0, 100.0);
        let set = compute_edges(dragged, &reference(200.0, 0.0, 300.0, 100.0));

        assert_eq!(kinds(&set), [EdgeKind::Left, EdgeKind::Top]);
        assert_eq!(set.edges[0].distance, 100.0);
        assert_eq!(set.edges[0].line, Line::new((100.0, 50.0), (200.0, 50.0)));
        assert_eq!(set.edges[0].snap_to, 100.0);
        assert_eq!(set.edges[1].distance, 0.0);
        assert_eq!(set.edges[1].snap_to, 0.0);
        assert!(!set.edges[0].needs_extension());
        // Horizontally disjoint, so the top edge is bridged back to the reference.
        assert_eq!(set.edges[1].extension, Some(Line::new((200.0, 0.0), (50.0, 0.0))));
    }

    #[test]
    fn test_right_of_reference() {
        let dragged = Rect::new(400.0, 30.0, 500.0, 130.0);
        let set = compute_edges(dragged, &reference(200.0, 0.0, 300.0, 100.0));

        assert_eq!(set.edges[0].kind, EdgeKind::Right);
        assert_eq!(set.edges[0].distance, 100.0);
        assert_eq!(set.edges[0].snap_to, 300.0);
        // Top gap 30 beats bottom gap 70.
        assert_eq!(set.edges[1].kind, EdgeKind::Top);
        assert_eq!(set.edges[1].distance, 30.0);
    }

    #[test]
    fn test_supplement_picks_bottom_when_nearer() {
        let dragged = Rect::new(0.0, 90.0, 100.0, 190.0);
        let set = compute_edges(dragged, &reference(200.0, 0.0, 300.0, 100.0));

        assert_eq!(set.edges[1].kind, EdgeKind::Bottom);
        assert_eq!(set.edges[1].distance, 10.0);
        assert_eq!(set.edges[1].snap_to, 100.0);
    }

    #[test]
    fn test_vertically_disjoint_supplements_horizontal() {
        let dragged = Rect::new(10.0, 0.0, 110.0, 50.0);
        let set = compute_edges(dragged, &reference(0.0, 100.0, 200.0, 200.0));

        assert_eq!(kinds(&set), [EdgeKind::Top, EdgeKind::Left]);
        assert_eq!(set.edges[0].distance, 50.0);
        assert_eq!(set.edges[0].snap_to, 50.0);
        assert_eq!(set.edges[1].distance, 10.0);
        assert_eq!(set.edges[1].snap_to, 0.0);
    }

    #[test]
    fn test_vertically_disjoint_supplements_right() {
        // Above the reference with the dragged left edge just inside its right edge.
        let dragged = Rect::new(190.0, 0.0, 290.0, 50.0);
        let set = compute_edges(dragged, &reference(0.0, 100.0, 200.0, 200.0));

        assert_eq!(kinds(&set), [EdgeKind::Top, EdgeKind::Right]);
        assert_eq!(set.edges[0].distance, 50.0);
        assert_eq!(set.edges[0].extension, None);

        let right = set.edges[1];
        assert_eq!(right.distance, 10.0);
        assert_eq!(right.snap_to, 200.0);
        assert_eq!(right.line, Line::new((190.0, 25.0), (200.0, 25.0)));
        assert_eq!(right.extension, Some(Line::new((200.0, 100.0), (200.0, 25.0))));
    }

    #[test]
    fn test_below_reference() {
        let dragged = Rect::new(0.0, 300.0, 100.0, 400.0);
        let set = compute_edges(dragged, &reference(0.0, 0.0, 100.0, 250.0));

        assert_eq!(set.edges[0].kind, EdgeKind::Bottom);
        assert_eq!(set.edges[0].distance, 50.0);
        assert_eq!(set.edges[0].line, Line::new((50.0, 300.0), (50.0, 250.0)));
        assert_eq!(set.edges[0].snap_to, 250.0);
    }

    #[test]
    fn test_nested_falls_back_to_left_top() {
        let dragged = Rect::new(50.0, 50.0, 150.0, 150.0);
        let set = compute_edges(dragged, &reference(0.0, 0.0, 300.0, 300.0));

        assert_eq!(kinds(&set), [EdgeKind::Left, EdgeKind::Top]);
        assert_eq!(set.edges[0].distance, 50.0);
        assert_eq!(set.edges[1].distance, 50.0);
        assert!(set.iter().all(|e| !e.needs_extension()));
    }

    #[test]
    fn test_container_falls_back_to_left_top() {
        // Dragged contains the reference.
        let dragged = Rect::new(0.0, 0.0, 300.0, 300.0);
        let set = compute_edges(dragged, &reference(20.0, 70.0, 40.0, 90.0));

        assert_eq!(kinds(&set), [EdgeKind::Left, EdgeKind::Top]);
        assert_eq!(set.edges[0].distance, 20.0);
        assert_eq!(set.edges[1].distance, 70.0);
    }

    #[test]
    fn test_partial_overlap_falls_back() {
        let dragged = Rect::new(80.0, 60.0, 180.0, 160.0);
        let set = compute_edges(dragged, &reference(0.0, 0.0, 100.0, 100.0));
        assert_eq!(kinds(&set), [EdgeKind::Left, EdgeKind::Top]);
        assert_eq!(set.edges[0].distance, 80.0);
        assert_eq!(set.edges[1].distance, 60.0);
    }

    #[test]
    fn test_diagonal_both_edges_extend() {
        // Dragged above-left of the reference, disjoint on both axes.
        let dragged = Rect::new(0.0, 0.0, 100.0, 100.0);
        let set = compute_edges(dragged, &reference(200.0, 200.0, 300.0, 300.0));

        assert_eq!(kinds(&set), [EdgeKind::Left, EdgeKind::Top]);

        let left = set.edges[0];
        assert_eq!(left.distance, 100.0);
        // Vertical dash from the reference's top up to the midline.
        assert_eq!(left.extension, Some(Line::new((200.0, 200.0), (200.0, 50.0))));

        let top = set.edges[1];
        assert_eq!(top.distance, 100.0);
        // Horizontal dash from the reference's left to the midline.
        assert_eq!(top.extension, Some(Line::new((200.0, 200.0), (50.0, 200.0))));
    }

    #[test]
    fn test_extension_anchors_to_reference_bottom_when_below() {
        let dragged = Rect::new(500.0, 400.0, 600.0, 500.0);
        let set = compute_edges(dragged, &reference(0.0, 0.0, 100.0, 100.0));

        let right = set.horizontal().unwrap();
        assert_eq!(right.kind, EdgeKind::Right);
        assert_eq!(right.extension, Some(Line::new((100.0, 100.0), (100.0, 450.0))));

        let bottom = set.vertical().unwrap();
        assert_eq!(bottom.kind, EdgeKind::Bottom);
        assert_eq!(bottom.extension, Some(Line::new((100.0, 100.0), (550.0, 100.0))));
    }

    #[test]
    fn test_supplement_edge_extends_when_offset() {
        // Above the reference and horizontally overlapping, so only the
        // supplemented horizontal edge could need an extension. It does,
        // because the rects do not overlap vertically.
        let dragged = Rect::new(20.0, 0.0, 120.0, 50.0);
        let set = compute_edges(dragged, &reference(0.0, 100.0, 200.0, 200.0));

        assert!(!set.edges[0].needs_extension());
        let left = set.edges[1];
        assert_eq!(left.kind, EdgeKind::Left);
        assert_eq!(left.extension, Some(Line::new((0.0, 100.0), (0.0, 25.0))));
    }

    #[test]
    fn test_distances_never_negative() {
        let reference = reference(100.0, 100.0, 200.0, 200.0);
        for x in (-200..=400).step_by(37) {
            for y in (-200..=400).step_by(41) {
                let (x, y) = (x as f64, y as f64);
                let dragged = Rect::new(x, y, x + 60.0, y + 30.0);
                let set = compute_edges(dragged, &reference);
                assert!(set.iter().all(|e| e.distance >= 0.0), "{dragged:?}");
                let h = set.iter().filter(|e| e.kind.axis() == Axis::Horizontal).count();
                assert_eq!(h, 1, "exactly one edge per axis for {dragged:?}");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let dragged = Rect::new(13.25, 7.5, 91.0, 66.0);
        let reference = reference(140.0, 180.5, 260.0, 230.0);
        let a = compute_edges(dragged, &reference);
        let b = compute_edges(dragged, &reference);
        assert_eq!(a, b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.distance.to_bits(), y.distance.to_bits());
            assert_eq!(x.snap_to.to_bits(), y.snap_to.to_bits());
        }
    }

    #[test]
    fn test_compute_edge_set_uses_nearest() {
        let dragged = Rect::new(0.0, 0.0, 100.0, 100.0);
        let near = reference(150.0, 0.0, 250.0, 100.0);
        let far = reference(0.0, 900.0, 100.0, 1000.0);

        let set = compute_edge_set(dragged, &[far, near]).unwrap();
        assert_eq!(set.reference, near.id);
        assert!(compute_edge_set(dragged, &[]).is_none());
    }

    #[test]
    fn test_label() {
        let dragged = Rect::new(0.0, 0.0, 100.0, 100.0);
        let set = compute_edges(dragged, &reference(112.6, 0.0, 200.0, 100.0));
        assert_eq!(set.edges[0].rounded_distance(), 13);
        assert_eq!(set.edges[0].label(), "13px");
    }

    #[test]
    fn test_edge_set_json_shape() {
        let dragged = Rect::new(0.0, 0.0, 100.0, 100.0);
        let set = compute_edges(dragged, &reference(200.0, 0.0, 300.0, 100.0));
        let json = serde_json::to_value(set).unwrap();
        assert_eq!(json["edges"][0]["kind"], "left");
        assert_eq!(json["edges"][1]["kind"], "top");
        assert!(json["edges"][0]["extension"].is_null());
    }
}
