use super::{ForceModel, settle};
use crate::algo::ForceConfig;
use crate::graph::{Graph, Point};

const UNIT_MOMENT: f64 = 1.0;

/// Edge-anchor model: vertices feel every other vertex plus one anchor point per edge, all
/// with unit moments.
///
/// The anchor of an edge is the point on it closest to the vertex being moved, so vertices are
/// pushed off edges they would otherwise sit on.
#[derive(Debug, Clone, Default)]
pub struct EdgeAnchorModel {
    edges: Vec<(usize, usize)>,
}

impl EdgeAnchorModel {
    pub fn new(edges: Vec<(usize, usize)>) -> Self {
        Self { edges }
    }

    pub fn from_graph(graph: &Graph) -> Self {
        Self::new(graph.edges())
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl ForceModel for EdgeAnchorModel {
    fn step(&self, positions: &[Point], config: &ForceConfig) -> Vec<Point> {
        let segments: Vec<(Point, Point)> = self
            .edges
            .iter()
            .filter_map(|&(a, b)| Some((*positions.get(a)?, *positions.get(b)?)))
            .collect();
        if segments.len() != self.edges.len() {
            tracing::debug!(
                skipped = self.edges.len() - segments.len(),
                "edges with endpoints outside the position list were ignored"
            );
        }

        positions
            .iter()
            .enumerate()
            .map(|(i, &object)| {
                let vertices = positions
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &p)| (p, UNIT_MOMENT));
                let anchors = segments
                    .iter()
                    .map(|&(a, b)| (anchor_point(a, b, object), UNIT_MOMENT));
                settle(object, UNIT_MOMENT, vertices.chain(anchors), config)
            })
            .collect()
    }
}

/// Foot of the perpendicular from `p` to the line through `a` and `b`, clamped to the
/// segment's bounding box.
pub fn anchor_point(a: Point, b: Point, p: Point) -> Point {
    let ex = b.x - a.x;
    let ey = b.y - a.y;
    let len2 = ex * ex + ey * ey;
    let foot = if len2 == 0.0 {
        a
    } else {
        let t = ((p.x - a.x) * ex + (p.y - a.y) * ey) / len2;
        Point::new(a.x + t * ex, a.y + t * ey)
    };
    Point::new(
        clamp(foot.x, a.x.min(b.x), a.x.max(b.x)),
        clamp(foot.y, a.y.min(b.y), a.y.max(b.y)),
    )
}

// `f64::clamp` panics on NaN bounds; a diverged simulation should keep running.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
