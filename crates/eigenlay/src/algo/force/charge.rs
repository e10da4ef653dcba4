use super::{ForceModel, settle};
use crate::algo::ForceConfig;
use crate::graph::{Graph, Point};

/// Signed-charge model: every vertex carries a moment and feels every other vertex.
#[derive(Debug, Clone, Default)]
pub struct ChargeModel {
    moments: Vec<f64>,
}

impl ChargeModel {
    /// Moments are index-aligned with the positions passed to [`ForceModel::step`]; missing
    /// entries behave like zero (and therefore like 1).
    pub fn new(moments: Vec<f64>) -> Self {
        Self { moments }
    }

    /// Uses vertex degrees as moments, so hubs push harder.
    pub fn from_graph(graph: &Graph) -> Self {
        Self::new(graph.degrees())
    }

    pub fn moments(&self) -> &[f64] {
        &self.moments
    }

    fn moment(&self, index: usize) -> f64 {
        self.moments.get(index).copied().unwrap_or(0.0)
    }
}

impl ForceModel for ChargeModel {
    fn step(&self, positions: &[Point], config: &ForceConfig) -> Vec<Point> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &object)| {
                let sources = positions
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(j, &p)| (p, self.moment(j)));
                settle(object, self.moment(i), sources, config)
            })
            .collect()
    }
}
