#![forbid(unsafe_code)]

//! Spectral graph layout with an optional magnetic force overlay.
//!
//! `eigenlay` places the vertices of an undirected graph using two eigenvectors of its
//! Laplacian, then lets a driver nudge the resulting points with a pairwise inverse-square
//! force simulation, one tick at a time.

pub mod algo;
pub mod error;
pub mod generators;
pub mod graph;

pub use algo::force::{ChargeModel, EdgeAnchorModel, ForceModel, force_step, simulate};
pub use algo::spectral::{Axes, Spectrum};
pub use algo::{AxisChoice, ForceConfig, Polarity, SpectralOptions};
pub use error::{Error, Result};
pub use graph::{AddedVertex, Graph, Point, SharedGraph};

/// Headless layout entry point: spectral coordinates for a raw adjacency matrix.
pub fn layout(
    adjacency: &nalgebra::DMatrix<f64>,
    opts: &SpectralOptions,
) -> Result<Vec<Point>> {
    algo::spectral::layout(adjacency, opts)
}
