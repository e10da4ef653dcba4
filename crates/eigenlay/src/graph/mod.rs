use nalgebra::DMatrix;
use serde::Serialize;

use crate::algo::SpectralOptions;
use crate::algo::spectral::{self, Spectrum};
use crate::error::{Error, Result};

mod shared;

pub use shared::SharedGraph;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Outcome of [`Graph::add_vertex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedVertex {
    /// Index of the new vertex (always the previous vertex count).
    pub index: usize,
    /// Connection indices that were out of bounds and therefore skipped.
    pub rejected: Vec<usize>,
}

/// Undirected graph stored as a dense adjacency matrix, with lazily computed spectral
/// coordinates.
///
/// Every structural mutation marks the cached coordinates stale; [`Graph::coordinates`]
/// recomputes them on the next read.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: DMatrix<f64>,
    options: SpectralOptions,
    dirty: bool,
    coordinates: Vec<Point>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            adjacency: DMatrix::zeros(0, 0),
            options: SpectralOptions::default(),
            dirty: true,
            coordinates: Vec::new(),
        }
    }

    pub fn from_adjacency(adjacency: DMatrix<f64>) -> Result<Self> {
        if adjacency.nrows() != adjacency.ncols() {
            return Err(Error::NotSquare {
                rows: adjacency.nrows(),
                cols: adjacency.ncols(),
            });
        }
        Ok(Self {
            adjacency,
            ..Self::new()
        })
    }

    /// Builds a graph from row slices, e.g. `&[vec![0.0, 1.0], vec![1.0, 0.0]]`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|r| r.len() != n) {
            return Err(Error::NotSquare {
                rows: n,
                cols: row.len(),
            });
        }
        Self::from_adjacency(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
    }

    pub fn size(&self) -> usize {
        self.adjacency.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn adjacency(&self) -> &DMatrix<f64> {
        &self.adjacency
    }

    /// True when the adjacency changed since coordinates were last computed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn layout_options(&self) -> &SpectralOptions {
        &self.options
    }

    pub fn set_layout_options(&mut self, options: SpectralOptions) {
        if self.options != options {
            self.options = options;
            self.dirty = true;
        }
    }

    /// Appends a vertex connected to each index in `connections`.
    ///
    /// Indices that do not name an existing vertex are logged, returned in
    /// [`AddedVertex::rejected`] and skipped; the vertex itself is always added.
    pub fn add_vertex(&mut self, connections: &[usize], self_loop: bool) -> AddedVertex {
        let index = self.size();
        let adjacency = std::mem::replace(&mut self.adjacency, DMatrix::zeros(0, 0));
        let mut adjacency = adjacency.insert_column(index, 0.0).insert_row(index, 0.0);

        let mut rejected = Vec::new();
        for &c in connections {
            if c >= index {
                let err = Error::OutOfBounds {
                    index: c,
                    size: index,
                };
                tracing::warn!(vertex = index, "skipping connection: {err}");
                rejected.push(c);
                continue;
            }
            adjacency[(index, c)] = 1.0;
            adjacency[(c, index)] = 1.0;
        }
        adjacency[(index, index)] = if self_loop { 1.0 } else { 0.0 };

        self.adjacency = adjacency;
        self.dirty = true;
        AddedVertex { index, rejected }
    }

    /// Deletes a vertex. Every vertex above `index` shifts down by one.
    pub fn remove_vertex(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let adjacency = std::mem::replace(&mut self.adjacency, DMatrix::zeros(0, 0));
        self.adjacency = adjacency.remove_row(index).remove_column(index);
        self.dirty = true;
        Ok(())
    }

    /// Sets the symmetric entry between `a` and `b`; a weight of 0 removes the edge.
    pub fn set_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.adjacency[(a, b)] = weight;
        self.adjacency[(b, a)] = weight;
        self.dirty = true;
        Ok(())
    }

    /// The adjacency row of `index`: one entry per vertex, nonzero where connected.
    pub fn connections(&self, index: usize) -> Result<Vec<f64>> {
        self.check_index(index)?;
        Ok(self.adjacency.row(index).iter().copied().collect())
    }

    /// Vertices connected to `index`, excluding a self-loop.
    pub fn neighbors(&self, index: usize) -> Result<Vec<usize>> {
        self.check_index(index)?;
        Ok((0..self.size())
            .filter(|&j| j != index && self.adjacency[(index, j)] != 0.0)
            .collect())
    }

    /// Each undirected edge once, as `(low, high)`. Self-loops are not edges here.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.size();
        let mut out = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.adjacency[(i, j)] != 0.0 || self.adjacency[(j, i)] != 0.0 {
                    out.push((i, j));
                }
            }
        }
        out
    }

    /// Row sums (the Laplacian degree term), usable as charge-model moments.
    pub fn degrees(&self) -> Vec<f64> {
        self.adjacency
            .row_iter()
            .map(|row| row.iter().sum())
            .collect()
    }

    pub fn spectrum(&self) -> Result<Spectrum> {
        spectral::decompose(&self.adjacency)
    }

    /// Spectral coordinates, recomputed only when the graph is dirty.
    ///
    /// An empty graph yields an empty set. A solver failure leaves the graph dirty so the next
    /// call retries.
    pub fn coordinates(&mut self) -> Result<&[Point]> {
        if self.dirty {
            self.coordinates = match spectral::layout(&self.adjacency, &self.options) {
                Ok(points) => points,
                Err(Error::EmptyGraph) => {
                    tracing::warn!("{}", Error::EmptyGraph);
                    Vec::new()
                }
                Err(err) => return Err(err),
            };
            self.dirty = false;
        }
        Ok(&self.coordinates)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let size = self.size();
        if index >= size {
            let err = Error::OutOfBounds { index, size };
            tracing::warn!("{err}");
            return Err(err);
        }
        Ok(())
    }
}
