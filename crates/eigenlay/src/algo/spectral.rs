use nalgebra::{DMatrix, DVector, SymmetricEigen};
use serde::Serialize;

use super::{AxisChoice, SpectralOptions, round_to};
use crate::error::{Error, Result};
use crate::graph::Point;

const MAX_SOLVER_ITERATIONS: usize = 10_000;

/// Eigenvector columns used for the x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Axes {
    pub x: usize,
    pub y: usize,
}

/// Eigen-decomposition of a graph Laplacian, in solver order (not sorted).
#[derive(Debug, Clone)]
pub struct Spectrum {
    eigenvalues: DVector<f64>,
    eigenvectors: DMatrix<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    pub fn eigenvalues(&self) -> &[f64] {
        self.eigenvalues.as_slice()
    }

    /// Eigenvectors stored column-wise; column `i` belongs to `eigenvalues()[i]`.
    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    pub fn axes(&self, opts: &SpectralOptions) -> Result<Axes> {
        match opts.axes {
            AxisChoice::Auto => Ok(select_axes(self.eigenvalues(), opts.round_digits)),
            AxisChoice::Pinned { x, y } => {
                let axes = Axes { x, y };
                self.check_axes(axes)?;
                Ok(axes)
            }
        }
    }

    /// Vertex `i` lands at `(v_x[i], v_y[i])`. Values are not rescaled.
    pub fn project(&self, axes: Axes) -> Result<Vec<Point>> {
        self.check_axes(axes)?;
        let n = self.len();
        if n == 1 {
            // The only eigenvector of a 1x1 Laplacian is `[±1]`; a lone vertex sits at the origin.
            return Ok(vec![Point::default()]);
        }
        let xs = self.eigenvectors.column(axes.x);
        let ys = self.eigenvectors.column(axes.y);
        Ok((0..n).map(|i| Point::new(xs[i], ys[i])).collect())
    }

    fn check_axes(&self, axes: Axes) -> Result<()> {
        let size = self.len();
        for index in [axes.x, axes.y] {
            if index >= size {
                return Err(Error::AxisOutOfRange { index, size });
            }
        }
        Ok(())
    }
}

/// `L = D - A`, where `D` holds the row sums of `A` on its diagonal.
pub fn laplacian(adjacency: &DMatrix<f64>) -> DMatrix<f64> {
    let mut l = -adjacency.clone();
    for i in 0..adjacency.nrows() {
        let degree: f64 = adjacency.row(i).iter().sum();
        l[(i, i)] += degree;
    }
    l
}

pub fn decompose(adjacency: &DMatrix<f64>) -> Result<Spectrum> {
    let n = adjacency.nrows();
    if adjacency.ncols() != n {
        return Err(Error::NotSquare {
            rows: n,
            cols: adjacency.ncols(),
        });
    }
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    let mut l = laplacian(adjacency);
    if !is_symmetric(&l) {
        // `SymmetricEigen` only reads one triangle; solve the symmetric part explicitly
        // instead of silently dropping half of a directed matrix.
        tracing::warn!(size = n, "Laplacian is not symmetric; using its symmetric part");
        l = (&l + l.transpose()) * 0.5;
    }

    let eigen = SymmetricEigen::try_new(l, f64::EPSILON, MAX_SOLVER_ITERATIONS)
        .ok_or(Error::SolverFailure { size: n })?;
    Ok(Spectrum {
        eigenvalues: eigen.eigenvalues,
        eigenvectors: eigen.eigenvectors,
    })
}

/// Picks the eigenvectors of the two smallest strictly positive eigenvalues after rounding.
///
/// Equal rounded values keep solver order. With a single positive eigenvalue both axes share
/// it; with none (edgeless graphs) both fall back to column 0.
pub fn select_axes(eigenvalues: &[f64], round_digits: u32) -> Axes {
    let mut lowest: [Option<(usize, f64)>; 2] = [None, None];
    for (i, &value) in eigenvalues.iter().enumerate() {
        let rounded = round_to(value, round_digits);
        // Also rejects NaN.
        if !(rounded > 0.0) {
            continue;
        }
        if lowest[0].is_none_or(|(_, v)| rounded < v) {
            lowest[1] = lowest[0];
            lowest[0] = Some((i, rounded));
        } else if lowest[1].is_none_or(|(_, v)| rounded < v) {
            lowest[1] = Some((i, rounded));
        }
    }

    match lowest {
        [Some((x, _)), Some((y, _))] => Axes { x, y },
        [Some((x, _)), None] => Axes { x, y: x },
        _ => Axes { x: 0, y: 0 },
    }
}

pub fn layout(adjacency: &DMatrix<f64>, opts: &SpectralOptions) -> Result<Vec<Point>> {
    let spectrum = decompose(adjacency)?;
    let axes = spectrum.axes(opts)?;
    tracing::debug!(
        size = spectrum.len(),
        x = axes.x,
        y = axes.y,
        "spectral layout axes selected"
    );
    spectrum.project(axes)
}

fn is_symmetric(m: &DMatrix<f64>) -> bool {
    let n = m.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| m[(i, j)] == m[(j, i)]))
}
