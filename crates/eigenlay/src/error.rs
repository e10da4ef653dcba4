#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex index {index} is out of bounds for a graph of {size} vertices")]
    OutOfBounds { index: usize, size: usize },

    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("cannot lay out a graph with no vertices")]
    EmptyGraph,

    #[error("eigenvector index {index} is out of range for a graph of {size} vertices")]
    AxisOutOfRange { index: usize, size: usize },

    #[error("eigen-decomposition of the {size}x{size} Laplacian did not converge")]
    SolverFailure { size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
