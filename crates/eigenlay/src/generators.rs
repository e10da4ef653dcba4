//! Small graph builders for demos, benches and tests.

use nalgebra::DMatrix;

use crate::graph::Graph;

/// Probability of an edge between any two distinct vertices in [`random_graph`].
pub const DEFAULT_CONNECTION_CHANCE: f64 = 0.3;

/// The 3-cube: 8 vertices, 12 edges.
pub fn cube() -> Graph {
    const CUBE: [[u8; 8]; 8] = [
        [0, 1, 0, 1, 1, 0, 0, 0],
        [1, 0, 1, 0, 0, 1, 0, 0],
        [0, 1, 0, 1, 0, 0, 1, 0],
        [1, 0, 1, 0, 0, 0, 0, 1],
        [1, 0, 0, 0, 0, 1, 0, 1],
        [0, 1, 0, 0, 1, 0, 1, 0],
        [0, 0, 1, 0, 0, 1, 0, 1],
        [0, 0, 0, 1, 1, 0, 1, 0],
    ];
    let adjacency = DMatrix::from_fn(8, 8, |i, j| f64::from(CUBE[i][j]));
    Graph::from_adjacency(adjacency).expect("cube adjacency is square")
}

/// `0 - 1 - ... - (n - 1)`.
pub fn path(n: usize) -> Graph {
    let adjacency = DMatrix::from_fn(n, n, |i, j| if i.abs_diff(j) == 1 { 1.0 } else { 0.0 });
    Graph::from_adjacency(adjacency).expect("path adjacency is square")
}

/// Symmetric 0/1 graph without self-loops; each pair is connected with probability
/// `connection_chance`. The same seed always yields the same graph.
pub fn random_graph(size: usize, connection_chance: f64, seed: u64) -> Graph {
    let mut rng = XorShift64Star::new(seed);
    let mut adjacency = DMatrix::<f64>::zeros(size, size);
    for i in 0..size {
        for j in (i + 1)..size {
            if rng.next_f64_unit() < connection_chance {
                adjacency[(i, j)] = 1.0;
                adjacency[(j, i)] = 1.0;
            }
        }
    }
    Graph::from_adjacency(adjacency).expect("random adjacency is square")
}

#[derive(Debug, Clone)]
struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    fn next_f64_unit(&mut self) -> f64 {
        // Map to [0, 1) with 53 bits of precision.
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}
