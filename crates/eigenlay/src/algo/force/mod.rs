//! Pairwise magnetic force overlay.
//!
//! Every model is stateless: a tick reads the previous positions and returns new ones, so the
//! caller owns the simulation state and decides when to tick. Models never touch a [`Graph`]
//! or its cached layout.
//!
//! [`Graph`]: crate::graph::Graph

use std::f64::consts::PI;

use super::{ForceConfig, round_to};
use crate::graph::Point;

mod anchor;
mod charge;

pub use anchor::{EdgeAnchorModel, anchor_point};
pub use charge::ChargeModel;

const DENOMINATOR_ROUND_DIGITS: u32 = 6;
const FALLBACK_DENOMINATOR_FACTOR: f64 = 5.0;
const ZERO_DISTANCE_FALLBACK: f64 = 0.001;

/// One tick of a force simulation.
pub trait ForceModel {
    /// Positions for the next tick. Every displacement is computed from `positions` as given,
    /// never from points already moved during the same tick.
    fn step(&self, positions: &[Point], config: &ForceConfig) -> Vec<Point>;
}

impl<M: ForceModel + ?Sized> ForceModel for Box<M> {
    fn step(&self, positions: &[Point], config: &ForceConfig) -> Vec<Point> {
        (**self).step(positions, config)
    }
}

pub fn force_step<M: ForceModel + ?Sized>(
    positions: &[Point],
    model: &M,
    config: &ForceConfig,
) -> Vec<Point> {
    model.step(positions, config)
}

/// Runs `ticks` consecutive steps.
pub fn simulate<M: ForceModel + ?Sized>(
    positions: &[Point],
    model: &M,
    config: &ForceConfig,
    ticks: usize,
) -> Vec<Point> {
    let mut current = positions.to_vec();
    for _ in 0..ticks {
        current = model.step(&current, config);
    }
    current
}

/// Displacement `object` receives from `source`: `k * m1 * m2 / (4 * pi * r^3)` along the
/// direction from `source` to `object`.
///
/// Zero moments count as 1. A denominator that rounds to zero at six digits is replaced with
/// `5 * k`; coincident points contribute nothing.
pub fn displacement(
    object: Point,
    source: Point,
    m1: f64,
    m2: f64,
    config: &ForceConfig,
) -> (f64, f64) {
    let m1 = effective_moment(m1, config);
    let m2 = effective_moment(m2, config);

    let dx = object.x - source.x;
    let dy = object.y - source.y;
    let r = dx.hypot(dy);

    let mut denominator = 4.0 * PI * r.powi(3);
    if round_to(denominator, DENOMINATOR_ROUND_DIGITS) == 0.0 {
        denominator = FALLBACK_DENOMINATOR_FACTOR * config.permeability;
    }
    if denominator == 0.0 {
        return (0.0, 0.0);
    }
    let magnitude = config.permeability * m1 * m2 / denominator;

    let r = if r != 0.0 { r } else { ZERO_DISTANCE_FALLBACK };
    let scale = config.polarity.sign() * magnitude / r;
    (scale * dx, scale * dy)
}

fn effective_moment(moment: f64, config: &ForceConfig) -> f64 {
    let moment = if moment == 0.0 { 1.0 } else { moment };
    moment * config.moment_multiplier
}

/// Sums the displacement from every source and applies it to `object`.
fn settle(
    object: Point,
    moment: f64,
    sources: impl IntoIterator<Item = (Point, f64)>,
    config: &ForceConfig,
) -> Point {
    let (mut dx, mut dy) = (0.0, 0.0);
    for (source, source_moment) in sources {
        let (fx, fy) = displacement(object, source, moment, source_moment, config);
        dx += fx;
        dy += fy;
    }
    Point::new(object.x + dx, object.y + dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::Polarity;

    #[test]
    fn repel_pushes_away_and_attract_pulls_in() {
        let object = Point::new(1.0, 0.0);
        let source = Point::new(0.0, 0.0);

        let (fx, fy) = displacement(object, source, 1.0, 1.0, &ForceConfig::default());
        assert!(fx > 0.0);
        assert_eq!(fy, 0.0);

        let attract = ForceConfig {
            polarity: Polarity::Attract,
            ..Default::default()
        };
        let (fx, _) = displacement(object, source, 1.0, 1.0, &attract);
        assert!(fx < 0.0);
    }

    #[test]
    fn magnitude_follows_the_inverse_cube_law() {
        let config = ForceConfig::default();
        let (fx, _) = displacement(Point::new(2.0, 0.0), Point::default(), 1.0, 1.0, &config);
        let m = 0.2;
        let expected = config.permeability * m * m / (4.0 * PI * 8.0);
        assert!((fx - expected).abs() < 1e-15);
    }

    #[test]
    fn zero_moment_counts_as_one() {
        let config = ForceConfig::default();
        let a = displacement(Point::new(1.0, 1.0), Point::default(), 0.0, 1.0, &config);
        let b = displacement(Point::new(1.0, 1.0), Point::default(), 1.0, 1.0, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn near_coincident_points_use_the_fallback_denominator() {
        let config = ForceConfig::default();
        let (fx, fy) = displacement(Point::new(1e-4, 0.0), Point::default(), 1.0, 1.0, &config);
        let m = 0.2;
        let expected = config.permeability * m * m / (5.0 * config.permeability);
        assert!((fx - expected).abs() < 1e-12);
        assert_eq!(fy, 0.0);
    }

    #[test]
    fn coincident_points_contribute_nothing() {
        let p = Point::new(0.3, -0.2);
        assert_eq!(displacement(p, p, 1.0, 1.0, &ForceConfig::default()), (0.0, 0.0));
    }

    #[test]
    fn zero_permeability_is_inert() {
        let config = ForceConfig {
            permeability: 0.0,
            ..Default::default()
        };
        let p = Point::new(0.5, 0.5);
        assert_eq!(displacement(p, Point::new(0.5, 0.5), 1.0, 1.0, &config), (0.0, 0.0));
        assert_eq!(displacement(p, Point::default(), 1.0, 1.0, &config), (0.0, 0.0));
    }
}
