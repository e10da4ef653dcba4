pub mod force;
pub mod spectral;

use serde::Deserialize;

/// Digits eigenvalues are rounded to before looking for the two smallest positive ones.
pub const DEFAULT_ROUND_DIGITS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AxisChoice {
    /// Use the eigenvectors of the two smallest strictly positive eigenvalues.
    #[default]
    Auto,
    /// Use explicit eigenvector columns, in solver order. Lets a driver cycle through the
    /// spectrum one axis at a time.
    Pinned { x: usize, y: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpectralOptions {
    /// Near-zero eigenvalues are numerically noisy; rounding keeps them out of the positive
    /// set so the connected-component eigenvectors are never picked as axes.
    pub round_digits: u32,
    pub axes: AxisChoice,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            round_digits: DEFAULT_ROUND_DIGITS,
            axes: AxisChoice::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Like poles: points push each other apart.
    #[default]
    Repel,
    /// Opposite poles: points pull together.
    Attract,
}

impl Polarity {
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Repel => 1.0,
            Polarity::Attract => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Scales every force. Lower permeability means a weaker field.
    pub permeability: f64,
    pub polarity: Polarity,
    /// Applied to each moment after zero moments are replaced with 1.
    pub moment_multiplier: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            permeability: 0.03,
            polarity: Polarity::Repel,
            moment_multiplier: 0.2,
        }
    }
}

/// Rounds half away from zero to `digits` decimal places.
pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits.min(15) as i32);
    (value * scale).round() / scale
}
