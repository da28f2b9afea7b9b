//! Brightness decay laws for the parallel-light mask.

use serde::{Deserialize, Serialize};

/// How brightness falls off with distance from the light-source row.
///
/// Resolved at construction; the per-row fill loop only ever sees a
/// concrete variant, never a mode string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DecayMode {
    /// Normal-distribution falloff with sigma of one third of the mask
    /// height, rescaled between the configured min and max brightness.
    Gaussian,
    /// Fixed-rate linear falloff. A `rate` of `None` samples one
    /// uniformly from `[0.2, 2]` per generated mask.
    LinearStatic { rate: Option<f32> },
    /// Linear falloff with the rate derived from the brightness span
    /// over the longer mask side.
    LinearDynamic,
}

/// Gaussian falloff at `row`, as the pdf ratio against the center row.
///
/// The normalization constant cancels in the ratio, leaving a plain
/// exponential in the squared distance.
pub(crate) fn gaussian(row: f32, center: f32, max: f32, min: f32, span: f32) -> f32 {
    let sigma = span / 3.0;
    let d = row - center;
    let ratio = (-(d * d) / (2.0 * sigma * sigma)).exp();
    ratio * (max - min) + min
}

/// Linear falloff at `row`. Values that would go negative clamp to 1,
/// not 0, so a fully decayed region stays barely lit rather than black.
pub(crate) fn linear(row: f32, center: f32, max: f32, rate: f32) -> f32 {
    let v = max - (center - row).abs() * rate;
    if v < 0.0 {
        1.0
    } else {
        v
    }
}
