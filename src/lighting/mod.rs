//! Directional light-mask synthesis.
//!
//! Produces the uneven-illumination fields used by the lighting-shadow
//! stage: a strip light with a configurable falloff law, rotated to an
//! arbitrary direction and returned as an invertible shadow mask.

mod decay;
mod mask;
mod median;

pub use decay::DecayMode;
pub use mask::{LightMaskConfig, LightMaskSynthesizer};
