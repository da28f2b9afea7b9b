//! Ready-made augmentation profiles.

use crate::error::AugmentError;
use crate::pipeline::{OneOf, Pipeline};
use crate::stages::{
    Brightness, BrightnessConfig, Grayscale, JpegArtifacts, JpegConfig, LightingShadow,
    LightingShadowConfig, SubtleNoise, SubtleNoiseConfig,
};

/// The flatbed-scanner profile.
///
/// Per image: either a directional lighting shadow or a global
/// brightness shift (fair pick), a touch of sensor noise, a collapse to
/// mono, and a 50% chance of a lossy JPEG round-trip.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use scanforge::{presets, Raster};
///
/// let pipeline = presets::scanner().unwrap();
/// let page = Raster::filled(64, 48, 3, 235);
/// let mut rng = StdRng::seed_from_u64(1);
/// let run = pipeline.run(&mut rng, &page).unwrap();
/// assert_eq!(run.image.channels(), 3);
/// ```
pub fn scanner() -> Result<Pipeline, AugmentError> {
    let shadow_or_brightness = OneOf::new(vec![
        Box::new(LightingShadow::new(LightingShadowConfig::default())?),
        Box::new(Brightness::new(BrightnessConfig {
            range: (0.8, 1.4),
            p: 1.0,
        })?),
    ])?;

    Ok(Pipeline::new(vec![
        Box::new(shadow_or_brightness),
        Box::new(SubtleNoise::new(SubtleNoiseConfig { range: 5, p: 1.0 })?),
        Box::new(Grayscale::new(1.0)?),
        Box::new(JpegArtifacts::new(JpegConfig {
            quality_range: (50, 95),
            p: 0.5,
        })?),
    ]))
}
