//! Subtle per-pixel noise stage.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{check_probability, AugmentError};
use crate::pipeline::Augmentation;
use crate::raster::Raster;

/// Parameters for [`SubtleNoise`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubtleNoiseConfig {
    /// Maximum absolute per-sample jitter.
    pub range: i16,
    /// Stage probability.
    pub p: f32,
}

impl Default for SubtleNoiseConfig {
    fn default() -> Self {
        Self { range: 10, p: 1.0 }
    }
}

/// Adds independent uniform jitter in `[-range, range]` to every sample,
/// emulating sensor noise over solid fills.
pub struct SubtleNoise {
    config: SubtleNoiseConfig,
}

impl SubtleNoise {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for a negative range or a
    /// bad probability.
    pub fn new(config: SubtleNoiseConfig) -> Result<Self, AugmentError> {
        check_probability(config.p)?;
        if config.range < 0 {
            return Err(AugmentError::InvalidConfiguration(format!(
                "noise range must be non-negative, got {}",
                config.range
            )));
        }
        Ok(Self { config })
    }
}

impl Augmentation for SubtleNoise {
    fn name(&self) -> &'static str {
        "subtle_noise"
    }

    fn probability(&self) -> f32 {
        self.config.p
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let range = self.config.range;
        let mut out = image.clone();
        if range == 0 {
            return Ok(out);
        }
        for v in out.data_mut() {
            let jitter = rng.gen_range(-range..=range);
            *v = (*v as i16 + jitter).clamp(0, 255) as u8;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_negative_range() {
        assert!(SubtleNoise::new(SubtleNoiseConfig { range: -1, p: 1.0 }).is_err());
    }

    #[test]
    fn test_jitter_bounded_by_range() {
        let stage = SubtleNoise::new(SubtleNoiseConfig { range: 5, p: 1.0 }).unwrap();
        let image = Raster::filled(16, 16, 3, 100);
        let mut rng = StdRng::seed_from_u64(6);
        let out = stage.transform(&mut rng, &image).unwrap();
        for (&a, &b) in image.data().iter().zip(out.data()) {
            assert!(
                (a as i16 - b as i16).abs() <= 5,
                "jitter exceeded range: {a} -> {b}"
            );
        }
    }

    #[test]
    fn test_output_clamped_at_extremes() {
        let stage = SubtleNoise::new(SubtleNoiseConfig { range: 20, p: 1.0 }).unwrap();
        let image = Raster::from_fn(8, 8, 1, |x, _, _| if x % 2 == 0 { 0 } else { 255 });
        let mut rng = StdRng::seed_from_u64(6);
        let out = stage.transform(&mut rng, &image).unwrap();
        // Clamping keeps jittered extremes inside the byte range;
        // arithmetic on the raw bytes would wrap instead.
        for (&a, &b) in image.data().iter().zip(out.data()) {
            if a == 0 {
                assert!(b <= 20, "black pixel jittered to {b}");
            } else {
                assert!(b >= 235, "white pixel jittered to {b}");
            }
        }
    }

    #[test]
    fn test_zero_range_is_identity() {
        let stage = SubtleNoise::new(SubtleNoiseConfig { range: 0, p: 1.0 }).unwrap();
        let image = Raster::filled(4, 4, 1, 50);
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(stage.transform(&mut rng, &image).unwrap(), image);
    }
}
