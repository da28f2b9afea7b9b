//! Global brightness / saturation stage.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{check_probability, AugmentError};
use crate::pipeline::Augmentation;
use crate::raster::Raster;
use crate::stages::map_hsv;

/// Parameters for [`Brightness`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessConfig {
    /// Factor range the per-invocation scale is sampled from.
    pub range: (f32, f32),
    /// Stage probability.
    pub p: f32,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            range: (0.8, 1.4),
            p: 1.0,
        }
    }
}

/// Scales HSV saturation and value by one sampled factor, saturating at
/// full brightness. Emulates a scanner lamp running hot or cold.
pub struct Brightness {
    config: BrightnessConfig,
}

impl Brightness {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for an inverted or
    /// non-positive factor range, or a bad probability.
    pub fn new(config: BrightnessConfig) -> Result<Self, AugmentError> {
        check_probability(config.p)?;
        let (low, high) = config.range;
        if !(low.is_finite() && high.is_finite()) || low < 0.0 || low > high {
            return Err(AugmentError::InvalidConfiguration(format!(
                "brightness range must satisfy 0 <= low <= high, got ({low}, {high})"
            )));
        }
        Ok(Self { config })
    }
}

impl Augmentation for Brightness {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn probability(&self) -> f32 {
        self.config.p
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let (low, high) = self.config.range;
        let factor = if low < high {
            rng.gen_range(low..=high)
        } else {
            low
        };

        match image.channels() {
            1 => {
                let mut out = image.clone();
                for v in out.data_mut() {
                    *v = (*v as f32 * factor).clamp(0.0, 255.0) as u8;
                }
                Ok(out)
            }
            3 => Ok(map_hsv(image, |_, _, mut hsv| {
                hsv.saturation = (hsv.saturation * factor).min(1.0);
                hsv.value = (hsv.value * factor).min(1.0);
                hsv
            })),
            other => Err(AugmentError::UnsupportedChannels(other)),
        }
    }
}
