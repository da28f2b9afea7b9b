//! Directional lighting / shadow stage.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{check_probability, AugmentError};
use crate::lighting::{LightMaskConfig, LightMaskSynthesizer};
use crate::pipeline::Augmentation;
use crate::raster::Raster;
use crate::stages::map_hsv;

/// Parameters for [`LightingShadow`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingShadowConfig {
    /// Light mask parameters (position, direction, brightness, decay).
    pub mask: LightMaskConfig,
    /// Blend weight of the original image; `None` samples uniformly
    /// from `[0.5, 0.85]` per invocation.
    pub transparency: Option<f32>,
    /// Stage probability.
    pub p: f32,
}

impl Default for LightingShadowConfig {
    fn default() -> Self {
        Self {
            mask: LightMaskConfig::default(),
            transparency: None,
            p: 1.0,
        }
    }
}

/// Blends a synthesized parallel-light shadow mask into the image's
/// value channel: `v' = v * t + mask * (1 - t)`.
pub struct LightingShadow {
    synthesizer: LightMaskSynthesizer,
    transparency: Option<f32>,
    p: f32,
}

impl LightingShadow {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for a transparency or
    /// probability outside `[0, 1]`, or an invalid mask configuration.
    pub fn new(config: LightingShadowConfig) -> Result<Self, AugmentError> {
        let p = check_probability(config.p)?;
        if let Some(t) = config.transparency {
            if !(0.0..=1.0).contains(&t) {
                return Err(AugmentError::InvalidConfiguration(format!(
                    "transparency must be within [0, 1], got {t}"
                )));
            }
        }
        Ok(Self {
            synthesizer: LightMaskSynthesizer::new(config.mask)?,
            transparency: config.transparency,
            p,
        })
    }
}

impl Augmentation for LightingShadow {
    fn name(&self) -> &'static str {
        "lighting_shadow"
    }

    fn probability(&self) -> f32 {
        self.p
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let t = self
            .transparency
            .unwrap_or_else(|| rng.gen_range(0.5..=0.85));
        let width = image.width();
        let height = image.height();
        let mask = self.synthesizer.generate(rng, width, height);

        match image.channels() {
            // Grayscale: the sole plane is the value channel.
            1 => {
                let mut out = image.clone();
                for (dst, &m) in out.data_mut().iter_mut().zip(&mask) {
                    let v = *dst as f32 * t + m as f32 * (1.0 - t);
                    *dst = v.clamp(0.0, 255.0) as u8;
                }
                Ok(out)
            }
            3 => Ok(map_hsv(image, |x, y, mut hsv| {
                let m = mask[y * width + x] as f32 / 255.0;
                hsv.value = (hsv.value * t + m * (1.0 - t)).clamp(0.0, 1.0);
                hsv
            })),
            other => Err(AugmentError::UnsupportedChannels(other)),
        }
    }
}
