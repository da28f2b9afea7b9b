//! JPEG compression-artifact stage.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{check_probability, AugmentError};
use crate::interop;
use crate::pipeline::Augmentation;
use crate::raster::Raster;

/// Parameters for [`JpegArtifacts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JpegConfig {
    /// Quality range the per-invocation quality is sampled from
    /// (1 = worst, 100 = best).
    pub quality_range: (u8, u8),
    /// Stage probability.
    pub p: f32,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self {
            quality_range: (25, 95),
            p: 1.0,
        }
    }
}

/// Encodes the image to JPEG at a sampled quality and decodes it back,
/// keeping the block and ringing artifacts.
pub struct JpegArtifacts {
    config: JpegConfig,
}

impl JpegArtifacts {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for a quality range
    /// outside `[1, 100]` or inverted, or a bad probability.
    pub fn new(config: JpegConfig) -> Result<Self, AugmentError> {
        check_probability(config.p)?;
        let (low, high) = config.quality_range;
        if low < 1 || high > 100 || low > high {
            return Err(AugmentError::InvalidConfiguration(format!(
                "jpeg quality range must satisfy 1 <= low <= high <= 100, got ({low}, {high})"
            )));
        }
        Ok(Self { config })
    }
}

impl Augmentation for JpegArtifacts {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn probability(&self) -> f32 {
        self.config.p
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let (low, high) = self.config.quality_range;
        let quality = rng.gen_range(low..=high);
        interop::jpeg_round_trip(image, quality)
    }
}
