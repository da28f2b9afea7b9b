//! Grayscale-collapse stage.

use rand::RngCore;

use crate::error::{check_probability, AugmentError};
use crate::interop;
use crate::pipeline::Augmentation;
use crate::raster::Raster;

/// Collapses the image to luma and replicates it across the original
/// channel layout, giving color input the flat tone of a mono scan
/// while keeping downstream stages' channel expectations intact.
pub struct Grayscale {
    p: f32,
}

impl Grayscale {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for a bad probability.
    pub fn new(p: f32) -> Result<Self, AugmentError> {
        Ok(Self {
            p: check_probability(p)?,
        })
    }
}

impl Augmentation for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn probability(&self) -> f32 {
        self.p
    }

    fn transform(&self, _rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        if image.channels() == 1 {
            return Ok(image.clone());
        }
        interop::grayscale(image)
    }
}
