//! Halftoning stage.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use halftone::{floyd_steinberg, OrderedDitherer};

use crate::error::{check_probability, AugmentError};
use crate::pipeline::Augmentation;
use crate::raster::Raster;

/// Which halftoning algorithm the stage applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DitherMethod {
    /// Ordered dithering against a Bayer matrix of side `2^order`.
    Ordered { order: u32 },
    /// Floyd-Steinberg error diffusion (fixed kernel, no parameters).
    FloydSteinberg,
}

/// Reduces the image to binary per-channel halftone, mimicking low-end
/// scanner output.
pub struct Dither {
    method: DitherMethod,
    ordered: Option<OrderedDitherer>,
    p: f32,
}

impl Dither {
    /// Build the stage, constructing the threshold matrix up front for
    /// the ordered method.
    ///
    /// # Errors
    ///
    /// [`AugmentError::Halftone`] for a zero order,
    /// [`AugmentError::InvalidConfiguration`] for a bad probability.
    pub fn new(method: DitherMethod, p: f32) -> Result<Self, AugmentError> {
        let p = check_probability(p)?;
        let ordered = match method {
            DitherMethod::Ordered { order } => Some(OrderedDitherer::new(order)?),
            DitherMethod::FloydSteinberg => None,
        };
        Ok(Self { method, ordered, p })
    }

    pub fn method(&self) -> DitherMethod {
        self.method
    }
}

impl Augmentation for Dither {
    fn name(&self) -> &'static str {
        "dither"
    }

    fn probability(&self) -> f32 {
        self.p
    }

    fn transform(&self, _rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let width = image.width();
        let height = image.height();
        Ok(image.map_planes(|plane| match &self.ordered {
            Some(ditherer) => ditherer.dither(plane, width, height),
            None => floyd_steinberg(plane, width, height),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_zero_order() {
        assert!(Dither::new(DitherMethod::Ordered { order: 0 }, 1.0).is_err());
    }

    #[test]
    fn test_ordered_output_binary_all_channels() {
        let stage = Dither::new(DitherMethod::Ordered { order: 3 }, 1.0).unwrap();
        let image = Raster::from_fn(11, 9, 3, |x, y, c| ((x * 23 + y * 7 + c * 41) % 256) as u8);
        let mut rng = StdRng::seed_from_u64(0);
        let out = stage.transform(&mut rng, &image).unwrap();
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_floyd_steinberg_keeps_borders() {
        let stage = Dither::new(DitherMethod::FloydSteinberg, 1.0).unwrap();
        let image = Raster::from_fn(6, 5, 1, |x, y, _| (x * 40 + y * 10) as u8);
        let mut rng = StdRng::seed_from_u64(0);
        let out = stage.transform(&mut rng, &image).unwrap();
        for x in 0..6 {
            assert_eq!(out.get(x, 0, 0), image.get(x, 0, 0));
            assert_eq!(out.get(x, 4, 0), image.get(x, 4, 0));
        }
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&DitherMethod::Ordered { order: 5 }).unwrap();
        let back: DitherMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DitherMethod::Ordered { order: 5 });
    }
}
