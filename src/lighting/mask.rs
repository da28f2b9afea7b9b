//! Parallel-light mask synthesis.
//!
//! The mask models a strip light shining across the page: brightness is
//! constant along the strip and decays with row distance from it. The
//! strip is laid out horizontally on a padded canvas, rotated to the
//! requested direction about the light position, cropped back to the
//! target size, median-smoothed, and finally inverted so the result
//! reads as a shadow field ready for HSV value-channel blending.

use rand::{Rng, RngCore};

use super::decay::{self, DecayMode};
use super::median::median_blur;
use crate::error::AugmentError;
use crate::warp::rotate_plane_f32;

/// Parameters for [`LightMaskSynthesizer`].
///
/// `position` and `direction` left unset are drawn per generated mask:
/// a uniform point inside the canvas and a uniform angle in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightMaskConfig {
    /// Center of the light strip, in target-image coordinates.
    pub position: Option<(usize, usize)>,
    /// Rotation of the strip in degrees.
    pub direction: Option<f32>,
    /// Brightness at the strip itself.
    pub max_brightness: u8,
    /// Brightness floor far from the strip (gaussian mode only reaches
    /// it asymptotically).
    pub min_brightness: u8,
    /// Falloff law.
    pub mode: DecayMode,
}

impl Default for LightMaskConfig {
    fn default() -> Self {
        Self {
            position: None,
            direction: None,
            max_brightness: 255,
            min_brightness: 0,
            mode: DecayMode::Gaussian,
        }
    }
}

/// Builds shadow masks for the lighting stage.
pub struct LightMaskSynthesizer {
    config: LightMaskConfig,
}

impl LightMaskSynthesizer {
    /// Validate the configuration and build a synthesizer.
    ///
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] when the brightness bounds
    /// are inverted or a supplied linear rate is not positive.
    pub fn new(config: LightMaskConfig) -> Result<Self, AugmentError> {
        if config.min_brightness > config.max_brightness {
            return Err(AugmentError::InvalidConfiguration(format!(
                "min_brightness ({}) exceeds max_brightness ({})",
                config.min_brightness, config.max_brightness
            )));
        }
        if let DecayMode::LinearStatic { rate: Some(rate) } = config.mode {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(AugmentError::InvalidConfiguration(format!(
                    "linear decay rate must be positive, got {rate}"
                )));
            }
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &LightMaskConfig {
        &self.config
    }

    /// Generate a `width * height` shadow mask, row-major, values in
    /// `[0, 255]`.
    ///
    /// The canvas is padded by `floor(max(width, height) * sqrt(2))` on
    /// every side so no part of the strip is clipped by the rotation;
    /// the crop back to the target size is anchored at the padding
    /// offset. Degenerate target sizes yield an empty mask.
    pub fn generate(&self, rng: &mut dyn RngCore, width: usize, height: usize) -> Vec<u8> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let long_side = width.max(height);
        let padding = (long_side as f32 * std::f32::consts::SQRT_2) as usize;
        let canvas_w = 2 * padding + width;
        let canvas_h = 2 * padding + height;

        let (pos_x, pos_y) = match self.config.position {
            Some(p) => p,
            None => (rng.gen_range(0..=width), rng.gen_range(0..=height)),
        };
        let direction = self
            .config
            .direction
            .unwrap_or_else(|| rng.gen_range(0.0..360.0));

        let max = self.config.max_brightness as f32;
        let min = self.config.min_brightness as f32;
        let rate = match self.config.mode {
            DecayMode::Gaussian => 0.0,
            DecayMode::LinearStatic { rate } => {
                rate.unwrap_or_else(|| rng.gen_range(0.2..=2.0))
            }
            DecayMode::LinearDynamic => (max - min) / long_side as f32,
        };

        let light = ((padding + pos_x) as f32, (padding + pos_y) as f32);

        // Fill the canvas one row at a time; brightness only depends on
        // the row's distance from the light row.
        let mut canvas = vec![0.0f32; canvas_w * canvas_h];
        for row in 0..canvas_h {
            let value = match self.config.mode {
                DecayMode::Gaussian => {
                    decay::gaussian(row as f32, light.1, max, min, height as f32)
                }
                DecayMode::LinearStatic { .. } | DecayMode::LinearDynamic => {
                    decay::linear(row as f32, light.1, max, rate)
                }
            };
            canvas[row * canvas_w..(row + 1) * canvas_w].fill(value);
        }

        let rotated = rotate_plane_f32(&canvas, canvas_w, canvas_h, light, direction);

        // Crop back to the target extent, anchored at the padding offset.
        let mut mask = vec![0u8; width * height];
        for y in 0..height {
            let src_row = (y + padding) * canvas_w + padding;
            for x in 0..width {
                mask[y * width + x] = rotated[src_row + x].clamp(0.0, 255.0) as u8;
            }
        }

        let mut mask = median_blur(&mask, width, height, 9);
        for v in &mut mask {
            *v = 255 - *v;
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synth(config: LightMaskConfig) -> LightMaskSynthesizer {
        LightMaskSynthesizer::new(config).unwrap()
    }

    #[test]
    fn test_rejects_inverted_brightness() {
        let config = LightMaskConfig {
            max_brightness: 10,
            min_brightness: 200,
            ..Default::default()
        };
        assert!(matches!(
            LightMaskSynthesizer::new(config),
            Err(AugmentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let config = LightMaskConfig {
            mode: DecayMode::LinearStatic { rate: Some(-1.0) },
            ..Default::default()
        };
        assert!(LightMaskSynthesizer::new(config).is_err());
    }

    #[test]
    fn test_mask_shape_and_range() {
        let s = synth(LightMaskConfig::default());
        let mut rng = StdRng::seed_from_u64(21);
        let mask = s.generate(&mut rng, 40, 30);
        assert_eq!(mask.len(), 40 * 30);
        // u8 output is trivially in range; the real assertion is that
        // generation is total over random position/direction draws.
        for _ in 0..4 {
            let again = s.generate(&mut rng, 40, 30);
            assert_eq!(again.len(), 40 * 30);
        }
    }

    #[test]
    fn test_shadow_darkest_at_light_row() {
        // After inversion the mask is a shadow field: the light strip
        // itself is the *lowest* mask value.
        let s = synth(LightMaskConfig {
            position: Some((20, 15)),
            direction: Some(0.0),
            mode: DecayMode::LinearStatic { rate: Some(2.0) },
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(5);
        let mask = s.generate(&mut rng, 40, 31);
        let width = 40;
        let at_light: u32 = (0..width).map(|x| mask[15 * width + x] as u32).sum();
        let far: u32 = (0..width).map(|x| mask[30 * width + x] as u32).sum();
        assert!(
            at_light < far,
            "rows near the light must be brighter (darker shadow mask): {at_light} vs {far}"
        );
    }

    #[test]
    fn test_direction_zero_equals_full_turn() {
        let base = LightMaskConfig {
            position: Some((10, 10)),
            mode: DecayMode::Gaussian,
            ..Default::default()
        };
        let zero = synth(LightMaskConfig {
            direction: Some(0.0),
            ..base
        });
        let full = synth(LightMaskConfig {
            direction: Some(360.0),
            ..base
        });
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        let mask_a = zero.generate(&mut rng_a, 24, 24);
        let mask_b = full.generate(&mut rng_b, 24, 24);
        for (a, b) in mask_a.iter().zip(&mask_b) {
            assert!(
                (*a as i16 - *b as i16).abs() <= 1,
                "0 and 360 degree masks must agree within rounding: {a} vs {b}"
            );
        }
    }

    #[test]
    fn test_gaussian_mask_spans_configured_band() {
        let s = synth(LightMaskConfig {
            position: Some((16, 16)),
            direction: Some(0.0),
            max_brightness: 200,
            min_brightness: 50,
            mode: DecayMode::Gaussian,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let mask = s.generate(&mut rng, 32, 32);
        // Inverted: values live in [255 - max, 255 - min].
        assert!(mask.iter().all(|&v| (55..=205).contains(&v)));
    }

    #[test]
    fn test_empty_target() {
        let s = synth(LightMaskConfig::default());
        let mut rng = StdRng::seed_from_u64(2);
        assert!(s.generate(&mut rng, 0, 10).is_empty());
        assert!(s.generate(&mut rng, 10, 0).is_empty());
    }
}
