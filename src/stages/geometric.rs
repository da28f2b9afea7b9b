//! Basic geometric transformations: crop, resize, translate, flip, rotate.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{check_probability, AugmentError};
use crate::interop;
use crate::pipeline::Augmentation;
use crate::raster::Raster;
use crate::warp::rotate_raster;

/// Paper-white used to fill pixels uncovered by translation/rotation.
const BACKGROUND: u8 = 255;

/// Parameters for [`Geometric`].
///
/// A crop bound of `-1` means "up to the image extent" on that axis.
/// Sub-operations whose parameters are degenerate at run time (inverted
/// crop bounds, non-positive scale) are skipped silently so randomized
/// parameter sampling can never kill a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricConfig {
    /// Scale factor range for the resize; `(1, 1)` keeps the size.
    pub scale: (f32, f32),
    /// Horizontal and vertical shift in pixels.
    pub translation: (i64, i64),
    /// Mirror left-right.
    pub fliplr: bool,
    /// Mirror top-bottom.
    pub flipud: bool,
    /// Crop window `(x0, y0, xn, yn)`; `-1` extends to the image edge.
    pub crop: Option<(i64, i64, i64, i64)>,
    /// Rotation angle range in degrees; `(0, 0)` disables rotation.
    pub rotate_range: (f32, f32),
    /// Stage probability.
    pub p: f32,
}

impl Default for GeometricConfig {
    fn default() -> Self {
        Self {
            scale: (1.0, 1.0),
            translation: (0, 0),
            fliplr: false,
            flipud: false,
            crop: None,
            rotate_range: (0.0, 0.0),
            p: 1.0,
        }
    }
}

/// Applies the configured sub-operations in a fixed order: crop, resize,
/// translate, flips, rotate.
pub struct Geometric {
    config: GeometricConfig,
}

impl Geometric {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for inverted sampling
    /// ranges or a bad probability. Degenerate crop windows are *not*
    /// rejected here: they stay soft no-ops at run time.
    pub fn new(config: GeometricConfig) -> Result<Self, AugmentError> {
        check_probability(config.p)?;
        if config.scale.0 > config.scale.1 {
            return Err(AugmentError::InvalidConfiguration(format!(
                "scale range is inverted: ({}, {})",
                config.scale.0, config.scale.1
            )));
        }
        if config.rotate_range.0 > config.rotate_range.1 {
            return Err(AugmentError::InvalidConfiguration(format!(
                "rotate range is inverted: ({}, {})",
                config.rotate_range.0, config.rotate_range.1
            )));
        }
        Ok(Self { config })
    }

    fn crop(&self, image: Raster) -> Raster {
        let Some((x0, y0, xn, yn)) = self.config.crop else {
            return image;
        };
        let width = image.width() as i64;
        let height = image.height() as i64;
        let xn = if xn == -1 { width } else { xn };
        let yn = if yn == -1 { height } else { yn };
        let valid_x = x0 >= 0 && xn > x0 && xn <= width;
        let valid_y = y0 >= 0 && yn > y0 && yn <= height;
        if !(valid_x && valid_y) {
            tracing::warn!(x0, y0, xn, yn, "degenerate crop window, skipping");
            return image;
        }
        let (cw, ch) = ((xn - x0) as usize, (yn - y0) as usize);
        Raster::from_fn(cw, ch, image.channels(), |x, y, c| {
            image.get(x + x0 as usize, y + y0 as usize, c)
        })
    }

    fn scale_resize(
        &self,
        rng: &mut dyn RngCore,
        image: Raster,
    ) -> Result<Raster, AugmentError> {
        let (low, high) = self.config.scale;
        if (low, high) == (1.0, 1.0) {
            return Ok(image);
        }
        let scale = if low < high {
            rng.gen_range(low..=high)
        } else {
            low
        };
        let new_width = (image.width() as f32 * scale) as usize;
        let new_height = (image.height() as f32 * scale) as usize;
        if scale <= 0.0 || new_width == 0 || new_height == 0 {
            tracing::warn!(scale, "degenerate resize scale, skipping");
            return Ok(image);
        }
        if (new_width, new_height) == (image.width(), image.height()) {
            return Ok(image);
        }
        interop::resize(&image, new_width, new_height)
    }

    fn translate(&self, image: Raster) -> Raster {
        let (dx, dy) = self.config.translation;
        if (dx, dy) == (0, 0) {
            return image;
        }
        let width = image.width() as i64;
        let height = image.height() as i64;
        Raster::from_fn(image.width(), image.height(), image.channels(), |x, y, c| {
            let sx = x as i64 - dx;
            let sy = y as i64 - dy;
            if sx < 0 || sy < 0 || sx >= width || sy >= height {
                BACKGROUND
            } else {
                image.get(sx as usize, sy as usize, c)
            }
        })
    }

    fn flips(&self, image: Raster) -> Raster {
        if !self.config.fliplr && !self.config.flipud {
            return image;
        }
        let width = image.width();
        let height = image.height();
        Raster::from_fn(width, height, image.channels(), |x, y, c| {
            let sx = if self.config.fliplr { width - 1 - x } else { x };
            let sy = if self.config.flipud { height - 1 - y } else { y };
            image.get(sx, sy, c)
        })
    }

    fn rotate(&self, rng: &mut dyn RngCore, image: Raster) -> Raster {
        let (low, high) = self.config.rotate_range;
        if (low, high) == (0.0, 0.0) {
            return image;
        }
        let angle = if low < high {
            rng.gen_range(low..=high)
        } else {
            low
        };
        if angle == 0.0 {
            return image;
        }
        rotate_raster(&image, angle, BACKGROUND)
    }
}

impl Augmentation for Geometric {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn probability(&self) -> f32 {
        self.config.p
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let image = self.crop(image.clone());
        let image = self.scale_resize(rng, image)?;
        let image = self.translate(image);
        let image = self.flips(image);
        Ok(self.rotate(rng, image))
    }
}
