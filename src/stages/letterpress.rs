//! Letterpress stage: uneven ink pressure in dark regions.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{check_probability, AugmentError};
use crate::pipeline::Augmentation;
use crate::raster::Raster;

/// Parameters for [`Letterpress`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterpressConfig {
    /// Points per cluster, sampled per cluster.
    pub n_samples: (usize, usize),
    /// Clusters per round, sampled per round.
    pub n_clusters: (usize, usize),
    /// Cluster standard deviation range, in hundredths of a pixel.
    pub std_range: (u32, u32),
    /// Mask value range for generated points.
    pub value_range: (u8, u8),
    /// Threshold range; pixels darker than the sampled threshold are
    /// replaced by the mask.
    pub value_threshold_range: (u8, u8),
    /// Gaussian-blur the mask before applying it.
    pub blur: bool,
    /// Stage probability.
    pub p: f32,
}

impl Default for LetterpressConfig {
    fn default() -> Self {
        Self {
            n_samples: (300, 800),
            n_clusters: (300, 800),
            std_range: (1500, 5000),
            value_range: (200, 255),
            value_threshold_range: (128, 128),
            blur: true,
            p: 1.0,
        }
    }
}

/// Produces blotchy ink regions by scattering Gaussian point clusters
/// over a noise mask and substituting it into dark (inked) areas.
pub struct Letterpress {
    config: LetterpressConfig,
}

impl Letterpress {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] for inverted or zero-width
    /// sampling ranges, or a bad probability.
    pub fn new(config: LetterpressConfig) -> Result<Self, AugmentError> {
        check_probability(config.p)?;
        if config.n_samples.0 > config.n_samples.1 || config.n_clusters.0 > config.n_clusters.1 {
            return Err(AugmentError::InvalidConfiguration(
                "letterpress cluster ranges are inverted".into(),
            ));
        }
        if config.std_range.0 == 0 || config.std_range.0 > config.std_range.1 {
            return Err(AugmentError::InvalidConfiguration(format!(
                "letterpress std range must satisfy 1 <= low <= high, got {:?}",
                config.std_range
            )));
        }
        if config.value_range.0 > config.value_range.1 {
            return Err(AugmentError::InvalidConfiguration(
                "letterpress value range is inverted".into(),
            ));
        }
        Ok(Self { config })
    }

    /// Scatter Gaussian clusters and write sampled ink values into a
    /// mask the size of `image`.
    fn build_mask(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let width = image.width();
        let height = image.height();
        let span = width.max(height) as f32;
        let mut mask = Raster::filled(width, height, image.channels(), 0);

        let rounds = rng.gen_range(8..=12);
        for _ in 0..rounds {
            let clusters = rng.gen_range(self.config.n_clusters.0..=self.config.n_clusters.1);
            let std = rng.gen_range(self.config.std_range.0..=self.config.std_range.1) as f32 / 100.0;
            let normal = Normal::new(0.0f32, std).map_err(|e| {
                AugmentError::InvalidConfiguration(format!("letterpress cluster spread: {e}"))
            })?;
            for _ in 0..clusters {
                let n = rng.gen_range(self.config.n_samples.0..=self.config.n_samples.1);
                let cy = rng.gen_range(0.0..=span);
                let cx = rng.gen_range(0.0..=span);
                for _ in 0..n {
                    let py = cy + normal.sample(rng);
                    let px = cx + normal.sample(rng);
                    if px < 0.0 || py < 0.0 {
                        continue;
                    }
                    let (x, y) = (px as usize, py as usize);
                    if x >= width || y >= height {
                        continue;
                    }
                    let value =
                        rng.gen_range(self.config.value_range.0..=self.config.value_range.1);
                    for c in 0..mask.channels() {
                        mask.put(x, y, c, value);
                    }
                }
            }
        }

        if self.config.blur {
            let w = width;
            let h = height;
            mask = mask.map_planes(|plane| gaussian_blur_5(plane, w, h));
        }
        Ok(mask)
    }
}

impl Augmentation for Letterpress {
    fn name(&self) -> &'static str {
        "letterpress"
    }

    fn probability(&self) -> f32 {
        self.config.p
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let mask = self.build_mask(rng, image)?;

        let (t_low, t_high) = self.config.value_threshold_range;
        let threshold = if t_high >= t_low {
            rng.gen_range(t_low..=t_high)
        } else {
            t_high
        };

        let mut out = image.clone();
        for (dst, &m) in out.data_mut().iter_mut().zip(mask.data()) {
            if *dst < threshold {
                *dst = m;
            }
        }
        Ok(out)
    }
}

/// Separable 5-tap Gaussian blur (`[1, 4, 6, 4, 1] / 16`) with clamped
/// borders.
fn gaussian_blur_5(plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    const TAPS: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
    if plane.is_empty() {
        return Vec::new();
    }
    let clamp = |v: isize, upper: usize| v.clamp(0, upper as isize - 1) as usize;

    // Horizontal pass.
    let mut horiz = vec![0.0f32; plane.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, tap) in TAPS.iter().enumerate() {
                let sx = clamp(x as isize + k as isize - 2, width);
                acc += tap * plane[y * width + sx] as f32;
            }
            horiz[y * width + x] = acc;
        }
    }
    // Vertical pass.
    let mut out = vec![0u8; plane.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, tap) in TAPS.iter().enumerate() {
                let sy = clamp(y as isize + k as isize - 2, height);
                acc += tap * horiz[sy * width + x];
            }
            out[y * width + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
