//! Ordered (Bayer) dithering.

use crate::bayer::BayerMatrix;
use crate::error::HalftoneError;

/// Ordered ditherer thresholding pixels against a tiled Bayer matrix.
///
/// The matrix of side `2^order` is built and normalized once at
/// construction; dithering is then a deterministic per-pixel lookup with
/// no RNG involved. Non-square and odd image dimensions need no special
/// handling because the tiling wraps via modulo.
///
/// # Example
///
/// ```
/// use halftone::OrderedDitherer;
///
/// let ditherer = OrderedDitherer::new(2).unwrap();
/// let plane = vec![0u8, 64, 128, 192, 255, 32];
/// let out = ditherer.dither(&plane, 3, 2);
/// assert!(out.iter().all(|&v| v == 0 || v == 255));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedDitherer {
    thresholds: Vec<u8>,
    side: usize,
}

impl OrderedDitherer {
    /// Build a ditherer for the given order (matrix side `2^order`).
    ///
    /// # Errors
    ///
    /// [`HalftoneError::OrderTooSmall`] if `order` is zero.
    pub fn new(order: u32) -> Result<Self, HalftoneError> {
        if order < 1 {
            return Err(HalftoneError::OrderTooSmall(order));
        }
        let side = 1usize << order;
        let matrix = BayerMatrix::build(side)?;
        Ok(Self {
            thresholds: matrix.normalized(),
            side,
        })
    }

    /// Side length of the underlying threshold matrix.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Dither a single channel plane to binary `{0, 255}` output.
    ///
    /// `plane` is row-major, `width * height` samples. Multi-channel
    /// images are dithered one plane at a time with the same matrix.
    pub fn dither(&self, plane: &[u8], width: usize, height: usize) -> Vec<u8> {
        debug_assert_eq!(
            plane.len(),
            width * height,
            "plane length ({}) must match {width}x{height}",
            plane.len(),
        );
        let mut out = vec![0u8; plane.len()];
        for y in 0..height {
            let trow = &self.thresholds[(y % self.side) * self.side..];
            for x in 0..width {
                let threshold = trow[x % self.side];
                if plane[y * width + x] > threshold {
                    out[y * width + x] = 255;
                }
            }
        }
        out
    }
}
