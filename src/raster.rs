//! Owned 8-bit raster buffer.
//!
//! Every stage in the pipeline consumes a [`Raster`] by reference and
//! produces a fresh one; a caller's buffer is never mutated in place.
//! Spatial algorithms that are defined per channel pull planes out with
//! [`Raster::plane`] and write them back with [`Raster::set_plane`].

use crate::error::AugmentError;

/// An 8-bit image buffer, row-major with interleaved channels.
///
/// `channels == 1` is a grayscale plane; `channels == 3` is RGB. Nothing
/// in the buffer layout constrains the channel count, but the color
/// stages (HSV blending, grayscale, JPEG) expect 1 or 3.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing buffer, validating its length.
    ///
    /// # Errors
    ///
    /// [`AugmentError::ShapeMismatch`] if `data.len()` is not
    /// `width * height * channels`, [`AugmentError::InvalidConfiguration`]
    /// if `channels` is zero.
    pub fn from_vec(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, AugmentError> {
        if channels == 0 {
            return Err(AugmentError::InvalidConfiguration(
                "raster must have at least one channel".into(),
            ));
        }
        if data.len() != width * height * channels {
            return Err(AugmentError::ShapeMismatch {
                len: data.len(),
                width,
                height,
                channels,
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Allocate a raster filled with a constant value.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![value; width * height * channels],
        }
    }

    /// Build a raster from a per-pixel function `(x, y, c) -> value`.
    pub fn from_fn(
        width: usize,
        height: usize,
        channels: usize,
        mut f: impl FnMut(usize, usize, usize) -> u8,
    ) -> Self {
        let mut data = Vec::with_capacity(width * height * channels);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The interleaved sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster, returning its buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Sample at `(x, y)` in channel `c`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y * self.width + x) * self.channels + c]
    }

    /// Write the sample at `(x, y)` in channel `c`.
    #[inline]
    pub fn put(&mut self, x: usize, y: usize, c: usize, value: u8) {
        self.data[(y * self.width + x) * self.channels + c] = value;
    }

    /// Copy one channel out as a contiguous plane (`width * height`).
    pub fn plane(&self, c: usize) -> Vec<u8> {
        assert!(c < self.channels, "channel {c} out of {}", self.channels);
        self.data
            .iter()
            .skip(c)
            .step_by(self.channels)
            .copied()
            .collect()
    }

    /// Write a contiguous plane back into one channel.
    pub fn set_plane(&mut self, c: usize, plane: &[u8]) {
        assert!(c < self.channels, "channel {c} out of {}", self.channels);
        debug_assert_eq!(plane.len(), self.width * self.height);
        for (dst, &src) in self
            .data
            .iter_mut()
            .skip(c)
            .step_by(self.channels)
            .zip(plane)
        {
            *dst = src;
        }
    }

    /// Apply a plane-level transform to every channel independently.
    pub fn map_planes(&self, mut f: impl FnMut(&[u8]) -> Vec<u8>) -> Self {
        let mut out = self.clone();
        for c in 0..self.channels {
            let plane = self.plane(c);
            out.set_plane(c, &f(&plane));
        }
        out
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_validates_length() {
        assert!(Raster::from_vec(2, 2, 1, vec![0; 4]).is_ok());
        assert!(matches!(
            Raster::from_vec(2, 2, 1, vec![0; 5]),
            Err(AugmentError::ShapeMismatch { len: 5, .. })
        ));
        assert!(Raster::from_vec(2, 2, 0, vec![]).is_err());
    }

    #[test]
    fn test_get_put_roundtrip() {
        let mut r = Raster::filled(3, 2, 3, 0);
        r.put(2, 1, 1, 77);
        assert_eq!(r.get(2, 1, 1), 77);
        assert_eq!(r.get(2, 1, 0), 0);
    }

    #[test]
    fn test_plane_extraction_interleaved() {
        let r = Raster::from_fn(2, 2, 3, |x, y, c| (x + 10 * y + 100 * c) as u8);
        assert_eq!(r.plane(0), vec![0, 1, 10, 11]);
        assert_eq!(r.plane(2), vec![200, 201, 210, 211]);
    }

    #[test]
    fn test_set_plane_writes_single_channel() {
        let mut r = Raster::filled(2, 1, 3, 9);
        r.set_plane(1, &[5, 6]);
        assert_eq!(r.data(), &[9, 5, 9, 9, 6, 9]);
    }

    #[test]
    fn test_map_planes_preserves_shape() {
        let r = Raster::from_fn(4, 3, 3, |x, _, _| (x * 60) as u8);
        let inverted = r.map_planes(|plane| plane.iter().map(|&v| 255 - v).collect());
        assert_eq!(inverted.width(), 4);
        assert_eq!(inverted.height(), 3);
        assert_eq!(inverted.channels(), 3);
        assert_eq!(inverted.get(1, 0, 0), 255 - 60);
    }
}
