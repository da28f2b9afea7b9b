//! Conversions between [`Raster`] and the `image` crate.
//!
//! The codec and generic geometry work (JPEG round-trips, resizing,
//! luma conversion) is delegated to `image`; this module is the single
//! place where the two buffer representations meet.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageFormat, RgbImage};

use crate::error::AugmentError;
use crate::raster::Raster;

/// View a raster as a `DynamicImage` (copies the buffer).
pub(crate) fn to_dynamic(raster: &Raster) -> Result<DynamicImage, AugmentError> {
    let w = raster.width() as u32;
    let h = raster.height() as u32;
    match raster.channels() {
        1 => GrayImage::from_raw(w, h, raster.data().to_vec())
            .map(DynamicImage::ImageLuma8)
            .ok_or(AugmentError::ShapeMismatch {
                len: raster.data().len(),
                width: raster.width(),
                height: raster.height(),
                channels: 1,
            }),
        3 => RgbImage::from_raw(w, h, raster.data().to_vec())
            .map(DynamicImage::ImageRgb8)
            .ok_or(AugmentError::ShapeMismatch {
                len: raster.data().len(),
                width: raster.width(),
                height: raster.height(),
                channels: 3,
            }),
        other => Err(AugmentError::UnsupportedChannels(other)),
    }
}

/// Convert a decoded image back to a raster with the given channel count.
pub(crate) fn from_dynamic(img: &DynamicImage, channels: usize) -> Result<Raster, AugmentError> {
    match channels {
        1 => {
            let gray = img.to_luma8();
            Raster::from_vec(
                gray.width() as usize,
                gray.height() as usize,
                1,
                gray.into_raw(),
            )
        }
        3 => {
            let rgb = img.to_rgb8();
            Raster::from_vec(
                rgb.width() as usize,
                rgb.height() as usize,
                3,
                rgb.into_raw(),
            )
        }
        other => Err(AugmentError::UnsupportedChannels(other)),
    }
}

/// Encode to JPEG at the given quality and decode straight back,
/// keeping the artifacts.
pub(crate) fn jpeg_round_trip(raster: &Raster, quality: u8) -> Result<Raster, AugmentError> {
    let color = match raster.channels() {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        other => return Err(AugmentError::UnsupportedChannels(other)),
    };
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality).encode(
        raster.data(),
        raster.width() as u32,
        raster.height() as u32,
        color,
    )?;
    let decoded = image::load_from_memory_with_format(&encoded, ImageFormat::Jpeg)?;
    from_dynamic(&decoded, raster.channels())
}

/// Resize with a triangle (area-averaging) filter.
pub(crate) fn resize(
    raster: &Raster,
    new_width: usize,
    new_height: usize,
) -> Result<Raster, AugmentError> {
    let img = to_dynamic(raster)?;
    let resized = img.resize_exact(new_width as u32, new_height as u32, FilterType::Triangle);
    from_dynamic(&resized, raster.channels())
}

/// Collapse to luma and replicate back to the input channel count.
pub(crate) fn grayscale(raster: &Raster) -> Result<Raster, AugmentError> {
    let gray = to_dynamic(raster)?.to_luma8();
    let channels = raster.channels();
    let mut out = Raster::filled(raster.width(), raster.height(), channels, 0);
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let v = gray.get_pixel(x as u32, y as u32)[0];
            for c in 0..channels {
                out.put(x, y, c, v);
            }
        }
    }
    Ok(out)
}
