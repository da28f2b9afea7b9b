//! Augmentation stages.
//!
//! Each stage pairs an immutable, validated config with a pure
//! image-to-image transform and implements
//! [`Augmentation`](crate::pipeline::Augmentation). Stages that need
//! color-space work share the HSV helper below; everything else operates
//! on raw planes.

mod brightness;
mod dither;
mod geometric;
mod grayscale;
mod jpeg;
mod letterpress;
mod lighting_shadow;
mod subtle_noise;

pub use brightness::{Brightness, BrightnessConfig};
pub use dither::{Dither, DitherMethod};
pub use geometric::{Geometric, GeometricConfig};
pub use grayscale::Grayscale;
pub use jpeg::{JpegArtifacts, JpegConfig};
pub use letterpress::{Letterpress, LetterpressConfig};
pub use lighting_shadow::{LightingShadow, LightingShadowConfig};
pub use subtle_noise::{SubtleNoise, SubtleNoiseConfig};

use palette::{FromColor, Hsv, Srgb};

use crate::raster::Raster;

/// Map every pixel of an RGB raster through an HSV-space function.
///
/// Caller guarantees `channels == 3`. Conversion and clamping back to
/// bytes happens here so the stages only express their HSV arithmetic.
pub(crate) fn map_hsv(image: &Raster, mut f: impl FnMut(usize, usize, Hsv) -> Hsv) -> Raster {
    let mut out = image.clone();
    for y in 0..image.height() {
        for x in 0..image.width() {
            let px = Srgb::new(
                image.get(x, y, 0) as f32 / 255.0,
                image.get(x, y, 1) as f32 / 255.0,
                image.get(x, y, 2) as f32 / 255.0,
            );
            let hsv: Hsv = f(x, y, Hsv::from_color(px));
            let rgb = Srgb::from_color(hsv);
            out.put(x, y, 0, (rgb.red * 255.0).round().clamp(0.0, 255.0) as u8);
            out.put(x, y, 1, (rgb.green * 255.0).round().clamp(0.0, 255.0) as u8);
            out.put(x, y, 2, (rgb.blue * 255.0).round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}
