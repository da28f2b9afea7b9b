//! Rotation by inverse mapping.
//!
//! Both the light-mask synthesizer (rotating its padded canvas about the
//! light position) and the geometric stage (rotating a whole image about
//! its center) need arbitrary-angle rotation, which the codec collaborator
//! does not provide. Destination pixels are mapped back into the source
//! through the inverse rotation and sampled bilinearly.

use crate::raster::Raster;

/// Rotate a float plane counter-clockwise by `angle_deg` about `center`.
///
/// Samples falling outside the source are zero. Angles of 0 and 360
/// produce numerically equivalent results up to float rounding.
pub(crate) fn rotate_plane_f32(
    src: &[f32],
    width: usize,
    height: usize,
    center: (f32, f32),
    angle_deg: f32,
) -> Vec<f32> {
    debug_assert_eq!(src.len(), width * height);
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (cx, cy) = center;
    let mut out = vec![0.0f32; src.len()];
    for y in 0..height {
        let dy = y as f32 - cy;
        for x in 0..width {
            let dx = x as f32 - cx;
            // Inverse of the forward rotation: rotate the destination
            // offset back by the angle.
            let sx = cx + cos * dx - sin * dy;
            let sy = cy + sin * dx + cos * dy;
            out[y * width + x] = sample_bilinear(src, width, height, sx, sy);
        }
    }
    out
}

/// Rotate an interleaved raster about its center, filling uncovered
/// pixels with `fill` (paper white for document imagery).
pub(crate) fn rotate_raster(image: &Raster, angle_deg: f32, fill: u8) -> Raster {
    let width = image.width();
    let height = image.height();
    let channels = image.channels();
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    let mut out = Raster::filled(width, height, channels, fill);
    for y in 0..height {
        let dy = y as f32 - cy;
        for x in 0..width {
            let dx = x as f32 - cx;
            let sx = cx + cos * dx - sin * dy;
            let sy = cy + sin * dx + cos * dy;
            if sx < 0.0 || sy < 0.0 || sx > (width - 1) as f32 || sy > (height - 1) as f32 {
                continue;
            }
            for c in 0..channels {
                let v = sample_channel_bilinear(image, sx, sy, c);
                out.put(x, y, c, v.round().clamp(0.0, 255.0) as u8);
            }
        }
    }
    out
}

fn sample_bilinear(src: &[f32], width: usize, height: usize, sx: f32, sy: f32) -> f32 {
    if sx <= -1.0 || sy <= -1.0 || sx >= width as f32 || sy >= height as f32 {
        return 0.0;
    }
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let fetch = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            src[y as usize * width + x as usize]
        }
    };
    let x0 = x0 as isize;
    let y0 = y0 as isize;
    let top = fetch(x0, y0) * (1.0 - fx) + fetch(x0 + 1, y0) * fx;
    let bottom = fetch(x0, y0 + 1) * (1.0 - fx) + fetch(x0 + 1, y0 + 1) * fx;
    top * (1.0 - fy) + bottom * fy
}

fn sample_channel_bilinear(image: &Raster, sx: f32, sy: f32, c: usize) -> f32 {
    let width = image.width();
    let height = image.height();
    let x0 = sx.floor() as usize;
    let y0 = sy.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = sx - x0 as f32;
    let fy = sy - y0 as f32;
    let top = image.get(x0, y0, c) as f32 * (1.0 - fx) + image.get(x1, y0, c) as f32 * fx;
    let bottom = image.get(x0, y1, c) as f32 * (1.0 - fx) + image.get(x1, y1, c) as f32 * fx;
    top * (1.0 - fy) + bottom * fy
}
