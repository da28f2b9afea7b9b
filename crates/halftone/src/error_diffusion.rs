//! Floyd-Steinberg error diffusion.
//!
//! Error diffusion quantizes each pixel in scan order and carries the
//! rounding error forward to not-yet-visited neighbors, so the local
//! average of the binary output tracks the continuous input. Because
//! every pixel's decision depends on error accumulated from its
//! predecessors, the row-major visitation order is a correctness
//! invariant: this loop must never be reordered or parallelized within
//! an image.

/// Floyd-Steinberg dither of a single channel plane.
///
/// Only interior pixels are quantized; the outermost row and column on
/// every border keep their input values untouched. Each interior pixel is
/// thresholded at 128 to `0` or `255` and the *negative* part of the
/// quantization error (`min(old - new, 0)`) is distributed to the
/// classic four neighbors:
///
/// ```text
///        X   7/16
/// 3/16 5/16  1/16
/// ```
///
/// Positive error is discarded, which biases the output toward ink and is
/// intentional: it reproduces the heavy-toner look of photocopied text
/// rather than a tone-preserving halftone.
///
/// Accumulation happens in floating point; values are cast back to bytes
/// once, when the output plane is produced. Planes with no interior
/// (width or height below 3) are returned unchanged.
pub fn floyd_steinberg(plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(
        plane.len(),
        width * height,
        "plane length ({}) must match {width}x{height}",
        plane.len(),
    );
    let mut out = plane.to_vec();
    if width < 3 || height < 3 {
        return out;
    }

    let mut work: Vec<f32> = plane.iter().map(|&v| v as f32).collect();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let old = work[idx];
            // Threshold at 128. Accumulated error is never positive, so
            // `old` can go below zero but never above 255.
            let new = if old >= 128.0 { 255.0 } else { 0.0 };
            work[idx] = new;
            out[idx] = new as u8;

            let err = (old - new).min(0.0);
            if err != 0.0 {
                work[idx + 1] += err * (7.0 / 16.0);
                work[idx + width - 1] += err * (3.0 / 16.0);
                work[idx + width] += err * (5.0 / 16.0);
                work[idx + width + 1] += err * (1.0 / 16.0);
            }
        }
    }
    out
}
