//! Median filtering for mask smoothing.

/// Median blur over a single byte plane with an odd `ksize`-square
/// window. Borders replicate the nearest edge sample, so the output is
/// defined for every pixel.
///
/// Used to knock down the staircase aliasing left by rotating the light
/// canvas; 9 is the kernel the mask synthesizer asks for.
pub(crate) fn median_blur(plane: &[u8], width: usize, height: usize, ksize: usize) -> Vec<u8> {
    debug_assert_eq!(plane.len(), width * height);
    debug_assert!(ksize % 2 == 1, "median kernel must be odd");
    if plane.is_empty() {
        return Vec::new();
    }
    let r = (ksize / 2) as isize;
    let mut out = vec![0u8; plane.len()];
    let mut window = Vec::with_capacity(ksize * ksize);
    for y in 0..height as isize {
        for x in 0..width as isize {
            window.clear();
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, height as isize - 1) as usize;
                for dx in -r..=r {
                    let sx = (x + dx).clamp(0, width as isize - 1) as usize;
                    window.push(plane[sy * width + sx]);
                }
            }
            window.sort_unstable();
            out[y as usize * width + x as usize] = window[window.len() / 2];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_plane_unchanged() {
        let plane = vec![42u8; 36];
        assert_eq!(median_blur(&plane, 6, 6, 9), plane);
    }

    #[test]
    fn test_removes_isolated_speck() {
        let mut plane = vec![0u8; 49];
        plane[3 * 7 + 3] = 255;
        let out = median_blur(&plane, 7, 7, 3);
        assert!(
            out.iter().all(|&v| v == 0),
            "a single speck cannot survive a median"
        );
    }

    #[test]
    fn test_preserves_step_edge_location() {
        // A hard vertical edge stays an edge (medians do not smear it
        // into a ramp the way a box filter would).
        let plane: Vec<u8> = (0..8 * 8).map(|i| if i % 8 < 4 { 0 } else { 200 }).collect();
        let out = median_blur(&plane, 8, 8, 3);
        assert!(out.iter().all(|&v| v == 0 || v == 200));
    }

    #[test]
    fn test_empty_plane() {
        assert!(median_blur(&[], 0, 0, 9).is_empty());
    }
}
