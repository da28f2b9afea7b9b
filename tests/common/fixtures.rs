//! Synthetic page builders used across the integration tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scanforge::Raster;

/// Install the log subscriber for tests that want stage traces.
/// Subsequent calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanforge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Deterministic RNG for reproducible pipeline runs.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A grayscale page with a smooth diagonal gradient.
pub fn gradient_page(width: usize, height: usize) -> Raster {
    Raster::from_fn(width, height, 1, |x, y, _| {
        ((x * 255 / width.max(1) + y * 255 / height.max(1)) / 2) as u8
    })
}

/// A color page resembling printed text: near-white paper with dark
/// "glyph" blocks on a grid.
pub fn text_page_rgb(width: usize, height: usize) -> Raster {
    Raster::from_fn(width, height, 3, |x, y, _| {
        let glyph = (x / 3) % 3 == 0 && (y / 5) % 2 == 0;
        if glyph {
            25
        } else {
            240
        }
    })
}
