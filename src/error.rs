use thiserror::Error;

/// Errors surfaced by stage construction and execution.
///
/// Configuration problems are detected eagerly when a stage is built;
/// execution only fails when an external collaborator (the image codec)
/// does. Degenerate geometric parameters are deliberately *not* errors:
/// those are soft no-ops that pass the image through unchanged.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// A stage was built with out-of-range or contradictory parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An image buffer did not match its declared dimensions.
    #[error("buffer length {len} does not match {width}x{height}x{channels}")]
    ShapeMismatch {
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    /// A color stage received a channel layout it cannot interpret.
    #[error("unsupported channel count {0} (expected 1 or 3)")]
    UnsupportedChannels(usize),

    /// Ditherer construction failed.
    #[error("halftone error: {0}")]
    Halftone(#[from] halftone::HalftoneError),

    /// The image codec collaborator failed to encode or decode.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

/// Validate a stage probability.
pub(crate) fn check_probability(p: f32) -> Result<f32, AugmentError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(AugmentError::InvalidConfiguration(format!(
            "probability must be within [0, 1], got {p}"
        )))
    }
}
