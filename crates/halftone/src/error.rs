use thiserror::Error;

/// Errors reported while configuring a ditherer.
///
/// All validation happens up front, when a matrix or ditherer is built;
/// the per-pixel loops themselves cannot fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HalftoneError {
    #[error("threshold matrix size must be a power of two, got {0}")]
    SizeNotPowerOfTwo(usize),

    #[error("dither order must be at least 1, got {0}")]
    OrderTooSmall(u32),
}
