//! halftone: binary dithering primitives for document imagery.
//!
//! This crate provides the two per-pixel halftoning algorithms used when
//! simulating print-and-scan artifacts:
//!
//! - [`OrderedDitherer`]: thresholds each pixel against a tiled
//!   [`BayerMatrix`] of side `2^order`. Deterministic, no error bleeding,
//!   produces the regular screen of cheap laser output.
//! - [`floyd_steinberg`]: sequential error diffusion with the classic
//!   7/16, 3/16, 5/16, 1/16 kernel, restricted to interior pixels and
//!   propagating only negative (darkening) error.
//!
//! Both operate on flat single-channel byte planes (`&[u8]` plus
//! width/height); callers split multi-channel images into planes and
//! dither each independently.
//!
//! # Quick Start
//!
//! ```
//! use halftone::{floyd_steinberg, OrderedDitherer};
//!
//! let plane: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
//!
//! let ordered = OrderedDitherer::new(2).unwrap().dither(&plane, 8, 8);
//! assert!(ordered.iter().all(|&v| v == 0 || v == 255));
//!
//! let diffused = floyd_steinberg(&plane, 8, 8);
//! assert_eq!(diffused.len(), plane.len());
//! ```

pub mod bayer;
pub mod error;
pub mod error_diffusion;
pub mod ordered;

pub use bayer::BayerMatrix;
pub use error::HalftoneError;
pub use error_diffusion::floyd_steinberg;
pub use ordered::OrderedDitherer;
