//! Scanforge: stochastic scanner-style degradation synthesis.
//!
//! Scanforge turns clean raster images into something that looks like it
//! went through an office scanner: halftone screens, error-diffusion
//! dithering, uneven lighting, sensor noise, ink blotches and JPEG
//! block artifacts. It exists to manufacture training data for models
//! that must cope with physically scanned documents.
//!
//! # Model
//!
//! Every transform is an [`Augmentation`]: an immutable, validated
//! configuration plus a pure `Raster -> Raster` function behind a
//! per-invocation probability gate. A [`Pipeline`] chains stages in
//! order, feeding each stage's output to the next, and hands back the
//! final image together with a per-run log of every stage's outcome.
//! A gated-out stage passes its input through untouched, so pipelines
//! compose totally. All randomness flows through a caller-supplied RNG.
//!
//! # Quick Start
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use scanforge::stages::{Dither, DitherMethod, SubtleNoise, SubtleNoiseConfig};
//! use scanforge::{Pipeline, Raster};
//!
//! let pipeline = Pipeline::new(vec![
//!     Box::new(SubtleNoise::new(SubtleNoiseConfig::default()).unwrap()),
//!     Box::new(Dither::new(DitherMethod::Ordered { order: 3 }, 1.0).unwrap()),
//! ]);
//!
//! let page = Raster::filled(128, 96, 1, 225);
//! let mut rng = StdRng::seed_from_u64(42);
//! let run = pipeline.run(&mut rng, &page).unwrap();
//!
//! assert_eq!(run.records.len(), 2);
//! assert!(run.image.data().iter().all(|&v| v == 0 || v == 255));
//! ```
//!
//! The dithering primitives themselves (Bayer matrices, Floyd-Steinberg
//! error diffusion) live in the companion `halftone` crate and can be
//! used standalone on raw byte planes.

pub mod error;
pub mod lighting;
pub mod pipeline;
pub mod presets;
pub mod raster;
pub mod stages;

mod interop;
mod warp;

pub use error::AugmentError;
pub use pipeline::{Augmentation, OneOf, Pipeline, PipelineRun, StageRecord};
pub use raster::Raster;
