//! Probability-gated stages and the sequential executor.
//!
//! An [`Augmentation`] is configured once and invoked many times; each
//! invocation draws one uniform sample against the stage's probability to
//! decide whether the transform fires. A gated-out stage passes its input
//! through unchanged, so composition is total: chaining never produces
//! "no value".
//!
//! [`Pipeline`] runs its stages strictly in order, feeding each stage's
//! output to the next, and returns the final image together with a
//! per-invocation [`StageRecord`] log. Nothing accumulates on the
//! executor itself, so one `Pipeline` can serve many images (and many
//! threads) behind `&self`.

use std::time::Instant;

use rand::{Rng, RngCore};

use crate::error::{check_probability, AugmentError};
use crate::raster::Raster;

/// A configured, probability-gated image transform.
pub trait Augmentation: Send + Sync {
    /// Stage name used in run records and logs.
    fn name(&self) -> &'static str;

    /// Probability in `[0, 1]` that the stage fires per invocation.
    fn probability(&self) -> f32;

    /// Compute the transformed image.
    ///
    /// Called once the gate has passed (or execution was forced); the
    /// gate itself lives in [`Augmentation::apply`] and in the executor.
    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError>;

    /// Gate and transform in one call.
    ///
    /// With `force` the gate is bypassed. When the gate fails the input
    /// is returned unchanged.
    fn apply(
        &self,
        rng: &mut dyn RngCore,
        image: &Raster,
        force: bool,
    ) -> Result<Raster, AugmentError> {
        if force || gate(rng, self.probability()) {
            self.transform(rng, image)
        } else {
            Ok(image.clone())
        }
    }
}

/// One uniform draw against a stage probability.
#[inline]
fn gate(rng: &mut dyn RngCore, p: f32) -> bool {
    rng.gen::<f32>() < p
}

/// Outcome of a single stage within one pipeline invocation.
#[derive(Debug, Clone)]
pub struct StageRecord {
    /// Stage name, as reported by [`Augmentation::name`].
    pub name: &'static str,
    /// Whether the stage's gate passed and the transform ran.
    pub applied: bool,
    /// The stage's raw output when it ran.
    pub output: Option<Raster>,
}

/// Result of one pipeline invocation: the final image plus the stage log.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Output of the last stage (or the input, if everything was gated out).
    pub image: Raster,
    /// One record per stage, in execution order.
    pub records: Vec<StageRecord>,
}

/// An ordered sequence of augmentation stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Augmentation>>,
    probability: f32,
}

impl Pipeline {
    /// Build a pipeline that always runs when invoked.
    pub fn new(stages: Vec<Box<dyn Augmentation>>) -> Self {
        Self {
            stages,
            probability: 1.0,
        }
    }

    /// Build a pipeline that itself fires with probability `p`.
    ///
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] if `p` is outside `[0, 1]`.
    pub fn with_probability(
        stages: Vec<Box<dyn Augmentation>>,
        p: f32,
    ) -> Result<Self, AugmentError> {
        Ok(Self {
            stages,
            probability: check_probability(p)?,
        })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the pipeline over `image`.
    pub fn run(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<PipelineRun, AugmentError> {
        self.run_with(rng, image, false)
    }

    /// Run the pipeline, optionally bypassing its own gate.
    ///
    /// Per-stage gates still apply; `force` only skips the pipeline-level
    /// probability draw.
    pub fn run_with(
        &self,
        rng: &mut dyn RngCore,
        image: &Raster,
        force: bool,
    ) -> Result<PipelineRun, AugmentError> {
        if !force && !gate(rng, self.probability) {
            tracing::debug!(stages = self.stages.len(), "pipeline gated out");
            return Ok(PipelineRun {
                image: image.clone(),
                records: Vec::new(),
            });
        }

        let mut current = image.clone();
        let mut records = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let started = Instant::now();
            if gate(rng, stage.probability()) {
                let output = stage.transform(rng, &current)?;
                tracing::debug!(
                    stage = stage.name(),
                    elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                    "stage applied"
                );
                records.push(StageRecord {
                    name: stage.name(),
                    applied: true,
                    output: Some(output.clone()),
                });
                current = output;
            } else {
                tracing::debug!(stage = stage.name(), "stage skipped");
                records.push(StageRecord {
                    name: stage.name(),
                    applied: false,
                    output: None,
                });
            }
        }

        Ok(PipelineRun {
            image: current,
            records,
        })
    }
}

/// Picks one of its child stages uniformly per invocation and runs it
/// unconditionally (the child's own gate is bypassed; the choice *is*
/// the gate).
pub struct OneOf {
    stages: Vec<Box<dyn Augmentation>>,
    probability: f32,
}

impl OneOf {
    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] when `stages` is empty.
    pub fn new(stages: Vec<Box<dyn Augmentation>>) -> Result<Self, AugmentError> {
        Self::with_probability(stages, 1.0)
    }

    /// # Errors
    ///
    /// [`AugmentError::InvalidConfiguration`] when `stages` is empty or
    /// `p` is outside `[0, 1]`.
    pub fn with_probability(
        stages: Vec<Box<dyn Augmentation>>,
        p: f32,
    ) -> Result<Self, AugmentError> {
        if stages.is_empty() {
            return Err(AugmentError::InvalidConfiguration(
                "one_of needs at least one stage".into(),
            ));
        }
        Ok(Self {
            stages,
            probability: check_probability(p)?,
        })
    }
}

impl Augmentation for OneOf {
    fn name(&self) -> &'static str {
        "one_of"
    }

    fn probability(&self) -> f32 {
        self.probability
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        let pick = rng.gen_range(0..self.stages.len());
        let stage = &self.stages[pick];
        tracing::debug!(stage = stage.name(), "one_of picked");
        stage.apply(rng, image, true)
    }
}

/// A pipeline nests as a stage in an outer pipeline; only its primary
/// image flows onward, the inner stage log stays internal.
impl Augmentation for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn probability(&self) -> f32 {
        self.probability
    }

    fn transform(&self, rng: &mut dyn RngCore, image: &Raster) -> Result<Raster, AugmentError> {
        // The outer executor has already drawn this pipeline's gate.
        Ok(self.run_with(rng, image, true)?.image)
    }
}
