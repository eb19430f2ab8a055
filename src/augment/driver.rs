//! Batch generation of augmented images from a single source
//!
//! Every output is derived from the source alone: the selected stages are
//! applied in sequence to a fresh copy, with parameters redrawn per output.
//! A configured crop runs last on every output so the batch shares one shape.

use crate::augment::policy::CompositionPolicy;
use crate::augment::stage::{Augmentation, CropStage, DistortStage, NoiseStage, RotateStage};
use crate::io::configuration::{
    DEFAULT_BACKGROUND_PATCH, DEFAULT_MAX_NOISE_SIGMA, DEFAULT_MAX_ROTATION_DEGREES,
    DEFAULT_MAX_WAVE_X_SCALE, DEFAULT_MAX_WAVE_Y_SCALE, DEFAULT_NOISE_MEAN, MAX_WAVE_X_SCALE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::transform::PixelArray;
use log::debug;
use rand::{SeedableRng, rngs::StdRng};

/// Configuration for augmentation parameter ranges and composition
#[derive(Debug, Clone)]
pub struct AugmentConfig {
    /// How stages are combined for each output
    pub policy: CompositionPolicy,
    /// Largest rotation magnitude in degrees
    pub max_rotation_degrees: f64,
    /// Corner region averaged for rotation background fill
    pub background_patch: (usize, usize),
    /// Mean of the additive noise
    pub noise_mean: f32,
    /// Largest noise standard deviation
    pub max_noise_sigma: f32,
    /// Largest wave frequency scale, at most 0.1
    pub max_wave_x_scale: f64,
    /// Largest wave amplitude in pixels
    pub max_wave_y_scale: f64,
    /// Optional `(rows, columns)` every output is cropped to
    pub crop_size: Option<(usize, usize)>,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            policy: CompositionPolicy::default(),
            max_rotation_degrees: DEFAULT_MAX_ROTATION_DEGREES,
            background_patch: DEFAULT_BACKGROUND_PATCH,
            noise_mean: DEFAULT_NOISE_MEAN,
            max_noise_sigma: DEFAULT_MAX_NOISE_SIGMA,
            max_wave_x_scale: DEFAULT_MAX_WAVE_X_SCALE,
            max_wave_y_scale: DEFAULT_MAX_WAVE_Y_SCALE,
            crop_size: None,
        }
    }
}

impl AugmentConfig {
    /// Check every range against the domain of its primitive
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter outside its domain
    pub fn validate(&self) -> Result<()> {
        if !self.max_rotation_degrees.is_finite() || self.max_rotation_degrees < 0.0 {
            return Err(invalid_parameter(
                "max_rotation_degrees",
                &self.max_rotation_degrees,
                &"must be finite and non-negative",
            ));
        }
        if self.background_patch.0 == 0 || self.background_patch.1 == 0 {
            return Err(invalid_parameter(
                "background_patch",
                &format!("{}x{}", self.background_patch.0, self.background_patch.1),
                &"must cover at least one pixel",
            ));
        }
        if !self.noise_mean.is_finite() {
            return Err(invalid_parameter(
                "noise_mean",
                &self.noise_mean,
                &"must be finite",
            ));
        }
        if !self.max_noise_sigma.is_finite() || self.max_noise_sigma < 0.0 {
            return Err(invalid_parameter(
                "max_noise_sigma",
                &self.max_noise_sigma,
                &"must be finite and non-negative",
            ));
        }
        if !(0.0..=MAX_WAVE_X_SCALE).contains(&self.max_wave_x_scale) {
            return Err(invalid_parameter(
                "max_wave_x_scale",
                &self.max_wave_x_scale,
                &format!("must be in [0.0, {MAX_WAVE_X_SCALE}]"),
            ));
        }
        if !self.max_wave_y_scale.is_finite() || self.max_wave_y_scale < 0.0 {
            return Err(invalid_parameter(
                "max_wave_y_scale",
                &self.max_wave_y_scale,
                &"must be finite and non-negative",
            ));
        }
        if let Some((rows, cols)) = self.crop_size {
            if rows == 0 || cols == 0 {
                return Err(invalid_parameter(
                    "crop_size",
                    &format!("{rows}x{cols}"),
                    &"crop dimensions must be non-zero",
                ));
            }
        }
        Ok(())
    }

    /// Shape-preserving stages in application order
    pub fn stages(&self) -> Vec<Box<dyn Augmentation>> {
        vec![
            Box::new(RotateStage {
                max_degrees: self.max_rotation_degrees,
                background_patch: self.background_patch,
            }),
            Box::new(DistortStage {
                max_x_scale: self.max_wave_x_scale,
                max_y_scale: self.max_wave_y_scale,
            }),
            Box::new(NoiseStage {
                mean: self.noise_mean,
                max_sigma: self.max_noise_sigma,
            }),
        ]
    }
}

/// Generates batches of independently augmented images
pub struct Augmenter {
    stages: Vec<Box<dyn Augmentation>>,
    finisher: Option<CropStage>,
    policy: CompositionPolicy,
    rng: StdRng,
}

impl Augmenter {
    /// Build an augmenter from a validated configuration
    ///
    /// Without a seed the random source is seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: &AugmentConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let mut augmenter = Self::from_stages(config.stages(), config.policy, seed);
        augmenter.finisher = config.crop_size.map(|size| CropStage { size });
        Ok(augmenter)
    }

    /// Build an augmenter around caller-supplied stages
    pub fn from_stages(
        stages: Vec<Box<dyn Augmentation>>,
        policy: CompositionPolicy,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            stages,
            finisher: None,
            policy,
            rng,
        }
    }

    /// Composition policy in use
    pub const fn policy(&self) -> CompositionPolicy {
        self.policy
    }

    /// Produce exactly `count` augmented images of `source`
    ///
    /// A count of zero returns an empty batch without running any stage.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage rejects the source image
    pub fn generate(&mut self, source: &PixelArray, count: usize) -> Result<Vec<PixelArray>> {
        let mut outputs = Vec::with_capacity(count);
        for index in 0..count {
            outputs.push(self.augment_once(source, index)?);
        }
        debug!("Generated {count} augmented images");
        Ok(outputs)
    }

    fn augment_once(&mut self, source: &PixelArray, index: usize) -> Result<PixelArray> {
        let selection = self.policy.select(self.stages.len(), index, &mut self.rng);
        let mut image = source.clone();

        for stage_index in selection {
            if let Some(stage) = self.stages.get(stage_index) {
                debug!("Output {index}: applying {}", stage.name());
                image = stage.apply(image.view(), &mut self.rng)?;
            }
        }

        if let Some(ref crop) = self.finisher {
            debug!("Output {index}: applying {}", crop.name());
            image = crop.apply(image.view(), &mut self.rng)?;
        }

        Ok(image)
    }
}
