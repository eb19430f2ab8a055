//! Augmentation stages that sample fresh transform parameters on every call

use crate::io::error::Result;
use crate::transform::PixelArray;
use crate::transform::crop::random_crop;
use crate::transform::distort::{Orientation, Wave, distort};
use crate::transform::noise::gaussian_noise;
use crate::transform::rotate::rotate;
use ndarray::ArrayView3;
use rand::{Rng, RngCore};

/// One randomized step of an augmentation pipeline
///
/// Implementations draw their parameters from `rng` inside the primitive's
/// valid domain, so a conforming image never produces an error.
pub trait Augmentation {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Produce a new augmented image from `image`
    ///
    /// # Errors
    ///
    /// Returns an error if the image does not conform to the stage's
    /// shape requirements
    fn apply(&self, image: ArrayView3<'_, f32>, rng: &mut dyn RngCore) -> Result<PixelArray>;
}

/// Rotation by a uniformly sampled angle in `[-max_degrees, max_degrees]`
#[derive(Debug, Clone)]
pub struct RotateStage {
    /// Largest rotation magnitude in degrees
    pub max_degrees: f64,
    /// Corner region used to estimate the background colour
    pub background_patch: (usize, usize),
}

impl Augmentation for RotateStage {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn apply(&self, image: ArrayView3<'_, f32>, rng: &mut dyn RngCore) -> Result<PixelArray> {
        let angle = rng.random_range(-self.max_degrees..=self.max_degrees);
        rotate(image, angle, self.background_patch)
    }
}

/// Wave distortion with random orientation, wave and scales
///
/// The amplitude is capped by the image's smaller side so the distortion
/// precondition always holds. Images without exactly three channels pass
/// through unchanged.
#[derive(Debug, Clone)]
pub struct DistortStage {
    /// Largest frequency scale sampled
    pub max_x_scale: f64,
    /// Largest amplitude in pixels sampled
    pub max_y_scale: f64,
}

impl Augmentation for DistortStage {
    fn name(&self) -> &'static str {
        "distort"
    }

    fn apply(&self, image: ArrayView3<'_, f32>, rng: &mut dyn RngCore) -> Result<PixelArray> {
        let (rows, cols, channels) = image.dim();
        if channels != 3 {
            return Ok(image.to_owned());
        }
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let wave = if rng.random_bool(0.5) {
            Wave::Sine
        } else {
            Wave::Cosine
        };
        let x_scale = rng.random_range(0.0..=self.max_x_scale);
        let y_scale = rng.random_range(0.0..=self.max_y_scale.min(rows.min(cols) as f64));
        distort(image, orientation, wave, x_scale, y_scale)
    }
}

/// Additive Gaussian noise with a sigma sampled from `[0, max_sigma]`
#[derive(Debug, Clone)]
pub struct NoiseStage {
    /// Noise mean
    pub mean: f32,
    /// Largest standard deviation sampled
    pub max_sigma: f32,
}

impl Augmentation for NoiseStage {
    fn name(&self) -> &'static str {
        "noise"
    }

    fn apply(&self, image: ArrayView3<'_, f32>, rng: &mut dyn RngCore) -> Result<PixelArray> {
        let sigma = rng.random_range(0.0..=self.max_sigma);
        gaussian_noise(image, self.mean, sigma, rng)
    }
}

/// Random crop to a fixed size, clamped to the image dimensions
#[derive(Debug, Clone)]
pub struct CropStage {
    /// Requested `(rows, columns)` of every output
    pub size: (usize, usize),
}

impl Augmentation for CropStage {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn apply(&self, image: ArrayView3<'_, f32>, rng: &mut dyn RngCore) -> Result<PixelArray> {
        let (rows, cols, _) = image.dim();
        let size = (self.size.0.min(rows), self.size.1.min(cols));
        random_crop(image, size, rng)
    }
}
