//! Augmentation constants and runtime configuration defaults

// Rotation stage
/// Largest rotation, in degrees, sampled in either direction
pub const DEFAULT_MAX_ROTATION_DEGREES: f64 = 30.0;
/// Top-left region averaged to estimate the background colour
pub const DEFAULT_BACKGROUND_PATCH: (usize, usize) = (5, 5);

// Noise stage
/// Mean of the additive Gaussian noise
pub const DEFAULT_NOISE_MEAN: f32 = 0.0;
/// Largest standard deviation sampled for additive noise
pub const DEFAULT_MAX_NOISE_SIGMA: f32 = 0.03;

// Distortion stage
/// Upper bound accepted for the wave frequency scale
pub const MAX_WAVE_X_SCALE: f64 = 0.1;
/// Largest wave frequency scale sampled by the distortion stage
pub const DEFAULT_MAX_WAVE_X_SCALE: f64 = 0.05;
/// Largest wave amplitude, in pixels, sampled by the distortion stage
pub const DEFAULT_MAX_WAVE_Y_SCALE: f64 = 5.0;

/// Number of outputs produced per object when the environment gives none
pub const DEFAULT_OUTPUT_COUNT: usize = 3;

// Output settings
/// Infix placed between the source base name and the output index
pub const OUTPUT_INFIX: &str = "-augmented-";
/// Extension of every generated output
pub const OUTPUT_EXTENSION: &str = "jpg";
/// JPEG quality used when encoding outputs
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
