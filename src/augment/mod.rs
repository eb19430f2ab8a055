//! Augmentation driver turning one source image into a batch of variants

/// Batch generation and configuration
pub mod driver;
/// Stage composition policies
pub mod policy;
/// Randomized stages wrapping the transform primitives
pub mod stage;

pub use driver::{AugmentConfig, Augmenter};
pub use policy::CompositionPolicy;
