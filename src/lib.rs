//! Event-triggered image augmentation
//!
//! When an image object arrives in a storage bucket, the handler decodes it,
//! generates a batch of perturbed variants (crop, rotation, noise, wave
//! distortion) and writes them to an output bucket.

#![deny(unsafe_code)]

/// Augmentation driver composing transforms into batches
pub mod augment;
/// Input/output boundary: storage, events, codecs, configuration and errors
pub mod io;
/// Mathematical utilities for sampling and region statistics
pub mod math;
/// Stateless image transform primitives
pub mod transform;

pub use augment::{AugmentConfig, Augmenter, CompositionPolicy};
pub use io::error::{AugmentError, Result};
pub use transform::PixelArray;
