//! Storage, event and codec plumbing around the augmentation core

/// Local hosting runtime arguments and invocation
pub mod cli;
/// Augmentation constants and defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// Bucket notification event parsing
pub mod event;
/// Storage event handler
pub mod handler;
/// Raster decoding and encoding
pub mod image;
/// Grid previews of generated batches
pub mod preview;
/// Progress display for output writes
pub mod progress;
/// Output naming and writing
pub mod sink;
/// Object storage backends
pub mod storage;
