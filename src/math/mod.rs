//! Mathematical utilities for the transform primitives

/// Bilinear sampling with a constant zero boundary
pub mod interpolation;
/// Summary statistics over pixel regions
pub mod statistics;
