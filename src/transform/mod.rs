//! Stateless image transforms
//!
//! Every primitive reads its input through a view and returns a freshly
//! allocated array, so the caller's image is never aliased or mutated.
//! Randomized primitives take their random source as an argument.

/// Random rectangular crop
pub mod crop;
/// Sinusoidal lane-shifting distortion
pub mod distort;
/// Additive Gaussian noise with clamping
pub mod noise;
/// Rotation about the centre with background filling
pub mod rotate;

use ndarray::Array3;

/// Working image representation: `(rows, columns, channels)` with values in [0, 1]
pub type PixelArray = Array3<f32>;

/// Reject arrays with no rows or no columns
pub(crate) fn ensure_non_empty(
    operation: &'static str,
    dims: (usize, usize, usize),
) -> crate::io::error::Result<()> {
    if dims.0 == 0 || dims.1 == 0 || dims.2 == 0 {
        return Err(crate::io::error::invalid_shape(
            operation,
            &"at least one row, column and channel",
            dims,
        ));
    }
    Ok(())
}
