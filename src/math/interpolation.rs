//! Bilinear sampling of pixel arrays at fractional coordinates
//!
//! Samples that fall outside the array read as zero, matching a constant
//! boundary with fill value 0. Rotation relies on this to leave a zero border
//! that background filling can later detect.

use ndarray::ArrayView3;
use num_traits::Float;

/// Read one channel of a pixel as `f64`, treating out-of-bounds positions as zero
fn value_or_zero<T: Float>(image: &ArrayView3<'_, T>, row: isize, col: isize, channel: usize) -> f64 {
    if row < 0 || col < 0 {
        return 0.0;
    }
    image
        .get((row as usize, col as usize, channel))
        .and_then(|value| value.to_f64())
        .unwrap_or(0.0)
}

/// Sample a channel at fractional `(row, col)` using bilinear weights
///
/// Each of the four neighbours outside the array contributes zero, so a point
/// more than one pixel outside the image samples to exactly zero.
pub fn bilinear_sample<T: Float>(image: &ArrayView3<'_, T>, row: f64, col: f64, channel: usize) -> f64 {
    let row_floor = row.floor();
    let col_floor = col.floor();
    let row_frac = row - row_floor;
    let col_frac = col - col_floor;
    let r0 = row_floor as isize;
    let c0 = col_floor as isize;

    let top = value_or_zero(image, r0, c0, channel) * (1.0 - col_frac)
        + value_or_zero(image, r0, c0 + 1, channel) * col_frac;
    let bottom = value_or_zero(image, r0 + 1, c0, channel) * (1.0 - col_frac)
        + value_or_zero(image, r0 + 1, c0 + 1, channel) * col_frac;

    top.mul_add(1.0 - row_frac, bottom * row_frac)
}

/// Centre of an axis of `len` pixels in pixel-index coordinates
pub fn axis_center(len: usize) -> f64 {
    (len as f64 - 1.0) / 2.0
}
