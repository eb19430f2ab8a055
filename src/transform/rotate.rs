//! Rotation about the image centre with background filling
//!
//! Interpolated rotation leaves a zero-valued border where the canvas has no
//! source pixels. Those pixels, and any pixel with a non-positive channel, are
//! replaced by the mean colour of a corner patch instead of staying black.

use crate::io::error::{Result, invalid_parameter};
use crate::math::interpolation::{axis_center, bilinear_sample};
use crate::math::statistics::corner_patch_mean;
use crate::transform::ensure_non_empty;
use bitvec::vec::BitVec;
use ndarray::{Array3, ArrayView3, Axis};
use num_traits::Float;

/// Rotate `image` by `angle_degrees` counter-clockwise without resizing the canvas
///
/// The background colour is the per-channel mean of the top-left `bg_patch`
/// region of the input, clipped to the image.
///
/// # Errors
///
/// Returns an error if the image is empty, the angle is not finite, or either
/// patch dimension is zero
pub fn rotate<T: Float>(
    image: ArrayView3<'_, T>,
    angle_degrees: f64,
    bg_patch: (usize, usize),
) -> Result<Array3<T>> {
    let dims = image.dim();
    ensure_non_empty("rotate", dims)?;

    if !angle_degrees.is_finite() {
        return Err(invalid_parameter(
            "angle_degrees",
            &angle_degrees,
            &"rotation angle must be finite",
        ));
    }
    if bg_patch.0 == 0 || bg_patch.1 == 0 {
        return Err(invalid_parameter(
            "bg_patch",
            &format!("{}x{}", bg_patch.0, bg_patch.1),
            &"background patch must cover at least one pixel",
        ));
    }

    let background = corner_patch_mean(&image, bg_patch).ok_or_else(|| {
        invalid_parameter(
            "bg_patch",
            &format!("{}x{}", bg_patch.0, bg_patch.1),
            &"background patch does not overlap the image",
        )
    })?;

    let mut rotated = rotate_canvas(&image, angle_degrees);
    fill_background(&mut rotated, &background);
    Ok(rotated)
}

// Inverse-maps every output pixel back into the source and samples it
fn rotate_canvas<T: Float>(image: &ArrayView3<'_, T>, angle_degrees: f64) -> Array3<T> {
    let (rows, cols, channels) = image.dim();
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let center_row = axis_center(rows);
    let center_col = axis_center(cols);

    Array3::from_shape_fn((rows, cols, channels), |(row, col, channel)| {
        let dy = row as f64 - center_row;
        let dx = col as f64 - center_col;
        let source_col = dx.mul_add(cos, -dy * sin) + center_col;
        let source_row = dx.mul_add(sin, dy * cos) + center_row;
        T::from(bilinear_sample(image, source_row, source_col, channel)).unwrap_or_else(T::zero)
    })
}

// Replaces every pixel with a non-positive channel by the background colour
fn fill_background<T: Float>(image: &mut Array3<T>, background: &[f64]) {
    let (_, cols, _) = image.dim();
    let mut empty = BitVec::<usize>::repeat(false, image.len_of(Axis(0)) * cols);

    for ((row, col, _), value) in image.indexed_iter() {
        if *value <= T::zero() {
            empty.set(row * cols + col, true);
        }
    }

    let fill: Vec<T> = background
        .iter()
        .map(|&mean| T::from(mean).unwrap_or_else(T::zero))
        .collect();

    for index in empty.iter_ones() {
        let (row, col) = (index / cols, index % cols);
        for (channel, &colour) in fill.iter().enumerate() {
            if let Some(value) = image.get_mut((row, col, channel)) {
                *value = colour;
            }
        }
    }
}
