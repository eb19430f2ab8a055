//! Random rectangular crop

use crate::io::error::{Result, invalid_parameter};
use crate::transform::ensure_non_empty;
use ndarray::{Array3, ArrayView3, s};
use rand::Rng;

/// Placement of a crop inside its source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    /// First row of the window
    pub top: usize,
    /// First column of the window
    pub left: usize,
    /// Number of rows in the window
    pub height: usize,
    /// Number of columns in the window
    pub width: usize,
}

/// Pick a uniformly random window of `crop_size` that fits inside `dims`
///
/// Offsets range over `0..=rows - height` and `0..=cols - width`, so a crop the
/// size of the image always lands at the origin.
///
/// # Errors
///
/// Returns an error if the image is empty, either crop dimension is zero, or
/// the crop is larger than the image
pub fn choose_crop_window<R: Rng + ?Sized>(
    dims: (usize, usize, usize),
    crop_size: (usize, usize),
    rng: &mut R,
) -> Result<CropWindow> {
    ensure_non_empty("random crop", dims)?;
    let (rows, cols, _) = dims;
    let (height, width) = crop_size;

    if height == 0 || width == 0 {
        return Err(invalid_parameter(
            "crop_size",
            &format!("{height}x{width}"),
            &"crop dimensions must be non-zero",
        ));
    }
    if height > rows || width > cols {
        return Err(invalid_parameter(
            "crop_size",
            &format!("{height}x{width}"),
            &format!("crop must fit inside the {rows}x{cols} image"),
        ));
    }

    Ok(CropWindow {
        top: rng.random_range(0..=rows - height),
        left: rng.random_range(0..=cols - width),
        height,
        width,
    })
}

/// Copy the pixels covered by `window` into a new array
///
/// # Errors
///
/// Returns an error if the window extends past the image
pub fn extract_window<T: Clone>(image: ArrayView3<'_, T>, window: CropWindow) -> Result<Array3<T>> {
    let (rows, cols, _) = image.dim();
    let bottom = window.top + window.height;
    let right = window.left + window.width;
    if bottom > rows || right > cols {
        return Err(invalid_parameter(
            "window",
            &format!("{window:?}"),
            &format!("window exceeds the {rows}x{cols} image"),
        ));
    }
    Ok(image
        .slice(s![window.top..bottom, window.left..right, ..])
        .to_owned())
}

/// Crop a random `crop_size` region out of `image`
///
/// # Errors
///
/// Returns an error under the same conditions as [`choose_crop_window`]
pub fn random_crop<T: Clone, R: Rng + ?Sized>(
    image: ArrayView3<'_, T>,
    crop_size: (usize, usize),
    rng: &mut R,
) -> Result<Array3<T>> {
    let window = choose_crop_window(image.dim(), crop_size, rng)?;
    extract_window(image, window)
}
