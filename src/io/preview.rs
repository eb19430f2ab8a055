//! Contact-sheet previews of generated batches
//!
//! Diagnostic tooling only; nothing in the transform or driver modules
//! depends on it.

use crate::io::error::{AugmentError, Result, invalid_parameter, invalid_shape};
use crate::io::image::{ChannelOrder, to_dynamic_image};
use crate::transform::PixelArray;
use ndarray::{Array3, s};
use std::path::Path;

/// Rows and columns of a grid holding exactly `count` cells, as square as possible
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let rows = (1..=count)
        .take_while(|rows| rows * rows <= count)
        .filter(|rows| count % rows == 0)
        .last()
        .unwrap_or(1);
    (rows, count / rows)
}

/// Tile `images` row by row into an `nrows` x `ncols` grid
///
/// # Errors
///
/// Returns an error if the number of images differs from `nrows * ncols`, or
/// the images don't all share one shape
pub fn compose_grid(images: &[PixelArray], nrows: usize, ncols: usize) -> Result<PixelArray> {
    if images.len() != nrows * ncols || images.is_empty() {
        return Err(invalid_parameter(
            "images",
            &images.len(),
            &format!("number of images should be {nrows}x{ncols}"),
        ));
    }

    let Some(first) = images.first() else {
        return Err(invalid_parameter("images", &0, &"no images to preview"));
    };
    let (rows, cols, channels) = first.dim();
    let mut sheet = Array3::zeros((rows * nrows, cols * ncols, channels));

    for (index, image) in images.iter().enumerate() {
        if image.dim() != first.dim() {
            return Err(invalid_shape(
                "preview",
                &format!("{rows}x{cols}x{channels} like the first image"),
                image.dim(),
            ));
        }
        let (grid_row, grid_col) = (index / ncols, index % ncols);
        let top = grid_row * rows;
        let left = grid_col * cols;
        sheet
            .slice_mut(s![top..top + rows, left..left + cols, ..])
            .assign(image);
    }

    Ok(sheet)
}

/// Save a grid preview of `images` to `path`, format chosen by extension
///
/// # Errors
///
/// Returns an error if the grid cannot be composed, the parent directory
/// cannot be created, or the image cannot be saved
pub fn save_preview(images: &[PixelArray], path: &Path) -> Result<()> {
    let (nrows, ncols) = grid_shape(images.len());
    let sheet = compose_grid(images, nrows, ncols)?;
    let dynamic = to_dynamic_image(sheet.view(), ChannelOrder::Rgb)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AugmentError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    dynamic.save(path).map_err(|e| AugmentError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
