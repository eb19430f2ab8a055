//! Summary statistics over pixel regions

use ndarray::{ArrayView3, Axis, s};
use num_traits::Float;

/// Per-channel mean of the top-left `patch` region, clipped to the image
///
/// Returns `None` when the clipped region holds no pixels.
pub fn corner_patch_mean<T: Float>(image: &ArrayView3<'_, T>, patch: (usize, usize)) -> Option<Vec<f64>> {
    let (rows, cols, _) = image.dim();
    let region = image.slice(s![..patch.0.min(rows), ..patch.1.min(cols), ..]);
    let (patch_rows, patch_cols, _) = region.dim();
    let count = patch_rows * patch_cols;
    if count == 0 {
        return None;
    }

    let means = region
        .axis_iter(Axis(2))
        .map(|channel| {
            let sum: f64 = channel.iter().filter_map(|value| value.to_f64()).sum();
            sum / count as f64
        })
        .collect();
    Some(means)
}
