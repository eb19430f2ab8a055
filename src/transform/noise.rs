//! Additive Gaussian noise for normalized images

use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array3, ArrayView3};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Add independent `N(mean, sigma)` noise to every element and clamp to [0, 1]
///
/// The input is expected to be normalized to [0, 1]; arrays scaled to
/// [0, 255] saturate to 1.0 almost everywhere.
///
/// # Errors
///
/// Returns an error if `mean` is not finite or `sigma` is negative or not finite
pub fn gaussian_noise<R: Rng + ?Sized>(
    image: ArrayView3<'_, f32>,
    mean: f32,
    sigma: f32,
    rng: &mut R,
) -> Result<Array3<f32>> {
    if !mean.is_finite() {
        return Err(invalid_parameter("mean", &mean, &"noise mean must be finite"));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(invalid_parameter(
            "sigma",
            &sigma,
            &"noise sigma must be finite and non-negative",
        ));
    }

    let normal = Normal::new(mean, sigma)
        .map_err(|e| invalid_parameter("sigma", &sigma, &e))?;

    Ok(image.mapv(|value| num_traits::clamp(value + normal.sample(rng), 0.0, 1.0)))
}
