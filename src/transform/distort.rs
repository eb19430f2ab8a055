//! Wave distortion built from per-lane circular shifts
//!
//! A lane is a row (horizontal orientation) or a column (vertical orientation).
//! Lane `i` is rotated by `floor(y_scale * wave(PI * i * x_scale))` positions,
//! with values leaving one edge re-entering at the other.

use crate::io::configuration::MAX_WAVE_X_SCALE;
use crate::io::error::{AugmentError, Result, invalid_parameter, invalid_shape};
use crate::transform::ensure_non_empty;
use ndarray::{Array3, ArrayView3};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Axis along which lanes are shifted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Each row is shifted along the columns
    Horizontal,
    /// Each column is shifted along the rows
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "hor" => Ok(Self::Horizontal),
            "vertical" | "ver" => Ok(Self::Vertical),
            _ => Err(invalid_parameter(
                "orientation",
                &s,
                &"orientation should be 'horizontal' or 'vertical'",
            )),
        }
    }
}

/// Periodic function driving the shift profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    /// `sin`
    Sine,
    /// `cos`
    Cosine,
}

impl Wave {
    /// Evaluate the wave at `x` radians
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
        }
    }
}

impl fmt::Display for Wave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sine => write!(f, "sine"),
            Self::Cosine => write!(f, "cosine"),
        }
    }
}

impl FromStr for Wave {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Self::Sine),
            "cosine" | "cos" => Ok(Self::Cosine),
            _ => Err(invalid_parameter(
                "wave",
                &s,
                &"supported waves are 'sine' and 'cosine'",
            )),
        }
    }
}

/// Shift amount applied to lane `lane` for the given wave parameters
pub fn lane_shift(wave: Wave, lane: usize, x_scale: f64, y_scale: f64) -> isize {
    (y_scale * wave.eval(PI * lane as f64 * x_scale)).floor() as isize
}

/// Circularly shift every lane by `shift(lane)` positions in all channels
///
/// Output element `j` of a lane is input element `(j - shift) mod len`, so
/// positive shifts move content towards higher indices.
pub fn shift_lanes<T: Copy>(
    image: ArrayView3<'_, T>,
    orientation: Orientation,
    shift: impl Fn(usize) -> isize,
) -> Array3<T> {
    let (rows, cols, channels) = image.dim();
    let (lane_count, lane_len) = match orientation {
        Orientation::Horizontal => (rows, cols),
        Orientation::Vertical => (cols, rows),
    };
    let shifts: Vec<isize> = (0..lane_count).map(shift).collect();
    let source_index = |position: usize, lane: usize| {
        let amount = shifts.get(lane).copied().unwrap_or(0);
        (position as isize - amount).rem_euclid(lane_len as isize) as usize
    };

    Array3::from_shape_fn((rows, cols, channels), |(row, col, channel)| {
        let (source_row, source_col) = match orientation {
            Orientation::Horizontal => (row, source_index(col, row)),
            Orientation::Vertical => (source_index(row, col), col),
        };
        image[(source_row, source_col, channel)]
    })
}

/// Warp a three-channel image with a sine or cosine lane-shift profile
///
/// # Errors
///
/// Returns an error if:
/// - The image is empty or doesn't have exactly 3 channels
/// - `x_scale` is outside [0, 0.1]
/// - `y_scale` is outside [0, min(rows, columns)]
pub fn distort<T: Copy>(
    image: ArrayView3<'_, T>,
    orientation: Orientation,
    wave: Wave,
    x_scale: f64,
    y_scale: f64,
) -> Result<Array3<T>> {
    let dims = image.dim();
    ensure_non_empty("distort", dims)?;
    if dims.2 != 3 {
        return Err(invalid_shape("distort", &"exactly 3 channels", dims));
    }
    if !(0.0..=MAX_WAVE_X_SCALE).contains(&x_scale) {
        return Err(invalid_parameter(
            "x_scale",
            &x_scale,
            &format!("x_scale should be in [0.0, {MAX_WAVE_X_SCALE}]"),
        ));
    }
    let max_y_scale = dims.0.min(dims.1) as f64;
    if !(0.0..=max_y_scale).contains(&y_scale) {
        return Err(invalid_parameter(
            "y_scale",
            &y_scale,
            &format!("y_scale should be in [0, {max_y_scale}]"),
        ));
    }

    Ok(shift_lanes(image, orientation, |lane| {
        lane_shift(wave, lane, x_scale, y_scale)
    }))
}
