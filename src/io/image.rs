//! Conversion between encoded raster bytes and pixel arrays

use crate::io::configuration::DEFAULT_JPEG_QUALITY;
use crate::io::error::{AugmentError, Result, invalid_shape};
use crate::transform::PixelArray;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{Array3, ArrayView3};

/// Channel order of pixel arrays held in memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Blue, green, red
    Bgr,
}

/// Settings for encoding generated images
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// JPEG quality between 1 and 100
    pub quality: u8,
    /// Channel order of the arrays handed to the encoder
    pub channel_order: ChannelOrder,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            channel_order: ChannelOrder::Rgb,
        }
    }
}

/// Decode raster bytes into an RGB pixel array normalized to [0, 1]
///
/// The format is detected from the bytes; `origin` only labels errors.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image
pub fn decode_image(bytes: &[u8], origin: &str) -> Result<PixelArray> {
    let decoded = image::load_from_memory(bytes).map_err(|source| AugmentError::ImageDecode {
        origin: origin.to_string(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let data: Vec<f32> = rgb
        .into_raw()
        .into_iter()
        .map(|value| f32::from(value) / 255.0)
        .collect();
    Ok(Array3::from_shape_vec((height, width, 3), data)?)
}

/// Quantize a normalized value to a byte
fn to_byte(value: f32) -> u8 {
    (num_traits::clamp(value, 0.0, 1.0) * 255.0).round() as u8
}

/// Convert a pixel array to an 8-bit image, reordering channels if needed
///
/// # Errors
///
/// Returns an error if the array doesn't have 1 or 3 channels or is too
/// large for the image buffer
pub fn to_dynamic_image(image: ArrayView3<'_, f32>, order: ChannelOrder) -> Result<DynamicImage> {
    let (rows, cols, channels) = image.dim();
    let width = u32::try_from(cols).map_err(|e| invalid_shape("encode", &e, (rows, cols, channels)))?;
    let height = u32::try_from(rows).map_err(|e| invalid_shape("encode", &e, (rows, cols, channels)))?;

    match channels {
        1 => {
            let raw: Vec<u8> = image.iter().map(|&value| to_byte(value)).collect();
            GrayImage::from_raw(width, height, raw)
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(|| invalid_shape("encode", &"a contiguous buffer", (rows, cols, channels)))
        }
        3 => {
            let mut raw = Vec::with_capacity(rows * cols * 3);
            for pixel in image.rows() {
                let values: Vec<u8> = pixel.iter().map(|&value| to_byte(value)).collect();
                match order {
                    ChannelOrder::Rgb => raw.extend(values),
                    ChannelOrder::Bgr => raw.extend(values.into_iter().rev()),
                }
            }
            RgbImage::from_raw(width, height, raw)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| invalid_shape("encode", &"a contiguous buffer", (rows, cols, channels)))
        }
        _ => Err(invalid_shape("encode", &"1 or 3 channels", (rows, cols, channels))),
    }
}

/// Encode a pixel array as JPEG bytes
///
/// # Errors
///
/// Returns an error if the array cannot be converted or the encoder fails
pub fn encode_jpeg(image: ArrayView3<'_, f32>, options: EncodeOptions, name: &str) -> Result<Vec<u8>> {
    let dynamic = to_dynamic_image(image, options.channel_order)?;
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, options.quality);
    dynamic
        .write_with_encoder(encoder)
        .map_err(|source| AugmentError::ImageEncode {
            name: name.to_string(),
            source,
        })?;
    Ok(bytes)
}
