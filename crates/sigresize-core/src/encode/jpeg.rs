//! JPEG encoding at a fixed quality.
//!
//! Grayscale rasters are written as single-channel JPEG. Rasters with an
//! alpha channel are composited onto white first, since JPEG has no alpha.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::borrow::Cow;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{PixelFormat, Raster};

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `raster` - Source pixels in any supported layout
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (raster.width, raster.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * raster.format.channels();
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let (pixels, color) = jpeg_layout(raster);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Pixel bytes and color type the JPEG encoder accepts for this raster.
fn jpeg_layout(raster: &Raster) -> (Cow<'_, [u8]>, ExtendedColorType) {
    match raster.format {
        PixelFormat::Luma8 => (Cow::Borrowed(raster.pixels.as_slice()), ExtendedColorType::L8),
        PixelFormat::Rgb8 => (Cow::Borrowed(raster.pixels.as_slice()), ExtendedColorType::Rgb8),
        PixelFormat::LumaA8 => (
            Cow::Owned(flatten_onto_white(&raster.pixels, 1)),
            ExtendedColorType::L8,
        ),
        PixelFormat::Rgba8 => (
            Cow::Owned(flatten_onto_white(&raster.pixels, 3)),
            ExtendedColorType::Rgb8,
        ),
    }
}

/// Drop the trailing alpha channel, blending each color channel over white.
fn flatten_onto_white(pixels: &[u8], color_channels: usize) -> Vec<u8> {
    let stride = color_channels + 1;
    let mut out = Vec::with_capacity(pixels.len() / stride * color_channels);
    for px in pixels.chunks_exact(stride) {
        let alpha = px[color_channels] as u32;
        for &c in &px[..color_channels] {
            let blended = (c as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            out.push(blended as u8);
        }
    }
    out
}


// ============================================================================
// Property-Based Tests
// ============================================================================
