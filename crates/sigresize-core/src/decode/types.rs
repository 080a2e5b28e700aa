//! Core types for image decoding.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognizable image container.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The container was recognized but its data is corrupted or truncated.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image exceeds the configured decode limits.
    #[error("Image exceeds decode limits: {0}")]
    LimitsExceeded(String),

    /// Reading the input stream failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resource limits applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum accepted source width in pixels.
    pub max_width: u32,
    /// Maximum accepted source height in pixels.
    pub max_height: u32,
    /// Maximum bytes the decoder may allocate.
    pub max_alloc_bytes: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_width: 16_384,
            max_height: 16_384,
            max_alloc_bytes: 512 * 1024 * 1024,
        }
    }
}

impl DecodeLimits {
    /// Convert to the image crate's decoder limits.
    pub fn to_image_limits(self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_width);
        limits.max_image_height = Some(self.max_height);
        limits.max_alloc = Some(self.max_alloc_bytes);
        limits
    }
}

/// Channel layout of a raster, always 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Single gray channel.
    Luma8,
    /// Gray plus alpha.
    LumaA8,
    /// Red, green, blue.
    Rgb8,
    /// Red, green, blue, alpha.
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::LumaA8 => 2,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::LumaA8 | PixelFormat::Rgba8)
    }
}

/// A decoded image held in memory.
///
/// Every transform produces a new `Raster`; the pixel buffer is never
/// modified in place once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub format: PixelFormat,
    /// Pixel data in row-major order.
    /// Length should be width * height * format.channels().
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            Self::expected_len(width, height, format),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Create an RGB raster, the layout used by most callers.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::new(width, height, PixelFormat::Rgb8, pixels)
    }

    /// Build a raster from a decoded image, keeping its channel layout.
    ///
    /// Sources wider than 8 bits per channel are narrowed to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (format, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Luma8, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelFormat::LumaA8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb8, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba8, buf.into_raw()),
            DynamicImage::ImageLuma16(_) => (PixelFormat::Luma8, img.into_luma8().into_raw()),
            DynamicImage::ImageLumaA16(_) => {
                (PixelFormat::LumaA8, img.into_luma_alpha8().into_raw())
            }
            other if other.color().has_alpha() => (PixelFormat::Rgba8, other.into_rgba8().into_raw()),
            other => (PixelFormat::Rgb8, other.into_rgb8().into_raw()),
        };
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Convert to an image::DynamicImage for further processing.
    ///
    /// Returns `None` when the buffer does not match the declared dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h, px) = (self.width, self.height, self.pixels.clone());
        match self.format {
            PixelFormat::Luma8 => GrayImage::from_raw(w, h, px).map(DynamicImage::ImageLuma8),
            PixelFormat::LumaA8 => {
                GrayAlphaImage::from_raw(w, h, px).map(DynamicImage::ImageLumaA8)
            }
            PixelFormat::Rgb8 => RgbImage::from_raw(w, h, px).map(DynamicImage::ImageRgb8),
            PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, px).map(DynamicImage::ImageRgba8),
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Whether the buffer length agrees with dimensions and format.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == Self::expected_len(self.width, self.height, self.format)
    }

    fn expected_len(width: u32, height: u32, format: PixelFormat) -> usize {
        width as usize * height as usize * format.channels()
    }
}
