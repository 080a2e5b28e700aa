//! Exact-size resizing for submission targets.
//!
//! The resize is an unconditional stretch: the output always has exactly
//! the requested dimensions, whatever the source aspect ratio.
//! All functions return new `Raster` instances without modifying the input.

use thiserror::Error;

use super::{DecodeLimits, FilterType, Raster};

/// Bytes per pixel of the `Rgba32F` buffer `image` uses between the
/// vertical and horizontal passes of a filtered resize.
const INTERMEDIATE_PIXEL_BYTES: u64 = 16;

/// Errors that can occur while resizing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeError {
    /// Width or height is zero
    #[error("Invalid target dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target is larger than the configured limits allow
    #[error("Target dimensions {width}x{height} exceed the configured limits")]
    ExceedsLimits { width: u32, height: u32 },

    /// The source raster's buffer does not match its declared size
    #[error("Source raster buffer does not match its dimensions")]
    InvalidRaster,
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `ResizeError::InvalidDimensions` if either target dimension is zero,
/// and `ResizeError::ExceedsLimits` if the target is larger than
/// `DecodeLimits::default()` allows.
pub fn resize(
    image: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, ResizeError> {
    resize_within(image, width, height, filter, DecodeLimits::default())
}

/// Resize an image to exact dimensions, refusing targets over `limits`.
///
/// Targets are bounded by the same limits as decoded sources.
pub fn resize_within(
    image: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
    limits: DecodeLimits,
) -> Result<Raster, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }
    if !fits_limits(image, width, height, filter, limits) {
        return Err(ResizeError::ExceedsLimits { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let source = image.to_dynamic().ok_or(ResizeError::InvalidRaster)?;
    let resized = source.resize_exact(width, height, filter.to_image_filter());

    Ok(Raster::from_dynamic(resized))
}

/// Whether the output buffer, and the float buffer a filtered resize
/// allocates on the way, stay within `limits`.
fn fits_limits(
    image: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
    limits: DecodeLimits,
) -> bool {
    if width > limits.max_width || height > limits.max_height {
        return false;
    }

    let pixels = u64::from(width).checked_mul(u64::from(height));
    let output = pixels.and_then(|p| p.checked_mul(image.format.channels() as u64));
    let intermediate = match filter {
        FilterType::Nearest => Some(0),
        _ => u64::from(image.width)
            .checked_mul(u64::from(height))
            .and_then(|p| p.checked_mul(INTERMEDIATE_PIXEL_BYTES)),
    };

    match (output, intermediate) {
        (Some(output), Some(intermediate)) => {
            output <= limits.max_alloc_bytes && intermediate <= limits.max_alloc_bytes
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelFormat;
    use crate::test_support::gradient;

    #[test]
    fn test_resize_basic() {
        let img = gradient(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = gradient(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_upscale() {
        let img = gradient(50, 25);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        // Square source stretched into a wide signature box
        let img = gradient(1000, 1000);
        let resized = resize(&img, 350, 150, FilterType::Bilinear).unwrap();

        assert_eq!((resized.width, resized.height), (350, 150));

        // Wide source squashed into a tall passport box
        let img = gradient(600, 100);
        let resized = resize(&img, 413, 531, FilterType::Bilinear).unwrap();

        assert_eq!((resized.width, resized.height), (413, 531));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(100, 50);

        assert_eq!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(ResizeError::InvalidDimensions {
                width: 0,
                height: 50
            })
        );
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_huge_target_is_rejected() {
        let img = gradient(8, 8);

        assert_eq!(
            resize(&img, u32::MAX, u32::MAX, FilterType::Bilinear),
            Err(ResizeError::ExceedsLimits {
                width: u32::MAX,
                height: u32::MAX
            })
        );
        assert!(matches!(
            resize(&img, u32::MAX, u32::MAX, FilterType::Nearest),
            Err(ResizeError::ExceedsLimits { .. })
        ));
    }

    #[test]
    fn test_resize_within_custom_limits() {
        let img = gradient(100, 50);
        let limits = DecodeLimits {
            max_width: 64,
            max_height: 64,
            ..DecodeLimits::default()
        };

        assert!(resize_within(&img, 64, 64, FilterType::Bilinear, limits).is_ok());
        assert_eq!(
            resize_within(&img, 65, 10, FilterType::Bilinear, limits),
            Err(ResizeError::ExceedsLimits {
                width: 65,
                height: 10
            })
        );
    }

    #[test]
    fn test_resize_within_alloc_limit() {
        let img = gradient(100, 50);
        let limits = DecodeLimits {
            max_alloc_bytes: 40 * 40 * 3,
            ..DecodeLimits::default()
        };

        // Output fits, but the filtered pass needs 100 * 40 * 16 bytes
        assert!(resize_within(&img, 40, 40, FilterType::Bilinear, limits).is_err());
        assert!(resize_within(&img, 40, 40, FilterType::Nearest, limits).is_ok());
        assert!(resize_within(&img, 41, 40, FilterType::Nearest, limits).is_err());
    }

    #[test]
    fn test_resize_keeps_pixel_format() {
        let img = Raster::new(20, 10, PixelFormat::LumaA8, vec![200u8; 20 * 10 * 2]);
        let resized = resize(&img, 7, 3, FilterType::Bilinear).unwrap();

        assert_eq!(resized.format, PixelFormat::LumaA8);
        assert_eq!(resized.pixels.len(), 7 * 3 * 2);
    }

    #[test]
    fn test_resize_inconsistent_raster() {
        let img = Raster {
            width: 10,
            height: 10,
            format: PixelFormat::Rgb8,
            pixels: vec![0u8; 5],
        };
        assert_eq!(
            resize(&img, 5, 5, FilterType::Bilinear),
            Err(ResizeError::InvalidRaster)
        );
    }

    #[test]
    fn test_all_filter_types() {
        let img = gradient(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
