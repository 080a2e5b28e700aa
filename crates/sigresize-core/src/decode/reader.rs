//! Format-sniffing decode from an in-memory byte stream.

use std::io::{Cursor, Read};

use image::{ImageError, ImageFormat, ImageReader};

use super::{DecodeError, DecodeLimits, Raster};

/// Decode an image from bytes, sniffing the container format.
///
/// Pixel data is passed through without orientation or color transforms.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognizable image.
/// Returns `DecodeError::CorruptedFile` if the image is truncated or corrupt.
/// Returns `DecodeError::LimitsExceeded` if the image is larger than `limits` allow.
pub fn decode(bytes: &[u8], limits: DecodeLimits) -> Result<Raster, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    match reader.format() {
        None => return Err(DecodeError::InvalidFormat),
        // The JPEG backend fills in missing scan data instead of failing
        Some(ImageFormat::Jpeg) if !has_jpeg_end(bytes) => {
            return Err(DecodeError::CorruptedFile(
                "JPEG stream ends before its end-of-image marker".to_string(),
            ));
        }
        Some(_) => {}
    }
    reader.limits(limits.to_image_limits());

    let img = reader.decode().map_err(map_image_error)?;
    let raster = Raster::from_dynamic(img);

    tracing::trace!(
        width = raster.width,
        height = raster.height,
        format = ?raster.format,
        "decoded source"
    );
    Ok(raster)
}

/// Read an input stream to the end, releasing it before returning.
///
/// The reader is taken by value so that it is dropped on every exit path.
pub fn read_source<R: Read>(mut reader: R) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::IoError(e.to_string()))?;
    Ok(bytes)
}

/// Whether an EOI marker follows the last start-of-scan marker.
///
/// Entropy-coded data byte-stuffs `0xFF`, so neither marker can appear
/// inside a scan. Embedded thumbnails end before the main image's scans,
/// and data appended after the final EOI is ignored.
fn has_jpeg_end(bytes: &[u8]) -> bool {
    let is_marker = |pair: &[u8], code: u8| pair[0] == 0xFF && pair[1] == code;
    let last_scan = bytes
        .windows(2)
        .rposition(|pair| is_marker(pair, 0xDA))
        .unwrap_or(0);
    bytes[last_scan..]
        .windows(2)
        .any(|pair| is_marker(pair, 0xD9))
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        ImageError::Limits(e) => DecodeError::LimitsExceeded(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
