//! Image encoding for sigresize.
//!
//! This module provides functionality for:
//! - Encoding rasters to JPEG at a fixed quality
//! - Searching for the highest quality that fits a byte ceiling
//!
//! # Examples
//!
//! ```ignore
//! use sigresize_core::encode::{encode_within_limit, QualitySearch};
//! use sigresize_core::{CancelToken, ImageCodec};
//!
//! let result = encode_within_limit(
//!     &ImageCodec::default(),
//!     &raster,
//!     20 * 1024,
//!     QualitySearch::default(),
//!     &CancelToken::new(),
//! )?;
//! println!("q={} -> {} bytes", result.quality_used, result.size_bytes);
//! ```

mod jpeg;
mod search;

pub use jpeg::{encode_jpeg, EncodeError};
pub use search::{
    encode_within_limit, QualitySearch, DEFAULT_QUALITY_FLOOR, DEFAULT_QUALITY_STEP, MAX_QUALITY,
};

use crate::decode::Raster;

/// Output of one encode call, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    /// Length of `bytes`.
    pub size_bytes: usize,
    /// Quality the bytes were produced with (1-100).
    pub quality_used: u8,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of encodes performed to produce this result.
    pub attempts: u32,
    /// Size ceiling the encode was asked to meet, if any.
    pub max_bytes: Option<usize>,
}

impl EncodedResult {
    pub(crate) fn new(
        bytes: Vec<u8>,
        quality_used: u8,
        raster: &Raster,
        max_bytes: Option<usize>,
        attempts: u32,
    ) -> Self {
        Self {
            size_bytes: bytes.len(),
            bytes,
            quality_used,
            width: raster.width,
            height: raster.height,
            attempts,
            max_bytes,
        }
    }

    /// Whether the output satisfies the requested ceiling.
    ///
    /// Always true for unconstrained encodes.
    pub fn within_limit(&self) -> bool {
        self.max_bytes.map_or(true, |max| self.size_bytes <= max)
    }

    /// Size in whole KiB, rounded down.
    pub fn size_kib(&self) -> usize {
        self.size_bytes / 1024
    }

    /// Consume the result, keeping only the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
