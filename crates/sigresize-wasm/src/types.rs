//! WASM-compatible wrapper types for transcode results.
//!
//! This module provides JavaScript-friendly types that wrap the core sigresize
//! types, handling the conversion between Rust and JavaScript data representations.

use sigresize_core::{EncodedResult, FilterType};
use wasm_bindgen::prelude::*;

/// An encoded output image for JavaScript.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a fresh
/// `Uint8Array`, ready to be wrapped in a `Blob` for download or upload.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsEncodedResult {
    inner: EncodedResult,
}

#[wasm_bindgen]
impl JsEncodedResult {
    /// JPEG bytes as a Uint8Array.
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.bytes.as_slice())
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn size_bytes(&self) -> usize {
        self.inner.size_bytes
    }

    /// JPEG quality the output was encoded with
    #[wasm_bindgen(getter)]
    pub fn quality_used(&self) -> u8 {
        self.inner.quality_used
    }

    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Whether the output fits the requested size ceiling.
    ///
    /// `false` means even the lowest quality could not meet the ceiling and
    /// the caller should reduce the output dimensions.
    #[wasm_bindgen(getter)]
    pub fn within_limit(&self) -> bool {
        self.inner.within_limit()
    }
}

impl JsEncodedResult {
    pub(crate) fn from_result(inner: EncodedResult) -> Self {
        Self { inner }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}
