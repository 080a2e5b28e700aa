//! Transcoding WASM bindings.
//!
//! This module exposes the sigresize-core pipeline to JavaScript. The page
//! hands over the picked file's bytes and gets back a JPEG ready to save or
//! upload.
//!
//! # Functions
//!
//! - [`transcode`] - Decode, optionally resize, and encode under an optional size ceiling
//! - [`transcode_for_target`] - Same, with dimensions and ceiling taken from a catalog target
//!
//! # Example
//!
//! ```typescript
//! import { transcode, transcode_for_target } from '@sigresize/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = transcode_for_target(bytes, 'upsc_sig');
//! console.log(`${result.width}x${result.height}, ${result.size_bytes} bytes`);
//! ```

use crate::catalog::catalog;
use crate::types::{filter_from_u8, JsEncodedResult};
use sigresize_core::{EncodedResult, PipelineConfig, PipelineRequest, TranscodePipeline};
use wasm_bindgen::prelude::*;

/// Decode, resize and encode an image.
///
/// # Arguments
///
/// * `bytes` - Source image file bytes (JPEG, PNG, GIF, BMP or WebP)
/// * `width` - Output width; resize only happens when `height` is also given
/// * `height` - Output height; resize only happens when `width` is also given
/// * `max_bytes` - Size ceiling for the JPEG output
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear (default), 2=Lanczos3
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable image or a dimension is zero.
/// Missing the size ceiling is not an error; check `within_limit` on the result.
///
/// # Example
///
/// ```typescript
/// const result = transcode(bytes, 350, 150, 20 * 1024, 1);
/// if (!result.within_limit) {
///   console.warn('Could not reach the size limit');
/// }
/// ```
#[wasm_bindgen]
pub fn transcode(
    bytes: &[u8],
    width: Option<u32>,
    height: Option<u32>,
    max_bytes: Option<u32>,
    filter: u8,
) -> Result<JsEncodedResult, JsValue> {
    let request = PipelineRequest {
        source: bytes.to_vec(),
        target_width: width,
        target_height: height,
        max_size_bytes: max_bytes.map(|n| n as usize),
    };
    run(request, filter).map_err(|e| JsValue::from_str(&e))
}

/// Transcode an image for a built-in submission target.
///
/// # Arguments
///
/// * `bytes` - Source image file bytes
/// * `target_id` - Catalog id, e.g. `"upsc_sig"` or `"passport"`
///
/// # Errors
///
/// Returns an error if the target id is unknown or the image cannot be decoded.
#[wasm_bindgen]
pub fn transcode_for_target(bytes: &[u8], target_id: &str) -> Result<JsEncodedResult, JsValue> {
    let target = catalog()
        .and_then(|c| {
            c.lookup(target_id)
                .ok_or_else(|| format!("Unknown target: {target_id}"))
        })
        .map_err(|e| JsValue::from_str(&e))?;

    let request = PipelineRequest::for_target(bytes.to_vec(), target);
    run(request, 1).map_err(|e| JsValue::from_str(&e))
}

/// Run a request on a default-configured pipeline.
///
/// Returns plain `String` errors so the logic is testable off-wasm.
pub(crate) fn run(request: PipelineRequest, filter: u8) -> Result<JsEncodedResult, String> {
    let config = PipelineConfig {
        filter: filter_from_u8(filter),
        ..PipelineConfig::default()
    };
    let pipeline = TranscodePipeline::new(config).map_err(|e| e.to_string())?;
    let result = pipeline.run(request).map_err(|e| e.to_string())?;

    if !result.within_limit() {
        warn_over_limit(&result);
    }
    Ok(JsEncodedResult::from_result(result))
}

#[cfg(target_arch = "wasm32")]
fn warn_over_limit(inner: &EncodedResult) {
    let message = format!(
        "sigresize: output is {} bytes at quality {}, above the {} byte limit",
        inner.size_bytes,
        inner.quality_used,
        inner.max_bytes.unwrap_or_default()
    );
    web_sys::console::warn_1(&JsValue::from_str(&message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_over_limit(_result: &EncodedResult) {}
