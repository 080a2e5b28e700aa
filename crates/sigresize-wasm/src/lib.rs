//! sigresize WASM - WebAssembly bindings for sigresize
//!
//! This crate exposes the sigresize-core pipeline to the JavaScript front end
//! that picks images and saves the results.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for encoded output
//! - `transcode` - Decode/resize/size-limited encode bindings
//! - `catalog` - Built-in submission target listing
//!
//! # Usage
//!
//! ```typescript
//! import init, { list_targets, transcode_for_target } from '@sigresize/wasm';
//!
//! await init();
//!
//! const targets = list_targets();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = transcode_for_target(bytes, targets[0].id);
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod transcode;
mod types;

// Re-export public types
pub use catalog::list_targets;
pub use transcode::{transcode, transcode_for_target};
pub use types::JsEncodedResult;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
