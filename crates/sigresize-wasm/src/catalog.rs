//! Target catalog WASM bindings.

use std::sync::OnceLock;

use sigresize_core::{ConfigError, TargetSpecCatalog};
use wasm_bindgen::prelude::*;

static CATALOG: OnceLock<Result<TargetSpecCatalog, ConfigError>> = OnceLock::new();

/// The built-in catalog, validated on first use.
pub(crate) fn catalog() -> Result<&'static TargetSpecCatalog, String> {
    CATALOG
        .get_or_init(TargetSpecCatalog::standard)
        .as_ref()
        .map_err(|e| e.to_string())
}

/// List the built-in submission targets.
///
/// Returns an array of `{ id, name, width_px, height_px, min_bytes, max_bytes, description }`
/// objects in display order. `width_px` and `height_px` are `null` for targets
/// without fixed dimensions.
#[wasm_bindgen]
pub fn list_targets() -> Result<JsValue, JsValue> {
    let catalog = catalog().map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(catalog.list()).map_err(|e| JsValue::from_str(&e.to_string()))
}
