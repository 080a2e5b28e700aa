//! Image decoding and resizing for sigresize.
//!
//! This module provides functionality for:
//! - Decoding any supported raster container (JPEG, PNG, GIF, BMP, WebP)
//! - Stretching a decoded raster to exact target dimensions
//!
//! Decoding never panics on malformed input; corruption is reported as a
//! `DecodeError` value.
//!
//! # Examples
//!
//! ```ignore
//! use sigresize_core::decode::{decode, resize, DecodeLimits, FilterType};
//!
//! let bytes = std::fs::read("signature.png").unwrap();
//! let raster = decode(&bytes, DecodeLimits::default()).unwrap();
//! let fitted = resize(&raster, 350, 150, FilterType::Bilinear).unwrap();
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode, read_source};
pub use resize::{resize, resize_within, ResizeError};
pub use types::{DecodeError, DecodeLimits, FilterType, PixelFormat, Raster};
