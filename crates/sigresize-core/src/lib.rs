//! sigresize Core - fit photos and signatures to submission targets
//!
//! This crate turns an arbitrary source image into a JPEG with exact pixel
//! dimensions and an encoded size under a byte ceiling, as required by
//! document-submission portals.
//!
//! # Module Structure
//!
//! - `catalog` - Built-in submission targets and their validation
//! - `decode` - Format-sniffing decode and exact-size resizing
//! - `encode` - JPEG encoding and the size-constrained quality search
//! - `codec` - The decode/resize/encode capability set
//! - `pipeline` - Request orchestration with cancellation
//!
//! # Usage
//!
//! ```ignore
//! use sigresize_core::{PipelineConfig, TargetSpecCatalog, TranscodePipeline};
//!
//! let catalog = TargetSpecCatalog::standard()?;
//! let pipeline = TranscodePipeline::new(PipelineConfig::default())?;
//!
//! let target = catalog.lookup("upsc_sig").unwrap();
//! let result = pipeline.run_for_target(std::fs::read("signature.png")?, target)?;
//! println!("{}x{} at q{}: {} bytes", result.width, result.height, result.quality_used, result.size_bytes);
//! ```

pub mod cancel;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use cancel::CancelToken;
pub use catalog::{SizeCheck, TargetSpec, TargetSpecCatalog, BUILTIN_TARGETS};
pub use codec::{Codec, ImageCodec};
pub use config::{PipelineConfig, DEFAULT_QUALITY};
pub use decode::{DecodeError, DecodeLimits, FilterType, PixelFormat, Raster, ResizeError};
pub use encode::{EncodeError, EncodedResult, QualitySearch};
pub use error::{ConfigError, TranscodeError};
pub use pipeline::{PipelineRequest, TranscodePipeline};
