//! The decode/resize/encode capability set the pipeline runs on.

use crate::config::PipelineConfig;
use crate::decode::{self, DecodeError, DecodeLimits, FilterType, Raster, ResizeError};
use crate::encode::{self, EncodeError};

/// Backend that can decode source bytes, resize rasters and encode JPEG.
///
/// `TranscodePipeline` is generic over this trait so a platform codec can
/// replace the software implementation without touching the pipeline.
pub trait Codec {
    /// Decode an encoded image into a raster.
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError>;

    /// Stretch a raster to exactly `width` x `height`.
    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, ResizeError>;

    /// Encode a raster as JPEG at the given quality (1-100).
    fn encode(&self, raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError>;
}

/// Software codec built on the `image` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCodec {
    filter: FilterType,
    limits: DecodeLimits,
}

impl ImageCodec {
    /// Create a codec with an explicit filter and decode limits.
    pub fn new(filter: FilterType, limits: DecodeLimits) -> Self {
        Self { filter, limits }
    }

    /// Create a codec using the filter and limits of a pipeline config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.filter, config.limits)
    }

    /// Resampling filter used by `resize`.
    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// Limits applied to decoded sources and resize targets.
    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }
}

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        decode::decode(bytes, self.limits)
    }

    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, ResizeError> {
        decode::resize_within(raster, width, height, self.filter, self.limits)
    }

    fn encode(&self, raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode::encode_jpeg(raster, quality)
    }
}
