//! Decode, resize and encode a single source image.
//!
//! A run is a straight line of stages that stops at the first failure:
//!
//! 1. decode the source bytes
//! 2. stretch to the target size, when both dimensions are given
//! 3. search for a quality under `max_size_bytes`, or encode once at the
//!    configured default quality when no ceiling is given
//!
//! Runs are synchronous and share no mutable state, so a pipeline can be
//! used from several worker threads at once.

use std::io::Read;

use crate::cancel::CancelToken;
use crate::catalog::TargetSpec;
use crate::codec::{Codec, ImageCodec};
use crate::config::PipelineConfig;
use crate::decode::{read_source, DecodeError, Raster};
use crate::encode::{encode_within_limit, EncodedResult};
use crate::error::{ConfigError, TranscodeError};

/// Input for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Encoded source image.
    pub source: Vec<u8>,
    /// Output width; resizing happens only when both dimensions are set.
    pub target_width: Option<u32>,
    /// Output height; resizing happens only when both dimensions are set.
    pub target_height: Option<u32>,
    /// Encoded size ceiling in bytes.
    pub max_size_bytes: Option<usize>,
}

impl PipelineRequest {
    /// Request that decodes and re-encodes at the default quality.
    pub fn new(source: Vec<u8>) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Read the whole source from `reader`, which is dropped before returning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DecodeError> {
        Ok(Self::new(read_source(reader)?))
    }

    /// Request pre-filled with a target's dimensions and size ceiling.
    pub fn for_target(source: Vec<u8>, target: &TargetSpec) -> Self {
        Self {
            source,
            target_width: target.width_px,
            target_height: target.height_px,
            max_size_bytes: Some(target.max_bytes),
        }
    }

    /// Override the output dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.target_width = Some(width);
        self.target_height = Some(height);
        self
    }

    /// Override the size ceiling.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_size_bytes = Some(max_bytes);
        self
    }

    /// Both output dimensions, if the request resizes.
    pub fn target_dimensions(&self) -> Option<(u32, u32)> {
        self.target_width.zip(self.target_height)
    }
}

/// Runs requests against a codec backend.
#[derive(Debug, Clone)]
pub struct TranscodePipeline<C = ImageCodec> {
    codec: C,
    config: PipelineConfig,
}

impl TranscodePipeline<ImageCodec> {
    /// Pipeline on the software codec, configured from `config`.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        Self::with_codec(ImageCodec::from_config(&config), config)
    }
}

impl<C: Codec> TranscodePipeline<C> {
    /// Pipeline on a caller-supplied codec.
    ///
    /// The filter and limits in `config` only affect `ImageCodec`; other
    /// codecs carry their own.
    pub fn with_codec(codec: C, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { codec, config })
    }

    /// Settings this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Backend the pipeline runs on.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Run a request to completion.
    pub fn run(&self, request: PipelineRequest) -> Result<EncodedResult, TranscodeError> {
        self.run_with_cancel(request, &CancelToken::new())
    }

    /// Run a request, checking `cancel` between stages and between encode
    /// attempts. A cancelled run returns `TranscodeError::Cancelled` and no
    /// output.
    pub fn run_with_cancel(
        &self,
        request: PipelineRequest,
        cancel: &CancelToken,
    ) -> Result<EncodedResult, TranscodeError> {
        let dimensions = request.target_dimensions();
        let max_bytes = request.max_size_bytes;

        check(cancel)?;
        let raster = {
            let source = request.source;
            tracing::debug!(source_bytes = source.len(), "decoding");
            self.codec.decode(&source)?
        };
        tracing::debug!(width = raster.width, height = raster.height, "decoded");

        let raster = match dimensions {
            Some((width, height)) => {
                check(cancel)?;
                let resized = self.codec.resize(&raster, width, height)?;
                tracing::debug!(width, height, "resized");
                resized
            }
            None => raster,
        };

        let result = match max_bytes {
            Some(max_bytes) => {
                encode_within_limit(&self.codec, &raster, max_bytes, self.config.search(), cancel)?
            }
            None => self.encode_default(&raster, cancel)?,
        };

        tracing::debug!(
            quality = result.quality_used,
            size = result.size_bytes,
            attempts = result.attempts,
            "transcode complete"
        );
        Ok(result)
    }

    /// Run a request pre-filled from `target`.
    pub fn run_for_target(
        &self,
        source: Vec<u8>,
        target: &TargetSpec,
    ) -> Result<EncodedResult, TranscodeError> {
        self.run(PipelineRequest::for_target(source, target))
    }

    fn encode_default(
        &self,
        raster: &Raster,
        cancel: &CancelToken,
    ) -> Result<EncodedResult, TranscodeError> {
        check(cancel)?;
        let quality = self.config.default_quality;
        let bytes = self.codec.encode(raster, quality)?;
        Ok(EncodedResult::new(bytes, quality, raster, None, 1))
    }
}

fn check(cancel: &CancelToken) -> Result<(), TranscodeError> {
    if cancel.is_cancelled() {
        tracing::debug!("transcode cancelled");
        return Err(TranscodeError::Cancelled);
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::{SyntheticCodec, SYNTHETIC_MAGIC};
    use proptest::prelude::*;

    proptest! {
        /// Property: Any byte sequence yields a result or an error, never a panic.
        #[test]
        fn prop_arbitrary_source_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let pipeline = TranscodePipeline::new(PipelineConfig::default()).unwrap();
            let _ = pipeline.run(PipelineRequest::new(bytes).with_max_bytes(1024));
        }

        /// Property: Resized output always has the requested dimensions.
        #[test]
        fn prop_output_dimensions_match_request((width, height) in (1u32..=64, 1u32..=64)) {
            let pipeline =
                TranscodePipeline::with_codec(SyntheticCodec::linear(10), PipelineConfig::default())
                    .unwrap();

            let result = pipeline
                .run(PipelineRequest::new(SYNTHETIC_MAGIC.to_vec()).with_dimensions(width, height))
                .unwrap();

            prop_assert_eq!((result.width, result.height), (width, height));
        }
    }
}
