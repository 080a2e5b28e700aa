//! Test doubles shared by unit tests across modules.

use std::cell::Cell;

use crate::cancel::CancelToken;
use crate::codec::Codec;
use crate::decode::{self, DecodeError, FilterType, Raster, ResizeError};
use crate::encode::EncodeError;

/// Gradient RGB raster; smooth content keeps JPEG sizes predictable.
pub(crate) fn gradient(width: u32, height: u32) -> Raster {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(128u8);
        }
    }
    Raster::rgb(width, height, pixels)
}

/// Codec whose encoded size is a fixed function of quality.
///
/// Decoding accepts only the `SYNTHETIC_MAGIC` prefix followed by a 2x2
/// raster, so pipeline tests can exercise every stage without real codecs.
pub(crate) struct SyntheticCodec {
    sizes: Vec<usize>,
    encodes: Cell<usize>,
    cancel_after: Option<(usize, CancelToken)>,
    fail_encodes: bool,
}

pub(crate) const SYNTHETIC_MAGIC: &[u8] = b"SYN";

impl SyntheticCodec {
    /// size(quality) = quality * scale
    pub(crate) fn linear(scale: usize) -> Self {
        Self::from_sizes((1..=100).map(|q| q * scale).collect())
    }

    /// `sizes[q - 1]` is the encoded size at quality `q`.
    pub(crate) fn from_sizes(sizes: Vec<usize>) -> Self {
        assert_eq!(sizes.len(), 100);
        Self {
            sizes,
            encodes: Cell::new(0),
            cancel_after: None,
            fail_encodes: false,
        }
    }

    /// Trip `token` once `count` encodes have completed.
    pub(crate) fn cancel_after(mut self, count: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((count, token));
        self
    }

    pub(crate) fn fail_encodes(mut self) -> Self {
        self.fail_encodes = true;
        self
    }

    pub(crate) fn size_at(&self, quality: u8) -> usize {
        self.sizes[quality.clamp(1, 100) as usize - 1]
    }

    pub(crate) fn encode_count(&self) -> usize {
        self.encodes.get()
    }
}

impl Codec for SyntheticCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        if bytes.starts_with(SYNTHETIC_MAGIC) {
            Ok(gradient(2, 2))
        } else {
            Err(DecodeError::InvalidFormat)
        }
    }

    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, ResizeError> {
        decode::resize(raster, width, height, FilterType::Nearest)
    }

    fn encode(&self, _raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
        if self.fail_encodes {
            return Err(EncodeError::EncodingFailed("synthetic failure".to_string()));
        }
        let count = self.encodes.get() + 1;
        self.encodes.set(count);
        if let Some((after, token)) = &self.cancel_after {
            if count >= *after {
                token.cancel();
            }
        }
        Ok(vec![0u8; self.size_at(quality)])
    }
}
