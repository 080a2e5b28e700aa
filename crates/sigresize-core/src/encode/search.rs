//! Size-constrained encoding.
//!
//! Finds the highest JPEG quality whose output fits a byte ceiling. The
//! candidate qualities form a descending grid `100, 100 - step, ...` that
//! always ends at the floor. Encoded size is assumed non-increasing as
//! quality drops, which lets the search bisect the grid instead of walking
//! it: 100 is tried first, then the floor, then the midpoints between the
//! largest failing and smallest fitting candidate.
//!
//! If even the floor quality is too large, the floor encode is returned as
//! a best-effort result rather than an error.

use serde::{Deserialize, Serialize};

use super::EncodedResult;
use crate::cancel::CancelToken;
use crate::codec::Codec;
use crate::decode::Raster;
use crate::error::TranscodeError;

/// Highest quality the encoder accepts.
pub const MAX_QUALITY: u8 = 100;

/// Lowest quality tried before giving up.
pub const DEFAULT_QUALITY_FLOOR: u8 = 5;

/// Spacing between candidate qualities.
pub const DEFAULT_QUALITY_STEP: u8 = 5;

/// Bounds of the quality search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySearch {
    /// Lowest quality tried (1-100).
    pub floor: u8,
    /// Distance between neighbouring candidates (at least 1).
    pub step: u8,
}

impl Default for QualitySearch {
    fn default() -> Self {
        Self {
            floor: DEFAULT_QUALITY_FLOOR,
            step: DEFAULT_QUALITY_STEP,
        }
    }
}

impl QualitySearch {
    /// Create search bounds, clamping the floor to 1-100 and the step to at least 1.
    pub fn new(floor: u8, step: u8) -> Self {
        Self {
            floor: floor.clamp(1, MAX_QUALITY),
            step: step.max(1),
        }
    }

    /// Candidate qualities in descending order, ending at the floor.
    pub fn candidates(&self) -> Vec<u8> {
        let floor = self.floor.clamp(1, MAX_QUALITY);
        let step = self.step.max(1);

        let mut qualities = Vec::with_capacity((MAX_QUALITY / step) as usize + 1);
        let mut quality = MAX_QUALITY;
        while quality > floor {
            qualities.push(quality);
            quality = quality.saturating_sub(step);
        }
        qualities.push(floor);
        qualities
    }
}

/// Encode `raster` at the highest candidate quality whose output is at most
/// `max_bytes`.
///
/// `cancel` is checked before every encode attempt; a cancelled search
/// returns `TranscodeError::Cancelled` and discards any bytes produced so far.
///
/// Callers that need a hard guarantee should check
/// [`EncodedResult::within_limit`]: the floor fallback may exceed the ceiling.
pub fn encode_within_limit<C: Codec + ?Sized>(
    codec: &C,
    raster: &Raster,
    max_bytes: usize,
    search: QualitySearch,
    cancel: &CancelToken,
) -> Result<EncodedResult, TranscodeError> {
    let candidates = search.candidates();
    let last = candidates.len() - 1;
    let mut attempts = 0u32;

    let mut attempt = |index: usize| -> Result<Vec<u8>, TranscodeError> {
        if cancel.is_cancelled() {
            tracing::debug!(attempts, "quality search cancelled");
            return Err(TranscodeError::Cancelled);
        }
        let quality = candidates[index];
        let bytes = codec.encode(raster, quality)?;
        attempts += 1;
        tracing::trace!(quality, size = bytes.len(), max_bytes, "encode attempt");
        Ok(bytes)
    };

    let top = attempt(0)?;
    if top.len() <= max_bytes || last == 0 {
        return Ok(EncodedResult::new(top, candidates[0], raster, Some(max_bytes), attempts));
    }

    let floor = attempt(last)?;
    if floor.len() > max_bytes {
        tracing::warn!(
            quality = candidates[last],
            size = floor.len(),
            max_bytes,
            "size ceiling not reachable, returning floor-quality encode"
        );
        return Ok(EncodedResult::new(floor, candidates[last], raster, Some(max_bytes), attempts));
    }

    // candidates[lo] is too large, candidates[hi] fits
    let (mut lo, mut hi, mut best) = (0usize, last, floor);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let bytes = attempt(mid)?;
        if bytes.len() <= max_bytes {
            hi = mid;
            best = bytes;
        } else {
            lo = mid;
        }
    }

    Ok(EncodedResult::new(best, candidates[hi], raster, Some(max_bytes), attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ImageCodec;
    use crate::test_support::{gradient, SyntheticCodec};

    /// Reference: the plain descending scan the bisection must agree with.
    fn linear_scan(codec: &SyntheticCodec, max_bytes: usize, search: QualitySearch) -> u8 {
        let candidates = search.candidates();
        for &quality in &candidates {
            if codec.size_at(quality) <= max_bytes {
                return quality;
            }
        }
        search.floor
    }

    #[test]
    fn test_default_candidates() {
        let candidates = QualitySearch::default().candidates();

        assert_eq!(candidates.len(), 20);
        assert_eq!(candidates[0], 100);
        assert_eq!(candidates[1], 95);
        assert_eq!(*candidates.last().unwrap(), 5);
    }

    #[test]
    fn test_candidates_end_at_unaligned_floor() {
        let candidates = QualitySearch::new(7, 5).candidates();

        assert_eq!(&candidates[candidates.len() - 2..], &[10, 7]);
    }

    #[test]
    fn test_candidates_floor_at_max() {
        assert_eq!(QualitySearch::new(100, 5).candidates(), vec![100]);
    }

    #[test]
    fn test_new_clamps_bounds() {
        let search = QualitySearch::new(0, 0);
        assert_eq!(search.floor, 1);
        assert_eq!(search.step, 1);
        assert_eq!(search.candidates().len(), 100);

        assert_eq!(QualitySearch::new(200, 5).floor, 100);
    }

    #[test]
    fn test_top_quality_fits() {
        let codec = SyntheticCodec::linear(100);
        let raster = gradient(10, 10);

        let result =
            encode_within_limit(&codec, &raster, 100_000, QualitySearch::default(), &CancelToken::new())
                .unwrap();

        assert_eq!(result.quality_used, 100);
        assert_eq!(result.attempts, 1);
        assert_eq!(codec.encode_count(), 1);
        assert!(result.within_limit());
    }

    #[test]
    fn test_finds_highest_fitting_quality() {
        // size = quality * 100 bytes
        let codec = SyntheticCodec::linear(100);
        let raster = gradient(10, 10);

        let result =
            encode_within_limit(&codec, &raster, 4_200, QualitySearch::default(), &CancelToken::new())
                .unwrap();

        assert_eq!(result.quality_used, 40);
        assert_eq!(result.size_bytes, 4_000);
        assert!(result.size_bytes <= 4_200);
    }

    #[test]
    fn test_exact_ceiling_is_accepted() {
        let codec = SyntheticCodec::linear(100);
        let raster = gradient(10, 10);

        let result =
            encode_within_limit(&codec, &raster, 5_500, QualitySearch::default(), &CancelToken::new())
                .unwrap();

        assert_eq!(result.quality_used, 55);
        assert_eq!(result.size_bytes, 5_500);
    }

    #[test]
    fn test_unreachable_ceiling_returns_floor() {
        let codec = SyntheticCodec::linear(100);
        let raster = gradient(10, 10);

        let result =
            encode_within_limit(&codec, &raster, 100, QualitySearch::default(), &CancelToken::new())
                .unwrap();

        assert_eq!(result.quality_used, 5);
        assert_eq!(result.size_bytes, 500);
        assert_eq!(result.attempts, 2);
        assert!(!result.within_limit());
    }

    #[test]
    fn test_bisection_uses_fewer_encodes_than_scan() {
        let codec = SyntheticCodec::linear(100);
        let raster = gradient(10, 10);

        let result =
            encode_within_limit(&codec, &raster, 1_000, QualitySearch::default(), &CancelToken::new())
                .unwrap();

        assert_eq!(result.quality_used, 10);
        // A linear scan would need 19 encodes to reach quality 10
        assert!(result.attempts <= 7, "used {} encodes", result.attempts);
        assert_eq!(codec.encode_count(), result.attempts as usize);
    }

    #[test]
    fn test_cancelled_before_first_encode() {
        let codec = SyntheticCodec::linear(100);
        let raster = gradient(10, 10);
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = encode_within_limit(&codec, &raster, 1_000, QualitySearch::default(), &cancel);

        assert!(matches!(result, Err(TranscodeError::Cancelled)));
        assert_eq!(codec.encode_count(), 0);
    }

    #[test]
    fn test_cancelled_between_encodes() {
        let cancel = CancelToken::new();
        let codec = SyntheticCodec::linear(100).cancel_after(2, cancel.clone());
        let raster = gradient(10, 10);

        let result = encode_within_limit(&codec, &raster, 1_000, QualitySearch::default(), &cancel);

        assert!(matches!(result, Err(TranscodeError::Cancelled)));
        assert_eq!(codec.encode_count(), 2);
    }

    #[test]
    fn test_encode_failure_propagates() {
        let codec = SyntheticCodec::linear(100).fail_encodes();
        let raster = gradient(10, 10);

        let result =
            encode_within_limit(&codec, &raster, 1_000, QualitySearch::default(), &CancelToken::new());

        assert!(matches!(result, Err(TranscodeError::Encode(_))));
    }

    #[test]
    fn test_real_jpeg_meets_ceiling() {
        let codec = ImageCodec::default();
        let raster = gradient(200, 200);
        let max_bytes = 6 * 1024;

        let result =
            encode_within_limit(&codec, &raster, max_bytes, QualitySearch::default(), &CancelToken::new())
                .unwrap();

        assert!(result.size_bytes <= max_bytes);
        assert_eq!(result.size_bytes, result.bytes.len());
        assert_eq!(&result.bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!((result.width, result.height), (200, 200));
    }

    #[test]
    fn test_real_jpeg_size_monotone() {
        let raster = gradient(64, 64);
        let sizes: Vec<usize> = [20u8, 50, 80, 100]
            .iter()
            .map(|&q| crate::encode::encode_jpeg(&raster, q).unwrap().len())
            .collect();

        assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "sizes: {:?}", sizes);
    }

    #[test]
    fn test_matches_linear_scan_reference() {
        let codec = SyntheticCodec::linear(37);
        let raster = gradient(4, 4);
        let search = QualitySearch::default();

        for max_bytes in [0, 100, 185, 370, 1_000, 2_000, 3_699, 3_700, 10_000] {
            let result =
                encode_within_limit(&codec, &raster, max_bytes, search, &CancelToken::new()).unwrap();
            assert_eq!(
                result.quality_used,
                linear_scan(&codec, max_bytes, search),
                "max_bytes = {}",
                max_bytes
            );
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
