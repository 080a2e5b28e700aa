//! Error types shared across the transcoding pipeline.
//!
//! Per-request failures surface as `TranscodeError`. Misconfiguration is a
//! `ConfigError` and is raised when a catalog or pipeline is constructed,
//! never while a request runs.

use thiserror::Error;

use crate::decode::{DecodeError, ResizeError};
use crate::encode::EncodeError;

/// Failure value returned by a pipeline run.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Source bytes are not a usable image
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Target dimensions were rejected
    #[error("Resize failed: {0}")]
    Resize(#[from] ResizeError),

    /// The encoder backend failed
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The caller cancelled the run before it completed
    #[error("Transcode cancelled")]
    Cancelled,
}

/// Invalid target specification or pipeline setting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Only one of width and height is set
    #[error("Target '{id}' must set both width and height or neither")]
    PartialDimensions { id: String },

    /// A dimension is present but zero
    #[error("Target '{id}' has a zero pixel dimension")]
    ZeroDimension { id: String },

    /// Lower size bound exceeds the upper bound
    #[error("Target '{id}' has min_bytes ({min_bytes}) greater than max_bytes ({max_bytes})")]
    InvertedBounds {
        id: String,
        min_bytes: usize,
        max_bytes: usize,
    },

    /// Upper size bound is zero
    #[error("Target '{id}' must allow a positive max_bytes")]
    ZeroMaxBytes { id: String },

    /// Two targets share an id
    #[error("Duplicate target id '{0}'")]
    DuplicateId(String),

    /// A target has an empty id
    #[error("Target id must not be empty")]
    EmptyId,

    /// A pipeline setting is out of range
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}
