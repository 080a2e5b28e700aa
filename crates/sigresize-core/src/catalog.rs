//! Named output targets for document-submission portals.
//!
//! Each target fixes the output pixel size (or leaves it free) and the
//! accepted encoded-size range. A catalog is validated once when it is
//! built and is read-only afterwards, so one caller's lookup can never
//! observe another caller's changes.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const KIB: usize = 1024;

/// Output requirements for one submission target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Unique identifier, e.g. `upsc_sig`.
    pub id: Cow<'static, str>,
    /// Display name.
    pub name: Cow<'static, str>,
    /// Required width in pixels; set together with `height_px`.
    pub width_px: Option<u32>,
    /// Required height in pixels; set together with `width_px`.
    pub height_px: Option<u32>,
    /// Smallest accepted file size in bytes. Advisory; never enforced by encoding.
    pub min_bytes: usize,
    /// Largest accepted file size in bytes.
    pub max_bytes: usize,
    /// Free-form description of the physical requirement.
    pub description: Cow<'static, str>,
}

/// Where an encoded size falls relative to a target's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCheck {
    /// Smaller than `min_bytes`.
    Below,
    /// Within `min_bytes..=max_bytes`.
    Within,
    /// Larger than `max_bytes`.
    Above,
}

impl TargetSpec {
    /// Both dimensions, if the target fixes them.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width_px, self.height_px) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }

    /// Compare an encoded size against both bounds.
    pub fn check_size(&self, size_bytes: usize) -> SizeCheck {
        if size_bytes < self.min_bytes {
            SizeCheck::Below
        } else if size_bytes > self.max_bytes {
            SizeCheck::Above
        } else {
            SizeCheck::Within
        }
    }

    /// Check the entry's own invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        let id = || self.id.to_string();

        match (self.width_px, self.height_px) {
            (Some(0), _) | (_, Some(0)) => return Err(ConfigError::ZeroDimension { id: id() }),
            (Some(_), None) | (None, Some(_)) => {
                return Err(ConfigError::PartialDimensions { id: id() })
            }
            _ => {}
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::ZeroMaxBytes { id: id() });
        }
        if self.min_bytes > self.max_bytes {
            return Err(ConfigError::InvertedBounds {
                id: id(),
                min_bytes: self.min_bytes,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Targets shipped with the application.
pub const BUILTIN_TARGETS: &[TargetSpec] = &[
    TargetSpec {
        id: Cow::Borrowed("upsc_sig"),
        name: Cow::Borrowed("UPSC Signature"),
        width_px: Some(350),
        height_px: Some(150),
        min_bytes: 10 * KIB,
        max_bytes: 20 * KIB,
        description: Cow::Borrowed("Dimensions: 3.5cm x 1.5cm"),
    },
    TargetSpec {
        id: Cow::Borrowed("upsc_photo"),
        name: Cow::Borrowed("UPSC Photo"),
        width_px: Some(350),
        height_px: Some(350),
        min_bytes: 20 * KIB,
        max_bytes: 300 * KIB,
        description: Cow::Borrowed("Dimensions: 3.5cm x 3.5cm"),
    },
    TargetSpec {
        id: Cow::Borrowed("gate_sig"),
        name: Cow::Borrowed("GATE Signature"),
        width_px: Some(280),
        height_px: Some(80),
        min_bytes: 5 * KIB,
        max_bytes: 200 * KIB,
        description: Cow::Borrowed("High variance accepted"),
    },
    TargetSpec {
        id: Cow::Borrowed("ssc_sig"),
        name: Cow::Borrowed("SSC Signature"),
        width_px: Some(160),
        height_px: Some(80),
        min_bytes: 10 * KIB,
        max_bytes: 20 * KIB,
        description: Cow::Borrowed("4.0cm x 2.0cm"),
    },
    TargetSpec {
        id: Cow::Borrowed("passport"),
        name: Cow::Borrowed("Passport Photo"),
        width_px: Some(413),
        height_px: Some(531),
        min_bytes: 50 * KIB,
        max_bytes: 200 * KIB,
        description: Cow::Borrowed("Standard 35mm x 45mm"),
    },
    TargetSpec {
        id: Cow::Borrowed("pan_card"),
        name: Cow::Borrowed("PAN Card Photo"),
        width_px: Some(213),
        height_px: Some(213),
        min_bytes: 20 * KIB,
        max_bytes: 50 * KIB,
        description: Cow::Borrowed("2.5cm x 3.5cm"),
    },
];

/// Immutable, ordered table of targets.
#[derive(Debug, Clone)]
pub struct TargetSpecCatalog {
    specs: Vec<TargetSpec>,
}

impl TargetSpecCatalog {
    /// Build a catalog, validating every entry and id uniqueness.
    pub fn new(specs: Vec<TargetSpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(specs.len());
        for spec in &specs {
            spec.validate()?;
            if !seen.insert(spec.id.as_ref()) {
                return Err(ConfigError::DuplicateId(spec.id.to_string()));
            }
        }
        tracing::debug!(targets = specs.len(), "target catalog loaded");
        Ok(Self { specs })
    }

    /// Catalog of the built-in targets.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(BUILTIN_TARGETS.to_vec())
    }

    /// All targets in declaration order.
    pub fn list(&self) -> &[TargetSpec] {
        &self.specs
    }

    /// Find a target by id.
    pub fn lookup(&self, id: &str) -> Option<&TargetSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog holds no targets.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
