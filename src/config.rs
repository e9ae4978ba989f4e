//! Configuration management for ODF documents.
//!
//! Provides the configuration value injected into every document at
//! construction, together with the output dialect selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OdfError;

/// ODF serialization dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OdfVersion {
    /// Comma-terminated lines
    #[default]
    V2,
    /// No trailing commas; adds `ODF_SPECIFICATION_VERSION` to the ODF header
    V3,
}

impl OdfVersion {
    /// Numeric specification version written to the document
    pub fn as_f64(&self) -> f64 {
        match self {
            OdfVersion::V2 => 2.0,
            OdfVersion::V3 => 3.0,
        }
    }

    /// Map a numeric specification version onto a dialect
    pub fn from_f64(version: f64) -> Result<Self, OdfError> {
        if version == 2.0 {
            Ok(OdfVersion::V2)
        } else if version >= 3.0 {
            Ok(OdfVersion::V3)
        } else {
            Err(OdfError::invalid_enum(
                "ODF_SPECIFICATION_VERSION",
                version.to_string(),
                &["2.0", "3.0"],
            ))
        }
    }

    /// Whether lines carry a trailing comma
    pub fn uses_commas(&self) -> bool {
        matches!(self, OdfVersion::V2)
    }
}

impl fmt::Display for OdfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

impl FromStr for OdfVersion {
    type Err = OdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version: f64 = s
            .trim()
            .parse()
            .map_err(|_| OdfError::invalid_numeric("ODF_SPECIFICATION_VERSION", s))?;
        OdfVersion::from_f64(version)
    }
}

/// Configuration threaded into a document at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdfConfig {
    /// Dialect used when no explicit version is given
    pub default_version: OdfVersion,

    /// Check parameter codes, schema alignment and null sentinels before writing
    pub validate_on_write: bool,

    /// Recompute parameter min/max/valid/null counts when reconciling
    pub recompute_statistics: bool,

    /// Record field changes made through logged setters
    pub record_changes: bool,
}

impl Default for OdfConfig {
    fn default() -> Self {
        Self {
            default_version: OdfVersion::V2,
            validate_on_write: true,
            recompute_statistics: true,
            record_changes: true,
        }
    }
}

impl OdfConfig {
    /// Use a different default output dialect
    pub fn with_default_version(mut self, version: OdfVersion) -> Self {
        self.default_version = version;
        self
    }

    /// Skip write-time invariant checks other than the file specification
    pub fn without_write_validation(mut self) -> Self {
        self.validate_on_write = false;
        self
    }

    /// Keep parameter statistics exactly as read
    pub fn without_statistics(mut self) -> Self {
        self.recompute_statistics = false;
        self
    }

    /// Stop recording field changes
    pub fn without_change_log(mut self) -> Self {
        self.record_changes = false;
        self
    }
}
