//! ODF Toolbox Library
//!
//! A Rust library for reading, editing and writing Ocean Data Format (ODF)
//! files: the line-oriented text format used for oceanographic instrument
//! records (CTD casts, moorings, bottle samples).
//!
//! This library provides tools for:
//! - Parsing both ODF dialects (v2 comma-terminated, v3 plain) into typed headers
//! - Validating dates, numbers and parameter codes as fields are set
//! - Reconciling record counts and per-parameter statistics before writing
//! - Editing parameters, calibrations and the processing history
//! - Writing either dialect back out with canonical formatting
//!
//! ```no_run
//! use odf_toolbox::{OdfHeader, OdfVersion};
//!
//! # fn example() -> odf_toolbox::Result<()> {
//! let mut odf = OdfHeader::read("CTD_BCD2024669_001_01_DN.ODF")?;
//! odf.add_history();
//! odf.update_parameter("PRES_01", "PRINT_DECIMAL_PLACES", "2")?;
//! odf.add_log_to_history();
//! odf.write("CTD_BCD2024669_001_01_DN.ODF", OdfVersion::V3)?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod odf_parser;
        pub mod odf_writer;
        pub mod parameter_registry;
    }
}

// CLI module
pub mod cli;

// Re-export commonly used types
pub use app::models::{Column, DataRecords, DocumentState, OdfHeader, ParameterHeader};
pub use config::{OdfConfig, OdfVersion};
pub use error::{OdfError, OdfWarning, Result};

/// Read an ODF file with the default configuration
pub fn read(path: impl AsRef<Path>) -> Result<OdfHeader> {
    OdfHeader::read(path)
}

/// Reconcile and write a document under the given dialect
pub fn write(odf: &mut OdfHeader, path: impl AsRef<Path>, version: OdfVersion) -> Result<()> {
    odf.write(path, version)
}
