//! ODF reader
//!
//! - [`field_parsers`] - primitive validators, normalizers and formatters
//! - [`blocks`] - partitioning of the line stream into header blocks and data
//! - [`parser`] - read orchestration and dispatch to the header models
//!
//! ## Usage
//!
//! ```no_run
//! use odf_toolbox::app::services::odf_parser::OdfParser;
//! use odf_toolbox::OdfConfig;
//!
//! # fn example() -> odf_toolbox::Result<()> {
//! let parser = OdfParser::new(OdfConfig::default());
//! let odf = parser.parse_file(std::path::Path::new("CTD_BCD2024669_001_01_DN.ODF"))?;
//! println!("{} parameters, {} rows", odf.parameter_headers.len(), odf.data.len());
//! # Ok(())
//! # }
//! ```

pub mod blocks;
pub mod field_parsers;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use blocks::{BlockSpan, DocumentLayout, partition};
pub use parser::{OdfParser, read_document};
