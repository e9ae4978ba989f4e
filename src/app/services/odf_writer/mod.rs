//! ODF writer
//!
//! - [`writer`] - block composition in canonical order and file output
//! - [`validation`] - invariant checks run before anything is written
//!
//! Writing always reconciles the document first (`OdfHeader::update_odf`),
//! and fails before creating the file when an invariant does not hold.

pub mod validation;
pub mod writer;

pub use validation::validate_document;
pub use writer::{OdfWriter, render_document, write_document};
