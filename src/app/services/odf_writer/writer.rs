//! Core ODF writer
//!
//! Composes each header's dialect-aware output in canonical block order,
//! followed by the data separator and the data rows.

use std::path::Path;
use tracing::{debug, info};

use super::validation::validate_document;
use crate::app::models::{DocumentState, HeaderBlock, OdfHeader, SpecificationBlock};
use crate::config::OdfVersion;
use crate::constants::DATA_SEPARATOR;
use crate::error::{OdfError, Result};

/// Writer for one ODF dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct OdfWriter {
    version: OdfVersion,
}

impl OdfWriter {
    pub fn new(version: OdfVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> OdfVersion {
        self.version
    }

    /// Render the document text without touching the document
    pub fn render(&self, odf: &OdfHeader) -> String {
        let version = self.version;
        let mut out = String::new();

        let spec = SpecificationBlock {
            file_specification: odf.file_specification.clone(),
            odf_specification_version: Some(version.as_f64()),
        };
        out.push_str(&spec.print(version));
        out.push_str(&odf.cruise_header.print(version));
        out.push_str(&odf.event_header.print(version));
        if let Some(meteo) = &odf.meteo_header {
            out.push_str(&meteo.print(version));
        }
        if let Some(quality) = &odf.quality_header {
            out.push_str(&quality.print(version));
        }
        out.push_str(&odf.instrument_header.print(version));
        push_all(&mut out, &odf.general_cal_headers, version);
        push_all(&mut out, &odf.polynomial_cal_headers, version);
        push_all(&mut out, &odf.compass_cal_headers, version);
        push_all(&mut out, &odf.history_headers, version);
        push_all(&mut out, &odf.parameter_headers, version);
        out.push_str(&odf.record_header.print(version));

        out.push_str(DATA_SEPARATOR);
        out.push('\n');
        out.push_str(&odf.data.print());
        out
    }

    /// Reconcile, check and write the document to `path`
    pub fn write(&self, odf: &mut OdfHeader, path: &Path) -> Result<()> {
        odf.update_odf();

        if odf.file_specification.trim().is_empty() {
            return Err(OdfError::invariant_violation("file_specification"));
        }
        if odf.config().validate_on_write {
            validate_document(odf)?;
        }

        odf.odf_specification_version = self.version.as_f64();
        let text = self.render(odf);
        debug!("Rendered {} bytes of ODF {}", text.len(), self.version);

        std::fs::write(path, text).map_err(|e| OdfError::write_error(path, e))?;

        info!(
            "Wrote ODF {} file {} ({} parameters, {} rows)",
            self.version,
            path.display(),
            odf.parameter_headers.len(),
            odf.data.len()
        );
        odf.set_state(DocumentState::Written);
        Ok(())
    }
}

fn push_all<T: HeaderBlock>(out: &mut String, headers: &[T], version: OdfVersion) {
    for header in headers {
        out.push_str(&header.print(version));
    }
}

/// Render a document under the given dialect
pub fn render_document(odf: &OdfHeader, version: OdfVersion) -> String {
    OdfWriter::new(version).render(odf)
}

/// Reconcile, check and write a document under the given dialect
pub fn write_document(odf: &mut OdfHeader, path: &Path, version: OdfVersion) -> Result<()> {
    OdfWriter::new(version).write(odf, path)
}
