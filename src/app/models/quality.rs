//! Quality control block (`QUALITY_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, push_entry, set_indexed};
use crate::app::services::odf_parser::field_parsers::{canonical_datetime, normalize_text};
use crate::config::OdfVersion;
use crate::constants::{SYTM_NULL_VALUE, blocks};
use crate::error::Result;

/// Record of the quality tests applied to the data and their outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityHeader {
    pub quality_date: String,
    pub quality_tests: Vec<String>,
    pub quality_comments: Vec<String>,
}

impl Default for QualityHeader {
    fn default() -> Self {
        Self {
            quality_date: SYTM_NULL_VALUE.to_string(),
            quality_tests: Vec::new(),
            quality_comments: Vec::new(),
        }
    }
}

impl QualityHeader {
    pub fn set_quality_date(&mut self, value: &str) -> Result<()> {
        self.quality_date = canonical_datetime(value, "QUALITY_DATE")?;
        Ok(())
    }

    pub fn set_quality_test(&mut self, value: &str, number: usize) {
        set_indexed(&mut self.quality_tests, normalize_text(value), number);
    }

    pub fn set_quality_comment(&mut self, value: &str, number: usize) {
        set_indexed(&mut self.quality_comments, normalize_text(value), number);
    }
}

impl HeaderBlock for QualityHeader {
    const NAME: &'static str = blocks::QUALITY;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "QUALITY_DATE" => {
                self.set_quality_date(value)?;
                Ok(FieldKind::Scalar)
            }
            "QUALITY_TESTS" => {
                push_entry(&mut self.quality_tests, value);
                Ok(FieldKind::Repeated)
            }
            "QUALITY_COMMENTS" => {
                push_entry(&mut self.quality_comments, value);
                Ok(FieldKind::Repeated)
            }
            _ => Ok(FieldKind::Unknown),
        }
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.quoted("QUALITY_DATE", &self.quality_date);
        out.quoted_list("QUALITY_TESTS", &self.quality_tests);
        out.quoted_list("QUALITY_COMMENTS", &self.quality_comments);
    }
}
