//! Instrument block (`INSTRUMENT_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock};
use crate::app::services::odf_parser::field_parsers::normalize_text;
use crate::config::OdfVersion;
use crate::constants::blocks;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentHeader {
    /// Instrument family, e.g. `SBE`, `RBR`
    pub instrument_type: String,
    pub model: String,
    pub serial_number: String,
    pub description: String,
}

impl HeaderBlock for InstrumentHeader {
    const NAME: &'static str = blocks::INSTRUMENT;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "INST_TYPE" => self.instrument_type = normalize_text(value),
            "MODEL" => self.model = normalize_text(value),
            "SERIAL_NUMBER" => self.serial_number = normalize_text(value),
            "DESCRIPTION" => self.description = normalize_text(value),
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.quoted("INST_TYPE", &self.instrument_type);
        out.quoted("MODEL", &self.model);
        out.quoted("SERIAL_NUMBER", &self.serial_number);
        out.quoted("DESCRIPTION", &self.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_is_reported() {
        let lines = vec![
            "  INST_TYPE = 'SBE',".to_string(),
            "  FIRMWARE = '2.1',".to_string(),
        ];
        let (instrument, warnings) = InstrumentHeader::populate(&lines).unwrap();
        assert_eq!(instrument.instrument_type, "SBE");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("FIRMWARE"));
    }
}
