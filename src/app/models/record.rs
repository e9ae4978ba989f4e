//! Record count block (`RECORD_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock};
use crate::app::services::odf_parser::field_parsers::parse_count;
use crate::config::OdfVersion;
use crate::constants::blocks;
use crate::error::Result;

/// Counts of the document's owned lists; reconciled before every write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Shared by general and polynomial calibrations
    pub num_calibration: usize,
    pub num_history: usize,
    /// Compass calibrations
    pub num_swing: usize,
    pub num_param: usize,
    /// Data rows
    pub num_cycle: usize,
}

impl HeaderBlock for RecordHeader {
    const NAME: &'static str = blocks::RECORD;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        let count = match key {
            "NUM_CALIBRATION" => &mut self.num_calibration,
            "NUM_HISTORY" => &mut self.num_history,
            "NUM_SWING" => &mut self.num_swing,
            "NUM_PARAM" => &mut self.num_param,
            "NUM_CYCLE" => &mut self.num_cycle,
            _ => return Ok(FieldKind::Unknown),
        };
        *count = parse_count(value, key)?;
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.field("NUM_CALIBRATION", self.num_calibration);
        out.field("NUM_HISTORY", self.num_history);
        out.field("NUM_SWING", self.num_swing);
        out.field("NUM_PARAM", self.num_param);
        out.field("NUM_CYCLE", self.num_cycle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OdfError;

    #[test]
    fn test_record_round_trip() {
        let record = RecordHeader {
            num_calibration: 1,
            num_history: 2,
            num_swing: 0,
            num_param: 3,
            num_cycle: 1064,
        };
        let text = record.print(OdfVersion::V2);
        let lines: Vec<String> = text.lines().skip(1).map(str::to_string).collect();
        let (parsed, _) = RecordHeader::populate(&lines).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_negative_count_rejected() {
        let lines = vec!["NUM_CYCLE = -5".to_string()];
        let error = RecordHeader::populate(&lines).unwrap_err();
        assert!(matches!(error.root(), OdfError::InvalidNumeric { .. }));
    }
}
