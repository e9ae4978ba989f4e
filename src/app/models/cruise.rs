//! Cruise metadata block (`CRUISE_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock};
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, normalize_text, parse_int_strict,
};
use crate::config::OdfVersion;
use crate::constants::{SYTM_NULL_VALUE, blocks};
use crate::error::Result;

/// Cruise-level metadata shared by every event of a cruise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CruiseHeader {
    /// Numeric country/institute identifier
    pub country_institute_code: i32,

    /// Cruise identifier, e.g. `BCD2024669`
    pub cruise_number: String,

    pub organization: String,
    pub chief_scientist: String,

    /// Canonical date-time
    pub start_date: String,

    /// Canonical date-time
    pub end_date: String,

    pub platform: String,

    /// Written in the v3 dialect only
    pub area_of_operation: String,

    pub cruise_name: String,
    pub cruise_description: String,
}

impl Default for CruiseHeader {
    fn default() -> Self {
        Self {
            country_institute_code: 0,
            cruise_number: String::new(),
            organization: String::new(),
            chief_scientist: String::new(),
            start_date: SYTM_NULL_VALUE.to_string(),
            end_date: SYTM_NULL_VALUE.to_string(),
            platform: String::new(),
            area_of_operation: String::new(),
            cruise_name: String::new(),
            cruise_description: String::new(),
        }
    }
}

impl CruiseHeader {
    pub fn set_country_institute_code(&mut self, value: &str) -> Result<()> {
        self.country_institute_code = parse_int_strict(value, "COUNTRY_INSTITUTE_CODE")?;
        Ok(())
    }

    pub fn set_cruise_number(&mut self, value: &str) {
        self.cruise_number = normalize_text(value);
    }

    pub fn set_start_date(&mut self, value: &str) -> Result<()> {
        self.start_date = canonical_datetime(value, "START_DATE")?;
        Ok(())
    }

    pub fn set_end_date(&mut self, value: &str) -> Result<()> {
        self.end_date = canonical_datetime(value, "END_DATE")?;
        Ok(())
    }
}

impl HeaderBlock for CruiseHeader {
    const NAME: &'static str = blocks::CRUISE;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "COUNTRY_INSTITUTE_CODE" => self.set_country_institute_code(value)?,
            "CRUISE_NUMBER" => self.set_cruise_number(value),
            "ORGANIZATION" => self.organization = normalize_text(value),
            "CHIEF_SCIENTIST" => self.chief_scientist = normalize_text(value),
            "START_DATE" => self.set_start_date(value)?,
            "END_DATE" => self.set_end_date(value)?,
            "PLATFORM" => self.platform = normalize_text(value),
            "AREA_OF_OPERATION" => self.area_of_operation = normalize_text(value),
            "CRUISE_NAME" => self.cruise_name = normalize_text(value),
            "CRUISE_DESCRIPTION" => self.cruise_description = normalize_text(value),
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, version: OdfVersion) {
        out.field("COUNTRY_INSTITUTE_CODE", self.country_institute_code);
        out.quoted("CRUISE_NUMBER", &self.cruise_number);
        out.quoted("ORGANIZATION", &self.organization);
        out.quoted("CHIEF_SCIENTIST", &self.chief_scientist);
        out.quoted("START_DATE", &self.start_date);
        out.quoted("END_DATE", &self.end_date);
        out.quoted("PLATFORM", &self.platform);
        if version == OdfVersion::V3 {
            out.quoted("AREA_OF_OPERATION", &self.area_of_operation);
        }
        out.quoted("CRUISE_NAME", &self.cruise_name);
        out.quoted("CRUISE_DESCRIPTION", &self.cruise_description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_populate_cruise() {
        let (cruise, warnings) = CruiseHeader::populate(&lines(
            "  COUNTRY_INSTITUTE_CODE = 1810,\n  CRUISE_NUMBER = 'BCD2024669',\n  START_DATE = '01-may-2024 00:00:00',",
        ))
        .unwrap();

        assert!(warnings.is_empty());
        assert_eq!(cruise.country_institute_code, 1810);
        assert_eq!(cruise.cruise_number, "BCD2024669");
        assert_eq!(cruise.start_date, "01-MAY-2024 00:00:00.00");
        assert_eq!(cruise.end_date, SYTM_NULL_VALUE);
    }

    #[test]
    fn test_area_of_operation_only_in_v3() {
        let mut cruise = CruiseHeader::default();
        cruise.area_of_operation = "Scotian Shelf".to_string();

        assert!(!cruise.print(OdfVersion::V2).contains("AREA_OF_OPERATION"));
        assert!(
            cruise
                .print(OdfVersion::V3)
                .contains("  AREA_OF_OPERATION = 'Scotian Shelf'\n")
        );
    }

    #[test]
    fn test_invalid_start_date_has_context() {
        let result = CruiseHeader::populate_at(4, &lines("  START_DATE = 'tomorrow'"));
        let error = result.unwrap_err();
        assert!(error.to_string().starts_with("CRUISE_HEADER line 5:"));
    }
}
