//! General calibration block (`GENERAL_CAL_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, push_entry, set_indexed};
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, normalize_text, parse_count, parse_float_list,
};
use crate::config::OdfVersion;
use crate::constants::{SYTM_NULL_VALUE, blocks};
use crate::error::Result;

/// Calibration applied to one parameter, described by an equation and coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralCalHeader {
    /// Code of the calibrated parameter (uppercased)
    pub parameter_code: String,
    pub calibration_type: String,
    pub calibration_date: String,
    pub application_date: String,
    pub number_coefficients: usize,
    pub coefficients: Vec<f64>,
    pub calibration_equation: String,
    pub calibration_comments: Vec<String>,
}

impl Default for GeneralCalHeader {
    fn default() -> Self {
        Self {
            parameter_code: String::new(),
            calibration_type: String::new(),
            calibration_date: SYTM_NULL_VALUE.to_string(),
            application_date: SYTM_NULL_VALUE.to_string(),
            number_coefficients: 0,
            coefficients: Vec::new(),
            calibration_equation: String::new(),
            calibration_comments: Vec::new(),
        }
    }
}

impl GeneralCalHeader {
    pub fn set_parameter_code(&mut self, value: &str) {
        self.parameter_code = normalize_text(value).to_uppercase();
    }

    pub fn set_calibration_date(&mut self, value: &str) -> Result<()> {
        self.calibration_date = canonical_datetime(value, "CALIBRATION_DATE")?;
        Ok(())
    }

    pub fn set_application_date(&mut self, value: &str) -> Result<()> {
        self.application_date = canonical_datetime(value, "APPLICATION_DATE")?;
        Ok(())
    }

    /// Replace coefficient `number` (1-based), or append when out of range
    pub fn set_coefficient(&mut self, value: f64, number: usize) {
        set_indexed(&mut self.coefficients, value, number);
        self.number_coefficients = self.coefficients.len();
    }

    pub fn set_calibration_comment(&mut self, value: &str, number: usize) {
        set_indexed(&mut self.calibration_comments, normalize_text(value), number);
    }
}

impl HeaderBlock for GeneralCalHeader {
    const NAME: &'static str = blocks::GENERAL_CAL;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "PARAMETER_CODE" | "PARAMETER_NAME" => self.set_parameter_code(value),
            "CALIBRATION_TYPE" => self.calibration_type = normalize_text(value),
            "CALIBRATION_DATE" => self.set_calibration_date(value)?,
            "APPLICATION_DATE" => self.set_application_date(value)?,
            "NUMBER_OF_COEFFICIENTS" | "NUMBER_COEFFICIENTS" => {
                self.number_coefficients = parse_count(value, key)?
            }
            "CALIBRATION_EQUATION" => self.calibration_equation = normalize_text(value),
            "COEFFICIENTS" => {
                self.coefficients.extend(parse_float_list(value, key)?);
                return Ok(FieldKind::Repeated);
            }
            "CALIBRATION_COMMENTS" => {
                push_entry(&mut self.calibration_comments, value);
                return Ok(FieldKind::Repeated);
            }
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn finish(&mut self) -> Result<()> {
        if self.number_coefficients == 0 {
            self.number_coefficients = self.coefficients.len();
        }
        Ok(())
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.quoted("PARAMETER_CODE", &self.parameter_code);
        out.quoted("CALIBRATION_TYPE", &self.calibration_type);
        out.quoted("CALIBRATION_DATE", &self.calibration_date);
        out.quoted("APPLICATION_DATE", &self.application_date);
        out.field("NUMBER_OF_COEFFICIENTS", self.number_coefficients);
        out.scientific_list("COEFFICIENTS", &self.coefficients);
        out.quoted("CALIBRATION_EQUATION", &self.calibration_equation);
        out.quoted_list("CALIBRATION_COMMENTS", &self.calibration_comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_general_cal() {
        let lines: Vec<String> = [
            "PARAMETER_CODE = 'cndc_01'",
            "CALIBRATION_TYPE = 'Linear'",
            "NUMBER_OF_COEFFICIENTS = 2",
            "COEFFICIENTS = 0.00000000D+00 0.10000000D+01",
            "CALIBRATION_EQUATION = 'y = a + b*x'",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let (cal, warnings) = GeneralCalHeader::populate(&lines).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(cal.parameter_code, "CNDC_01");
        assert_eq!(cal.coefficients, vec![0.0, 1.0]);
        assert_eq!(cal.calibration_equation, "y = a + b*x");
    }

    #[test]
    fn test_print_general_cal() {
        let mut cal = GeneralCalHeader::default();
        cal.set_parameter_code("TEMP_01");
        cal.set_coefficient(6.0, 0);
        cal.set_coefficient(0.5, 0);

        let text = cal.print(OdfVersion::V3);
        assert!(text.contains("  NUMBER_OF_COEFFICIENTS = 2\n"));
        assert!(text.contains("  COEFFICIENTS = 6.00000000E+00 5.00000000E-01\n"));
        assert!(text.contains("  CALIBRATION_COMMENTS = ''\n"));
    }
}
