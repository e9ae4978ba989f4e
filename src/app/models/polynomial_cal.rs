//! Polynomial calibration block (`POLYNOMIAL_CAL_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, set_indexed};
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, normalize_text, parse_count, parse_float_list,
};
use crate::config::OdfVersion;
use crate::constants::{SYTM_NULL_VALUE, blocks};
use crate::error::Result;

/// Polynomial coefficients (lowest order first) applied to one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialCalHeader {
    /// Code, or legacy name, of the calibrated parameter
    pub parameter_code: String,
    pub calibration_date: String,
    pub application_date: String,
    pub number_coefficients: usize,
    pub coefficients: Vec<f64>,
}

impl Default for PolynomialCalHeader {
    fn default() -> Self {
        Self {
            parameter_code: String::new(),
            calibration_date: SYTM_NULL_VALUE.to_string(),
            application_date: SYTM_NULL_VALUE.to_string(),
            number_coefficients: 0,
            coefficients: Vec::new(),
        }
    }
}

impl PolynomialCalHeader {
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

    pub fn set_coefficient(&mut self, value: f64, number: usize) {
        set_indexed(&mut self.coefficients, value, number);
        self.number_coefficients = self.coefficients.len();
    }
}

impl HeaderBlock for PolynomialCalHeader {
    const NAME: &'static str = blocks::POLYNOMIAL_CAL;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "PARAMETER_CODE" | "PARAMETER_NAME" => self.set_parameter_code(value),
            "CALIBRATION_DATE" => self.set_calibration_date(value)?,
            "APPLICATION_DATE" => self.set_application_date(value)?,
            "NUMBER_COEFFICIENTS" | "NUMBER_OF_COEFFICIENTS" => {
                self.number_coefficients = parse_count(value, key)?
            }
            "COEFFICIENTS" => {
                self.coefficients.extend(parse_float_list(value, key)?);
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
        out.quoted("CALIBRATION_DATE", &self.calibration_date);
        out.quoted("APPLICATION_DATE", &self.application_date);
        out.field("NUMBER_COEFFICIENTS", self.number_coefficients);
        out.scientific_list("COEFFICIENTS", &self.coefficients);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::odf_parser::field_parsers::parse_float_list;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_fortran_coefficients() {
        let (cal, _) = PolynomialCalHeader::populate(&lines(
            "PARAMETER_NAME = 'PRES_01'\nCOEFFICIENTS = 0.60000000D+01 0.15000001D+00",
        ))
        .unwrap();

        assert_eq!(cal.parameter_code, "PRES_01");
        assert_eq!(cal.coefficients, vec![6.0, 0.15000001]);
        assert_eq!(cal.number_coefficients, 2);
    }

    #[test]
    fn test_coefficients_reparse_after_print() {
        let mut cal = PolynomialCalHeader::default();
        cal.set_coefficient(6.0, 0);
        cal.set_coefficient(0.15000001, 0);

        let text = cal.print(OdfVersion::V2);
        assert!(text.contains("  COEFFICIENTS = 6.00000000E+00 1.50000010E-01,\n"));

        let line = text
            .lines()
            .find(|l| l.trim_start().starts_with("COEFFICIENTS"))
            .unwrap();
        let value = line.split_once('=').unwrap().1.trim_end_matches(',');
        assert_eq!(parse_float_list(value, "COEFFICIENTS").unwrap(), cal.coefficients);
    }

    #[test]
    fn test_number_of_coefficients_alias() {
        let (cal, warnings) = PolynomialCalHeader::populate(&lines(
            "NUMBER_OF_COEFFICIENTS = 3\nCOEFFICIENTS = 1.0 2.0\nCOEFFICIENTS = 3.0",
        ))
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(cal.number_coefficients, 3);
        assert_eq!(cal.coefficients, vec![1.0, 2.0, 3.0]);
    }
}
