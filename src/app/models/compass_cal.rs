//! Compass calibration block (`COMPASS_CAL_HEADER`)

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, set_indexed};
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, normalize_text, parse_float_list,
};
use crate::config::OdfVersion;
use crate::constants::{SYTM_NULL_VALUE, blocks};
use crate::error::{OdfError, Result};

/// Heading corrections measured at a set of compass directions (a swing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassCalHeader {
    pub parameter_code: String,
    pub calibration_date: String,
    pub application_date: String,
    /// Degrees, `[0, 360)`
    pub directions: Vec<f64>,
    /// Degrees, `[0, 360)`
    pub corrections: Vec<f64>,
}

impl Default for CompassCalHeader {
    fn default() -> Self {
        Self {
            parameter_code: String::new(),
            calibration_date: SYTM_NULL_VALUE.to_string(),
            application_date: SYTM_NULL_VALUE.to_string(),
            directions: Vec::new(),
            corrections: Vec::new(),
        }
    }
}

fn check_angle(value: f64, field: &str) -> Result<f64> {
    if (0.0..360.0).contains(&value) {
        Ok(value)
    } else {
        Err(OdfError::invalid_numeric(field, value.to_string()))
    }
}

impl CompassCalHeader {
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

    pub fn set_direction(&mut self, value: f64, number: usize) -> Result<()> {
        let direction = check_angle(value, "DIRECTIONS")?;
        set_indexed(&mut self.directions, direction, number);
        Ok(())
    }

    pub fn set_correction(&mut self, value: f64, number: usize) -> Result<()> {
        let correction = check_angle(value, "CORRECTIONS")?;
        set_indexed(&mut self.corrections, correction, number);
        Ok(())
    }
}

impl HeaderBlock for CompassCalHeader {
    const NAME: &'static str = blocks::COMPASS_CAL;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "PARAMETER_CODE" | "PARAMETER_NAME" => self.set_parameter_code(value),
            "CALIBRATION_DATE" => self.set_calibration_date(value)?,
            "APPLICATION_DATE" => self.set_application_date(value)?,
            "DIRECTIONS" => {
                self.directions.extend(parse_float_list(value, key)?);
                return Ok(FieldKind::Repeated);
            }
            "CORRECTIONS" => {
                self.corrections.extend(parse_float_list(value, key)?);
                return Ok(FieldKind::Repeated);
            }
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.quoted("PARAMETER_CODE", &self.parameter_code);
        out.quoted("CALIBRATION_DATE", &self.calibration_date);
        out.quoted("APPLICATION_DATE", &self.application_date);
        out.scientific_list("DIRECTIONS", &self.directions);
        out.scientific_list("CORRECTIONS", &self.corrections);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_range() {
        let mut cal = CompassCalHeader::default();
        assert!(cal.set_direction(0.0, 0).is_ok());
        assert!(cal.set_direction(359.9, 0).is_ok());
        assert!(cal.set_direction(360.0, 0).is_err());
        assert!(cal.set_correction(-1.0, 0).is_err());
        assert_eq!(cal.directions, vec![0.0, 359.9]);
    }

    #[test]
    fn test_populate_compass_cal() {
        let lines: Vec<String> = [
            "PARAMETER_NAME = SOG_01",
            "CALIBRATION_DATE = 25-mar-2021 00:00:00.00",
            "DIRECTIONS = 0.0 90.0 180.0 270.0",
            "CORRECTIONS = 70.0 0.0 0.0 0.0",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let (cal, _) = CompassCalHeader::populate(&lines).unwrap();
        assert_eq!(cal.parameter_code, "SOG_01");
        assert_eq!(cal.calibration_date, "25-MAR-2021 00:00:00.00");
        assert_eq!(cal.directions.len(), 4);

        let text = cal.print(OdfVersion::V3);
        assert!(text.contains("  DIRECTIONS = 0.00000000E+00 9.00000000E+01 1.80000000E+02 2.70000000E+02\n"));
    }
}
