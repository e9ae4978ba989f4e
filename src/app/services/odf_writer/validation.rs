//! Write-time invariant checks
//!
//! Run against a reconciled document before any bytes reach the disk.

use std::collections::HashSet;

use crate::app::models::{Column, OdfHeader, ParameterType};
use crate::app::services::odf_parser::field_parsers::{canonical_datetime, is_parameter_code};
use crate::error::{OdfError, Result};

/// Check the document's structural invariants
pub fn validate_document(odf: &OdfHeader) -> Result<()> {
    if odf.file_specification.trim().is_empty() {
        return Err(OdfError::invariant_violation("file_specification"));
    }

    check_parameters(odf)?;
    check_schema(odf)?;
    check_dates(odf)?;
    Ok(())
}

fn check_parameters(odf: &OdfHeader) -> Result<()> {
    let mut seen = HashSet::new();
    for parameter in &odf.parameter_headers {
        if !is_parameter_code(&parameter.code) {
            return Err(OdfError::invalid_code(parameter.code.as_str()));
        }
        if !seen.insert(parameter.code.as_str()) {
            return Err(OdfError::invariant_violation(format!(
                "duplicate parameter code {}",
                parameter.code
            )));
        }
    }

    let timestamps = odf
        .parameter_headers
        .iter()
        .filter(|p| p.parameter_type == ParameterType::Sytm)
        .count();
    if timestamps > 1 {
        return Err(OdfError::invariant_violation(format!(
            "{} SYTM parameters; at most one is allowed",
            timestamps
        )));
    }
    Ok(())
}

fn check_schema(odf: &OdfHeader) -> Result<()> {
    let codes = odf.get_parameter_codes();
    let columns = odf.data.parameter_list();

    if codes.len() != columns.len() {
        return Err(OdfError::schema_mismatch(codes.len(), columns.len()));
    }
    if codes.as_slice() != columns {
        return Err(OdfError::invariant_violation(
            "data columns must follow PARAMETER_HEADER order",
        ));
    }

    for (parameter, column) in odf.parameter_headers.iter().zip(odf.data.columns()) {
        let matches = matches!(
            (parameter.parameter_type, column),
            (ParameterType::Sytm, Column::Timestamp(_)) | (ParameterType::Doub, Column::Numeric(_))
        );
        if !matches {
            return Err(OdfError::invariant_violation(format!(
                "column {} does not hold {} values",
                parameter.code, parameter.parameter_type
            )));
        }
    }
    Ok(())
}

fn check_dates(odf: &OdfHeader) -> Result<()> {
    let mut dates = vec![
        ("START_DATE", odf.cruise_header.start_date.as_str()),
        ("END_DATE", odf.cruise_header.end_date.as_str()),
        ("CREATION_DATE", odf.event_header.creation_date.as_str()),
        ("ORIG_CREATION_DATE", odf.event_header.orig_creation_date.as_str()),
        ("START_DATE_TIME", odf.event_header.start_date_time.as_str()),
        ("END_DATE_TIME", odf.event_header.end_date_time.as_str()),
    ];
    if let Some(quality) = &odf.quality_header {
        dates.push(("QUALITY_DATE", quality.quality_date.as_str()));
    }
    for history in &odf.history_headers {
        dates.push(("CREATION_DATE", history.creation_date.as_str()));
    }
    for cal in &odf.general_cal_headers {
        dates.push(("CALIBRATION_DATE", cal.calibration_date.as_str()));
        dates.push(("APPLICATION_DATE", cal.application_date.as_str()));
    }
    for cal in &odf.polynomial_cal_headers {
        dates.push(("CALIBRATION_DATE", cal.calibration_date.as_str()));
        dates.push(("APPLICATION_DATE", cal.application_date.as_str()));
    }
    for cal in &odf.compass_cal_headers {
        dates.push(("CALIBRATION_DATE", cal.calibration_date.as_str()));
        dates.push(("APPLICATION_DATE", cal.application_date.as_str()));
    }

    for (field, value) in dates {
        if canonical_datetime(value, field)? != value {
            return Err(OdfError::invalid_datetime(field, value));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> OdfHeader {
        let mut odf = OdfHeader::new();
        odf.file_specification = "CTD_TEST_001_01_DN".to_string();
        odf.add_parameter("PRES_01", Column::Numeric(vec![1.0, 2.0])).unwrap();
        odf
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate_document(&valid_document()).is_ok());
    }

    #[test]
    fn test_empty_file_specification() {
        let mut odf = valid_document();
        odf.file_specification = "  ".to_string();
        assert!(matches!(
            validate_document(&odf).unwrap_err(),
            OdfError::InvariantViolation { which } if which == "file_specification"
        ));
    }

    #[test]
    fn test_second_timestamp_column_rejected() {
        let mut odf = valid_document();
        let times = vec!["01-JAN-2025 00:00:00.00".to_string(); 2];
        odf.add_parameter("SYTM_01", Column::Timestamp(times.clone())).unwrap();
        odf.add_parameter("SYTM_02", Column::Timestamp(times)).unwrap();
        assert!(matches!(
            validate_document(&odf).unwrap_err(),
            OdfError::InvariantViolation { .. }
        ));
    }

    #[test]
    fn test_duplicate_parameter_code_rejected() {
        let mut odf = valid_document();
        odf.parameter_headers[0].code = "TEMP_01".to_string();
        odf.parameter_headers
            .push(crate::app::models::ParameterHeader::new(ParameterType::Doub, "TEMP_01").unwrap());
        assert!(matches!(
            validate_document(&odf).unwrap_err(),
            OdfError::InvariantViolation { which } if which.contains("duplicate parameter code TEMP_01")
        ));
    }

    #[test]
    fn test_header_without_column() {
        let mut odf = valid_document();
        odf.parameter_headers
            .push(crate::app::models::ParameterHeader::new(ParameterType::Doub, "TEMP_01").unwrap());
        assert!(matches!(
            validate_document(&odf).unwrap_err(),
            OdfError::SchemaMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_non_canonical_date_rejected() {
        let mut odf = valid_document();
        odf.cruise_header.start_date = "2025-01-01".to_string();
        assert!(matches!(
            validate_document(&odf).unwrap_err(),
            OdfError::InvalidDateTime { field, .. } if field == "START_DATE"
        ));
    }
}
