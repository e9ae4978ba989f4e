//! Tests for document-level reading

use super::*;
use crate::app::models::{Column, DocumentState, ParameterType, ParameterValue};
use crate::app::services::odf_parser::OdfParser;
use crate::config::{OdfConfig, OdfVersion};
use crate::constants::{NULL_VALUE, SYTM_NULL_VALUE};
use crate::error::{OdfError, OdfWarning};

fn parse(content: &str) -> crate::error::Result<crate::app::models::OdfHeader> {
    OdfParser::default().parse_lines(&sample_lines(content))
}

#[test]
fn test_parse_v2_sample_headers() {
    let odf = parse(SAMPLE_V2).unwrap();

    assert_eq!(odf.file_specification, "CTD_BCD2024669_001_01_DN");
    assert_eq!(odf.version(), OdfVersion::V2);
    assert_eq!(odf.state(), DocumentState::Populated);
    assert!(odf.warnings().is_empty());

    assert_eq!(odf.cruise_header.country_institute_code, 1810);
    assert_eq!(odf.cruise_header.organization, "DFO BIO");
    assert_eq!(odf.event_header.initial_latitude, 44.2667);
    assert_eq!(
        odf.event_header.event_comments,
        vec!["first comment", "second comment"]
    );
    assert_eq!(odf.instrument_header.model, "SBE 911plus");
    assert!(odf.meteo_header.is_none());
    assert!(odf.quality_header.is_none());

    assert_eq!(odf.polynomial_cal_headers.len(), 1);
    assert_eq!(odf.polynomial_cal_headers[0].coefficients, vec![6.0, 0.15000001]);
    assert_eq!(odf.history_headers[0].processes, vec!["Initial file creation"]);
    assert_eq!(odf.get_parameter_codes(), vec!["SYTM_01", "PRES_01"]);
    assert_eq!(odf.record_header.num_cycle, 3);
}

#[test]
fn test_parse_v2_sample_data() {
    let odf = parse(SAMPLE_V2).unwrap();

    assert_eq!(odf.data.len(), 3);
    match odf.data.column("SYTM_01").unwrap() {
        Column::Timestamp(values) => assert_eq!(values[1], "03-MAY-2025 00:48:41.73"),
        other => panic!("expected timestamps, got {:?}", other),
    }

    // the declared null -99.0 is read as the canonical null
    match odf.data.column("PRES_01").unwrap() {
        Column::Numeric(values) => assert_eq!(values, &vec![2.177, NULL_VALUE, 176.5]),
        other => panic!("expected numbers, got {:?}", other),
    }
    assert_eq!(odf.data.print_format("PRES_01").to_string(), "10.3");
}

#[test]
fn test_parse_v3_sample() {
    let odf = parse(SAMPLE_V3).unwrap();

    assert_eq!(odf.version(), OdfVersion::V3);
    assert_eq!(odf.cruise_header.area_of_operation, "Scotian Shelf");
    assert_eq!(odf.parameter_headers[0].print_field_order, 1);
    assert_eq!(odf.parameter_headers[0].parameter_type, ParameterType::Doub);
    assert_eq!(odf.data.len(), 2);
}

#[test]
fn test_version_detected_without_declaration() {
    let v2 = "ODF_HEADER,\n FILE_SPECIFICATION = 'A',\n-- DATA --\n";
    let v3 = "ODF_HEADER\n FILE_SPECIFICATION = 'A'\n-- DATA --\n";
    assert_eq!(parse(v2).unwrap().version(), OdfVersion::V2);
    assert_eq!(parse(v3).unwrap().version(), OdfVersion::V3);
}

#[test]
fn test_unknown_header_is_skipped_with_warning() {
    let content = SAMPLE_V3.replace(
        "RECORD_HEADER",
        "FUTURE_HEADER\n  SOMETHING = 'new'\nRECORD_HEADER",
    );
    let odf = parse(&content).unwrap();

    assert_eq!(
        odf.warnings(),
        [OdfWarning::UnknownHeader {
            name: "FUTURE_HEADER".to_string(),
            line: 16,
        }]
    );
    assert_eq!(odf.record_header.num_param, 1);
}

#[test]
fn test_unknown_and_repeated_fields_warn() {
    let content = SAMPLE_V3.replace(
        "  AREA_OF_OPERATION = 'Scotian Shelf'",
        "  AREA_OF_OPERATION = 'Scotian Shelf'\n  VESSEL_COLOUR = 'red'\n  CRUISE_NUMBER = 'TEST2'",
    );
    let odf = parse(&content).unwrap();

    assert_eq!(odf.cruise_header.cruise_number, "TEST2");
    assert_eq!(odf.warnings().len(), 2);
    assert!(matches!(
        &odf.warnings()[0],
        OdfWarning::UnknownField { key, line: 7, .. } if key == "VESSEL_COLOUR"
    ));
    assert!(matches!(
        &odf.warnings()[1],
        OdfWarning::RepeatedScalar { key, .. } if key == "CRUISE_NUMBER"
    ));
}

#[test]
fn test_field_error_carries_block_and_line() {
    let content = SAMPLE_V2.replace(
        "START_DATE = '01-MAY-2025 00:00:00.00'",
        "START_DATE = 'sometime in May'",
    );
    let error = parse(&content).unwrap_err();

    assert!(matches!(
        &error,
        OdfError::InBlock { block, line: 8, .. } if block == "CRUISE_HEADER"
    ));
    assert!(matches!(error.root(), OdfError::InvalidDateTime { field, .. } if field == "START_DATE"));
}

#[test]
fn test_line_without_equals_is_malformed() {
    let content = SAMPLE_V3.replace("  CRUISE_NUMBER = 'TEST'", "  CRUISE_NUMBER 'TEST'");
    let error = parse(&content).unwrap_err();
    assert!(matches!(
        error,
        OdfError::MalformedDocument { block: Some(ref block), line: Some(5), .. } if block == "CRUISE_HEADER"
    ));
}

#[test]
fn test_data_row_with_wrong_column_count() {
    let content = format!("{}    6.0000 7.0000\n", SAMPLE_V3);
    let error = parse(&content).unwrap_err();

    assert!(matches!(
        &error,
        OdfError::InBlock { block, line: 22, .. } if block == "DATA"
    ));
    assert!(matches!(
        error.root(),
        OdfError::SchemaMismatch {
            expected: 1,
            actual: 2
        }
    ));
}

#[test]
fn test_bad_data_value() {
    let content = format!("{}    warm\n", SAMPLE_V3);
    let error = parse(&content).unwrap_err();
    assert!(matches!(error.root(), OdfError::InvalidNumeric { value, .. } if value == "warm"));
}

#[test]
fn test_duplicate_parameter_code() {
    let content = SAMPLE_V3.replace(
        "RECORD_HEADER",
        "PARAMETER_HEADER\n  TYPE = 'DOUB'\n  CODE = 'TEMP_01'\nRECORD_HEADER",
    );
    let error = parse(&content).unwrap_err();
    assert!(matches!(error, OdfError::MalformedDocument { .. }));
}

#[test]
fn test_empty_data_section() {
    let content = SAMPLE_V3.replace("    4.1234\n    5.0000\n", "");
    let odf = parse(&content).unwrap();
    assert!(odf.data.is_empty());
    assert_eq!(odf.data.parameter_list(), ["TEMP_01"]);
}

#[test]
fn test_parameter_code_from_wmo_code() {
    let content = SAMPLE_V3.replace("  CODE = 'TEMP_01'", "  WMO_CODE = 'TEMP'");
    let odf = parse(&content).unwrap();
    assert_eq!(odf.parameter_headers[0].code, "TEMP_01");
}

#[test]
fn test_sytm_parameter_null_is_timestamp() {
    let odf = parse(SAMPLE_V2).unwrap();
    assert_eq!(
        odf.parameter_headers[0].null_value,
        ParameterValue::Timestamp(SYTM_NULL_VALUE.to_string())
    );
}

#[test]
fn test_parse_file_with_crlf() {
    let file = create_temp_file(&SAMPLE_V3.replace('\n', "\r\n"));
    let odf = OdfParser::default().parse_file(file.path()).unwrap();
    assert_eq!(odf.data.len(), 2);
    assert_eq!(odf.cruise_header.cruise_number, "TEST");
}

#[test]
fn test_parse_file_latin1() {
    let mut bytes = SAMPLE_V3
        .replace("'Scotian Shelf'", "'Baie des Chaleurs X'")
        .into_bytes();
    let position = bytes.iter().position(|b| *b == b'X').unwrap();
    bytes[position] = 0xE9;

    let file = create_temp_file_bytes(&bytes);
    let odf = OdfParser::default().parse_file(file.path()).unwrap();
    assert_eq!(odf.cruise_header.area_of_operation, "Baie des Chaleurs \u{e9}");
}

#[test]
fn test_missing_file() {
    let error = OdfParser::default()
        .parse_file(std::path::Path::new("/nonexistent/file.ODF"))
        .unwrap_err();
    assert!(matches!(error, OdfError::FileNotFound { .. }));
}

#[test]
fn test_config_is_carried_into_document() {
    let config = OdfConfig::default().with_default_version(OdfVersion::V3);
    let odf = OdfParser::new(config).parse_lines(&sample_lines(SAMPLE_V2)).unwrap();
    assert_eq!(odf.config().default_version, OdfVersion::V3);
    assert_eq!(odf.version(), OdfVersion::V2);
}
