//! Test utilities for the ODF reader
//!
//! Sample documents in both dialects and helpers for writing them to
//! temporary files.

use std::io::Write;
use tempfile::NamedTempFile;

mod parser_tests;

/// A small v2 CTD file with one calibration, one history entry and two columns
pub const SAMPLE_V2: &str = "ODF_HEADER,
  FILE_SPECIFICATION = 'CTD_BCD2024669_001_01_DN',
CRUISE_HEADER,
  COUNTRY_INSTITUTE_CODE = 1810,
  CRUISE_NUMBER = 'BCD2024669',
  ORGANIZATION = 'DFO BIO',
  CHIEF_SCIENTIST = 'JANE DOE',
  START_DATE = '01-MAY-2025 00:00:00.00',
  END_DATE = '10-MAY-2025 00:00:00.00',
  PLATFORM = 'CCGS HUDSON',
  CRUISE_NAME = 'Spring survey',
  CRUISE_DESCRIPTION = '',
EVENT_HEADER,
  DATA_TYPE = 'CTD',
  EVENT_NUMBER = '001',
  EVENT_QUALIFIER1 = '01',
  EVENT_QUALIFIER2 = 'DN',
  CREATION_DATE = '03-MAY-2025 12:00:00.00',
  ORIG_CREATION_DATE = '03-MAY-2025 11:00:00.00',
  START_DATE_TIME = '03-MAY-2025 00:47:41.73',
  END_DATE_TIME = '03-MAY-2025 00:49:41.73',
  INITIAL_LATITUDE = 44.266700,
  INITIAL_LONGITUDE = -63.316700,
  END_LATITUDE = 44.266900,
  END_LONGITUDE = -63.316200,
  MIN_DEPTH = 2.18,
  MAX_DEPTH = 176.50,
  SAMPLING_INTERVAL = 60.0,
  SOUNDING = 180.00,
  DEPTH_OFF_BOTTOM = 3.50,
  STATION_NAME = 'HL_02',
  SET_NUMBER = '',
  EVENT_COMMENTS = 'first comment',
  EVENT_COMMENTS = 'second comment',
INSTRUMENT_HEADER,
  INST_TYPE = 'Sea-Bird',
  MODEL = 'SBE 911plus',
  SERIAL_NUMBER = '0917',
  DESCRIPTION = 'CTD rosette',
POLYNOMIAL_CAL_HEADER,
  PARAMETER_CODE = 'PRES_01',
  CALIBRATION_DATE = '01-JAN-2025 00:00:00.00',
  APPLICATION_DATE = '03-MAY-2025 00:00:00.00',
  NUMBER_COEFFICIENTS = 2,
  COEFFICIENTS = 0.60000000D+01 0.15000001D+00,
HISTORY_HEADER,
  CREATION_DATE = '03-MAY-2025 12:00:00.00',
  PROCESS = 'Initial file creation',
PARAMETER_HEADER,
  TYPE = 'SYTM',
  NAME = 'System Time',
  UNITS = 'UTC',
  CODE = 'SYTM_01',
  NULL_VALUE = '17-NOV-1858 00:00:00.00',
  PRINT_FIELD_WIDTH = 23,
  PRINT_DECIMAL_PLACES = 0,
  ANGLE_OF_SECTION = -999.0,
  MAGNETIC_VARIATION = -999.0,
  DEPTH = -999.0,
  MINIMUM_VALUE = '03-MAY-2025 00:47:41.73',
  MAXIMUM_VALUE = '03-MAY-2025 00:49:41.73',
  NUMBER_VALID = 3,
  NUMBER_NULL = 0,
PARAMETER_HEADER,
  TYPE = 'DOUB',
  NAME = 'Pressure',
  UNITS = 'decibars',
  CODE = 'PRES_01',
  NULL_VALUE = -99.0,
  PRINT_FIELD_WIDTH = 10,
  PRINT_DECIMAL_PLACES = 3,
  ANGLE_OF_SECTION = -999.0,
  MAGNETIC_VARIATION = -999.0,
  DEPTH = -999.0,
  MINIMUM_VALUE = 2.177,
  MAXIMUM_VALUE = 176.5,
  NUMBER_VALID = 2,
  NUMBER_NULL = 1,
RECORD_HEADER,
  NUM_CALIBRATION = 1,
  NUM_HISTORY = 1,
  NUM_SWING = 0,
  NUM_PARAM = 2,
  NUM_CYCLE = 3,
-- DATA --
 '03-MAY-2025 00:47:41.73'      2.177
 '03-MAY-2025 00:48:41.73'    -99.000
 '03-MAY-2025 00:49:41.73'    176.500
";

/// The smallest v3 document: one numeric column and two rows
pub const SAMPLE_V3: &str = "ODF_HEADER
  FILE_SPECIFICATION = 'CTD_TEST_002_01_UP'
  ODF_SPECIFICATION_VERSION = 3.0
CRUISE_HEADER
  CRUISE_NUMBER = 'TEST'
  AREA_OF_OPERATION = 'Scotian Shelf'
PARAMETER_HEADER
  TYPE = 'DOUB'
  NAME = 'Temperature'
  UNITS = 'degrees C'
  CODE = 'TEMP_01'
  NULL_VALUE = -999.0
  PRINT_FIELD_ORDER = 1
  PRINT_FIELD_WIDTH = 10
  PRINT_DECIMAL_PLACES = 4
RECORD_HEADER
  NUM_PARAM = 1
  NUM_CYCLE = 2
-- DATA --
    4.1234
    5.0000
";

/// Write `content` to a temporary file that lives as long as the handle
pub fn create_temp_file(content: &str) -> NamedTempFile {
    create_temp_file_bytes(content.as_bytes())
}

pub fn create_temp_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

/// Split sample text into the non-empty trimmed lines the reader works on
pub fn sample_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
