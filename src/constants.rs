//! Application constants for the ODF toolbox
//!
//! This module contains the fixed sentinels, block names, field keys and
//! formatting defaults used throughout the codec.

// =============================================================================
// Null Sentinels
// =============================================================================

/// Numeric null written in place of missing values
pub const NULL_VALUE: f64 = -999.0;

/// Integer form of the numeric null (WMO codes, counters)
pub const NULL_INT: i32 = -999;

/// Timestamp null written in place of missing date-times
pub const SYTM_NULL_VALUE: &str = "17-NOV-1858 00:00:00.00";

// =============================================================================
// Date-Time Formats
// =============================================================================

/// Date-time renderings accepted besides the canonical one
pub const LEGACY_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Date-only renderings accepted (time of day defaults to midnight)
pub const LEGACY_DATE_FORMATS: &[&str] = &["%d-%b-%Y", "%Y-%m-%d", "%Y/%m/%d"];

// =============================================================================
// File Structure
// =============================================================================

/// Separator between the header blocks and the data rows
pub const DATA_SEPARATOR: &str = "-- DATA --";

/// Suffix shared by every header block name
pub const HEADER_SUFFIX: &str = "_HEADER";

/// Header block names in the order they are written
pub mod blocks {
    pub const ODF: &str = "ODF_HEADER";
    pub const CRUISE: &str = "CRUISE_HEADER";
    pub const EVENT: &str = "EVENT_HEADER";
    pub const METEO: &str = "METEO_HEADER";
    pub const QUALITY: &str = "QUALITY_HEADER";
    pub const INSTRUMENT: &str = "INSTRUMENT_HEADER";
    pub const GENERAL_CAL: &str = "GENERAL_CAL_HEADER";
    pub const POLYNOMIAL_CAL: &str = "POLYNOMIAL_CAL_HEADER";
    pub const COMPASS_CAL: &str = "COMPASS_CAL_HEADER";
    pub const HISTORY: &str = "HISTORY_HEADER";
    pub const PARAMETER: &str = "PARAMETER_HEADER";
    pub const RECORD: &str = "RECORD_HEADER";

    /// All recognized block names
    pub const ALL: &[&str] = &[
        ODF,
        CRUISE,
        EVENT,
        METEO,
        QUALITY,
        INSTRUMENT,
        GENERAL_CAL,
        POLYNOMIAL_CAL,
        COMPASS_CAL,
        HISTORY,
        PARAMETER,
        RECORD,
    ];
}

// =============================================================================
// Parameters
// =============================================================================

/// Structure every parameter code must follow, e.g. `TE90_01`
pub const PARAMETER_CODE_PATTERN: &str = r"^[A-Z]{4}_[0-9]{2}$";

/// Parameter type tags
pub mod parameter_types {
    /// Timestamp column
    pub const SYTM: &str = "SYTM";

    /// Double-precision numeric column
    pub const DOUB: &str = "DOUB";

    /// Controlled vocabulary for the TYPE field
    pub const ALLOWED: &[&str] = &[SYTM, DOUB];
}

/// Print width used for numeric columns when no format is known
pub const DEFAULT_PRINT_FIELD_WIDTH: usize = 10;

/// Decimal places used for numeric columns when no format is known
pub const DEFAULT_PRINT_DECIMAL_PLACES: usize = 4;

/// Print width of a quoted timestamp column
pub const SYTM_PRINT_FIELD_WIDTH: usize = 23;

/// Significant digits after the point in scientific coefficient output
pub const COEFFICIENT_PRECISION: usize = 8;

// =============================================================================
// Meteorology
// =============================================================================

/// Knots per metre per second
pub const KNOTS_PER_METRE_PER_SECOND: f64 = 1.94384;

// =============================================================================
// Helper Functions
// =============================================================================

/// Check whether a block name is one the codec understands
pub fn is_known_block(name: &str) -> bool {
    blocks::ALL.contains(&name)
}

/// Check whether a numeric value is the null sentinel
pub fn is_null(value: f64) -> bool {
    value == NULL_VALUE
}

/// Extract the four-letter mnemonic from a parameter code (`TEMP_01` -> `TEMP`)
pub fn parameter_prefix(code: &str) -> &str {
    code.split('_').next().unwrap_or(code)
}

/// Check whether a parameter code names the timestamp column
pub fn is_sytm_code(code: &str) -> bool {
    parameter_prefix(code) == parameter_types::SYTM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_blocks() {
        assert!(is_known_block("CRUISE_HEADER"));
        assert!(is_known_block("RECORD_HEADER"));
        assert!(!is_known_block("FUTURE_HEADER"));
        assert_eq!(blocks::ALL.len(), 12);
    }

    #[test]
    fn test_parameter_prefix() {
        assert_eq!(parameter_prefix("TEMP_01"), "TEMP");
        assert_eq!(parameter_prefix("SYTM_01"), "SYTM");
        assert_eq!(parameter_prefix("PRES"), "PRES");
        assert!(is_sytm_code("SYTM_01"));
        assert!(!is_sytm_code("PRES_01"));
    }

    #[test]
    fn test_null_detection() {
        assert!(is_null(-999.0));
        assert!(!is_null(-99.0));
        assert!(!is_null(0.0));
    }
}
