//! Parameter block (`PARAMETER_HEADER`)
//!
//! One parameter header describes one data column: its type, code, units,
//! print format, null sentinel and summary statistics. The code ties the
//! header to its column in [`DataRecords`](super::data_records::DataRecords)
//! and must follow the `LLLL_NN` structure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::block::{BlockWriter, FieldKind, HeaderBlock};
use super::data_records::{ColumnStats, PrintFormat};
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, format_number, format_plain, is_parameter_code, normalize_text,
    parse_count, parse_float_strict, parse_int_strict, validate_parameter_code,
};
use crate::config::OdfVersion;
use crate::constants::{
    DEFAULT_PRINT_DECIMAL_PLACES, DEFAULT_PRINT_FIELD_WIDTH, NULL_INT, NULL_VALUE,
    SYTM_NULL_VALUE, SYTM_PRINT_FIELD_WIDTH, blocks, parameter_types,
};
use crate::error::{OdfError, Result};

/// Column type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParameterType {
    /// Timestamp column
    Sytm,
    /// Double-precision numeric column
    #[default]
    Doub,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Sytm => parameter_types::SYTM,
            ParameterType::Doub => parameter_types::DOUB,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = OdfError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_text(s).to_uppercase().as_str() {
            parameter_types::SYTM => Ok(ParameterType::Sytm),
            parameter_types::DOUB => Ok(ParameterType::Doub),
            _ => Err(OdfError::invalid_enum("TYPE", s, parameter_types::ALLOWED)),
        }
    }
}

/// A header value that is numeric for DOUB columns and a date-time for SYTM ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Numeric(f64),
    Timestamp(String),
}

impl ParameterValue {
    /// The null sentinel matching a column type
    pub fn null_for(parameter_type: ParameterType) -> Self {
        match parameter_type {
            ParameterType::Sytm => ParameterValue::Timestamp(SYTM_NULL_VALUE.to_string()),
            ParameterType::Doub => ParameterValue::Numeric(NULL_VALUE),
        }
    }

    /// Numbers parse as numbers; anything else must be a date-time
    pub fn parse(value: &str, field: &str) -> Result<Self> {
        if let Ok(number) = parse_float_strict(value, field) {
            return Ok(ParameterValue::Numeric(number));
        }
        canonical_datetime(value, field)
            .map(ParameterValue::Timestamp)
            .map_err(|_| OdfError::invalid_numeric(field, value))
    }

    pub fn is_null(&self) -> bool {
        match self {
            ParameterValue::Numeric(v) => *v == NULL_VALUE,
            ParameterValue::Timestamp(ts) => ts == SYTM_NULL_VALUE,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Numeric(v) => Some(*v),
            ParameterValue::Timestamp(_) => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Numeric(v) => f.write_str(&format_plain(*v)),
            ParameterValue::Timestamp(ts) => write!(f, "'{}'", ts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterHeader {
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub name: String,
    pub units: String,
    /// `LLLL_NN`
    pub code: String,
    /// Emitted only when non-empty
    pub wmo_code: String,
    pub null_value: ParameterValue,
    /// Emitted only in the v3 dialect
    pub print_field_order: i32,
    pub print_field_width: i32,
    pub print_decimal_places: i32,
    pub angle_of_section: f64,
    pub magnetic_variation: f64,
    pub depth: f64,
    pub minimum_value: ParameterValue,
    pub maximum_value: ParameterValue,
    pub number_valid: usize,
    pub number_null: usize,
}

impl Default for ParameterHeader {
    fn default() -> Self {
        Self {
            parameter_type: ParameterType::Doub,
            name: String::new(),
            units: String::new(),
            code: String::new(),
            wmo_code: String::new(),
            null_value: ParameterValue::Numeric(NULL_VALUE),
            print_field_order: NULL_INT,
            print_field_width: NULL_INT,
            print_decimal_places: NULL_INT,
            angle_of_section: NULL_VALUE,
            magnetic_variation: NULL_VALUE,
            depth: NULL_VALUE,
            minimum_value: ParameterValue::Numeric(NULL_VALUE),
            maximum_value: ParameterValue::Numeric(NULL_VALUE),
            number_valid: 0,
            number_null: 0,
        }
    }
}

impl ParameterHeader {
    /// Create a header for `code` with canonical nulls for its type
    pub fn new(parameter_type: ParameterType, code: &str) -> Result<Self> {
        let mut header = Self {
            parameter_type,
            ..Self::default()
        };
        header.set_code(code)?;
        header.reset_nulls();
        Ok(header)
    }

    pub fn set_type(&mut self, value: &str) -> Result<()> {
        self.parameter_type = value.parse()?;
        Ok(())
    }

    pub fn set_code(&mut self, value: &str) -> Result<()> {
        self.code = validate_parameter_code(value)?;
        Ok(())
    }

    pub fn set_print_field_width(&mut self, value: &str) -> Result<()> {
        self.print_field_width = parse_int_strict(value, "PRINT_FIELD_WIDTH")?;
        Ok(())
    }

    pub fn set_print_decimal_places(&mut self, value: &str) -> Result<()> {
        self.print_decimal_places = parse_int_strict(value, "PRINT_DECIMAL_PLACES")?;
        Ok(())
    }

    pub fn is_timestamp(&self) -> bool {
        self.parameter_type == ParameterType::Sytm
    }

    /// Column print format, falling back to defaults for unset widths
    pub fn print_format(&self) -> PrintFormat {
        if self.is_timestamp() {
            let width = positive_or(self.print_field_width, SYTM_PRINT_FIELD_WIDTH);
            PrintFormat::timestamp(width)
        } else {
            let width = positive_or(self.print_field_width, DEFAULT_PRINT_FIELD_WIDTH);
            let decimals = usize::try_from(self.print_decimal_places)
                .unwrap_or(DEFAULT_PRINT_DECIMAL_PLACES);
            PrintFormat::numeric(width, decimals)
        }
    }

    /// Put the canonical null sentinel back in place of any declared one
    pub fn reset_nulls(&mut self) {
        self.null_value = ParameterValue::null_for(self.parameter_type);
    }

    /// Replace min/max/valid/null with statistics computed over the column
    pub fn apply_statistics(&mut self, stats: &ColumnStats) {
        self.number_valid = stats.number_valid;
        self.number_null = stats.number_null;
        let null = ParameterValue::null_for(self.parameter_type);
        self.minimum_value = stats.minimum.clone().unwrap_or_else(|| null.clone());
        self.maximum_value = stats.maximum.clone().unwrap_or(null);
    }

    /// Current rendering of a field, keyed as in the file
    pub fn field_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "TYPE" => self.parameter_type.to_string(),
            "NAME" => self.name.clone(),
            "UNITS" => self.units.clone(),
            "CODE" => self.code.clone(),
            "WMO_CODE" => self.wmo_code.clone(),
            "NULL_VALUE" => self.null_value.to_string(),
            "PRINT_FIELD_ORDER" => self.print_field_order.to_string(),
            "PRINT_FIELD_WIDTH" => self.print_field_width.to_string(),
            "PRINT_DECIMAL_PLACES" => self.print_decimal_places.to_string(),
            "ANGLE_OF_SECTION" => format_number(self.angle_of_section, 1),
            "MAGNETIC_VARIATION" => format_number(self.magnetic_variation, 1),
            "DEPTH" => format_number(self.depth, 1),
            "MINIMUM_VALUE" => self.minimum_value.to_string(),
            "MAXIMUM_VALUE" => self.maximum_value.to_string(),
            "NUMBER_VALID" => self.number_valid.to_string(),
            "NUMBER_NULL" => self.number_null.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// DOUB values must be numbers and SYTM values date-times
    fn check_kind(&self, field: &str, value: &ParameterValue) -> Result<()> {
        match (self.parameter_type, value) {
            (ParameterType::Doub, ParameterValue::Timestamp(ts)) => {
                Err(OdfError::invalid_numeric(field, ts.as_str()))
            }
            (ParameterType::Sytm, ParameterValue::Numeric(v)) => {
                Err(OdfError::invalid_datetime(field, format_plain(*v)))
            }
            _ => Ok(()),
        }
    }

    fn null_as_timestamp(value: &ParameterValue) -> ParameterValue {
        match value {
            ParameterValue::Numeric(v) if *v == NULL_VALUE => {
                ParameterValue::Timestamp(SYTM_NULL_VALUE.to_string())
            }
            other => other.clone(),
        }
    }
}

fn positive_or(value: i32, fallback: usize) -> usize {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(fallback)
}

impl HeaderBlock for ParameterHeader {
    const NAME: &'static str = blocks::PARAMETER;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "TYPE" => self.set_type(value)?,
            "NAME" => self.name = normalize_text(value),
            "UNITS" => self.units = normalize_text(value),
            "CODE" => self.set_code(value)?,
            "WMO_CODE" => self.wmo_code = normalize_text(value).to_uppercase(),
            "NULL_VALUE" => self.null_value = ParameterValue::parse(value, key)?,
            "PRINT_FIELD_ORDER" => self.print_field_order = parse_int_strict(value, key)?,
            "PRINT_FIELD_WIDTH" => self.set_print_field_width(value)?,
            "PRINT_DECIMAL_PLACES" => self.set_print_decimal_places(value)?,
            "ANGLE_OF_SECTION" => self.angle_of_section = parse_float_strict(value, key)?,
            "MAGNETIC_VARIATION" => self.magnetic_variation = parse_float_strict(value, key)?,
            "DEPTH" => self.depth = parse_float_strict(value, key)?,
            "MINIMUM_VALUE" => self.minimum_value = ParameterValue::parse(value, key)?,
            "MAXIMUM_VALUE" => self.maximum_value = ParameterValue::parse(value, key)?,
            "NUMBER_VALID" => self.number_valid = parse_count(value, key)?,
            "NUMBER_NULL" => self.number_null = parse_count(value, key)?,
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn finish(&mut self) -> Result<()> {
        if self.code.is_empty() {
            if self.wmo_code.is_empty() {
                return Err(OdfError::invalid_code(""));
            }
            let derived = format!("{}_01", self.wmo_code);
            if !is_parameter_code(&derived) {
                return Err(OdfError::invalid_code(derived));
            }
            self.code = derived;
        }

        if self.is_timestamp() {
            self.null_value = Self::null_as_timestamp(&self.null_value);
            self.minimum_value = Self::null_as_timestamp(&self.minimum_value);
            self.maximum_value = Self::null_as_timestamp(&self.maximum_value);
        }

        self.check_kind("NULL_VALUE", &self.null_value)?;
        self.check_kind("MINIMUM_VALUE", &self.minimum_value)?;
        self.check_kind("MAXIMUM_VALUE", &self.maximum_value)?;
        Ok(())
    }

    fn write_fields(&self, out: &mut BlockWriter, version: OdfVersion) {
        out.quoted("TYPE", self.parameter_type.as_str());
        out.quoted("NAME", &self.name);
        out.quoted("UNITS", &self.units);
        out.quoted("CODE", &self.code);
        if !self.wmo_code.is_empty() {
            out.quoted("WMO_CODE", &self.wmo_code);
        }
        out.field("NULL_VALUE", &self.null_value);
        if version == OdfVersion::V3 {
            out.field("PRINT_FIELD_ORDER", self.print_field_order);
        }
        out.field("PRINT_FIELD_WIDTH", self.print_field_width);
        out.field("PRINT_DECIMAL_PLACES", self.print_decimal_places);
        out.number("ANGLE_OF_SECTION", self.angle_of_section, 1);
        out.number("MAGNETIC_VARIATION", self.magnetic_variation, 1);
        out.number("DEPTH", self.depth, 1);
        out.field("MINIMUM_VALUE", &self.minimum_value);
        out.field("MAXIMUM_VALUE", &self.maximum_value);
        out.field("NUMBER_VALID", self.number_valid);
        out.field("NUMBER_NULL", self.number_null);
    }
}
