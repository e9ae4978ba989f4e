//! Tabular data payload following `-- DATA --`
//!
//! Columns are stored in schema order, one per parameter code. Missing values
//! are held as the null sentinels so that emission and statistics treat them
//! uniformly. Rows are emitted as single-space-joined fixed-width fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::parameter::ParameterValue;
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, normalize_text, parse_datetime, parse_float_strict, split_tokens,
};
use crate::constants::{
    DEFAULT_PRINT_DECIMAL_PLACES, DEFAULT_PRINT_FIELD_WIDTH, NULL_VALUE, SYTM_NULL_VALUE,
    SYTM_PRINT_FIELD_WIDTH, is_sytm_code,
};
use crate::error::{OdfError, Result};

/// Block name used for data-section error context
pub const DATA_BLOCK: &str = "DATA";

/// Per-column print format: `width` for timestamps, `width.decimals` for numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintFormat {
    pub width: usize,
    pub decimals: Option<usize>,
}

impl PrintFormat {
    pub fn timestamp(width: usize) -> Self {
        Self {
            width,
            decimals: None,
        }
    }

    pub fn numeric(width: usize, decimals: usize) -> Self {
        Self {
            width,
            decimals: Some(decimals),
        }
    }
}

impl fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decimals {
            Some(decimals) => write!(f, "{}.{}", self.width, decimals),
            None => write!(f, "{}", self.width),
        }
    }
}

/// One typed data column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Canonical date-times; nulls hold the timestamp sentinel
    Timestamp(Vec<String>),
    /// Numbers; nulls hold the numeric sentinel
    Numeric(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Timestamp(values) => values.len(),
            Column::Numeric(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty_like(code: &str) -> Self {
        if is_sytm_code(code) {
            Column::Timestamp(Vec::new())
        } else {
            Column::Numeric(Vec::new())
        }
    }

    /// Summary statistics over non-null values
    pub fn stats(&self) -> ColumnStats {
        match self {
            Column::Numeric(values) => {
                let valid: Vec<f64> = values.iter().copied().filter(|v| *v != NULL_VALUE).collect();
                let minimum = valid.iter().copied().reduce(f64::min);
                let maximum = valid.iter().copied().reduce(f64::max);
                ColumnStats {
                    number_valid: valid.len(),
                    number_null: values.len() - valid.len(),
                    minimum: minimum.map(ParameterValue::Numeric),
                    maximum: maximum.map(ParameterValue::Numeric),
                }
            }
            Column::Timestamp(values) => {
                let mut valid: Vec<_> = values
                    .iter()
                    .filter(|v| v.as_str() != SYTM_NULL_VALUE)
                    .filter_map(|v| parse_datetime(v).map(|dt| (dt, v)))
                    .collect();
                valid.sort_by_key(|(dt, _)| *dt);
                ColumnStats {
                    number_valid: valid.len(),
                    number_null: values.len() - valid.len(),
                    minimum: valid
                        .first()
                        .map(|(_, v)| ParameterValue::Timestamp(v.to_string())),
                    maximum: valid
                        .last()
                        .map(|(_, v)| ParameterValue::Timestamp(v.to_string())),
                }
            }
        }
    }
}

/// Statistics computed over one column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStats {
    pub number_valid: usize,
    pub number_null: usize,
    pub minimum: Option<ParameterValue>,
    pub maximum: Option<ParameterValue>,
}

/// The data section: schema plus columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRecords {
    parameter_list: Vec<String>,
    print_formats: HashMap<String, PrintFormat>,
    columns: Vec<Column>,
}

impl DataRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse data lines under the given schema
    pub fn populate(
        parameter_list: Vec<String>,
        print_formats: HashMap<String, PrintFormat>,
        lines: &[String],
    ) -> Result<Self> {
        Self::populate_at(parameter_list, print_formats, &HashMap::new(), 0, lines)
    }

    /// Parse data lines whose first line sits at 1-based line `first_line + 1`,
    /// treating each column's declared null token as the canonical null
    pub fn populate_at(
        parameter_list: Vec<String>,
        print_formats: HashMap<String, PrintFormat>,
        declared_nulls: &HashMap<String, ParameterValue>,
        first_line: usize,
        lines: &[String],
    ) -> Result<Self> {
        let mut columns: Vec<Column> = parameter_list
            .iter()
            .map(|code| Column::empty_like(code))
            .collect();

        for (offset, line) in lines.iter().enumerate() {
            let line_number = first_line + offset + 1;
            let tokens = split_tokens(line, |c| c.is_whitespace() || c == ',');
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() != parameter_list.len() {
                return Err(OdfError::schema_mismatch(parameter_list.len(), tokens.len())
                    .in_block(DATA_BLOCK, line_number));
            }

            for ((code, column), token) in parameter_list.iter().zip(columns.iter_mut()).zip(&tokens) {
                let declared = declared_nulls.get(code);
                match column {
                    Column::Timestamp(values) => {
                        let value = parse_timestamp_token(token, code, declared)
                            .map_err(|e| e.in_block(DATA_BLOCK, line_number))?;
                        values.push(value);
                    }
                    Column::Numeric(values) => {
                        let value = parse_numeric_token(token, code, declared)
                            .map_err(|e| e.in_block(DATA_BLOCK, line_number))?;
                        values.push(value);
                    }
                }
            }
        }

        let records = Self {
            parameter_list,
            print_formats,
            columns,
        };
        debug!(
            "Parsed {} data rows across {} columns",
            records.len(),
            records.parameter_list.len()
        );
        Ok(records)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parameter_list(&self) -> &[String] {
        &self.parameter_list
    }

    pub fn print_formats(&self) -> &HashMap<String, PrintFormat> {
        &self.print_formats
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, code: &str) -> Option<&Column> {
        self.position(code).map(|index| &self.columns[index])
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.parameter_list.iter().position(|c| c == code)
    }

    /// Format used to emit `code`, with type-appropriate defaults
    pub fn print_format(&self, code: &str) -> PrintFormat {
        self.print_formats.get(code).copied().unwrap_or_else(|| {
            if is_sytm_code(code) {
                PrintFormat::timestamp(SYTM_PRINT_FIELD_WIDTH)
            } else {
                PrintFormat::numeric(DEFAULT_PRINT_FIELD_WIDTH, DEFAULT_PRINT_DECIMAL_PLACES)
            }
        })
    }

    pub fn set_print_format(&mut self, code: &str, format: PrintFormat) {
        self.print_formats.insert(code.to_string(), format);
    }

    /// Append a column; its length must match the existing rows and its
    /// timestamps are stored in canonical form
    pub fn push_column(&mut self, code: &str, format: PrintFormat, column: Column) -> Result<()> {
        if self.position(code).is_some() {
            return Err(OdfError::invariant_violation(format!("duplicate column {}", code)));
        }
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(OdfError::schema_mismatch(self.len(), column.len()));
        }
        let column = match column {
            Column::Numeric(values) => {
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(OdfError::invalid_numeric(code, bad.to_string()));
                }
                Column::Numeric(values)
            }
            Column::Timestamp(values) => Column::Timestamp(
                values
                    .iter()
                    .map(|v| canonical_datetime(v, code))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };

        self.parameter_list.push(code.to_string());
        self.print_formats.insert(code.to_string(), format);
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column together with its print format
    pub fn remove_column(&mut self, code: &str) -> Option<Column> {
        let index = self.position(code)?;
        self.parameter_list.remove(index);
        self.print_formats.remove(code);
        Some(self.columns.remove(index))
    }

    /// Rename every column at once, keeping order and print formats
    pub fn rename_columns(&mut self, new_codes: &[String]) -> Result<()> {
        if new_codes.len() != self.parameter_list.len() {
            return Err(OdfError::schema_mismatch(self.parameter_list.len(), new_codes.len()));
        }
        let formats: Vec<Option<PrintFormat>> = self
            .parameter_list
            .iter()
            .map(|old| self.print_formats.get(old).copied())
            .collect();

        self.print_formats.clear();
        for ((code, new), format) in self.parameter_list.iter_mut().zip(new_codes).zip(formats) {
            if let Some(format) = format {
                self.print_formats.insert(new.clone(), format);
            }
            *code = new.clone();
        }
        Ok(())
    }

    /// Statistics for one column
    pub fn stats(&self, code: &str) -> Option<ColumnStats> {
        self.column(code).map(Column::stats)
    }

    /// Emit one line per row
    pub fn print(&self) -> String {
        let formats: Vec<PrintFormat> = self
            .parameter_list
            .iter()
            .map(|code| self.print_format(code))
            .collect();

        let mut output = String::new();
        for row in 0..self.len() {
            let fields: Vec<String> = self
                .columns
                .iter()
                .zip(&formats)
                .map(|(column, format)| format_cell(column, row, format))
                .collect();
            output.push_str(&fields.join(" "));
            output.push('\n');
        }
        output
    }

    /// Same schema and row order, with numbers equal to within print precision
    pub fn equivalent(&self, other: &DataRecords) -> bool {
        if self.parameter_list != other.parameter_list || self.len() != other.len() {
            return false;
        }

        self.parameter_list
            .iter()
            .zip(self.columns.iter().zip(&other.columns))
            .all(|(code, pair)| match pair {
                (Column::Timestamp(a), Column::Timestamp(b)) => a == b,
                (Column::Numeric(a), Column::Numeric(b)) => {
                    let decimals = self.print_format(code).decimals.unwrap_or(0) as i32;
                    let tolerance = 0.5 * 10f64.powi(-decimals) + f64::EPSILON;
                    a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance)
                }
                _ => false,
            })
    }
}

fn parse_numeric_token(token: &str, code: &str, declared: Option<&ParameterValue>) -> Result<f64> {
    let value = parse_float_strict(token, code)?;
    let is_declared_null = declared
        .and_then(ParameterValue::as_f64)
        .is_some_and(|null| null == value);
    Ok(if is_declared_null { NULL_VALUE } else { value })
}

fn parse_timestamp_token(
    token: &str,
    code: &str,
    declared: Option<&ParameterValue>,
) -> Result<String> {
    let text = normalize_text(token);
    if let Some(ParameterValue::Timestamp(null)) = declared {
        if &text == null {
            return Ok(SYTM_NULL_VALUE.to_string());
        }
    }
    canonical_datetime(&text, code)
}

fn format_cell(column: &Column, row: usize, format: &PrintFormat) -> String {
    let width = format.width;
    match column {
        Column::Numeric(values) => {
            let decimals = format.decimals.unwrap_or(0);
            format!("{:>width$.decimals$}", values[row])
        }
        Column::Timestamp(values) => {
            format!("{:>width$}", format!("'{}'", values[row]))
        }
    }
}
