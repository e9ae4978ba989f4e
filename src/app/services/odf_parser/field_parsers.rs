//! Field parsing utilities for ODF header and data lines
//!
//! This module provides the pure helper functions shared by every header
//! model and by the data block: text normalization, date-time and numeric
//! validation, quote-aware tokenizing and dialect comma handling.

use crate::constants::{
    LEGACY_DATE_FORMATS, LEGACY_DATETIME_FORMATS, NULL_VALUE, PARAMETER_CODE_PATTERN,
};
use crate::error::{OdfError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

static ODF_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})-([A-Za-z]{3})-(\d{4})\s+(\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d*))?)?$")
        .expect("valid date-time pattern")
});

static FORTRAN_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)[Dd][+-]?\d+$").expect("valid Fortran float pattern")
});

static PARAMETER_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PARAMETER_CODE_PATTERN).expect("valid parameter code pattern"));

/// Strip one pair of quotes and surrounding whitespace; rewrite Fortran `D` exponents as `E`
pub fn normalize_text(value: &str) -> String {
    let trimmed = value.trim();
    let stripped = trimmed
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(trimmed)
        .trim();

    if !stripped.contains(['D', 'd']) {
        return stripped.to_string();
    }

    stripped
        .split(' ')
        .map(|token| {
            if FORTRAN_FLOAT.is_match(token) {
                token.replace(['D', 'd'], "E")
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse any accepted date-time rendering and emit `DD-MON-YYYY HH:MM:SS.ss`
pub fn canonical_datetime(value: &str, field: &str) -> Result<String> {
    let text = normalize_text(value);
    parse_datetime(&text)
        .map(|dt| format_datetime(&dt))
        .ok_or_else(|| OdfError::invalid_datetime(field, value))
}

/// Parse an accepted date-time rendering without a time-zone adjustment
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Some(caps) = ODF_DATETIME.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month_name = caps[2].to_ascii_uppercase();
        let month = MONTHS.iter().position(|m| *m == month_name)? as u32 + 1;
        let year: i32 = caps[3].parse().ok()?;
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;
        let second: u32 = caps.get(6).map_or(Some(0), |m| m.as_str().parse().ok())?;
        let hundredths = caps.get(7).map_or(0, |m| hundredths_from_digits(m.as_str()));

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, hundredths * 10)?;
        return Some(NaiveDateTime::new(date, time));
    }

    for format in LEGACY_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    for format in LEGACY_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Emit a date-time in canonical form, truncating the fraction to hundredths
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    let hundredths = (dt.nanosecond() / 10_000_000).min(99);
    format!(
        "{}.{:02}",
        dt.format("%d-%b-%Y %H:%M:%S").to_string().to_uppercase(),
        hundredths
    )
}

/// Current local date-time in canonical form
pub fn current_datetime() -> String {
    format_datetime(&chrono::Local::now().naive_local())
}

fn hundredths_from_digits(digits: &str) -> u32 {
    let mut padded: String = digits.chars().take(2).collect();
    while padded.len() < 2 {
        padded.push('0');
    }
    padded.parse().unwrap_or(0)
}

/// Parse a finite number (Fortran exponents allowed) or the numeric null
pub fn parse_float_strict(value: &str, field: &str) -> Result<f64> {
    let text = normalize_text(value);
    match text.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(OdfError::invalid_numeric(field, value)),
    }
}

/// Parse a whole number, accepting integral decimal renderings such as `3.0`
pub fn parse_int_strict(value: &str, field: &str) -> Result<i32> {
    let number = parse_float_strict(value, field)?;
    if number.fract() != 0.0 || number < i32::MIN as f64 || number > i32::MAX as f64 {
        return Err(OdfError::invalid_numeric(field, value));
    }
    Ok(number as i32)
}

/// Parse a non-negative count
pub fn parse_count(value: &str, field: &str) -> Result<usize> {
    let number = parse_int_strict(value, field)?;
    usize::try_from(number).map_err(|_| OdfError::invalid_numeric(field, value))
}

/// Parse a whitespace-separated list of numbers
pub fn parse_float_list(value: &str, field: &str) -> Result<Vec<f64>> {
    normalize_text(value)
        .split_whitespace()
        .map(|token| parse_float_strict(token, field))
        .collect()
}

/// Check a parameter code against the `LLLL_NN` structure
pub fn is_parameter_code(code: &str) -> bool {
    PARAMETER_CODE.is_match(code)
}

/// Normalize and validate a parameter code
pub fn validate_parameter_code(value: &str) -> Result<String> {
    let code = normalize_text(value);
    if is_parameter_code(&code) {
        Ok(code)
    } else {
        Err(OdfError::invalid_code(value))
    }
}

/// Split a line on whitespace, keeping single-quoted substrings as one token
pub fn tokenize_quoted(line: &str) -> Vec<String> {
    split_tokens(line, char::is_whitespace)
}

/// Split a line on the given separators, keeping single-quoted substrings whole
pub fn split_tokens(line: &str, is_separator: impl Fn(char) -> bool) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut has_token = false;

    for c in line.chars() {
        if c == '\'' {
            in_quote = !in_quote;
            has_token = true;
        } else if !in_quote && is_separator(c) {
            if has_token {
                tokens.push(std::mem::take(&mut current));
                has_token = false;
            }
        } else {
            current.push(c);
            has_token = true;
        }
    }

    if has_token {
        tokens.push(current);
    }

    tokens
}

/// Terminate every line with a comma, optionally leaving the final line bare
pub fn add_trailing_commas(text: &str, skip_last: bool) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut output = String::with_capacity(text.len() + lines.len() + 1);

    for (i, line) in lines.iter().enumerate() {
        output.push_str(line);
        if !(skip_last && i + 1 == lines.len()) {
            output.push(',');
        }
        output.push('\n');
    }

    output
}

/// Remove surrounding whitespace and any trailing dialect commas from a line
pub fn clean_line(line: &str) -> &str {
    line.trim().trim_end_matches([',', ' ']).trim_end()
}

/// Split a `KEY = VALUE` line once on `=`, uppercasing the key
pub fn split_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim().to_ascii_uppercase();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim().to_string()))
}

/// Read a file as 8-bit text and return its non-empty stripped lines
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(OdfError::file_not_found(path));
    }

    let bytes = std::fs::read(path).map_err(|e| OdfError::read_error(path, e))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // Latin-1 fallback: every byte maps onto the code point of the same value
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    };

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Find lines whose trimmed content ends with the header marker
pub fn find_blocks(lines: &[String], marker: &str) -> Vec<(usize, String)> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let name = clean_line(line);
            if !name.contains('=') && name.ends_with(marker) {
                Some((index, name.to_string()))
            } else {
                None
            }
        })
        .collect()
}

/// Format a header number, emitting the bare sentinel for nulls
pub fn format_number(value: f64, decimals: usize) -> String {
    if value == NULL_VALUE {
        format!("{:.1}", NULL_VALUE)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Format a number without forcing a precision (`60` prints as `60.0`)
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Format a number in scientific notation with a signed two-digit exponent
pub fn format_scientific(value: f64, precision: usize) -> String {
    let rendered = format!("{:.*e}", precision, value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}
