//! Shared population and emission machinery for ODF header blocks
//!
//! Every header kind implements [`HeaderBlock`]: it maps `KEY = VALUE` lines
//! onto its fields through validated setters and writes its fields back
//! through a [`BlockWriter`]. Dialect handling (v2 trailing commas) lives
//! here so individual headers only describe their content.

use std::collections::HashSet;
use std::fmt::Display;

use tracing::warn;

use crate::app::services::odf_parser::field_parsers::{
    add_trailing_commas, clean_line, format_number, format_scientific, normalize_text,
    split_key_value,
};
use crate::config::OdfVersion;
use crate::constants::COEFFICIENT_PRECISION;
use crate::error::{OdfError, OdfWarning, Result};

/// How a header treated a key during population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-valued field; a repeat overwrites
    Scalar,
    /// Ordered list field; a repeat appends
    Repeated,
    /// Key the block does not define
    Unknown,
}

/// Common behaviour of every ODF header block
pub trait HeaderBlock: Default {
    /// Block marker, e.g. `CRUISE_HEADER`
    const NAME: &'static str;

    /// Route one raw key/value pair through the matching validated setter
    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind>;

    /// Hook run after every line of the block has been applied
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Write the block's fields in canonical order
    fn write_fields(&self, out: &mut BlockWriter, version: OdfVersion);

    /// Render the block under the given dialect
    fn print(&self, version: OdfVersion) -> String {
        let mut out = BlockWriter::new(Self::NAME);
        self.write_fields(&mut out, version);
        out.finish(version)
    }

    /// Build a block from its field lines (the marker line excluded)
    fn populate(lines: &[String]) -> Result<(Self, Vec<OdfWarning>)> {
        Self::populate_at(0, lines)
    }

    /// Build a block whose marker sits at 1-based line `marker_line`
    fn populate_at(marker_line: usize, lines: &[String]) -> Result<(Self, Vec<OdfWarning>)> {
        let mut header = Self::default();
        let mut warnings = Vec::new();
        let mut seen_scalars: HashSet<String> = HashSet::new();

        for (offset, raw) in lines.iter().enumerate() {
            let line_number = marker_line + offset + 1;
            let line = clean_line(raw);
            if line.is_empty() {
                continue;
            }

            let (key, value) = split_key_value(line).ok_or_else(|| {
                OdfError::malformed(
                    format!("expected KEY = VALUE, found '{}'", line),
                    Some(Self::NAME),
                    Some(line_number),
                )
            })?;

            let kind = header
                .apply_field(&key, &value)
                .map_err(|e| e.in_block(Self::NAME, line_number))?;

            match kind {
                FieldKind::Unknown => {
                    warn!("Ignoring unknown field {} in {} at line {}", key, Self::NAME, line_number);
                    warnings.push(OdfWarning::UnknownField {
                        block: Self::NAME.to_string(),
                        key,
                        line: line_number,
                    });
                }
                FieldKind::Scalar => {
                    if !seen_scalars.insert(key.clone()) {
                        warn!("Field {} repeated in {} at line {}", key, Self::NAME, line_number);
                        warnings.push(OdfWarning::RepeatedScalar {
                            block: Self::NAME.to_string(),
                            key,
                            line: line_number,
                        });
                    }
                }
                FieldKind::Repeated => {}
            }
        }

        header
            .finish()
            .map_err(|e| e.in_block(Self::NAME, marker_line))?;

        Ok((header, warnings))
    }
}

/// Append a list entry read from a file, skipping the empty placeholder `''`
pub fn push_entry(list: &mut Vec<String>, value: &str) {
    let entry = normalize_text(value);
    if !entry.is_empty() {
        list.push(entry);
    }
}

/// Replace the 1-based entry `number`, or append when `number` is 0 or past the end
pub fn set_indexed<T>(list: &mut Vec<T>, value: T, number: usize) {
    if number == 0 || number > list.len() {
        list.push(value);
    } else {
        list[number - 1] = value;
    }
}

/// Accumulates `  KEY = VALUE` lines for one block
#[derive(Debug, Clone)]
pub struct BlockWriter {
    text: String,
}

impl BlockWriter {
    pub fn new(name: &str) -> Self {
        Self {
            text: format!("{}\n", name),
        }
    }

    /// Unquoted value
    pub fn field(&mut self, key: &str, value: impl Display) {
        self.text.push_str(&format!("  {} = {}\n", key, value));
    }

    /// Single-quoted value
    pub fn quoted(&mut self, key: &str, value: &str) {
        self.text.push_str(&format!("  {} = '{}'\n", key, value));
    }

    /// One quoted line per entry, or a single `''` for an empty list
    pub fn quoted_list(&mut self, key: &str, values: &[String]) {
        if values.is_empty() {
            self.quoted(key, "");
        }
        for value in values {
            self.quoted(key, value);
        }
    }

    /// Fixed-point number; nulls print as the bare sentinel
    pub fn number(&mut self, key: &str, value: f64, decimals: usize) {
        self.field(key, format_number(value, decimals));
    }

    /// Space-separated scientific values on a single line
    pub fn scientific_list(&mut self, key: &str, values: &[f64]) {
        let joined = values
            .iter()
            .map(|v| format_scientific(*v, COEFFICIENT_PRECISION))
            .collect::<Vec<_>>()
            .join(" ");
        self.field(key, joined);
    }

    /// Finished block text under the given dialect
    pub fn finish(self, version: OdfVersion) -> String {
        if version.uses_commas() {
            add_trailing_commas(&self.text, false)
        } else {
            self.text
        }
    }
}
