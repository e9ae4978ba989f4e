//! Block partitioning of an ODF line stream
//!
//! A header block starts at a line whose cleaned content ends with `_HEADER`
//! and runs to the line before the next block marker or the data separator.

use tracing::debug;

use super::field_parsers::{clean_line, find_blocks};
use crate::constants::{DATA_SEPARATOR, HEADER_SUFFIX};
use crate::error::{OdfError, Result};

/// One header block located in the line stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// Block name with any dialect comma removed, e.g. `CRUISE_HEADER`
    pub name: String,
    /// Index of the marker line
    pub marker: usize,
    /// Index one past the block's last field line
    pub end: usize,
}

impl BlockSpan {
    /// 1-based line number of the marker
    pub fn line_number(&self) -> usize {
        self.marker + 1
    }

    /// The block's field lines, marker excluded
    pub fn field_lines<'a>(&self, lines: &'a [String]) -> &'a [String] {
        &lines[self.marker + 1..self.end]
    }
}

/// Layout of a whole document: header blocks then the data region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    pub blocks: Vec<BlockSpan>,
    /// Index of the `-- DATA --` line
    pub separator: usize,
}

impl DocumentLayout {
    /// Lines after the data separator
    pub fn data_lines<'a>(&self, lines: &'a [String]) -> &'a [String] {
        &lines[self.separator + 1..]
    }
}

/// Whether a line is the data separator
pub fn is_data_separator(line: &str) -> bool {
    clean_line(line) == DATA_SEPARATOR
}

/// Split non-empty document lines into header blocks and the data region
pub fn partition(lines: &[String]) -> Result<DocumentLayout> {
    let separator = lines
        .iter()
        .position(|line| is_data_separator(line))
        .ok_or_else(|| {
            OdfError::malformed(format!("missing '{}' separator", DATA_SEPARATOR), None, None)
        })?;

    let header_region = &lines[..separator];
    let markers = find_blocks(header_region, HEADER_SUFFIX);

    match markers.first() {
        Some((first, _)) if *first > 0 => {
            return Err(OdfError::malformed(
                format!("content before the first header block: '{}'", lines[0]),
                None,
                Some(1),
            ));
        }
        None if separator > 0 => {
            return Err(OdfError::malformed(
                format!("content outside any header block: '{}'", lines[0]),
                None,
                Some(1),
            ));
        }
        _ => {}
    }

    let blocks: Vec<BlockSpan> = markers
        .iter()
        .enumerate()
        .map(|(i, (marker, name))| BlockSpan {
            name: name.clone(),
            marker: *marker,
            end: markers.get(i + 1).map_or(separator, |(next, _)| *next),
        })
        .collect();

    debug!(
        "Found {} header blocks; data separator at line {}",
        blocks.len(),
        separator + 1
    );

    Ok(DocumentLayout { blocks, separator })
}
