//! Processing history block (`HISTORY_HEADER`)
//!
//! One history header is appended per editing session; each processing step
//! performed during that session becomes a `PROCESS` entry.

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, push_entry, set_indexed};
use crate::app::services::odf_parser::field_parsers::{canonical_datetime, normalize_text};
use crate::config::OdfVersion;
use crate::constants::{SYTM_NULL_VALUE, blocks};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryHeader {
    pub creation_date: String,
    pub processes: Vec<String>,
}

impl Default for HistoryHeader {
    fn default() -> Self {
        Self {
            creation_date: SYTM_NULL_VALUE.to_string(),
            processes: Vec::new(),
        }
    }
}

impl HistoryHeader {
    /// Start a history entry stamped with the given canonical date-time
    pub fn new(creation_date: impl Into<String>) -> Self {
        Self {
            creation_date: creation_date.into(),
            processes: Vec::new(),
        }
    }

    pub fn set_creation_date(&mut self, value: &str) -> Result<()> {
        self.creation_date = canonical_datetime(value, "CREATION_DATE")?;
        Ok(())
    }

    pub fn set_process(&mut self, value: &str, number: usize) {
        set_indexed(&mut self.processes, normalize_text(value), number);
    }

    pub fn add_process(&mut self, value: &str) {
        self.processes.push(normalize_text(value));
    }

    /// Indices of process entries containing `text`
    pub fn find_process(&self, text: &str) -> Vec<usize> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.contains(text))
            .map(|(index, _)| index)
            .collect()
    }
}

impl HeaderBlock for HistoryHeader {
    const NAME: &'static str = blocks::HISTORY;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "CREATION_DATE" => {
                self.set_creation_date(value)?;
                Ok(FieldKind::Scalar)
            }
            "PROCESS" => {
                push_entry(&mut self.processes, value);
                Ok(FieldKind::Repeated)
            }
            _ => Ok(FieldKind::Unknown),
        }
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.quoted("CREATION_DATE", &self.creation_date);
        out.quoted_list("PROCESS", &self.processes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_process() {
        let mut history = HistoryHeader::new("01-JAN-2025 00:00:00.00");
        history.add_process("Converted from RSK");
        history.add_process("Applied despike filter");
        history.set_process("Converted from RSK v2", 1);

        assert_eq!(history.find_process("RSK"), vec![0]);
        assert_eq!(history.find_process("filter"), vec![1]);
        assert!(history.find_process("missing").is_empty());
    }

    #[test]
    fn test_populate_history() {
        let lines = vec![
            "  CREATION_DATE = '12-JUN-2024 14:03:27.123456',".to_string(),
            "  PROCESS = 'Initial file creation',".to_string(),
            "  PROCESS = 'Applied QC, flagged spikes',".to_string(),
        ];
        let (history, _) = HistoryHeader::populate(&lines).unwrap();
        assert_eq!(history.creation_date, "12-JUN-2024 14:03:27.12");
        assert_eq!(history.processes[1], "Applied QC, flagged spikes");
    }
}
