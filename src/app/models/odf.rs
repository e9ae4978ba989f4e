//! The ODF document aggregate
//!
//! [`OdfHeader`] owns every header block and the data table of one ODF file.
//! Reading and writing are delegated to the parser and writer services; this
//! module holds the editing operations that keep headers, data columns and
//! record counts consistent with each other.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info, warn};

use super::block::{BlockWriter, FieldKind, HeaderBlock};
use super::compass_cal::CompassCalHeader;
use super::cruise::CruiseHeader;
use super::data_records::{Column, DataRecords, PrintFormat};
use super::event::EventHeader;
use super::general_cal::GeneralCalHeader;
use super::history::HistoryHeader;
use super::instrument::InstrumentHeader;
use super::meteo::MeteoHeader;
use super::parameter::{ParameterHeader, ParameterType};
use super::polynomial_cal::PolynomialCalHeader;
use super::quality::QualityHeader;
use super::record::RecordHeader;
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, current_datetime, normalize_text, parse_float_strict,
    validate_parameter_code,
};
use crate::app::services::parameter_registry;
use crate::app::services::{odf_parser, odf_writer};
use crate::config::{OdfConfig, OdfVersion};
use crate::constants::{blocks, is_sytm_code, parameter_prefix};
use crate::error::{OdfError, OdfWarning, Result};

/// Contents of the `ODF_HEADER` block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecificationBlock {
    pub file_specification: String,
    pub odf_specification_version: Option<f64>,
}

impl HeaderBlock for SpecificationBlock {
    const NAME: &'static str = blocks::ODF;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "FILE_SPECIFICATION" => self.file_specification = normalize_text(value),
            "ODF_SPECIFICATION_VERSION" => {
                self.odf_specification_version = Some(parse_float_strict(value, key)?)
            }
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, version: OdfVersion) {
        out.quoted("FILE_SPECIFICATION", &self.file_specification);
        if version == OdfVersion::V3 {
            out.field("ODF_SPECIFICATION_VERSION", version);
        }
    }
}

/// Where a document is in its read/edit/write lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentState {
    /// Freshly constructed
    #[default]
    Empty,
    /// Read from a file or edited since the last reconcile
    Populated,
    /// Counts and statistics agree with the owned lists
    Reconciled,
    /// Written to disk since the last edit
    Written,
}

/// An ODF document: headers in file order plus the data table
#[derive(Debug, Clone, Default)]
pub struct OdfHeader {
    pub file_specification: String,
    pub odf_specification_version: f64,
    pub cruise_header: CruiseHeader,
    pub event_header: EventHeader,
    pub meteo_header: Option<MeteoHeader>,
    pub quality_header: Option<QualityHeader>,
    pub instrument_header: InstrumentHeader,
    pub general_cal_headers: Vec<GeneralCalHeader>,
    pub polynomial_cal_headers: Vec<PolynomialCalHeader>,
    pub compass_cal_headers: Vec<CompassCalHeader>,
    pub history_headers: Vec<HistoryHeader>,
    pub parameter_headers: Vec<ParameterHeader>,
    pub record_header: RecordHeader,
    pub data: DataRecords,

    config: OdfConfig,
    warnings: Vec<OdfWarning>,
    change_log: Vec<String>,
    state: DocumentState,
}

impl OdfHeader {
    /// Create an empty document with the default configuration
    pub fn new() -> Self {
        Self::with_config(OdfConfig::default())
    }

    /// Create an empty document with an injected configuration
    pub fn with_config(config: OdfConfig) -> Self {
        Self {
            odf_specification_version: config.default_version.as_f64(),
            config,
            ..Self::default()
        }
    }

    /// Read an ODF file with the default configuration
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_with_config(path, OdfConfig::default())
    }

    /// Read an ODF file with an injected configuration
    pub fn read_with_config(path: impl AsRef<Path>, config: OdfConfig) -> Result<Self> {
        odf_parser::read_document(path.as_ref(), config)
    }

    /// Reconcile, validate and write the document under the given dialect
    pub fn write(&mut self, path: impl AsRef<Path>, version: OdfVersion) -> Result<()> {
        odf_writer::write_document(self, path.as_ref(), version)
    }

    /// Write under the configured default dialect
    pub fn write_default(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let version = self.config.default_version;
        self.write(path, version)
    }

    /// Render the document as it stands, without reconciling
    pub fn print(&self, version: OdfVersion) -> String {
        odf_writer::render_document(self, version)
    }

    /// Run the write-time invariant checks without writing
    pub fn validate(&self) -> Result<()> {
        odf_writer::validate_document(self)
    }

    pub fn config(&self) -> &OdfConfig {
        &self.config
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: DocumentState) {
        self.state = state;
    }

    /// Non-fatal findings from the most recent read, reconcile or write
    pub fn warnings(&self) -> &[OdfWarning] {
        &self.warnings
    }

    pub(crate) fn clear_warnings(&mut self) {
        self.warnings.clear();
    }

    pub(crate) fn push_warning(&mut self, warning: OdfWarning) {
        self.warnings.push(warning);
    }

    /// Change messages recorded since the last `add_log_to_history`
    pub fn change_log(&self) -> &[String] {
        &self.change_log
    }

    /// Dialect recorded in the document, or the configured default
    pub fn version(&self) -> OdfVersion {
        OdfVersion::from_f64(self.odf_specification_version).unwrap_or(self.config.default_version)
    }

    /// Reconcile record counts, statistics, null sentinels and print formats
    pub fn update_odf(&mut self) {
        self.clear_warnings();

        let (general, polynomial) = self.calibration_counts();
        if general > 0 && polynomial > 0 && general != polynomial {
            warn!(
                "NUM_CALIBRATION shared by {} general and {} polynomial calibrations",
                general, polynomial
            );
            self.push_warning(OdfWarning::CalibrationCountMismatch {
                general,
                polynomial,
            });
        }

        self.record_header.num_calibration = general.max(polynomial);
        self.record_header.num_history = self.history_headers.len();
        self.record_header.num_swing = self.compass_cal_headers.len();
        self.record_header.num_param = self.parameter_headers.len();
        self.record_header.num_cycle = self.data.len();

        let recompute = self.config.recompute_statistics;
        for parameter in &mut self.parameter_headers {
            parameter.reset_nulls();
            if recompute {
                if let Some(stats) = self.data.stats(&parameter.code) {
                    parameter.apply_statistics(&stats);
                }
            }
            self.data.set_print_format(&parameter.code, parameter.print_format());
        }

        debug!(
            "Reconciled record header: {} params, {} cycles, {} histories",
            self.record_header.num_param, self.record_header.num_cycle, self.record_header.num_history
        );
        self.state = DocumentState::Reconciled;
    }

    /// General and polynomial calibration list lengths
    pub fn calibration_counts(&self) -> (usize, usize) {
        (self.general_cal_headers.len(), self.polynomial_cal_headers.len())
    }

    /// Open a new history session stamped with the current date-time
    pub fn add_history(&mut self) {
        self.history_headers.push(HistoryHeader::new(current_datetime()));
        self.touch();
    }

    /// Append a process entry to the newest history session, opening one if needed
    pub fn add_to_history(&mut self, text: &str) {
        if self.history_headers.is_empty() {
            self.add_history();
        }
        if let Some(history) = self.history_headers.last_mut() {
            history.add_process(text);
        }
        self.touch();
    }

    /// Record a field change in the change log
    pub fn log_change(&mut self, block: &str, field: &str, old: &str, new: &str) {
        let message = format!(
            "In {} field {} was changed from '{}' to '{}'",
            block,
            field.to_uppercase(),
            old,
            new
        );
        self.record(message);
    }

    fn record(&mut self, message: String) {
        info!("{}", message);
        if self.config.record_changes {
            self.change_log.push(message);
        }
    }

    /// Move every recorded change into the newest history session
    pub fn add_log_to_history(&mut self) {
        let entries = std::mem::take(&mut self.change_log);
        for entry in entries {
            self.add_to_history(&entry);
        }
    }

    pub fn get_parameter_codes(&self) -> Vec<String> {
        self.parameter_headers.iter().map(|p| p.code.clone()).collect()
    }

    pub fn get_parameter_names(&self) -> Vec<String> {
        self.parameter_headers.iter().map(|p| p.name.clone()).collect()
    }

    /// Whether the document has a parameter with this code
    pub fn is_parameter_code(&self, code: &str) -> bool {
        self.parameter_index(code).is_some()
    }

    fn parameter_index(&self, code: &str) -> Option<usize> {
        self.parameter_headers.iter().position(|p| p.code == code)
    }

    /// Set one attribute of the parameter `code` through its validated setter
    pub fn update_parameter(&mut self, code: &str, attribute: &str, value: &str) -> Result<()> {
        let index = self
            .parameter_index(code)
            .ok_or_else(|| OdfError::unknown_parameter(code))?;
        let key = attribute.trim().to_uppercase();

        if key == "CODE" {
            let mut codes = self.get_parameter_codes();
            codes[index] = normalize_text(value);
            return self.fix_parameter_codes(&codes);
        }

        let old = self.parameter_headers[index]
            .field_value(&key)
            .ok_or_else(|| OdfError::unknown_field(blocks::PARAMETER, &key))?;

        let mut updated = self.parameter_headers[index].clone();
        updated.apply_field(&key, value)?;
        updated.finish()?;
        let new = updated.field_value(&key).unwrap_or_default();

        if updated.parameter_type != self.parameter_headers[index].parameter_type {
            return Err(OdfError::invariant_violation(format!(
                "TYPE of {} must match its data column",
                code
            )));
        }

        self.data.set_print_format(code, updated.print_format());
        self.parameter_headers[index] = updated;
        self.log_change(&format!("Parameter Header {}", code), &key, &old, &new);
        self.touch();
        Ok(())
    }

    /// Rename every parameter at once, carrying the renames into the data
    /// columns and any calibration that references an old code or name
    pub fn fix_parameter_codes(&mut self, new_codes: &[String]) -> Result<()> {
        if new_codes.len() != self.parameter_headers.len() {
            return Err(OdfError::schema_mismatch(
                self.parameter_headers.len(),
                new_codes.len(),
            ));
        }

        let new_codes = new_codes
            .iter()
            .map(|code| validate_parameter_code(code))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = new_codes.iter().find(|code| !seen.insert(code.as_str())) {
            return Err(OdfError::invariant_violation(format!(
                "duplicate parameter code {}",
                duplicate
            )));
        }

        if !self.data.parameter_list().is_empty() {
            self.data.rename_columns(&new_codes)?;
        }

        // Old code (or legacy uppercase name) -> new code, codes taking precedence
        let mut targets: HashMap<String, String> = HashMap::new();
        let mut renamed = Vec::new();
        for (parameter, new_code) in self.parameter_headers.iter().zip(&new_codes) {
            targets.insert(parameter.code.clone(), new_code.clone());
            if parameter.code != *new_code {
                renamed.push((parameter.code.clone(), new_code.clone()));
            }
        }
        for (parameter, new_code) in self.parameter_headers.iter().zip(&new_codes) {
            let name = parameter.name.to_uppercase();
            if !name.is_empty() && parameter.code != *new_code {
                targets.entry(name).or_insert_with(|| new_code.clone());
            }
        }

        for (parameter, new_code) in self.parameter_headers.iter_mut().zip(&new_codes) {
            parameter.code = new_code.clone();
        }
        for cal in &mut self.general_cal_headers {
            retarget(&mut cal.parameter_code, &targets);
        }
        for cal in &mut self.polynomial_cal_headers {
            retarget(&mut cal.parameter_code, &targets);
        }
        for cal in &mut self.compass_cal_headers {
            retarget(&mut cal.parameter_code, &targets);
        }

        for (old_code, new_code) in &renamed {
            self.log_change("Parameter Header", "CODE", old_code, new_code);
        }

        self.touch();
        Ok(())
    }

    /// `{DATA_TYPE}_{CRUISE_NUMBER}_{EVENT_NUMBER}_{EVENT_QUALIFIER1}_{EVENT_QUALIFIER2}`
    pub fn generate_file_spec(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            normalize_text(&self.event_header.data_type),
            normalize_text(&self.cruise_header.cruise_number),
            normalize_text(&self.event_header.event_number),
            normalize_text(&self.event_header.event_qualifier1),
            normalize_text(&self.event_header.event_qualifier2)
        )
    }

    /// Add a data column, filling its header from the parameter registry
    pub fn add_parameter(&mut self, code: &str, column: Column) -> Result<()> {
        let code = validate_parameter_code(code)?;
        if self.is_parameter_code(&code) {
            return Err(OdfError::invariant_violation(format!("duplicate parameter {}", code)));
        }

        let info = parameter_registry::lookup(parameter_prefix(&code))?;
        let parameter_type = if is_sytm_code(&code) {
            ParameterType::Sytm
        } else {
            ParameterType::Doub
        };

        let column = match (parameter_type, column) {
            (ParameterType::Sytm, Column::Timestamp(values)) => Column::Timestamp(
                values
                    .iter()
                    .map(|v| canonical_datetime(v, &code))
                    .collect::<Result<Vec<_>>>()?,
            ),
            (ParameterType::Doub, Column::Numeric(values)) => Column::Numeric(values),
            _ => {
                return Err(OdfError::invariant_violation(format!(
                    "column type of {} must be {}",
                    code, parameter_type
                )));
            }
        };

        let mut parameter = ParameterHeader::new(parameter_type, &code)?;
        parameter.name = info.description.clone();
        parameter.units = info.units.clone();
        parameter.print_field_width = info.print_field_width as i32;
        parameter.print_decimal_places = info.print_decimal_places as i32;
        parameter.print_field_order = self.parameter_headers.len() as i32 + 1;
        parameter.apply_statistics(&column.stats());

        let format: PrintFormat = parameter.print_format();
        self.data.push_column(&code, format, column)?;
        self.parameter_headers.push(parameter);

        self.record(format!("Parameter {} ({}) was added", code, info.description));
        self.touch();
        Ok(())
    }

    /// Remove a parameter header together with its data column
    pub fn remove_parameter(&mut self, code: &str) -> Result<ParameterHeader> {
        let index = self
            .parameter_index(code)
            .ok_or_else(|| OdfError::unknown_parameter(code))?;

        let parameter = self.parameter_headers.remove(index);
        self.data.remove_column(code);

        self.record(format!("Parameter {} was removed", code));
        self.touch();
        Ok(parameter)
    }

    /// Same ordered headers, parameter list and row order, with numbers equal
    /// to within their print precision
    pub fn equivalent(&self, other: &OdfHeader) -> bool {
        let v = OdfVersion::V3;
        let same_headers = self.file_specification == other.file_specification
            && self.cruise_header.print(v) == other.cruise_header.print(v)
            && self.event_header.print(v) == other.event_header.print(v)
            && self.meteo_header.as_ref().map(|h| h.print(v))
                == other.meteo_header.as_ref().map(|h| h.print(v))
            && self.quality_header.as_ref().map(|h| h.print(v))
                == other.quality_header.as_ref().map(|h| h.print(v))
            && self.instrument_header.print(v) == other.instrument_header.print(v)
            && print_all(&self.general_cal_headers, v) == print_all(&other.general_cal_headers, v)
            && print_all(&self.polynomial_cal_headers, v)
                == print_all(&other.polynomial_cal_headers, v)
            && print_all(&self.compass_cal_headers, v) == print_all(&other.compass_cal_headers, v)
            && print_all(&self.history_headers, v) == print_all(&other.history_headers, v);

        let same_parameters = self.parameter_headers.len() == other.parameter_headers.len()
            && self
                .parameter_headers
                .iter()
                .zip(&other.parameter_headers)
                .all(|(a, b)| {
                    a.code == b.code
                        && a.parameter_type == b.parameter_type
                        && a.name == b.name
                        && a.units == b.units
                        && a.print_format() == b.print_format()
                });

        same_headers && same_parameters && self.data.equivalent(&other.data)
    }

    fn touch(&mut self) {
        self.state = DocumentState::Populated;
    }
}

fn retarget(reference: &mut String, targets: &HashMap<String, String>) {
    if let Some(target) = targets.get(reference.as_str()) {
        *reference = target.clone();
    }
}

fn print_all<T: HeaderBlock>(headers: &[T], version: OdfVersion) -> Vec<String> {
    headers.iter().map(|h| h.print(version)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressure_document() -> OdfHeader {
        let mut odf = OdfHeader::new();
        odf.cruise_header.set_cruise_number("BCD2024669");
        odf.event_header.set_data_type("CTD");
        odf.event_header.set_event_number("001");
        odf.event_header.set_event_qualifier1("01");
        odf.event_header.set_event_qualifier2("dn");
        odf.add_parameter("PRES_01", Column::Numeric(vec![2.177, 10.0, 176.5]))
            .unwrap();
        odf
    }

    #[test]
    fn test_generate_file_spec() {
        let odf = pressure_document();
        assert_eq!(odf.generate_file_spec(), "CTD_BCD2024669_001_01_DN");
    }

    #[test]
    fn test_update_odf_counts_and_stats() {
        let mut odf = pressure_document();
        odf.add_history();
        odf.update_odf();

        assert_eq!(odf.state(), DocumentState::Reconciled);
        assert_eq!(odf.record_header.num_param, 1);
        assert_eq!(odf.record_header.num_cycle, 3);
        assert_eq!(odf.record_header.num_history, 1);

        let pressure = &odf.parameter_headers[0];
        assert_eq!(pressure.number_valid, 3);
        assert_eq!(pressure.minimum_value.as_f64(), Some(2.177));
        assert_eq!(pressure.maximum_value.as_f64(), Some(176.5));
        assert_eq!(pressure.units, "decibars");
    }

    #[test]
    fn test_calibration_count_mismatch_warns() {
        let mut odf = OdfHeader::new();
        odf.general_cal_headers.push(GeneralCalHeader::default());
        odf.polynomial_cal_headers.push(PolynomialCalHeader::default());
        odf.polynomial_cal_headers.push(PolynomialCalHeader::default());
        odf.update_odf();

        assert_eq!(odf.record_header.num_calibration, 2);
        assert_eq!(
            odf.warnings(),
            [OdfWarning::CalibrationCountMismatch {
                general: 1,
                polynomial: 2
            }]
        );
    }

    #[test]
    fn test_history_sessions() {
        let mut odf = OdfHeader::new();
        odf.add_history();
        odf.add_to_history("A");
        odf.add_history();
        odf.add_to_history("B");

        assert_eq!(odf.history_headers.len(), 2);
        assert_eq!(odf.history_headers[0].processes, vec!["A"]);
        assert_eq!(odf.history_headers[1].processes, vec!["B"]);
    }

    #[test]
    fn test_add_to_history_opens_session() {
        let mut odf = OdfHeader::new();
        odf.add_to_history("first step");
        assert_eq!(odf.history_headers.len(), 1);
        assert_ne!(odf.history_headers[0].creation_date, crate::constants::SYTM_NULL_VALUE);
    }

    #[test]
    fn test_update_parameter_logs_change() {
        let mut odf = pressure_document();
        odf.update_parameter("PRES_01", "print_decimal_places", "2").unwrap();

        assert_eq!(odf.parameter_headers[0].print_decimal_places, 2);
        assert_eq!(odf.data.print_format("PRES_01").to_string(), "10.2");
        assert!(
            odf.change_log()
                .last()
                .unwrap()
                .contains("PRINT_DECIMAL_PLACES was changed from '3' to '2'")
        );

        odf.add_log_to_history();
        assert!(odf.change_log().is_empty());
        assert!(!odf.history_headers.last().unwrap().processes.is_empty());
    }

    #[test]
    fn test_update_parameter_errors() {
        let mut odf = pressure_document();
        assert!(matches!(
            odf.update_parameter("TEMP_01", "units", "C").unwrap_err(),
            OdfError::UnknownParameter { .. }
        ));
        assert!(matches!(
            odf.update_parameter("PRES_01", "colour", "red").unwrap_err(),
            OdfError::UnknownField { .. }
        ));
        assert!(odf.update_parameter("PRES_01", "type", "SYTM").is_err());
        assert!(
            odf.update_parameter("PRES_01", "MINIMUM_VALUE", "03-MAY-2025 00:47:41.73")
                .is_err()
        );
    }

    #[test]
    fn test_fix_parameter_codes_propagates() {
        let mut odf = OdfHeader::new();
        odf.add_parameter("TEMP_01", Column::Numeric(vec![4.0, 5.0])).unwrap();
        let mut cal = PolynomialCalHeader::default();
        cal.set_parameter_code("TEMP_01");
        odf.polynomial_cal_headers.push(cal);

        odf.fix_parameter_codes(&["TE90_01".to_string()]).unwrap();

        assert_eq!(odf.get_parameter_codes(), vec!["TE90_01"]);
        assert_eq!(odf.data.parameter_list(), ["TE90_01"]);
        assert_eq!(odf.polynomial_cal_headers[0].parameter_code, "TE90_01");
        assert!(odf.fix_parameter_codes(&["bad".to_string()]).is_err());
        assert_eq!(odf.get_parameter_codes(), vec!["TE90_01"]);
    }

    #[test]
    fn test_fix_parameter_codes_matches_legacy_names() {
        let mut odf = OdfHeader::new();
        odf.add_parameter("TEMP_01", Column::Numeric(vec![4.0])).unwrap();
        let mut cal = GeneralCalHeader::default();
        cal.set_parameter_code("Temperature");
        odf.general_cal_headers.push(cal);

        odf.fix_parameter_codes(&["TE90_01".to_string()]).unwrap();
        assert_eq!(odf.general_cal_headers[0].parameter_code, "TE90_01");
    }

    #[test]
    fn test_fix_parameter_codes_rejects_duplicates() {
        let mut odf = OdfHeader::new();
        odf.add_parameter("TEMP_01", Column::Numeric(vec![4.0])).unwrap();
        odf.add_parameter("PSAL_01", Column::Numeric(vec![35.0])).unwrap();

        let error = odf
            .fix_parameter_codes(&["TEMP_01".to_string(), "TEMP_01".to_string()])
            .unwrap_err();
        assert!(matches!(error, OdfError::InvariantViolation { .. }));
        assert_eq!(odf.get_parameter_codes(), vec!["TEMP_01", "PSAL_01"]);
        assert_eq!(odf.data.parameter_list(), ["TEMP_01", "PSAL_01"]);
    }

    #[test]
    fn test_fix_parameter_codes_swap_keeps_calibration_target() {
        let mut odf = OdfHeader::new();
        odf.add_parameter("TEMP_01", Column::Numeric(vec![4.0])).unwrap();
        odf.add_parameter("PSAL_01", Column::Numeric(vec![35.0])).unwrap();
        let mut temp_cal = PolynomialCalHeader::default();
        temp_cal.set_parameter_code("TEMP_01");
        odf.polynomial_cal_headers.push(temp_cal);
        let mut psal_cal = GeneralCalHeader::default();
        psal_cal.set_parameter_code("PSAL_01");
        odf.general_cal_headers.push(psal_cal);

        odf.fix_parameter_codes(&["PSAL_01".to_string(), "TEMP_01".to_string()])
            .unwrap();

        assert_eq!(odf.get_parameter_codes(), vec!["PSAL_01", "TEMP_01"]);
        assert_eq!(odf.polynomial_cal_headers[0].parameter_code, "PSAL_01");
        assert_eq!(odf.general_cal_headers[0].parameter_code, "TEMP_01");
        assert_eq!(
            odf.data.column("PSAL_01"),
            Some(&Column::Numeric(vec![4.0]))
        );
    }

    #[test]
    fn test_add_and_remove_parameter() {
        let mut odf = pressure_document();
        assert!(matches!(
            odf.add_parameter("ZZZZ_01", Column::Numeric(vec![1.0, 2.0, 3.0]))
                .unwrap_err(),
            OdfError::UnknownParameter { .. }
        ));
        assert!(matches!(
            odf.add_parameter("TEMP_01", Column::Numeric(vec![1.0])).unwrap_err(),
            OdfError::SchemaMismatch { .. }
        ));
        assert!(
            odf.add_parameter("SYTM_01", Column::Numeric(vec![1.0, 2.0, 3.0]))
                .is_err()
        );

        odf.add_parameter(
            "SYTM_01",
            Column::Timestamp(vec![
                "2025-05-03 00:47:41.73".to_string(),
                "03-MAY-2025 00:48:41.73".to_string(),
                "03-MAY-2025 00:49:41.73".to_string(),
            ]),
        )
        .unwrap();
        assert_eq!(odf.get_parameter_codes(), vec!["PRES_01", "SYTM_01"]);
        assert_eq!(odf.get_parameter_names()[1], "System Time");

        let removed = odf.remove_parameter("PRES_01").unwrap();
        assert_eq!(removed.code, "PRES_01");
        assert!(!odf.is_parameter_code("PRES_01"));
        assert_eq!(odf.data.parameter_list(), ["SYTM_01"]);
        assert!(odf.remove_parameter("PRES_01").is_err());
    }

    #[test]
    fn test_change_log_can_be_disabled() {
        let mut odf = OdfHeader::with_config(OdfConfig::default().without_change_log());
        odf.add_parameter("PRES_01", Column::Numeric(vec![1.0])).unwrap();
        assert!(odf.change_log().is_empty());
    }

    #[test]
    fn test_equivalent_to_clone() {
        let odf = pressure_document();
        let mut other = odf.clone();
        assert!(odf.equivalent(&other));

        other.cruise_header.set_cruise_number("OTHER");
        assert!(!odf.equivalent(&other));
    }
}
