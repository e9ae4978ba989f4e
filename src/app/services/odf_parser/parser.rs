//! Core ODF reader
//!
//! Reads the file as non-empty lines, partitions them into header blocks and
//! the data region, dispatches each block to its header model, then parses the
//! data rows under the schema assembled from the parameter headers.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use super::blocks::{BlockSpan, DocumentLayout, partition};
use super::field_parsers::read_lines;
use crate::app::models::{
    CompassCalHeader, CruiseHeader, DataRecords, DocumentState, EventHeader, GeneralCalHeader,
    HeaderBlock, HistoryHeader, InstrumentHeader, MeteoHeader, OdfHeader, ParameterHeader,
    PolynomialCalHeader, QualityHeader, RecordHeader, SpecificationBlock,
};
use crate::config::{OdfConfig, OdfVersion};
use crate::constants::blocks;
use crate::error::{OdfError, OdfWarning, Result};

/// Reader for ODF files
#[derive(Debug, Clone, Default)]
pub struct OdfParser {
    config: OdfConfig,
}

impl OdfParser {
    /// Create a parser whose documents carry the given configuration
    pub fn new(config: OdfConfig) -> Self {
        Self { config }
    }

    /// Read and parse one ODF file
    pub fn parse_file(&self, path: &Path) -> Result<OdfHeader> {
        info!("Reading ODF file: {}", path.display());

        let lines = read_lines(path)?;
        let odf = self.parse_lines(&lines)?;

        info!(
            "Read {} parameters and {} data rows from {}",
            odf.parameter_headers.len(),
            odf.data.len(),
            path.display()
        );
        Ok(odf)
    }

    /// Parse a document from its non-empty, trimmed lines
    pub fn parse_lines(&self, lines: &[String]) -> Result<OdfHeader> {
        let layout = partition(lines)?;

        let mut odf = OdfHeader::with_config(self.config.clone());
        let mut warnings = Vec::new();
        let mut declared_version = None;

        for span in &layout.blocks {
            match span.name.as_str() {
                blocks::ODF => {
                    let block: SpecificationBlock = populate(span, lines, &mut warnings)?;
                    odf.file_specification = block.file_specification;
                    declared_version = block.odf_specification_version.or(declared_version);
                }
                blocks::CRUISE => {
                    odf.cruise_header = populate::<CruiseHeader>(span, lines, &mut warnings)?
                }
                blocks::EVENT => {
                    odf.event_header = populate::<EventHeader>(span, lines, &mut warnings)?
                }
                blocks::METEO => {
                    odf.meteo_header = Some(populate::<MeteoHeader>(span, lines, &mut warnings)?)
                }
                blocks::QUALITY => {
                    odf.quality_header =
                        Some(populate::<QualityHeader>(span, lines, &mut warnings)?)
                }
                blocks::INSTRUMENT => {
                    odf.instrument_header =
                        populate::<InstrumentHeader>(span, lines, &mut warnings)?
                }
                blocks::GENERAL_CAL => odf
                    .general_cal_headers
                    .push(populate::<GeneralCalHeader>(span, lines, &mut warnings)?),
                blocks::POLYNOMIAL_CAL => odf
                    .polynomial_cal_headers
                    .push(populate::<PolynomialCalHeader>(span, lines, &mut warnings)?),
                blocks::COMPASS_CAL => odf
                    .compass_cal_headers
                    .push(populate::<CompassCalHeader>(span, lines, &mut warnings)?),
                blocks::HISTORY => odf
                    .history_headers
                    .push(populate::<HistoryHeader>(span, lines, &mut warnings)?),
                blocks::PARAMETER => odf
                    .parameter_headers
                    .push(populate::<ParameterHeader>(span, lines, &mut warnings)?),
                blocks::RECORD => {
                    odf.record_header = populate::<RecordHeader>(span, lines, &mut warnings)?
                }
                other => {
                    warn!(
                        "Skipping unknown header block {} at line {}",
                        other,
                        span.line_number()
                    );
                    warnings.push(OdfWarning::UnknownHeader {
                        name: other.to_string(),
                        line: span.line_number(),
                    });
                }
            }
        }

        odf.odf_specification_version = match declared_version {
            Some(version) => version,
            None => detect_version(lines).as_f64(),
        };

        odf.data = parse_data(&odf.parameter_headers, &layout, lines)?;

        if odf.record_header.num_cycle != odf.data.len() {
            debug!(
                "NUM_CYCLE {} differs from {} data rows; reconciled on write",
                odf.record_header.num_cycle,
                odf.data.len()
            );
        }

        for warning in warnings {
            odf.push_warning(warning);
        }
        odf.set_state(DocumentState::Populated);
        Ok(odf)
    }
}

/// Read an ODF file into a document carrying `config`
pub fn read_document(path: &Path, config: OdfConfig) -> Result<OdfHeader> {
    OdfParser::new(config).parse_file(path)
}

fn populate<T: HeaderBlock>(
    span: &BlockSpan,
    lines: &[String],
    warnings: &mut Vec<OdfWarning>,
) -> Result<T> {
    debug!("Parsing {} at line {}", span.name, span.line_number());
    let (header, block_warnings) = T::populate_at(span.line_number(), span.field_lines(lines))?;
    warnings.extend(block_warnings);
    Ok(header)
}

/// v2 files carry a trailing comma on every header line
fn detect_version(lines: &[String]) -> OdfVersion {
    if lines.first().is_some_and(|line| line.trim_end().ends_with(',')) {
        OdfVersion::V2
    } else {
        OdfVersion::V3
    }
}

fn parse_data(
    parameters: &[ParameterHeader],
    layout: &DocumentLayout,
    lines: &[String],
) -> Result<DataRecords> {
    let mut parameter_list = Vec::with_capacity(parameters.len());
    let mut print_formats = HashMap::new();
    let mut declared_nulls = HashMap::new();

    for parameter in parameters {
        if print_formats.contains_key(&parameter.code) {
            return Err(OdfError::malformed(
                format!("duplicate parameter code {}", parameter.code),
                Some(blocks::PARAMETER),
                None,
            ));
        }
        parameter_list.push(parameter.code.clone());
        print_formats.insert(parameter.code.clone(), parameter.print_format());
        declared_nulls.insert(parameter.code.clone(), parameter.null_value.clone());
    }

    DataRecords::populate_at(
        parameter_list,
        print_formats,
        &declared_nulls,
        layout.separator + 1,
        layout.data_lines(lines),
    )
}
