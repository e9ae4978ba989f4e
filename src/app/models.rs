//! Data models for ODF documents
//!
//! One type per header block, the data table, and the [`OdfHeader`] aggregate
//! that owns them. Every header implements [`HeaderBlock`] so the parser and
//! writer can treat blocks uniformly.

pub mod block;
pub mod compass_cal;
pub mod cruise;
pub mod data_records;
pub mod event;
pub mod general_cal;
pub mod history;
pub mod instrument;
pub mod meteo;
pub mod odf;
pub mod parameter;
pub mod polynomial_cal;
pub mod quality;
pub mod record;

pub use block::{BlockWriter, FieldKind, HeaderBlock};
pub use compass_cal::CompassCalHeader;
pub use cruise::CruiseHeader;
pub use data_records::{Column, ColumnStats, DataRecords, PrintFormat};
pub use event::EventHeader;
pub use general_cal::GeneralCalHeader;
pub use history::HistoryHeader;
pub use instrument::InstrumentHeader;
pub use meteo::{
    MeteoHeader, cloud_cover_fraction_to_wmo_code, wave_height_meters_to_wmo_code,
    wind_speed_knots_to_ms,
};
pub use odf::{DocumentState, OdfHeader, SpecificationBlock};
pub use parameter::{ParameterHeader, ParameterType, ParameterValue};
pub use polynomial_cal::PolynomialCalHeader;
pub use quality::QualityHeader;
pub use record::RecordHeader;
