//! Event metadata block (`EVENT_HEADER`)
//!
//! An event is a single deployment or cast: its identifiers form the file
//! specification, and its position, depth and timing bound the data.

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, push_entry, set_indexed};
use crate::app::services::odf_parser::field_parsers::{
    canonical_datetime, format_plain, normalize_text, parse_float_strict,
};
use crate::config::OdfVersion;
use crate::constants::{NULL_VALUE, SYTM_NULL_VALUE, blocks};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Instrument class, e.g. `CTD`, `MCM`
    pub data_type: String,
    pub event_number: String,
    /// Uppercased
    pub event_qualifier1: String,
    /// Uppercased
    pub event_qualifier2: String,
    pub creation_date: String,
    pub orig_creation_date: String,
    pub start_date_time: String,
    pub end_date_time: String,
    pub initial_latitude: f64,
    pub initial_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    /// Seconds between samples
    pub sampling_interval: f64,
    pub sounding: f64,
    pub depth_off_bottom: f64,
    pub station_name: String,
    pub set_number: String,
    pub event_comments: Vec<String>,
}

impl Default for EventHeader {
    fn default() -> Self {
        Self {
            data_type: String::new(),
            event_number: String::new(),
            event_qualifier1: String::new(),
            event_qualifier2: String::new(),
            creation_date: SYTM_NULL_VALUE.to_string(),
            orig_creation_date: SYTM_NULL_VALUE.to_string(),
            start_date_time: SYTM_NULL_VALUE.to_string(),
            end_date_time: SYTM_NULL_VALUE.to_string(),
            initial_latitude: NULL_VALUE,
            initial_longitude: NULL_VALUE,
            end_latitude: NULL_VALUE,
            end_longitude: NULL_VALUE,
            min_depth: NULL_VALUE,
            max_depth: NULL_VALUE,
            sampling_interval: NULL_VALUE,
            sounding: NULL_VALUE,
            depth_off_bottom: NULL_VALUE,
            station_name: String::new(),
            set_number: String::new(),
            event_comments: Vec::new(),
        }
    }
}

impl EventHeader {
    pub fn set_data_type(&mut self, value: &str) {
        self.data_type = normalize_text(value).to_uppercase();
    }

    pub fn set_event_number(&mut self, value: &str) {
        self.event_number = normalize_text(value);
    }

    pub fn set_event_qualifier1(&mut self, value: &str) {
        self.event_qualifier1 = normalize_text(value).to_uppercase();
    }

    pub fn set_event_qualifier2(&mut self, value: &str) {
        self.event_qualifier2 = normalize_text(value).to_uppercase();
    }

    pub fn set_creation_date(&mut self, value: &str) -> Result<()> {
        self.creation_date = canonical_datetime(value, "CREATION_DATE")?;
        Ok(())
    }

    pub fn set_orig_creation_date(&mut self, value: &str) -> Result<()> {
        self.orig_creation_date = canonical_datetime(value, "ORIG_CREATION_DATE")?;
        Ok(())
    }

    pub fn set_start_date_time(&mut self, value: &str) -> Result<()> {
        self.start_date_time = canonical_datetime(value, "START_DATE_TIME")?;
        Ok(())
    }

    pub fn set_end_date_time(&mut self, value: &str) -> Result<()> {
        self.end_date_time = canonical_datetime(value, "END_DATE_TIME")?;
        Ok(())
    }

    /// Replace comment `number` (1-based), or append when out of range
    pub fn set_event_comment(&mut self, value: &str, number: usize) {
        set_indexed(&mut self.event_comments, normalize_text(value), number);
    }
}

impl HeaderBlock for EventHeader {
    const NAME: &'static str = blocks::EVENT;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "DATA_TYPE" => self.set_data_type(value),
            "EVENT_NUMBER" => self.set_event_number(value),
            "EVENT_QUALIFIER1" => self.set_event_qualifier1(value),
            "EVENT_QUALIFIER2" => self.set_event_qualifier2(value),
            "CREATION_DATE" => self.set_creation_date(value)?,
            "ORIG_CREATION_DATE" => self.set_orig_creation_date(value)?,
            "START_DATE_TIME" => self.set_start_date_time(value)?,
            "END_DATE_TIME" => self.set_end_date_time(value)?,
            "INITIAL_LATITUDE" => self.initial_latitude = parse_float_strict(value, key)?,
            "INITIAL_LONGITUDE" => self.initial_longitude = parse_float_strict(value, key)?,
            "END_LATITUDE" => self.end_latitude = parse_float_strict(value, key)?,
            "END_LONGITUDE" => self.end_longitude = parse_float_strict(value, key)?,
            "MIN_DEPTH" => self.min_depth = parse_float_strict(value, key)?,
            "MAX_DEPTH" => self.max_depth = parse_float_strict(value, key)?,
            "SAMPLING_INTERVAL" => self.sampling_interval = parse_float_strict(value, key)?,
            "SOUNDING" => self.sounding = parse_float_strict(value, key)?,
            "DEPTH_OFF_BOTTOM" => self.depth_off_bottom = parse_float_strict(value, key)?,
            "STATION_NAME" => self.station_name = normalize_text(value),
            "SET_NUMBER" => self.set_number = normalize_text(value),
            "EVENT_COMMENTS" => {
                push_entry(&mut self.event_comments, value);
                return Ok(FieldKind::Repeated);
            }
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.quoted("DATA_TYPE", &self.data_type);
        out.quoted("EVENT_NUMBER", &self.event_number);
        out.quoted("EVENT_QUALIFIER1", &self.event_qualifier1);
        out.quoted("EVENT_QUALIFIER2", &self.event_qualifier2);
        out.quoted("CREATION_DATE", &self.creation_date);
        out.quoted("ORIG_CREATION_DATE", &self.orig_creation_date);
        out.quoted("START_DATE_TIME", &self.start_date_time);
        out.quoted("END_DATE_TIME", &self.end_date_time);
        out.number("INITIAL_LATITUDE", self.initial_latitude, 6);
        out.number("INITIAL_LONGITUDE", self.initial_longitude, 6);
        out.number("END_LATITUDE", self.end_latitude, 6);
        out.number("END_LONGITUDE", self.end_longitude, 6);
        out.number("MIN_DEPTH", self.min_depth, 2);
        out.number("MAX_DEPTH", self.max_depth, 2);
        out.field("SAMPLING_INTERVAL", format_plain(self.sampling_interval));
        out.number("SOUNDING", self.sounding, 2);
        out.number("DEPTH_OFF_BOTTOM", self.depth_off_bottom, 2);
        out.quoted("STATION_NAME", &self.station_name);
        out.quoted("SET_NUMBER", &self.set_number);
        out.quoted_list("EVENT_COMMENTS", &self.event_comments);
    }
}
