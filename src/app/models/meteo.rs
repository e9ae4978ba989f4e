//! Meteorological conditions block (`METEO_HEADER`)
//!
//! Besides the header itself, this module carries the unit conversions used
//! when meteorological observations arrive in non-ODF units.

use serde::{Deserialize, Serialize};

use super::block::{BlockWriter, FieldKind, HeaderBlock, push_entry, set_indexed};
use crate::app::services::odf_parser::field_parsers::{
    normalize_text, parse_float_strict, parse_int_strict,
};
use crate::config::OdfVersion;
use crate::constants::{KNOTS_PER_METRE_PER_SECOND, NULL_INT, NULL_VALUE, blocks};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteoHeader {
    /// Degrees Celsius
    pub air_temperature: f64,
    /// Millibars
    pub atmospheric_pressure: f64,
    /// Metres per second
    pub wind_speed: f64,
    /// Degrees true
    pub wind_direction: f64,
    /// WMO code 3700
    pub sea_state: i32,
    /// WMO code 2700
    pub cloud_cover: i32,
    /// Metres
    pub ice_thickness: f64,
    pub meteo_comments: Vec<String>,
}

impl Default for MeteoHeader {
    fn default() -> Self {
        Self {
            air_temperature: NULL_VALUE,
            atmospheric_pressure: NULL_VALUE,
            wind_speed: NULL_VALUE,
            wind_direction: NULL_VALUE,
            sea_state: NULL_INT,
            cloud_cover: NULL_INT,
            ice_thickness: NULL_VALUE,
            meteo_comments: Vec::new(),
        }
    }
}

impl MeteoHeader {
    pub fn set_meteo_comment(&mut self, value: &str, number: usize) {
        set_indexed(&mut self.meteo_comments, normalize_text(value), number);
    }
}

impl HeaderBlock for MeteoHeader {
    const NAME: &'static str = blocks::METEO;

    fn apply_field(&mut self, key: &str, value: &str) -> Result<FieldKind> {
        match key {
            "AIR_TEMPERATURE" => self.air_temperature = parse_float_strict(value, key)?,
            "ATMOSPHERIC_PRESSURE" => self.atmospheric_pressure = parse_float_strict(value, key)?,
            "WIND_SPEED" => self.wind_speed = parse_float_strict(value, key)?,
            "WIND_DIRECTION" => self.wind_direction = parse_float_strict(value, key)?,
            "SEA_STATE" => self.sea_state = parse_int_strict(value, key)?,
            "CLOUD_COVER" => self.cloud_cover = parse_int_strict(value, key)?,
            "ICE_THICKNESS" => self.ice_thickness = parse_float_strict(value, key)?,
            "METEO_COMMENTS" => {
                push_entry(&mut self.meteo_comments, value);
                return Ok(FieldKind::Repeated);
            }
            _ => return Ok(FieldKind::Unknown),
        }
        Ok(FieldKind::Scalar)
    }

    fn write_fields(&self, out: &mut BlockWriter, _version: OdfVersion) {
        out.number("AIR_TEMPERATURE", self.air_temperature, 1);
        out.number("ATMOSPHERIC_PRESSURE", self.atmospheric_pressure, 1);
        out.number("WIND_SPEED", self.wind_speed, 1);
        out.number("WIND_DIRECTION", self.wind_direction, 1);
        out.field("SEA_STATE", self.sea_state);
        out.field("CLOUD_COVER", self.cloud_cover);
        out.number("ICE_THICKNESS", self.ice_thickness, 3);
        out.quoted_list("METEO_COMMENTS", &self.meteo_comments);
    }
}

/// Convert a wind speed in knots to metres per second
pub fn wind_speed_knots_to_ms(knots: f64) -> f64 {
    if knots < 0.0 {
        return NULL_VALUE;
    }
    knots / KNOTS_PER_METRE_PER_SECOND
}

/// Convert a cloud-cover fraction (0..1) to its WMO code
pub fn cloud_cover_fraction_to_wmo_code(fraction: f64) -> i32 {
    const UPPER_BOUNDS: [f64; 8] = [0.15, 0.35, 0.45, 0.55, 0.65, 0.85, 0.95, 1.0];

    if fraction < 0.0 {
        return NULL_INT;
    }
    if fraction == 0.0 {
        return 0;
    }
    code_for(fraction, &UPPER_BOUNDS)
}

/// Convert a significant wave height in metres to its WMO sea-state code
pub fn wave_height_meters_to_wmo_code(height: f64) -> i32 {
    const UPPER_BOUNDS: [f64; 8] = [0.1, 0.5, 1.25, 2.5, 4.0, 6.0, 9.0, 14.0];

    if height < 0.0 {
        return NULL_INT;
    }
    if height == 0.0 {
        return 0;
    }
    code_for(height, &UPPER_BOUNDS)
}

fn code_for(value: f64, upper_bounds: &[f64; 8]) -> i32 {
    upper_bounds
        .iter()
        .position(|bound| value < *bound)
        .map_or(9, |index| index as i32 + 1)
}
