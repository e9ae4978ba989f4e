//! Parameter registry service for reference lookups by parameter mnemonic
//!
//! This module provides the packaged ODF parameter reference table: for each
//! four-letter mnemonic (`TEMP`, `PSAL`, ...) its description, units and the
//! default print format used when a new column is added to a document. The
//! table is parsed once per process and is read-only afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

pub mod registry;

/// Reference information for one parameter mnemonic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Four-letter mnemonic, e.g. `TEMP`
    pub code: String,

    /// Human-readable parameter name
    pub description: String,

    /// Measurement units
    pub units: String,

    /// Default print width of the data column
    pub print_field_width: usize,

    /// Default decimal places of the data column
    pub print_decimal_places: usize,
}

/// Parameter reference table indexed by mnemonic
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    pub(crate) parameters: HashMap<String, ParameterInfo>,
}

/// Process-wide registry built from the packaged table on first use
pub static PARAMETER_REGISTRY: Lazy<ParameterRegistry> = Lazy::new(ParameterRegistry::packaged);

/// Look a parameter up by mnemonic (`TEMP`) or full code (`TEMP_01`)
pub fn lookup(name: &str) -> Result<ParameterInfo> {
    PARAMETER_REGISTRY.lookup(name).cloned()
}
