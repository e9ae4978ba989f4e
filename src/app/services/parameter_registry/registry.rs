//! Registry loading and lookup

use super::{ParameterInfo, ParameterRegistry};
use crate::constants::parameter_prefix;
use crate::error::{OdfError, Result};
use tracing::{debug, error};

const PACKAGED_TABLE: &str = include_str!("parameters.csv");

impl ParameterRegistry {
    /// Build a registry from CSV text with a
    /// `code,description,units,print_field_width,print_decimal_places` header
    pub fn from_csv(text: &str) -> std::result::Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut registry = Self::default();
        for record in reader.deserialize() {
            let info: ParameterInfo = record?;
            registry.parameters.insert(info.code.to_uppercase(), info);
        }

        debug!("Loaded {} parameter definitions", registry.parameters.len());
        Ok(registry)
    }

    /// The table shipped with the crate
    pub(crate) fn packaged() -> Self {
        Self::from_csv(PACKAGED_TABLE).unwrap_or_else(|e| {
            error!("Packaged parameter table is unreadable: {}", e);
            Self::default()
        })
    }

    /// Find a parameter by mnemonic or full code
    pub fn lookup(&self, name: &str) -> Result<&ParameterInfo> {
        let key = parameter_prefix(name.trim()).to_uppercase();
        self.parameters
            .get(&key)
            .ok_or_else(|| OdfError::unknown_parameter(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// All known mnemonics, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.parameters.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
