use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::IdScanError;

/// Caller-supplied switches for one extraction pass. Label overrides replace
/// the profile's own labels for that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtractionOptions {
    pub extract_name: bool,
    pub extract_id_number: bool,
    pub extract_date_of_birth: bool,
    /// Accepted for compatibility; addresses are never extracted.
    pub extract_address: bool,
    pub first_name_labels: Option<Vec<String>>,
    pub last_name_labels: Option<Vec<String>>,
    pub id_number_labels: Option<Vec<String>>,
    pub date_of_birth_labels: Option<Vec<String>>,
    pub address_labels: Option<Vec<String>>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        ExtractionOptions {
            extract_name: true,
            extract_id_number: true,
            extract_date_of_birth: false,
            extract_address: false,
            first_name_labels: None,
            last_name_labels: None,
            id_number_labels: None,
            date_of_birth_labels: None,
            address_labels: None,
        }
    }
}

impl ExtractionOptions {
    pub fn with_date_of_birth(mut self) -> Self {
        self.extract_date_of_birth = true;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, IdScanError> {
        serde_json::from_str(json).map_err(|e| IdScanError::InvalidOptions(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, IdScanError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
