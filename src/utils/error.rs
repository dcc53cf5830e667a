use thiserror::Error;

use crate::models::DocumentProfile;

#[derive(Debug, Error)]
pub enum IdScanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid extraction options: {0}")]
    InvalidOptions(String),
    #[error("No extractor registered for profile: {0:?}")]
    ProfileNotRegistered(DocumentProfile),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
