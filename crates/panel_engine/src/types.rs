use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("content container not found")]
    ContainerNotFound,
    #[error("content element not found inside the container")]
    ContentElementNotFound,
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("could not save file: {0}")]
    Persist(#[from] PersistError),
}

impl ExportError {
    /// Text shown to the user when a download request is aborted.
    pub fn alert_message(&self) -> String {
        match self {
            ExportError::Extract(ExtractError::ContainerNotFound) => {
                "Content container was not found.".to_string()
            }
            ExportError::Extract(ExtractError::ContentElementNotFound) => {
                "Markdown content was not found.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: u64,
}
