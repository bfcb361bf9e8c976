// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid column index: {0:?} is not a non-negative integer")]
    InvalidColumnIndex(String),

    #[error("Invalid server URL {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("No file selected")]
    NoFileSelected,

    #[error("Path has no file name: {0}")]
    InvalidFilePath(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
