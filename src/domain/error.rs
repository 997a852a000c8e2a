use thiserror::Error;

use super::model::MEBIBYTE;

/// Rejected user input, raised before anything touches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You can't upload multiple files")]
    MultipleFiles,

    #[error("Max file size is {}MB", .max / MEBIBYTE)]
    TooLarge { size: u64, max: u64 },

    #[error("Please wait for the current request to finish")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFile,

    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("HTTP error! Status: {status}, Message: {body}")]
    ServerError { status: u16, body: String },

    #[error("{0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Upload a file before sending it")]
    NoLocator,

    #[error("Invalid email address: {0:?}")]
    InvalidAddress(String),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Rejected(String),
}
