//! Error types for the mock API core

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP-like status code reported for this error
    pub fn status(&self) -> u16 {
        match self {
            Error::InvalidBody(_) => 400,
            Error::NotFound(_) => 404,
            Error::MethodNotAllowed(_) => 405,
            Error::Serialization(_) | Error::Internal(_) => 500,
        }
    }

    /// JSON payload reported for this error.
    ///
    /// Client errors use `{"message": ..}`; internal faults use `{"error": ..}`.
    pub fn payload(&self) -> Value {
        match self {
            Error::InvalidBody(_) => json!({ "message": "Invalid JSON body" }),
            Error::NotFound(msg) | Error::MethodNotAllowed(msg) => json!({ "message": msg }),
            Error::Serialization(_) | Error::Internal(_) => json!({ "error": self.to_string() }),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
