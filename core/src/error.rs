//! Error types for the Tessera proxy client.
//!
//! # Design
//! Every non-2xx response lands in `Http` with the raw status code and body.
//! The proxy forwards upstream error bodies verbatim and they are the only
//! diagnostic available, so the body text rides along into `Display`.

use std::fmt;

/// Errors returned by `TesseraClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The request path suffix was empty; there is nothing to address.
    EmptyPathSuffix,

    /// The server returned a non-2xx status.
    Http { status: u16, body: String },

    /// The response body could not be deserialized as JSON.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::EmptyPathSuffix => write!(f, "path suffix must not be empty"),
            ApiError::Http { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
