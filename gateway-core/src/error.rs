//! Error types for gateway operations
//!
//! Processor declines are NOT errors: they come back as canonical responses
//! with `success == false`. This enum only covers failures that prevent a
//! processor verdict from being obtained at all.

use crate::types::{Operation, Processor};
use thiserror::Error;

/// Gateway result type
pub type Result<T> = std::result::Result<T, Error>;

/// Gateway errors
#[derive(Error, Debug)]
pub enum Error {
    /// Canonical request is missing something the processor protocol requires
    #[error("Malformed {operation} request for {processor}: {reason}")]
    MalformedRequest {
        /// Processor the request was built for
        processor: Processor,
        /// Operation being built
        operation: Operation,
        /// What is missing or unusable
        reason: String,
    },

    /// Processor could not be reached or its reply could not be decoded
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Adapter configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::MalformedRequest`]
    pub fn malformed(processor: Processor, operation: Operation, reason: impl Into<String>) -> Self {
        Error::MalformedRequest {
            processor,
            operation,
            reason: reason.into(),
        }
    }

    /// True when the error happened before anything was sent
    pub fn is_malformed_request(&self) -> bool {
        matches!(self, Error::MalformedRequest { .. })
    }

    /// True for network, encoding and decoding failures
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Opaque transport failures (network, serialization, undecodable replies)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// DNS, TLS, connect or timeout failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Wire request could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),

    /// Reply body could not be decoded into the processor's response shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Non-2xx status with a body that is not a processor response
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw body (lossy UTF-8)
        body: String,
    },
}
