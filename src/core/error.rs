//! Error types and handling for the Tuiter backend
//!
//! Either the storage layer rejected an operation or something around it
//! broke. Handlers do not translate errors into domain responses: every error
//! reaches the client as a 500 with its display string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Tuiter backend
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage layer errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// JSON (de)serialization errors outside the store
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// An identifier could not be read as an ObjectId
    #[error("Cast to ObjectId failed for value \"{value}\"")]
    InvalidId {
        /// The rejected identifier as received
        value: String,
    },

    /// A document with the same `_id` is already stored
    #[error("Duplicate key in collection {collection}: {id}")]
    DuplicateKey {
        /// Collection the insert targeted
        collection: String,
        /// The conflicting `_id`
        id: String,
    },

    /// A record did not map onto a document, or a stored document did not
    /// map back onto its record type
    #[error("Invalid document in collection {collection}: {reason}")]
    InvalidDocument {
        /// Collection the document belongs to
        collection: String,
        /// What went wrong
        reason: String,
    },

    /// MongoDB driver errors
    #[error("Database error: {0}")]
    Backend(#[from] mongodb::error::Error),

    /// BSON encode errors
    #[error("BSON encode error: {0}")]
    BsonEncode(#[from] mongodb::bson::ser::Error),

    /// BSON decode errors
    #[error("BSON decode error: {0}")]
    BsonDecode(#[from] mongodb::bson::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::Storage(StorageError::InvalidId {
            value: value.into(),
        })
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_message() {
        let err = Error::invalid_id("u1");
        assert!(matches!(err, Error::Storage(StorageError::InvalidId { .. })));
        assert_eq!(
            err.to_string(),
            "Storage error: Cast to ObjectId failed for value \"u1\""
        );
    }

    #[test]
    fn test_errors_render_as_server_errors() {
        let response = Error::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::invalid_id("nope").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
