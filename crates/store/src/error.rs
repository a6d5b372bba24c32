//! Error types for the lookup persistence layer.
//!
//! This module defines all error types used by the dual-store core, separated
//! into record-state errors, access errors, secondary-index errors, and
//! primary-backend errors. Index errors are advisory: the read-through
//! resolver absorbs them and falls back to the primary store, so they should
//! never reach a caller.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::EntityKind;

/// The primary error type for all store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record state errors
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Access and visibility errors
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Secondary index errors (absorbed inside the resolver)
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Primary backend errors (fatal for the current request)
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The requested record is absent from both stores, or hidden by the
    /// visibility policy. Callers cannot distinguish the two cases.
    #[error("{entity} with id: {id} doesn't exist")]
    NotFound { entity: EntityKind, id: String },

    /// A record with the given id already exists in the primary store.
    #[error("{entity} with id: {id} already exists")]
    AlreadyExists { entity: EntityKind, id: String },

    /// A required entity field is missing from the submitted record.
    #[error("missing required field: {field}")]
    MissingRequiredField { entity: EntityKind, field: String },

    /// The record payload is not a JSON object or lacks a usable id.
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },
}

/// Errors related to caller access.
#[derive(Error, Debug)]
pub enum AccessError {
    /// A non-administrator requested soft-deleted record visibility.
    #[error("You are not allowed to perform that action")]
    SoftDeleteVisibility,

    /// The operation requires administrator privilege.
    #[error("administrator privilege required for {operation}")]
    AdminRequired { operation: String },

    /// A destructive maintenance operation was refused by the environment
    /// guard.
    #[error("{operation} is not allowed in the {environment} environment")]
    EnvironmentProtected {
        operation: String,
        environment: String,
    },
}

/// Errors originating from the secondary index.
///
/// These are soft failures: the resolver logs them and falls back to the
/// primary store.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The index is unreachable or rejected the request.
    #[error("index unavailable: {message}")]
    Unavailable { message: String },

    /// The index returned a document that could not be decoded.
    #[error("malformed index document in {namespace}: {message}")]
    MalformedDocument { namespace: String, message: String },
}

/// Errors originating from the primary store backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Backend(BackendError::Serialization {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StoreError {
    fn from(_err: r2d2::Error) -> Self {
        StoreError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}
