//! Error types for the lookup REST API.
//!
//! Store errors from the persistence layer are automatically mapped to HTTP
//! status codes:
//!
//! | Store Error | HTTP Status |
//! |-------------|-------------|
//! | NotFound | 404 |
//! | AccessError (any variant) | 403 |
//! | MissingRequiredField, InvalidRecord, AlreadyExists | 400 |
//! | IndexError, BackendError | 500 |
//!
//! Every error body is a JSON object with a single `message` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lookup_store::error::{RecordError, StoreError};
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Record not found (HTTP 404).
    NotFound {
        /// Human-readable message.
        message: String,
    },

    /// The URL names an entity type the API does not serve (HTTP 404).
    UnknownEntityType {
        /// The unrecognized path segment.
        segment: String,
    },

    /// Bad request - validation error (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Access denied (HTTP 403).
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { message } => write!(f, "{}", message),
            RestError::UnknownEntityType { segment } => {
                write!(f, "Unknown lookup type: {}", segment)
            }
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::Forbidden { message } => write!(f, "{}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RestError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            RestError::UnknownEntityType { segment } => (
                StatusCode::NOT_FOUND,
                format!("Unknown lookup type: {}", segment),
            ),
            RestError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            RestError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
            RestError::InternalError { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        let body = serde_json::json!({ "message": message });
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Record(RecordError::NotFound { .. }) => RestError::NotFound {
                message: err.to_string(),
            },
            StoreError::Record(
                RecordError::MissingRequiredField { .. }
                | RecordError::InvalidRecord { .. }
                | RecordError::AlreadyExists { .. },
            ) => RestError::BadRequest {
                message: err.to_string(),
            },
            StoreError::Access(_) => RestError::Forbidden {
                message: err.to_string(),
            },
            // Index errors are absorbed inside the resolver; one escaping
            // here is a server fault, as is any primary backend failure.
            StoreError::Index(_) | StoreError::Backend(_) => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_store::error::AccessError;
    use lookup_store::types::EntityKind;

    #[test]
    fn test_not_found_maps_to_404() {
        let store_err = StoreError::Record(RecordError::NotFound {
            entity: EntityKind::Country,
            id: "abc".to_string(),
        });
        let rest_err: RestError = store_err.into();
        assert!(matches!(rest_err, RestError::NotFound { .. }));
        assert!(rest_err.to_string().contains("doesn't exist"));
    }

    #[test]
    fn test_access_maps_to_forbidden() {
        let rest_err: RestError = StoreError::Access(AccessError::SoftDeleteVisibility).into();
        assert!(matches!(rest_err, RestError::Forbidden { .. }));

        let guard = StoreError::Access(AccessError::EnvironmentProtected {
            operation: "purge".to_string(),
            environment: "production".to_string(),
        });
        let rest_err: RestError = guard.into();
        assert!(matches!(rest_err, RestError::Forbidden { .. }));
    }

    #[test]
    fn test_missing_field_maps_to_bad_request() {
        let store_err = StoreError::Record(RecordError::MissingRequiredField {
            entity: EntityKind::Device,
            field: "model".to_string(),
        });
        let rest_err: RestError = store_err.into();
        assert!(matches!(rest_err, RestError::BadRequest { .. }));
    }
}
