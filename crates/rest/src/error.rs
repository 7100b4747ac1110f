//! Error types for the HTTP layer.
//!
//! Every failure a handler can hit is turned into a [`RestError`], which
//! renders as a JSON body `{"error": "<kind>", "message": "<text>"}`.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Kind |
//! |-------|-------------|------|
//! | SiteNotFound | 404 | site-not-found |
//! | NotFound | 404 | not-found |
//! | Unauthenticated | 401 | unauthenticated |
//! | Forbidden | 403 | forbidden |
//! | ConfigMissing | 500 | config-missing |
//! | ConfigInvalid | 500 | config-invalid |
//! | Internal | 500 | internal |

use std::fmt;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use docternal_persistence::StoreError;

use crate::site::ConfigLoadError;

/// The primary error type for request handling.
#[derive(Debug)]
pub enum RestError {
    /// No site is configured for the request hostname (HTTP 404).
    SiteNotFound {
        /// The hostname that was looked up.
        hostname: String,
    },

    /// The requested document or listing does not exist (HTTP 404).
    NotFound {
        /// What was looked for.
        resource: String,
    },

    /// No identity could be established (HTTP 401).
    Unauthenticated,

    /// The identity may not view this site (HTTP 403).
    Forbidden {
        /// Error message.
        message: String,
    },

    /// The store holds no configuration document (HTTP 500).
    ConfigMissing,

    /// The configuration document is malformed (HTTP 500).
    ConfigInvalid {
        /// Parser message.
        message: String,
    },

    /// Any other failure (HTTP 500).
    Internal {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// HTTP status the error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::SiteNotFound { .. } | RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Unauthenticated => StatusCode::UNAUTHORIZED,
            RestError::Forbidden { .. } => StatusCode::FORBIDDEN,
            RestError::ConfigMissing
            | RestError::ConfigInvalid { .. }
            | RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable kind used in the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            RestError::SiteNotFound { .. } => "site-not-found",
            RestError::NotFound { .. } => "not-found",
            RestError::Unauthenticated => "unauthenticated",
            RestError::Forbidden { .. } => "forbidden",
            RestError::ConfigMissing => "config-missing",
            RestError::ConfigInvalid { .. } => "config-invalid",
            RestError::Internal { .. } => "internal",
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::SiteNotFound { hostname } => {
                write!(f, "No site configured for host '{}'", hostname)
            }
            RestError::NotFound { resource } => write!(f, "Not found: {}", resource),
            RestError::Unauthenticated => write!(f, "Authentication required"),
            RestError::Forbidden { message } => write!(f, "{}", message),
            RestError::ConfigMissing => write!(
                f,
                "Bucket not properly configured: No docternal.yaml file found"
            ),
            RestError::ConfigInvalid { message } => {
                write!(f, "Bucket not properly configured: {}", message)
            }
            RestError::Internal { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });

        if matches!(self, RestError::Unauthenticated) {
            return (
                status,
                [(header::WWW_AUTHENTICATE, r#"Basic realm="docternal""#)],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<ConfigLoadError> for RestError {
    fn from(err: ConfigLoadError) -> Self {
        match err {
            ConfigLoadError::Missing => RestError::ConfigMissing,
            ConfigLoadError::Invalid(e) => RestError::ConfigInvalid {
                message: e.to_string(),
            },
            ConfigLoadError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key } => RestError::NotFound { resource: key },
            StoreError::InvalidKey { key, .. } => RestError::NotFound { resource: key },
            other => RestError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for handlers.
pub type RestResult<T> = Result<T, RestError>;
