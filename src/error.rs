//! Error handling for trailsync

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required credential fields absent from the request
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Vendor rejected the login or session token
    #[error("Vendor authentication failed: {0}")]
    VendorAuth(String),

    /// Vendor account has no cameras to sync
    #[error("No cameras: {0}")]
    NoCameras(String),

    /// Vendor list/fetch call failed
    #[error("Vendor fetch failed: {0}")]
    VendorFetch(String),

    /// Credential hashing error
    #[error("Credential error: {0}")]
    Credential(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// SQLx database error
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            Error::MissingCredentials(msg) => (
                StatusCode::BAD_REQUEST,
                "MISSING_CREDENTIALS",
                msg.clone(),
            ),
            Error::VendorAuth(msg) => (StatusCode::UNAUTHORIZED, "VENDOR_AUTH", msg.clone()),
            Error::NoCameras(msg) => (StatusCode::NOT_FOUND, "NO_CAMERAS", msg.clone()),
            Error::VendorFetch(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "VENDOR_FETCH",
                msg.clone(),
            ),
            Error::Credential(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CREDENTIAL_ERROR",
                msg.clone(),
            ),
            Error::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                msg.clone(),
            ),
            Error::Serialization(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                e.to_string(),
            ),
            Error::Http(e) => (
                StatusCode::BAD_GATEWAY,
                "HTTP_ERROR",
                e.to_string(),
            ),
            Error::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                msg.clone(),
            ),
            Error::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
            Error::Sqlx(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                e.to_string(),
            ),
        };

        tracing::error!(
            status = %status,
            error_code = %error_code,
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error_code": error_code,
            "message": message
        }));

        (status, body).into_response()
    }
}
