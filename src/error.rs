//! Global error handling module for the Kompi browser
//!
//! This module provides a unified error type that handles all application errors
//! and converts them to appropriate HTTP responses with consistent JSON structure.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::client::FetchError;
use crate::codec::MalformedTokenError;
use crate::models::ApiError;

/// Application-wide error type that unifies all error sources
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream fetch errors (network, HTTP, envelope)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A route token that no encode produced
    #[error("Malformed route token: {0}")]
    MalformedToken(#[from] MalformedTokenError),

    /// Validation errors (bad request)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request - Validation errors
            AppError::Validation(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found - bad tokens address nothing
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MalformedToken(_) => StatusCode::NOT_FOUND,
            AppError::Fetch(FetchError::HttpError(404)) => StatusCode::NOT_FOUND,

            // 502 Bad Gateway - upstream failures
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),

            AppError::MalformedToken(_) => "Not found".to_string(),

            AppError::Fetch(fetch_err) => match fetch_err {
                FetchError::NetworkError(msg) => format!("Failed to connect to server: {}", msg),
                FetchError::HttpError(404) => "Not found".to_string(),
                FetchError::HttpError(status) => {
                    format!("Server returned error status: {}", status)
                }
                FetchError::ResponseError(msg) => format!("Failed to read response: {}", msg),
                FetchError::DecodeError(_) => "Server returned an unexpected response".to_string(),
                FetchError::ApiError(msg) => msg.clone(),
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_response = ApiError::new(self.user_message());

        HttpResponse::build(status).json(error_response)
    }
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status_code() {
        let error = AppError::validation("Invalid input");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status_code() {
        let error = AppError::not_found("Anime not found");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_token_is_not_found() {
        let error = AppError::from(MalformedTokenError::InvalidUtf8);
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.user_message(), "Not found");
    }

    #[test]
    fn test_internal_error_status_code() {
        let error = AppError::internal("Something went wrong");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_fetch_error_status_codes() {
        let error = AppError::Fetch(FetchError::NetworkError("timeout".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);

        let error = AppError::Fetch(FetchError::HttpError(503));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);

        let error = AppError::Fetch(FetchError::HttpError(404));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);

        let error = AppError::Fetch(FetchError::ApiError("Anime tidak ditemukan".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_fetch_error_user_messages() {
        let error = AppError::Fetch(FetchError::NetworkError("connection refused".to_string()));
        assert!(error.user_message().contains("Failed to connect"));

        let error = AppError::Fetch(FetchError::HttpError(500));
        assert!(error.user_message().contains("500"));

        let error = AppError::Fetch(FetchError::ApiError("Anime tidak ditemukan".to_string()));
        assert_eq!(error.user_message(), "Anime tidak ditemukan");
    }

    #[test]
    fn test_error_display() {
        let error = AppError::validation("test error");
        assert_eq!(format!("{}", error), "Validation error: test error");

        let error = AppError::not_found("anime");
        assert_eq!(format!("{}", error), "Not found: anime");
    }

    #[test]
    fn test_from_fetch_error() {
        let fetch_err = FetchError::HttpError(502);
        let app_err: AppError = fetch_err.into();
        assert!(matches!(app_err, AppError::Fetch(_)));
    }

    #[test]
    fn test_error_response_body() {
        let response = AppError::not_found("Anime not found").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
