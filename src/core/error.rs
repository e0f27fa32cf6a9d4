// Centralized error handling for the portal

use crate::models::requests::MessageResponse;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Message returned on a failed login
pub const LOGIN_FAILED_MESSAGE: &str = "Email or Password Incorrect";

/// Errors raised by the on-disk stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON in store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Malformed row ({reason}): {line}")]
    MalformedRow { line: String, reason: String },

    #[error("Store file does not hold a JSON array: {}", .0.display())]
    NotAList(PathBuf),

    #[error("User table has no column-title line: {}", .0.display())]
    MissingHeader(PathBuf),

    #[error("No id left above {0}")]
    IdsExhausted(String),
}

/// Errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed request body")]
    MalformedRequestBody,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("{}", LOGIN_FAILED_MESSAGE)]
    AuthenticationFailed,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0:?}")]
    Io(io::ErrorKind),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => ApiError::DuplicateEmail,
            StoreError::Io(e) => ApiError::Io(e.kind()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedRequestBody | ApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
            ApiError::DuplicateEmail => (StatusCode::CONFLICT, "email duplicate").into_response(),
            ApiError::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse {
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            ApiError::FileNotFound(path) => (
                StatusCode::NOT_FOUND,
                Html(format!(
                    "<h1>404 Not Found</h1><p>File not found: {}</p>",
                    path
                )),
            )
                .into_response(),
            ApiError::Io(kind) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("Server Error: {:?}", kind),
            )
                .into_response(),
        }
    }
}
