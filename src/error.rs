//! Error codes shared by every service error.
//!
//! DESIGN
//! ======
//! Each domain error enum implements [`ErrorCode`] so route handlers can turn
//! it into a flat `{"code", "message"}` body without matching on variants.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Grepable error code for structured API error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// JSON error body returned by the API routes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// An HTTP status paired with a coded error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    #[must_use]
    pub fn new<E: ErrorCode>(status: StatusCode, err: &E) -> Self {
        Self { status, body: ErrorBody { code: err.error_code(), message: err.to_string() } }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
