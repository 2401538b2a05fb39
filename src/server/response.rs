//! Response envelope and error mapping
//!
//! Every endpoint answers with the same JSON envelope:
//! `{"status": <int>, "message": <string>, "data": ..., "pagination": ...}`.
//! Errors reuse the envelope without a `data` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::gateway::{GatewayError, Pagination};
use crate::users::UserError;

/// Envelope returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Human-readable outcome description
    pub message: String,
    /// The requested payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Pagination descriptor for paged listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 envelope around `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    /// A 201 envelope around newly created `data`.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    /// A 200 envelope around `data` plus its pagination descriptor.
    pub fn paged(message: impl Into<String>, data: T, pagination: Pagination) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
            pagination: Some(pagination),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Error surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Country gateway failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// User store failure
    #[error(transparent)]
    User(#[from] UserError),
}

impl ApiError {
    /// Maps the error kind to its HTTP status.
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Gateway(GatewayError::InvalidArgument(_))
            | ApiError::User(UserError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            ApiError::Gateway(GatewayError::NotFound(_)) | ApiError::User(UserError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Gateway(GatewayError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        let body = ApiResponse::<()> {
            status: status.as_u16(),
            message: self.to_string(),
            data: None,
            pagination: None,
        };
        (status, Json(body)).into_response()
    }
}
