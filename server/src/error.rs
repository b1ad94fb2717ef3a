//! The response envelope and API error mapping.
//!
//! Every response body has the shape
//! `{"status": "success" | "error", "data"?: ..., "message"?: ...}`.
//! [`ApiError`] renders the error form with the matching HTTP status.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use interview_catalog::CatalogError;
use interview_store::StoreError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            data: Some(data),
            message: None,
        })
    }

    pub fn data_with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success",
            data: Some(data),
            message: Some(message.into()),
        })
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success",
            data: None,
            message: Some(message.into()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Envelope::<()> {
            status: "error",
            data: None,
            message: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Store operation failed");
        ApiError::Internal(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidDocument(_)
            | CatalogError::InvalidLevel { .. }
            | CatalogError::SkillExists(_) => ApiError::BadRequest(err.to_string()),
            other => {
                tracing::error!(error = %other, "Catalog operation failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!(error = %err, "Serialization failed");
        ApiError::Internal(err.to_string())
    }
}
