//! JSON envelopes shared by every endpoint.

use crate::query::QueryError;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    pub timestamp: String,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: Status,
    pub message: String,
    pub timestamp: String,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes `data` into a success envelope right away, so `data` may
/// borrow from a snapshot that is dropped when the handler returns.
pub fn success<T: Serialize>(data: T) -> Response {
    Json(Envelope {
        status: Status::Success,
        timestamp: timestamp(),
        data,
    })
    .into_response()
}

/// Request-level failures surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch data from AMFI")]
    FetchFailed,
    #[error("Fund not found")]
    NotFound,
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) | ApiError::Query(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            status: Status::Error,
            message: self.to_string(),
            timestamp: timestamp(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
