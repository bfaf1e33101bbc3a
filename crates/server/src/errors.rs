use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Handler error: a status code plus an optional JSON body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: Option<ErrorBody>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        Self { status, body: Some(ErrorBody { error: error.to_string(), detail }) }
    }

    /// Status only, empty body.
    pub fn bare(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// Default mapping of service failures.
    pub fn from_service(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            ServiceError::NotFound(_) => Self::bare(StatusCode::NOT_FOUND),
            ServiceError::Db(_) => {
                error!(err = %e, "player storage failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(e.to_string()))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
