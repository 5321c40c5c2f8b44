use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

use super::transient::{Transient, is_transient_message};

#[derive(Debug, ThisError)]
pub enum AppdockError {
    #[error("Template {template_id} not found. Available templates: {available}")]
    UnknownTemplate {
        template_id: String,
        available: String,
    },

    #[error("Workspace host error with status: {0}")]
    HostStatus(StatusCode),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Model endpoint error: {0}")]
    ModelError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AppdockError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            AppdockError::UnknownTemplate { .. } => {
                let body = ApiErrorObject {
                    code: "UNKNOWN_TEMPLATE".to_string(),
                    message: self.to_string(),
                    details: None,
                };
                (StatusCode::BAD_REQUEST, body)
            }

            AppdockError::DatabaseError(_)
            | AppdockError::IoError(_)
            | AppdockError::UnexpectedError(_) => {
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }

            AppdockError::JsonError(_) => {
                let body = ApiErrorObject {
                    code: "BAD_UPSTREAM_PAYLOAD".to_string(),
                    message: "Failed to parse upstream response.".to_string(),
                    details: None,
                };
                (StatusCode::BAD_GATEWAY, body)
            }

            AppdockError::ReqwestError(_)
            | AppdockError::UrlError(_)
            | AppdockError::ModelError(_) => {
                let body = ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream service error.".to_string(),
                    details: None,
                };
                (StatusCode::BAD_GATEWAY, body)
            }

            AppdockError::HostStatus(code) => {
                let (err_code, msg) = match code {
                    StatusCode::TOO_MANY_REQUESTS => {
                        ("RATE_LIMIT", "Workspace host rate limit exceeded.")
                    }
                    StatusCode::UNAUTHORIZED => {
                        ("UNAUTHORIZED", "Workspace host authentication failed.")
                    }
                    StatusCode::FORBIDDEN => ("FORBIDDEN", "Workspace host permission denied."),
                    StatusCode::NOT_FOUND => ("NOT_FOUND", "Workspace host resource not found."),
                    _ => ("UPSTREAM_ERROR", "An upstream error occurred."),
                };
                (
                    code,
                    ApiErrorObject {
                        code: err_code.to_string(),
                        message: msg.to_string(),
                        details: None,
                    },
                )
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

impl Transient for AppdockError {
    fn is_transient(&self) -> bool {
        is_transient_message(&self.to_string())
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
