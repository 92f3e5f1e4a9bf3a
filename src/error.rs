//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {kind} segment '{value}'")]
    InvalidSegment { kind: &'static str, value: String },
    #[error("mapping suffix must start with '/': '{0}'")]
    BadMappingSuffix(String),
    #[error("mapping suffix '{0}' collides with a built-in route")]
    ReservedMappingSuffix(String),
    #[error("mapping '{0}' has no GET or POST handler")]
    EmptyMapping(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("store i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("store document corrupt: {0}")]
    Data(#[from] serde_json::Error),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// One field-level validation failure, in the wire shape clients of the
/// original service expect: `code` 12001 for a missing required field,
/// 12002 for a value outside an enumerated set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    pub code: u32,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        FieldError {
            code: 12001,
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }

    pub fn invalid_value(field: &str, expected: &[serde_json::Value]) -> Self {
        let expected = expected
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", ");
        FieldError {
            code: 12002,
            field: field.to_string(),
            message: format!("Invalid Value for {}: Expected: {}", field, expected),
        }
    }
}

fn display_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Validation keeps the bare error-array body; everything else wraps
        // in the standard error envelope.
        let (status, code) = match &self {
            AppError::Validation(errors) => {
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors.clone())).into_response();
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            AppError::Data(_) => (StatusCode::INTERNAL_SERVER_ERROR, "data_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_error_wire_shape() {
        let e = FieldError::required("name");
        assert_eq!(e.code, 12001);
        assert_eq!(e.message, "name is required");
    }

    #[test]
    fn invalid_value_joins_expected_values() {
        let e = FieldError::invalid_value("status", &[json!("a"), json!("b")]);
        assert_eq!(e.code, 12002);
        assert_eq!(e.message, "Invalid Value for status: Expected: a, b");
    }
}
