// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::{ErrorBody, FieldError, ValidationErrorBody};
use crate::services::client_provider::API_KEY_VAR;
use crate::services::openai::UpstreamError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        status: StatusCode,
        kind: &'static str,
        field: Option<String>,
        message: String,
    },

    #[error("{} not configured", API_KEY_VAR)]
    Configuration,

    #[error("Error calling OpenAI API: {0}")]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::Configuration | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Pulls the offending field out of a serde message: either
/// "missing field `x` ..." or a "x.y: invalid type ..." path prefix.
fn field_path(text: &str) -> Option<String> {
    if let Some((_, rest)) = text.split_once("missing field `") {
        return rest.split('`').next().map(str::to_string);
    }
    let (_, detail) = text.split_once("target type: ")?;
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then(|| path.to_string())
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let (kind, field) = match &rejection {
            JsonRejection::JsonDataError(_) => {
                let kind = if message.contains("missing field") { "missing" } else { "invalid_type" };
                (kind, field_path(&message))
            }
            JsonRejection::JsonSyntaxError(_) => ("json_invalid", None),
            JsonRejection::MissingJsonContentType(_) => ("content_type", None),
            _ => ("body", None),
        };
        AppError::Validation {
            status: rejection.status(),
            kind,
            field,
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation { kind, field, message, .. } => {
                let mut loc = vec!["body".to_string()];
                loc.extend(field.iter().flat_map(|f| f.split('.')).map(str::to_string));
                let body = ValidationErrorBody {
                    detail: vec![FieldError { loc, msg: message, kind: kind.to_string() }],
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = Json(ErrorBody { detail: other.to_string() });
                (status, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_the_key() {
        let err = AppError::Configuration;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "OPENAI_API_KEY not configured");
    }

    #[test]
    fn upstream_error_embeds_cause() {
        let err = AppError::from(UpstreamError::EmptyCompletion);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error calling OpenAI API: response contained no completion content"
        );
    }

    #[test]
    fn field_path_from_serde_text() {
        assert_eq!(
            field_path("Failed to deserialize the JSON body into the target type: missing field `message` at line 1 column 2"),
            Some("message".to_string())
        );
        assert_eq!(
            field_path("Failed to deserialize the JSON body into the target type: message: invalid type: integer `42`, expected a string at line 1 column 14"),
            Some("message".to_string())
        );
        assert_eq!(
            field_path("Failed to deserialize the JSON body into the target type: invalid type: integer `1`, expected struct ChatRequest at line 1 column 1"),
            None
        );
    }
}
