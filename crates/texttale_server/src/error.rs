//! Mapping errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use texttale_core::ErrorBody;
use texttale_error::{TextTaleError, TextTaleErrorKind, ValidationError};

/// Error returned from a handler.
///
/// Validation failures become 400 with the joined violation list; everything else
/// is logged and becomes a generic 500.
#[derive(Debug, derive_more::From)]
pub struct ApiError(TextTaleError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::new(vec![rejection.body_text()]).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0.kind() {
            TextTaleErrorKind::Validation(v) => {
                tracing::info!(detail = %v.message(), "Rejected request");
                (StatusCode::BAD_REQUEST, v.message())
            }
            _ => {
                tracing::error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
