use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use promo_core::{CoreError, ValidationErrors};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(ValidationErrors),
    NotFoundError(String),
    ConflictError(String),
    ForbiddenError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// A request body that could not be read as JSON.
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.reject_global(reason);
        AppError::ValidationError(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let timestamp = chrono::Local::now().to_rfc3339();

        let (status, body) = match self {
            AppError::ValidationError(errors) => {
                let details: Vec<serde_json::Value> = errors
                    .fields
                    .iter()
                    .map(|e| json!({ "reason": e.reason, "field": e.field, "rejected": e.rejected }))
                    .chain(errors.global.iter().map(|reason| json!({ "reason": reason })))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "timestamp": timestamp, "error": "Validation errors", "details": details }),
                )
            }
            AppError::NotFoundError(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "timestamp": timestamp, "error": msg }),
            ),
            AppError::ConflictError(msg) => (
                StatusCode::CONFLICT,
                json!({ "timestamp": timestamp, "error": msg }),
            ),
            AppError::ForbiddenError(msg) => (
                StatusCode::FORBIDDEN,
                json!({ "timestamp": timestamp, "error": msg }),
            ),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "timestamp": timestamp, "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(_) => AppError::NotFoundError("Product not found".to_string()),
            CoreError::Conflict(_) => {
                AppError::ConflictError("There is an already active offer on product".to_string())
            }
            CoreError::ValidationFailed(errors) => AppError::ValidationError(errors),
            CoreError::Forbidden(_) => {
                AppError::ForbiddenError("Cannot delete an active offer".to_string())
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
