use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pdf_qa_core::{ExtractError, QaError, RegistryError};
use tracing::error;

/// Handler failure rendered as `{"error": message}`.
#[derive(Debug)]
pub struct AppError(pub StatusCode, pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            error!(status = %self.0, error = %self.1, "request failed");
        }
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

pub fn bad_request(message: impl Into<String>) -> AppError {
    AppError(StatusCode::BAD_REQUEST, message.into())
}

pub fn unprocessable(message: impl Into<String>) -> AppError {
    AppError(StatusCode::UNPROCESSABLE_ENTITY, message.into())
}

impl From<RegistryError> for AppError {
    fn from(_: RegistryError) -> Self {
        AppError(StatusCode::NOT_FOUND, "PDF file not found".to_string())
    }
}

impl From<ExtractError> for AppError {
    fn from(error: ExtractError) -> Self {
        AppError(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
    }
}

impl From<QaError> for AppError {
    fn from(error: QaError) -> Self {
        AppError(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError(StatusCode::INTERNAL_SERVER_ERROR, format!("io error: {error}"))
    }
}
