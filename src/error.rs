use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("empty input: text to summarize must not be blank")]
    EmptyInput,

    #[error("invalid dataset index {index} (split has {len} stories)")]
    InvalidIndex { index: usize, len: usize },

    #[error("invalid generation parameters: {0}")]
    InvalidParams(String),

    #[error("dependency unavailable: {0}")]
    Dependency(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidIndex { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            AppError::Dependency(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Dataset(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Dataset(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
