use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message returned when the model service call does not succeed
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch recommendations from AI.";

/// Message returned when no parse path yields a usable recommendation
pub const PARSE_ERROR_MESSAGE: &str = "AI response did not include valid recommendations.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Unparseable model output ({} bytes)", .raw_output.len())]
    Parse { raw_output: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Configuration(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
            AppError::Upstream(details) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": UPSTREAM_ERROR_MESSAGE,
                    "details": details,
                    "rawOutput": ""
                }),
            ),
            AppError::HttpClient(ref e) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": UPSTREAM_ERROR_MESSAGE,
                    "details": e.to_string(),
                    "rawOutput": ""
                }),
            ),
            AppError::Parse { raw_output } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": PARSE_ERROR_MESSAGE,
                    "rawOutput": raw_output
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
