use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{service} unavailable: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("Torrent daemon error: {0}")]
    Rpc(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("No genres found in library")]
    EmptyInput,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Shorthand for a failed exchange with a named upstream service
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        AppError::Upstream {
            service,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Semantic absences are warnings, everything else is an error
        let (status, key) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "warning"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "warning"),
            AppError::EmptyInput => (StatusCode::UNPROCESSABLE_ENTITY, "warning"),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "error"),
            AppError::HttpClient(_)
            | AppError::Upstream { .. }
            | AppError::Rpc(_)
            | AppError::MalformedRecord(_) => (StatusCode::BAD_GATEWAY, "error"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({ key: self.to_string() }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
