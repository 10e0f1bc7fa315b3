use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Missing html in request body")]
    MissingHtml,

    #[error("Markdown conversion failed: {reason}")]
    Conversion { reason: String },

    #[error("Root directory does not exist: {path}")]
    RootNotFound { path: String },

    #[error("Root is not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ImportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHtml => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Import failed: {}", self);
        }

        (status, axum::Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
