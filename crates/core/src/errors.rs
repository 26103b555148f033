//! Error types for promptbase
//!
//! Every failure a request can hit ends up here, and every variant knows
//! how to present itself to the person filling in the form.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Result type alias for promptbase operations
pub type Result<T> = std::result::Result<T, PromptbaseError>;

/// Main error type for promptbase
#[derive(Debug, Error)]
pub enum PromptbaseError {
    /// Form input rejected before touching the database
    #[error("Validation error: {0}")]
    Validation(String),

    /// No prompt with the requested id
    #[error("Prompt not found: {0}")]
    NotFound(i32),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PromptbaseError {
    fn from(err: anyhow::Error) -> Self {
        PromptbaseError::Other(err.to_string())
    }
}

impl From<String> for PromptbaseError {
    fn from(err: String) -> Self {
        PromptbaseError::Other(err)
    }
}

impl From<&str> for PromptbaseError {
    fn from(err: &str) -> Self {
        PromptbaseError::Other(err.to_string())
    }
}

impl PromptbaseError {
    /// Get user-friendly error message for display on the page
    pub fn user_message(&self) -> String {
        match self {
            PromptbaseError::Validation(reason) => reason.clone(),
            PromptbaseError::NotFound(id) => {
                format!("Prompt #{} no longer exists. It may have been deleted.", id)
            },
            PromptbaseError::Database(err) => {
                format!("Database error: {}", err)
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            PromptbaseError::Validation(_) => "validation",
            PromptbaseError::NotFound(_) => "not_found",
            PromptbaseError::Database(_) => "database",
            PromptbaseError::Config(_) => "config",
            PromptbaseError::Io(_) => "io",
            PromptbaseError::Other(_) => "other",
        }
    }

    /// HTTP status used when the error escapes a handler
    pub fn status(&self) -> StatusCode {
        match self {
            PromptbaseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PromptbaseError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PromptbaseError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(category = self.category(), error = %self, "request failed");
        } else {
            tracing::warn!(category = self.category(), error = %self, "request rejected");
        }

        (status, Html(crate::web::page::error_page(&self.user_message()))).into_response()
    }
}
