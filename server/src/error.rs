//! Rendering of core errors as HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use todo_core::TodoError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handler error: a core outcome or an unreadable request body.
#[derive(Debug)]
pub enum ApiError {
    Todo(TodoError),
    Body(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Todo(TodoError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Todo(TodoError::NotFound) => StatusCode::NOT_FOUND,
            Self::Todo(TodoError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Body(rejection) => rejection.status(),
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        Self::Todo(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Todo(TodoError::Validation(reason)) => ErrorBody::new(reason.to_string()),
            Self::Todo(TodoError::NotFound) => ErrorBody::new("Todo not found"),
            // Store details stay in the log.
            Self::Todo(TodoError::Store(err)) => {
                tracing::error!(error = %err, "todo store failure");
                ErrorBody::new("Internal server error")
            }
            Self::Body(rejection) => ErrorBody::new(rejection.body_text()),
        };
        (status, Json(body)).into_response()
    }
}
