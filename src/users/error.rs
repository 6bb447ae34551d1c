use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::users::store::StoreError;

/// Every way a user operation can fail; each maps to one HTTP answer.
#[derive(Debug, Error)]
pub enum UserError {
    /// Body absent, not JSON, not a non-empty object, or wrongly typed.
    #[error("invalid JSON data")]
    InvalidInput,

    #[error("user not found")]
    NotFound,

    #[error("validation failed: {0:?}")]
    ValidationFailed(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::InvalidInput | UserError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Store(_) | UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            UserError::InvalidInput => json!({ "error": "Invalid JSON data" }),
            UserError::NotFound => json!({ "message": "User not found" }),
            UserError::ValidationFailed(errors) => json!({ "errors": errors }),
            UserError::Store(e) => {
                error!(error = %e, "user store failure");
                json!({ "error": "Internal server error" })
            }
            UserError::Internal(e) => {
                error!(error = %e, "user operation failed");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
