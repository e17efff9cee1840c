use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Date is in the past")]
    PastDate,
    #[error("There is another booking at the same time")]
    SlotConflict,
    #[error("Requested time is outside the host's working hours")]
    OutsideWorkingHours,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Calendar authorization expired")]
    AuthExpired,
    #[error("Upstream service unavailable: {0}")]
    Transient(String),
    #[error("Internal server error")]
    Internal,
}

// 2067 = SQLite UNIQUE, 1555 = SQLite PRIMARY KEY, 23505 = PostgreSQL unique_violation
const UNIQUE_VIOLATION_CODES: [&str; 3] = ["2067", "1555", "23505"];

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| UNIQUE_VIOLATION_CODES.contains(&code.as_ref()))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if is_unique_violation(e) {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                    ).into_response();
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::PastDate => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::SlotConflict => (StatusCode::CONFLICT, self.to_string()),
            AppError::OutsideWorkingHours => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::AuthExpired => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Transient(msg) => {
                error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Upstream service unavailable".to_string())
            }
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
