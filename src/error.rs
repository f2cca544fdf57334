use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::storage::location::{LocationError, StorageSlot};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Slot {0} is already occupied by another customer")]
    SlotOccupied(StorageSlot),

    #[error("A customer with the same name, license plate, phone, or email already exists")]
    DuplicateCustomer,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] LocationError),

    #[error("{0:?} is not a location code")]
    BadLocationCode(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::SlotOccupied(_) => (StatusCode::CONFLICT, "Slot is already occupied"),
            AppError::DuplicateCustomer => (StatusCode::CONFLICT, "Customer already exists"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::InvalidLocation(_) | AppError::BadLocationCode(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Invalid location code")
            }
            AppError::Database(ref err) => match err {
                DatabaseError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
                DatabaseError::Duplicate => (StatusCode::CONFLICT, "Resource already exists"),
                DatabaseError::ConnectionError(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database temporarily unavailable",
                ),
                DatabaseError::Sqlx(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                ),
            },
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
