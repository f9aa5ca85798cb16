use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, RuntimeErr};
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

const MISSING_REFERENCE: &str = "referenced record does not exist or is still in use";
const DUPLICATE: &str = "record already exists";
const OUT_OF_RANGE: &str = "value out of range";

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

impl AppError {
    /// The database error behind a driver failure, from either client.
    fn database_error(&self) -> Option<&(dyn DatabaseError + 'static)> {
        match self {
            AppError::DbError(err) => err.as_database_error(),
            AppError::OrmError(
                DbErr::Exec(RuntimeErr::SqlxError(err)) | DbErr::Query(RuntimeErr::SqlxError(err)),
            ) => err.as_database_error(),
            _ => None,
        }
    }

    /// Constraint violations and out-of-range values are caller mistakes;
    /// everything else from the driver stays opaque.
    fn constraint_violation(&self) -> Option<(StatusCode, &'static str)> {
        let err = self.database_error()?;
        if err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
            return Some((StatusCode::BAD_REQUEST, OUT_OF_RANGE));
        }
        match err.kind() {
            ErrorKind::ForeignKeyViolation => Some((StatusCode::BAD_REQUEST, MISSING_REFERENCE)),
            ErrorKind::UniqueViolation => Some((StatusCode::CONFLICT, DUPLICATE)),
            ErrorKind::CheckViolation => Some((StatusCode::BAD_REQUEST, OUT_OF_RANGE)),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        if let Some((status, _)) = self.constraint_violation() {
            return status;
        }
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.constraint_violation() {
            Some((_, message)) => message.to_string(),
            None => self.to_string(),
        };

        if status.is_server_error() {
            // Driver details stay in the logs.
            tracing::error!(error = ?self, "request failed");
        } else if matches!(self, AppError::DbError(_) | AppError::OrmError(_)) {
            tracing::warn!(error = ?self, "constraint violation");
        }

        (status, axum::Json(ErrorBody { error: message })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
