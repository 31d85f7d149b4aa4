use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use charity_core::errors::{AuthError, DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

fn core_status(e: &CoreError) -> (StatusCode, String) {
    match e {
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        CoreError::ConstraintViolation(_) => (StatusCode::CONFLICT, e.to_string()),
        CoreError::Database(DatabaseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "Not Found".to_string())
        }
        CoreError::Database(DatabaseError::UniqueViolation(_))
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => {
            (StatusCode::CONFLICT, e.to_string())
        }
        // Disabled accounts look like bad credentials from the outside.
        CoreError::Auth(AuthError::InvalidCredentials) | CoreError::Auth(AuthError::Inactive) => (
            StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials.to_string(),
        ),
        CoreError::Mail(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            ApiError::Forbidden(reason) => (StatusCode::FORBIDDEN, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let field = match &self {
            ApiError::Core(CoreError::Validation(v)) => v.field_name().map(str::to_string),
            _ => None,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
            field,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
