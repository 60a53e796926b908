use crate::application::{ApplicationResult, error::ApplicationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let code = err.code();
        match err {
            ApplicationError::InvalidArgument(msg) => Self::new(StatusCode::BAD_REQUEST, code, msg),
            ApplicationError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, code, msg),
            ApplicationError::PermissionDenied(msg) => Self::new(StatusCode::FORBIDDEN, code, msg),
            ApplicationError::Unauthenticated(msg) => {
                Self::new(StatusCode::UNAUTHORIZED, code, msg)
            }
            ApplicationError::ConstraintViolation(msg) => {
                Self::new(StatusCode::CONFLICT, code, msg)
            }
            ApplicationError::Aborted(msg) => Self::new(StatusCode::CONFLICT, code, msg),
            ApplicationError::Infrastructure(msg) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, msg)
            }
        }
    }

    /// Rejection for request bodies that fail to parse.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message.into())
    }

    fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            code: self.code.to_string(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

/// Error payload shared by every RPC.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Canonical status name such as `NOT_FOUND`.
    pub code: String,
    pub error: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
