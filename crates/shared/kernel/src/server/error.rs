use crate::keys::KeyError;
use crate::server::state::ApiStateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use confhub_database::DatabaseError;
use serde::Serialize;
use std::borrow::Cow;
use tracing::error;
use utoipa::ToSchema;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every handler. Renders as `{ "error": "<kind>", "message": "<text>" }`.
#[confhub_derive::confhub_error]
pub enum ApiError {
    #[error("{message}{}", format_context(context))]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(context))]
    Unauthorized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(context))]
    Forbidden { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Storage, state or other server-side failures. Details are logged, not returned.
    #[error("Internal server error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized { message: message.into(), context: None }
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden { message: message.into(), context: None }
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict { message: message.into(), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }

    /// The client-facing message, without context.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message, .. } => message.as_ref(),
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if let Self::Internal { .. } = self {
            error!(error = %self, "Request failed");
            "Internal server error".to_owned()
        } else {
            self.message().to_owned()
        };

        (status, Json(ErrorBody { error: self.kind(), message })).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self::Internal { message: err.to_string().into(), context: Some("Database".into()) }
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::Internal { message: err.to_string().into(), context: Some("State".into()) }
    }
}

impl From<KeyError> for ApiError {
    fn from(err: KeyError) -> Self {
        Self::BadRequest { message: err.to_string().into(), context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_expose_message() {
        let (status, body) = body_of(ApiError::conflict("There are no seats available.")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "There are no seats available.");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let (status, body) = body_of(ApiError::from("connection reset by peer")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal");
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_key_errors_are_bad_requests() {
        let err = ApiError::from(crate::keys::EntityKey::verify("session:1", "conference").unwrap_err());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_context_does_not_leak_into_message() {
        let err: ApiResult<()> = Err(ApiError::not_found("No conference found with key: x"));
        let err = err.context("loading").unwrap_err();
        assert_eq!(err.message(), "No conference found with key: x");
        assert_eq!(err.to_string(), "No conference found with key: x (loading)");
    }
}
