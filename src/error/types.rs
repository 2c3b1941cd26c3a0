/**
 * API Error Types
 *
 * This module defines the error taxonomy used across handlers and store
 * operations. Each variant maps to one HTTP status code; the mapping is in
 * `status_code` and the response rendering lives in `conversion.rs`.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// All errors the API can surface to a client.
///
/// Client-caused errors (validation, authorization, missing entities,
/// redundant state changes) carry their message through to the response.
/// Server-side failures (`Database`, `ExternalService`, `Internal`) are
/// logged in full but answered with a generic message, so internal detail
/// never leaks to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired session (401)
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not the owner of the resource (403)
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Redundant state change: duplicate registration, like, or follow (400)
    #[error("{0}")]
    Conflict(String),

    /// The AI provider call failed (500)
    #[error("{0}")]
    ExternalService(String),

    /// Unexpected store failure (500)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Uniform 401 for every session-verification failure. The client is
    /// never told whether the token was missing, malformed, or expired.
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated("Unauthorized, please log in".to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            // The duplicate like/follow/registration checks answer 400, not
            // 409, matching the behavior clients already depend on.
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::ExternalService(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message placed into the response envelope.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Unauthenticated(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::ExternalService(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthenticated().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("no").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("again").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ExternalService("ai down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.public_message(), "Internal server error");

        let err = ApiError::Internal("connection pool exhausted".into());
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = ApiError::conflict("You already liked this post");
        assert_eq!(err.public_message(), "You already liked this post");
    }
}
