/**
 * Error Conversion
 *
 * This module converts `ApiError` values into HTTP responses and adapts
 * library errors (token signing, password hashing, AI transport) into the
 * API taxonomy.
 *
 * # Response Format
 *
 * Every error renders the standard envelope:
 *
 * ```json
 * { "success": false, "message": "Not authorized to update this post" }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures carry detail worth logging but not exposing.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("request rejected ({}): {}", status, self);
        }

        let body = serde_json::json!({
            "success": false,
            "message": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::warn!("token error: {:?}", err);
        ApiError::unauthenticated()
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Internal(format!("password hashing failed: {err}"))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("AI provider request failed: {:?}", err);
        ApiError::ExternalService("Error generating content".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_envelope() {
        let response = ApiError::not_found("Post not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_jwt_error_becomes_unauthenticated() {
        let err = crate::auth::sessions::verify_token("invalid.token.here", "secret")
            .expect_err("garbage token must not verify");
        let api: ApiError = err.into();
        assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);
    }
}
