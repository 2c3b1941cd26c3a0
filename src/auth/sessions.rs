/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions,
 * plus construction of the HTTP-only session cookie the token travels in.
 *
 * The signing secret and token lifetime come from `Config` and are passed in
 * explicitly; nothing here reads the environment.
 */

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ApiError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `user_id` - User ID (UUID)
/// * `secret` - HMAC signing secret
/// * `ttl_days` - Token lifetime in days
///
/// # Returns
/// JWT token string
pub fn create_token(
    user_id: uuid::Uuid,
    secret: &str,
    ttl_days: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_days * 24 * 60 * 60,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `token` - JWT token string
/// * `secret` - HMAC signing secret
///
/// # Returns
/// Decoded claims, or an error on any signature/expiry failure
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Extract the user ID from a verified token.
///
/// Every failure mode (bad signature, expired, unparseable subject) collapses
/// into the same `Unauthenticated` error so clients cannot probe token
/// structure.
pub fn user_id_from_token(token: &str, secret: &str) -> Result<uuid::Uuid, ApiError> {
    let claims = verify_token(token, secret).map_err(|_| ApiError::unauthenticated())?;
    uuid::Uuid::parse_str(&claims.sub).map_err(|_| ApiError::unauthenticated())
}

/// Build the session cookie carrying `token`.
///
/// HttpOnly and SameSite=Strict always; Secure only when the server runs
/// behind TLS (production).
pub fn session_cookie(token: String, secure: bool, ttl_days: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::days(ttl_days as i64))
        .build()
}

/// Build the removal cookie used by logout.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
