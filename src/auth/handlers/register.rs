/**
 * Registration Handler
 *
 * This module implements user registration for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate field presence, password confirmation, email and username shape
 * 2. Reject duplicate username or email
 * 3. Hash the password with bcrypt
 * 4. Create the user and issue a session cookie
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt (DEFAULT_COST) and never returned
 * - The session token is delivered only in an HttpOnly cookie
 */

use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{AuthEnvelope, RegisterRequest, UserResponse};
use crate::auth::sessions::{create_token, session_cookie};
use crate::auth::users::{create_user, find_by_username_or_email};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Username rule: 3-30 characters, alphanumeric and underscore only.
fn is_valid_username(username: &str) -> bool {
    (3..=30).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Minimal email shape check: something before and after a single '@', with
/// a dot in the domain part.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Registration handler
///
/// # Errors
///
/// * `400` - missing fields, password mismatch, malformed email/username,
///   short password, or duplicate username/email
/// * `500` - hashing, token signing, or store failure
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthEnvelope>), ApiError> {
    let username = request.username.as_deref().unwrap_or("");
    let email = request.email.as_deref().unwrap_or("");
    let password = request.password.as_deref().unwrap_or("");
    let password_confirm = request.password_confirm.as_deref().unwrap_or("");

    tracing::info!("Register request for username: {}", username);

    if username.is_empty() || email.is_empty() || password.is_empty() || password_confirm.is_empty()
    {
        return Err(ApiError::validation("All fields are required"));
    }

    if password != password_confirm {
        return Err(ApiError::validation("Passwords do not match"));
    }

    if !is_valid_email(email) {
        return Err(ApiError::validation("Invalid email format"));
    }

    if !is_valid_username(username) {
        return Err(ApiError::validation(
            "Username must be 3-30 characters of letters, numbers, or underscore",
        ));
    }

    if password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }

    if let Some(existing) = find_by_username_or_email(&state.db, username, email).await? {
        let message = if existing.email == email {
            "Email already registered"
        } else {
            "Username already taken"
        };
        return Err(ApiError::conflict(message));
    }

    let password_hash = hash(password, DEFAULT_COST)?;
    let user = create_user(&state.db, username, email, &password_hash).await?;

    let token = create_token(user.id, &state.config.jwt_secret, state.config.session_ttl_days)?;
    let jar = jar.add(session_cookie(
        token,
        state.config.secure_cookies,
        state.config.session_ttl_days,
    ));

    tracing::info!("User registered: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthEnvelope {
            success: true,
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("user_42"));
        assert!(is_valid_username("_leading"));
        assert!(is_valid_username(&"a".repeat(30)));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username(&"a".repeat(31)));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username("dash-ed"));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }
}
