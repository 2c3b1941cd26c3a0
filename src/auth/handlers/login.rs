/**
 * Login Handler
 *
 * This module implements user authentication for POST /api/auth/login.
 *
 * # Security
 *
 * - Passwords are verified with bcrypt
 * - Unknown email and wrong password answer the same 401 "Invalid
 *   credentials", so the endpoint is not a user-enumeration oracle
 * - The session token is delivered only in an HttpOnly cookie
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::verify;

use crate::auth::handlers::types::{AuthEnvelope, LoginRequest, UserResponse};
use crate::auth::sessions::{create_token, session_cookie};
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400` - missing email or password
/// * `401` - unknown email or wrong password (indistinguishable)
/// * `500` - store or token-signing failure
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthEnvelope>), ApiError> {
    let email = request.email.as_deref().unwrap_or("");
    let password = request.password.as_deref().unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let user = get_user_by_email(&state.db, email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid credentials".to_string()))?;

    let valid = verify(password, &user.password_hash)?;
    if !valid {
        tracing::warn!("Failed login attempt for: {}", email);
        return Err(ApiError::Unauthenticated("Invalid credentials".to_string()));
    }

    let token = create_token(user.id, &state.config.jwt_secret, state.config.session_ttl_days)?;
    let jar = jar.add(session_cookie(
        token,
        state.config.secure_cookies,
        state.config.session_ttl_days,
    ));

    tracing::info!("User logged in: {}", user.username);

    Ok((
        jar,
        Json(AuthEnvelope {
            success: true,
            message: "Logged in successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}
