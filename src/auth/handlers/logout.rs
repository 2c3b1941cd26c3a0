/**
 * Logout Handler
 *
 * POST /api/auth/logout replaces the session cookie with an immediately
 * expiring one. The JWT itself is not revocable; clearing the cookie is the
 * whole of the logout contract.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::handlers::types::MessageEnvelope;
use crate::auth::sessions::clear_session_cookie;
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageEnvelope>), ApiError> {
    let jar = jar.add(clear_session_cookie(state.config.secure_cookies));

    Ok((
        jar,
        Json(MessageEnvelope {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}
