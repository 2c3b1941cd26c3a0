/**
 * Authentication Middleware
 *
 * This module provides the authorization guard wrapped around every
 * protected route. It extracts the session cookie, verifies the token,
 * resolves the referenced user in the store, and attaches the identity to
 * the request context.
 *
 * Public routes never pass through this layer, so no speculative identity
 * work happens for them.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::sessions::{user_id_from_token, SESSION_COOKIE};
use crate::auth::users::{get_user_by_id, User};
use crate::error::ApiError;
use crate::server::state::AppState;

/// The authenticated user resolved for this request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Authorization guard.
///
/// 1. Extracts the session token from the `token` cookie
/// 2. Verifies signature and expiry
/// 3. Loads the referenced user from the store
/// 4. Attaches `CurrentUser` to request extensions and runs the handler
///
/// Any failure short-circuits with the uniform 401 response; the downstream
/// operation never executes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(ApiError::unauthenticated)?;

    let user_id = user_id_from_token(&token, &state.config.jwt_secret)?;

    // A valid token for a user that no longer exists is still a dead session.
    let user = get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(ApiError::unauthenticated)?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Extractor form of the resolved identity, for use as a handler parameter.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("CurrentUser missing from request extensions");
                ApiError::unauthenticated()
            })
    }
}
