/**
 * Follow and Unfollow Handlers
 *
 * POST /api/auth/follow/:userId and DELETE /api/auth/unfollow/:userId.
 *
 * A follow is one row in the `follows` relation, so the caller's
 * "following" list and the target's "followers" list are views of the same
 * write and cannot diverge. Redundant calls are rejected explicitly rather
 * than silently ignored.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::auth::handlers::types::{ProfileEnvelope, UserProfile};
use crate::auth::users::{add_follow, get_user_by_id, is_following, remove_follow};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::state::AppState;

fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("Invalid user id"))
}

/// Follow another user.
pub async fn follow_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileEnvelope>, ApiError> {
    let target_id = parse_user_id(&user_id)?;

    if target_id == user.id {
        return Err(ApiError::validation("You cannot follow yourself"));
    }

    get_user_by_id(&state.db, target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if is_following(&state.db, user.id, target_id).await? {
        return Err(ApiError::conflict("You are already following this user"));
    }

    add_follow(&state.db, user.id, target_id).await?;

    let refreshed = get_user_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let profile = UserProfile::expand(&state.db, refreshed).await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: Some("User followed successfully".to_string()),
        user: profile,
    }))
}

/// Remove an existing follow.
pub async fn unfollow_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileEnvelope>, ApiError> {
    let target_id = parse_user_id(&user_id)?;

    if target_id == user.id {
        return Err(ApiError::validation("You cannot unfollow yourself"));
    }

    if !is_following(&state.db, user.id, target_id).await? {
        return Err(ApiError::conflict("You are not following this user"));
    }

    remove_follow(&state.db, user.id, target_id).await?;

    let refreshed = get_user_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let profile = UserProfile::expand(&state.db, refreshed).await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: Some("User unfollowed successfully".to_string()),
        user: profile,
    }))
}
