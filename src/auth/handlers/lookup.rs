/**
 * Public User Lookup Handler
 *
 * GET /api/auth/user/:username returns any user's public profile. No
 * authentication required.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::auth::handlers::types::{ProfileEnvelope, UserProfile};
use crate::auth::users::get_user_by_username;
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn get_user_by_username_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProfileEnvelope>, ApiError> {
    let user = get_user_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = UserProfile::expand(&state.db, user).await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: None,
        user: profile,
    }))
}
