/**
 * Profile Update Handler
 *
 * PUT /api/auth/profile applies a partial update to the caller's display
 * fields. Absent or blank fields keep their stored value.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{ProfileEnvelope, ProfileUpdateRequest, UserProfile};
use crate::auth::users::update_profile;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::state::AppState;

pub async fn update_profile_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileEnvelope>, ApiError> {
    // Blank strings count as "not provided", so a client cannot
    // accidentally erase a field by sending an empty form value.
    let updated = update_profile(
        &state.db,
        user.id,
        non_blank(request.full_name.as_deref()),
        non_blank(request.bio.as_deref()),
        non_blank(request.profile_image.as_deref()),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = UserProfile::expand(&state.db, updated).await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: Some("Profile updated successfully".to_string()),
        user: profile,
    }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
