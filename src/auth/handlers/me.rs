/**
 * Current User Handler
 *
 * GET /api/auth/me returns the authenticated user's full profile with
 * follower and following lists expanded to display fields.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{ProfileEnvelope, UserProfile};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::state::AppState;

pub async fn get_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ProfileEnvelope>, ApiError> {
    let profile = UserProfile::expand(&state.db, user).await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        message: Some("User fetched successfully".to_string()),
        user: profile,
    }))
}
