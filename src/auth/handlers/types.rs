/**
 * Authentication Handler Types
 *
 * Request and response types shared by the auth handlers. Wire field names
 * are camelCase to match the client contract.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::users::{list_followers, list_following, User, UserSummary};

/// Registration request. Fields are optional at the serde level so an
/// absent field reports "required" through the envelope instead of a
/// deserialization rejection.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    #[serde(default)]
    pub username: Option<String>,
    /// User's email address
    #[serde(default)]
    pub email: Option<String>,
    /// User's password (hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
    /// Confirmation copy of the password
    #[serde(default)]
    pub password_confirm: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Partial profile update. Absent fields keep their stored value.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// User payload returned by register/login (no sensitive data, no
/// follower expansion).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub profile_image: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// Full user profile with follower/following lists expanded to display
/// fields, as returned by `/me`, user lookup, and follow mutations.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Expand a user row into its profile view. The follower/following
    /// expansion is an explicit read, not a query-level hook.
    pub async fn expand(pool: &SqlitePool, user: User) -> Result<Self, sqlx::Error> {
        let followers = list_followers(pool, user.id).await?;
        let following = list_following(pool, user.id).await?;

        Ok(Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            bio: user.bio,
            profile_image: user.profile_image,
            followers,
            following,
            created_at: user.created_at,
        })
    }
}

/// Envelope for register/login responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthEnvelope {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// Envelope for profile-shaped responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserProfile,
}

/// Envelope for responses that carry no payload.
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}
