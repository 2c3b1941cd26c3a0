/**
 * User Model and Database Operations
 *
 * This module handles user rows and the follow graph.
 *
 * Follower/following lists are two projections of the single `follows`
 * relation, so a follow or unfollow is one row insert/delete and the two
 * views cannot disagree.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt); never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name (optional)
    pub full_name: Option<String>,
    /// Profile bio (optional)
    pub bio: Option<String>,
    /// Avatar URL or data URI (optional)
    pub profile_image: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Display-relevant projection of a user, used when expanding follower and
/// following lists.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub profile_image: Option<String>,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, full_name, bio, profile_image, created_at, updated_at";

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        full_name: None,
        bio: None,
        profile_image: None,
        created_at: now,
        updated_at: now,
    })
}

/// Get user by email
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Find a user matching either the username or the email.
///
/// Used by registration to report which of the two is already taken.
pub async fn find_by_username_or_email(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ?"
    ))
    .bind(username)
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Apply a partial profile update.
///
/// Fields passed as `None` keep their stored value; `updated_at` is bumped
/// either way.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    full_name: Option<&str>,
    bio: Option<&str>,
    profile_image: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET full_name = COALESCE(?, full_name),
            bio = COALESCE(?, bio),
            profile_image = COALESCE(?, profile_image),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(full_name)
    .bind(bio)
    .bind(profile_image)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    get_user_by_id(pool, user_id).await
}

/// Users who follow `user_id`.
pub async fn list_followers(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.profile_image
        FROM follows f
        JOIN users u ON u.id = f.follower_id
        WHERE f.followee_id = ?
        ORDER BY f.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Users whom `user_id` follows.
pub async fn list_following(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.profile_image
        FROM follows f
        JOIN users u ON u.id = f.followee_id
        WHERE f.follower_id = ?
        ORDER BY f.created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Whether `follower` currently follows `followee`.
pub async fn is_following(
    pool: &SqlitePool,
    follower: Uuid,
    followee: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM follows WHERE follower_id = ? AND followee_id = ?",
    )
    .bind(follower)
    .bind(followee)
    .fetch_optional(pool)
    .await?;

    Ok(exists.is_some())
}

/// Record that `follower` follows `followee`.
pub async fn add_follow(
    pool: &SqlitePool,
    follower: Uuid,
    followee: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)")
        .bind(follower)
        .bind(followee)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove the follow edge from `follower` to `followee`.
pub async fn remove_follow(
    pool: &SqlitePool,
    follower: Uuid,
    followee: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
        .bind(follower)
        .bind(followee)
        .execute(pool)
        .await?;

    Ok(())
}
