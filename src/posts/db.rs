//! Database operations for posts, likes, comments, and tags.
//!
//! Every list query orders newest first with the post id as a tie-break, so
//! pages are deterministic even for equal timestamps. Multi-table writes
//! (post + tags, post deletion with children) run inside one transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::posts::types::{AuthorSummary, CommentAuthor, CommentView, LikeSummary};

/// Post row as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub caption: String,
    pub image_url: String,
    pub author_id: Uuid,
    pub ai_generated: bool,
    pub original_caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

const POST_COLUMNS: &str =
    "id, caption, image_url, author_id, ai_generated, original_caption, created_at, updated_at";

const PAGE_ORDER: &str = "ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?";

/// Lower-case and trim tags, dropping empties and duplicates while keeping
/// first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Create a post and its tag rows in one transaction.
pub async fn create_post(
    pool: &SqlitePool,
    author_id: Uuid,
    caption: &str,
    image_url: &str,
    tags: &[String],
    ai_generated: bool,
    original_caption: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let tags = normalize_tags(tags);

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO posts (id, caption, image_url, author_id, ai_generated, original_caption, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(caption)
    .bind(image_url)
    .bind(author_id)
    .bind(ai_generated)
    .bind(original_caption)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for tag in &tags {
        sqlx::query("INSERT INTO post_tags (post_id, tag) VALUES (?, ?)")
            .bind(id)
            .bind(tag)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(Post {
        id,
        caption: caption.to_string(),
        image_url: image_url.to_string(),
        author_id,
        ai_generated,
        original_caption: original_caption.map(|s| s.to_string()),
        created_at: now,
        updated_at: now,
    })
}

/// Get a post by id.
pub async fn get_post(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All posts, newest first.
pub async fn list_all(
    pool: &SqlitePool,
    page: i64,
    limit: i64,
) -> Result<(Vec<Post>, i64), sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts {PAGE_ORDER}"
    ))
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?;

    Ok((posts, total))
}

/// Posts authored by the viewer or by anyone the viewer follows.
pub async fn list_feed(
    pool: &SqlitePool,
    viewer_id: Uuid,
    page: i64,
    limit: i64,
) -> Result<(Vec<Post>, i64), sqlx::Error> {
    let filter = "author_id = ? OR author_id IN (SELECT followee_id FROM follows WHERE follower_id = ?)";

    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE {filter} {PAGE_ORDER}"
    ))
    .bind(viewer_id)
    .bind(viewer_id)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await?;

    let total: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM posts WHERE {filter}"))
            .bind(viewer_id)
            .bind(viewer_id)
            .fetch_one(pool)
            .await?;

    Ok((posts, total))
}

/// Posts by a single author, newest first.
pub async fn list_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
    page: i64,
    limit: i64,
) -> Result<(Vec<Post>, i64), sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE author_id = ? {PAGE_ORDER}"
    ))
    .bind(author_id)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok((posts, total))
}

/// Posts carrying the (already lower-cased) tag, newest first.
pub async fn list_by_tag(
    pool: &SqlitePool,
    tag: &str,
    page: i64,
    limit: i64,
) -> Result<(Vec<Post>, i64), sqlx::Error> {
    let filter = "id IN (SELECT post_id FROM post_tags WHERE tag = ?)";

    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE {filter} {PAGE_ORDER}"
    ))
    .bind(tag)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM posts WHERE {filter}"))
        .bind(tag)
        .fetch_one(pool)
        .await?;

    Ok((posts, total))
}

/// Apply a partial update: caption and/or a full tag replacement.
pub async fn update_post_fields(
    pool: &SqlitePool,
    post_id: Uuid,
    caption: Option<&str>,
    tags: Option<&[String]>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE posts SET caption = COALESCE(?, caption), updated_at = ? WHERE id = ?")
        .bind(caption)
        .bind(Utc::now())
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    if let Some(tags) = tags {
        let tags = normalize_tags(tags);
        sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        for tag in &tags {
            sqlx::query("INSERT INTO post_tags (post_id, tag) VALUES (?, ?)")
                .bind(post_id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await
}

/// Delete a post and its tag, like, and comment children.
pub async fn delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for table in ["comments", "post_likes", "post_tags"] {
        sqlx::query(&format!("DELETE FROM {table} WHERE post_id = ?"))
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}

/// Whether the user has already liked the post.
pub async fn is_liked(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM post_likes WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(exists.is_some())
}

/// Record a like.
pub async fn add_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(post_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove a like.
pub async fn remove_like(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Append a comment.
pub async fn add_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author_id: Uuid,
    body: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO comments (id, post_id, author_id, body, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(body)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Comment {
        id,
        post_id,
        author_id,
        body: body.to_string(),
        created_at: now,
    })
}

/// Get a comment by id.
pub async fn get_comment(pool: &SqlitePool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, post_id, author_id, body, created_at FROM comments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a comment by id.
pub async fn delete_comment(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// The author's display fields for expansion.
pub async fn get_author_summary(
    pool: &SqlitePool,
    author_id: Uuid,
) -> Result<AuthorSummary, sqlx::Error> {
    sqlx::query_as::<_, AuthorSummary>(
        "SELECT id, username, full_name, profile_image FROM users WHERE id = ?",
    )
    .bind(author_id)
    .fetch_one(pool)
    .await
}

/// Tags of a post, alphabetical.
pub async fn list_tags(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT tag FROM post_tags WHERE post_id = ? ORDER BY tag")
        .bind(post_id)
        .fetch_all(pool)
        .await
}

/// Likes of a post expanded to usernames, oldest first.
pub async fn list_likes(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Vec<LikeSummary>, sqlx::Error> {
    sqlx::query_as::<_, LikeSummary>(
        r#"
        SELECT u.id, u.username
        FROM post_likes l
        JOIN users u ON u.id = l.user_id
        WHERE l.post_id = ?
        ORDER BY l.created_at
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Comments of a post with their authors expanded, oldest first.
pub async fn list_comments(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Vec<CommentView>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.body, c.created_at, u.id AS author_id, u.username, u.profile_image
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = ?
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CommentView {
            id: row.get("id"),
            author: CommentAuthor {
                id: row.get("author_id"),
                username: row.get("username"),
                profile_image: row.get("profile_image"),
            },
            text: row.get("body"),
            created_at: row.get("created_at"),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " Sunset ".to_string(),
            "BEACH".to_string(),
            "sunset".to_string(),
            "".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["sunset", "beach"]);
    }

    #[test]
    fn test_normalize_tags_empty() {
        assert!(normalize_tags(&[]).is_empty());
    }
}
