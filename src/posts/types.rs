/**
 * Post Handler Types
 *
 * Request and response types for the post, like, and comment endpoints,
 * plus the denormalized `PostView` expansion. Wire field names are
 * camelCase to match the client contract.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::posts::db::{get_author_summary, list_comments, list_likes, list_tags, Post};

/// Create-post request. The required fields are optional at the serde
/// level so an absent field reports "required" through the envelope
/// instead of a deserialization rejection.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub original_caption: Option<String>,
}

/// Partial post update: only provided fields are applied.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdatePostRequest {
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// New-comment request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Page/limit query parameters for the list endpoints.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Clamp to the documented contract: page >= 1 (default 1),
    /// limit >= 1 (default 10).
    pub fn normalize(self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).max(1);
        (page, limit)
    }
}

/// Query parameters for tag search.
#[derive(Deserialize, Debug, Default)]
pub struct TagSearchParams {
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Pagination block attached to every list response.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub page_count: i64,
}

impl Pagination {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            page_count: page_count(total, limit),
        }
    }
}

/// ceil(total / limit); zero items means zero pages.
pub fn page_count(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// Display-relevant author fields.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_image: Option<String>,
}

/// A like, expanded to the liking user's display fields.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct LikeSummary {
    pub id: Uuid,
    pub username: String,
}

/// A comment with its author expanded.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub author: CommentAuthor,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: Uuid,
    pub username: String,
    pub profile_image: Option<String>,
}

/// A post with every identifier reference expanded to display fields:
/// author, likes, and comment authors.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub caption: String,
    pub image_url: String,
    pub author: AuthorSummary,
    pub tags: Vec<String>,
    pub likes: Vec<LikeSummary>,
    pub like_count: usize,
    pub comments: Vec<CommentView>,
    pub comment_count: usize,
    pub ai_generated: bool,
    pub original_caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    /// Expand a post row into its response shape. Expansion is an explicit
    /// read per post, not an implicit query hook.
    pub async fn expand(pool: &SqlitePool, post: Post) -> Result<Self, sqlx::Error> {
        let author = get_author_summary(pool, post.author_id).await?;
        let tags = list_tags(pool, post.id).await?;
        let likes = list_likes(pool, post.id).await?;
        let comments = list_comments(pool, post.id).await?;

        Ok(Self {
            id: post.id,
            caption: post.caption,
            image_url: post.image_url,
            author,
            tags,
            like_count: likes.len(),
            likes,
            comment_count: comments.len(),
            comments,
            ai_generated: post.ai_generated,
            original_caption: post.original_caption,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }

    /// Expand a whole result page in listing order.
    pub async fn expand_page(
        pool: &SqlitePool,
        posts: Vec<Post>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(Self::expand(pool, post).await?);
        }
        Ok(views)
    }
}

/// Envelope for list responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct PostsEnvelope {
    pub success: bool,
    pub posts: Vec<PostView>,
    pub pagination: Pagination,
}

/// Envelope for single-post responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct PostEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub post: PostView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(12, 5), 3);
        assert_eq!(page_count(10, 5), 2);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(0, 10), 0);
    }

    #[test]
    fn test_page_params_defaults_and_clamping() {
        assert_eq!(PageParams::default().normalize(), (1, 10));
        let params = PageParams {
            page: Some(0),
            limit: Some(-3),
        };
        assert_eq!(params.normalize(), (1, 1));
        let params = PageParams {
            page: Some(4),
            limit: Some(25),
        };
        assert_eq!(params.normalize(), (4, 25));
    }
}
