/**
 * Post, Like, and Comment Handlers
 *
 * HTTP handlers for the /api/posts surface: feeds, CRUD, likes, and
 * comments. Mutations carry ownership checks; redundant like/unlike calls
 * are rejected explicitly instead of silently ignored.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::auth::handlers::types::MessageEnvelope;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::posts::db;
use crate::posts::types::{
    CommentRequest, CreatePostRequest, PageParams, Pagination, PostEnvelope, PostView,
    PostsEnvelope, TagSearchParams, UpdatePostRequest,
};
use crate::server::state::AppState;

/// Longest accepted caption, in characters.
const MAX_CAPTION_CHARS: usize = 2000;
/// Longest accepted comment, in characters.
const MAX_COMMENT_CHARS: usize = 500;

fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation(format!("Invalid {what} id")))
}

async fn load_post(state: &AppState, post_id: Uuid) -> Result<db::Post, ApiError> {
    db::get_post(&state.db, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))
}

/// POST /api/posts
pub async fn create_post_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostEnvelope>), ApiError> {
    let caption = request.caption.as_deref().unwrap_or("");
    let image_url = request.image_url.as_deref().unwrap_or("");

    if caption.is_empty() || image_url.is_empty() {
        return Err(ApiError::validation("Caption and image URL are required"));
    }

    if caption.chars().count() > MAX_CAPTION_CHARS {
        return Err(ApiError::validation(
            "Caption must be at most 2000 characters",
        ));
    }

    let post = db::create_post(
        &state.db,
        user.id,
        caption,
        image_url,
        &request.tags,
        request.ai_generated,
        request.original_caption.as_deref(),
    )
    .await?;

    tracing::info!("Post created: {} by {}", post.id, user.username);

    let view = PostView::expand(&state.db, post).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostEnvelope {
            success: true,
            message: Some("Post created successfully".to_string()),
            post: view,
        }),
    ))
}

/// GET /api/posts
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PostsEnvelope>, ApiError> {
    let (page, limit) = params.normalize();
    let (posts, total) = db::list_all(&state.db, page, limit).await?;

    Ok(Json(PostsEnvelope {
        success: true,
        posts: PostView::expand_page(&state.db, posts).await?,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// GET /api/posts/feed: the viewer's own posts plus those of everyone followed.
pub async fn feed_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<Json<PostsEnvelope>, ApiError> {
    let (page, limit) = params.normalize();
    let (posts, total) = db::list_feed(&state.db, user.id, page, limit).await?;

    Ok(Json(PostsEnvelope {
        success: true,
        posts: PostView::expand_page(&state.db, posts).await?,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// GET /api/posts/user/:userId
pub async fn user_posts_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PostsEnvelope>, ApiError> {
    let author_id = parse_id(&user_id, "user")?;
    let (page, limit) = params.normalize();
    let (posts, total) = db::list_by_author(&state.db, author_id, page, limit).await?;

    Ok(Json(PostsEnvelope {
        success: true,
        posts: PostView::expand_page(&state.db, posts).await?,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// GET /api/posts/search/tag?tag=...
pub async fn search_by_tag_handler(
    State(state): State<AppState>,
    Query(params): Query<TagSearchParams>,
) -> Result<Json<PostsEnvelope>, ApiError> {
    let tag = params
        .tag
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Tag is required"))?
        .to_lowercase();

    let page_params = PageParams {
        page: params.page,
        limit: params.limit,
    };
    let (page, limit) = page_params.normalize();
    let (posts, total) = db::list_by_tag(&state.db, &tag, page, limit).await?;

    Ok(Json(PostsEnvelope {
        success: true,
        posts: PostView::expand_page(&state.db, posts).await?,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// GET /api/posts/:postId
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post_id = parse_id(&post_id, "post")?;
    let post = load_post(&state, post_id).await?;

    Ok(Json(PostEnvelope {
        success: true,
        message: None,
        post: PostView::expand(&state.db, post).await?,
    }))
}

/// PUT /api/posts/:postId, author-only partial update.
pub async fn update_post_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<String>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post_id = parse_id(&post_id, "post")?;
    let post = load_post(&state, post_id).await?;

    if post.author_id != user.id {
        return Err(ApiError::forbidden("Not authorized to update this post"));
    }

    if let Some(caption) = &request.caption {
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Err(ApiError::validation(
                "Caption must be at most 2000 characters",
            ));
        }
    }

    db::update_post_fields(
        &state.db,
        post_id,
        request.caption.as_deref().filter(|c| !c.is_empty()),
        request.tags.as_deref(),
    )
    .await?;

    let post = load_post(&state, post_id).await?;
    Ok(Json(PostEnvelope {
        success: true,
        message: Some("Post updated successfully".to_string()),
        post: PostView::expand(&state.db, post).await?,
    }))
}

/// DELETE /api/posts/:postId, author-only.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<String>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let post_id = parse_id(&post_id, "post")?;
    let post = load_post(&state, post_id).await?;

    if post.author_id != user.id {
        return Err(ApiError::forbidden("Not authorized to delete this post"));
    }

    db::delete_post(&state.db, post_id).await?;
    tracing::info!("Post deleted: {} by {}", post_id, user.username);

    Ok(Json(MessageEnvelope {
        success: true,
        message: "Post deleted successfully".to_string(),
    }))
}

/// POST /api/posts/:postId/like
pub async fn like_post_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post_id = parse_id(&post_id, "post")?;
    let post = load_post(&state, post_id).await?;

    if db::is_liked(&state.db, post_id, user.id).await? {
        return Err(ApiError::conflict("You already liked this post"));
    }

    db::add_like(&state.db, post_id, user.id).await?;

    Ok(Json(PostEnvelope {
        success: true,
        message: Some("Post liked successfully".to_string()),
        post: PostView::expand(&state.db, post).await?,
    }))
}

/// DELETE /api/posts/:postId/like
pub async fn unlike_post_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post_id = parse_id(&post_id, "post")?;
    let post = load_post(&state, post_id).await?;

    if !db::is_liked(&state.db, post_id, user.id).await? {
        return Err(ApiError::conflict("You haven't liked this post"));
    }

    db::remove_like(&state.db, post_id, user.id).await?;

    Ok(Json(PostEnvelope {
        success: true,
        message: Some("Post unliked successfully".to_string()),
        post: PostView::expand(&state.db, post).await?,
    }))
}

/// POST /api/posts/:postId/comments
pub async fn add_comment_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<PostEnvelope>), ApiError> {
    let post_id = parse_id(&post_id, "post")?;

    let text = request.text.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(ApiError::validation("Comment text is required"));
    }
    if text.chars().count() > MAX_COMMENT_CHARS {
        return Err(ApiError::validation(
            "Comment must be at most 500 characters",
        ));
    }

    let post = load_post(&state, post_id).await?;
    db::add_comment(&state.db, post_id, user.id, text).await?;

    Ok((
        StatusCode::CREATED,
        Json(PostEnvelope {
            success: true,
            message: Some("Comment added successfully".to_string()),
            post: PostView::expand(&state.db, post).await?,
        }),
    ))
}

/// DELETE /api/posts/:postId/comments/:commentId, comment-author-only.
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post_id = parse_id(&post_id, "post")?;
    let comment_id = parse_id(&comment_id, "comment")?;

    let post = load_post(&state, post_id).await?;

    let comment = db::get_comment(&state.db, comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if comment.author_id != user.id {
        return Err(ApiError::forbidden("Not authorized to delete this comment"));
    }

    db::delete_comment(&state.db, comment_id).await?;

    Ok(Json(PostEnvelope {
        success: true,
        message: Some("Comment deleted successfully".to_string()),
        post: PostView::expand(&state.db, post).await?,
    }))
}
