/**
 * API Route Definitions
 *
 * This module declares the HTTP surface in two partitions:
 *
 * - **Public routes** - registration, login, user lookup, and post reads
 * - **Protected routes** - everything acting on behalf of an identity
 *
 * The authorization guard is attached to the protected partition with
 * `route_layer`, so public requests never pay for session resolution.
 */

use axum::{middleware, routing, Router};

use crate::ai::handlers::{
    generate_caption_handler, generate_hashtags_handler, generate_suggestions_handler,
};
use crate::auth::handlers::{
    follow_user, get_me, get_user_by_username_handler, login, logout, register, unfollow_user,
    update_profile_handler,
};
use crate::middleware::auth::auth_middleware;
use crate::posts::handlers::{
    add_comment_handler, create_post_handler, delete_comment_handler, delete_post_handler,
    feed_handler, get_post_handler, like_post_handler, list_posts_handler, search_by_tag_handler,
    unlike_post_handler, update_post_handler, user_posts_handler,
};
use crate::server::state::AppState;

/// Routes reachable without a session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", routing::post(register))
        .route("/api/auth/login", routing::post(login))
        .route("/api/auth/logout", routing::post(logout))
        .route(
            "/api/auth/user/{username}",
            routing::get(get_user_by_username_handler),
        )
        .route("/api/posts", routing::get(list_posts_handler))
        .route("/api/posts/search/tag", routing::get(search_by_tag_handler))
        .route("/api/posts/user/{user_id}", routing::get(user_posts_handler))
        .route("/api/posts/{post_id}", routing::get(get_post_handler))
}

/// Routes wrapped by the authorization guard.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", routing::get(get_me))
        .route("/api/auth/profile", routing::put(update_profile_handler))
        .route("/api/auth/follow/{user_id}", routing::post(follow_user))
        .route(
            "/api/auth/unfollow/{user_id}",
            routing::delete(unfollow_user),
        )
        .route("/api/posts", routing::post(create_post_handler))
        .route("/api/posts/feed", routing::get(feed_handler))
        .route(
            "/api/posts/{post_id}",
            routing::put(update_post_handler).delete(delete_post_handler),
        )
        .route(
            "/api/posts/{post_id}/like",
            routing::post(like_post_handler).delete(unlike_post_handler),
        )
        .route(
            "/api/posts/{post_id}/comments",
            routing::post(add_comment_handler),
        )
        .route(
            "/api/posts/{post_id}/comments/{comment_id}",
            routing::delete(delete_comment_handler),
        )
        .route("/api/ai/generate-caption", routing::post(generate_caption_handler))
        .route(
            "/api/ai/generate-suggestions",
            routing::post(generate_suggestions_handler),
        )
        .route(
            "/api/ai/generate-hashtags",
            routing::post(generate_hashtags_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
