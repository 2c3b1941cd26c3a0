//! MiniGram - Main Library
//!
//! MiniGram is a minimal photo-sharing backend: cookie-based JWT sessions,
//! a follow graph, a paginated post feed with likes, comments and tags, and
//! a caption-generation proxy to an external generative-text API.
//!
//! # Module Structure
//!
//! - **`auth`** - Session tokens, user store operations, and the
//!   account/profile/follow HTTP handlers
//! - **`posts`** - Post store operations, feed assembly with denormalized
//!   expansion, and the post/like/comment handlers
//! - **`ai`** - The caption-generation adapter and its handlers
//! - **`middleware`** - The cookie-session authorization guard
//! - **`error`** - The `ApiError` taxonomy and response-envelope rendering
//! - **`routes`** - Route declarations (public vs protected) and router
//!   assembly
//! - **`server`** - Configuration, shared state, and app construction
//!
//! # Request Flow
//!
//! ```text
//! client -> authorization guard (protected routes only)
//!        -> handler (feed assembly / social mutation / AI proxy)
//!        -> SQLite store (sqlx pool)
//!        -> {success, message?, ...payload} envelope
//! ```
//!
//! All durable state lives in SQLite; requests share nothing in process
//! beyond the connection pool, the resolved configuration, and the reqwest
//! client inside the caption service.

pub mod ai;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod routes;
pub mod server;
