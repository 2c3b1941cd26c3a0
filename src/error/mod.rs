//! API Error Module
//!
//! This module defines the error taxonomy for the MiniGram API and its
//! conversion into HTTP responses.
//!
//! The module is organized into focused submodules:
//!
//! - **`types`** - The `ApiError` enum and its status-code mapping
//! - **`conversion`** - `IntoResponse` and `From` implementations
//!
//! Every error a handler or store operation can produce is translated at the
//! operation boundary into the standard response envelope:
//!
//! ```json
//! { "success": false, "message": "Post not found" }
//! ```
//!
//! Nothing is retried; every failure is terminal for its request.

pub mod conversion;
pub mod types;

pub use types::ApiError;
