//! Authentication: session tokens, user store operations, and the
//! account/profile/follow HTTP surface.

pub mod handlers;
pub mod sessions;
pub mod users;
