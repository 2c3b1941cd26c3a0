//! Authentication and profile HTTP handlers.

pub mod follow;
pub mod login;
pub mod logout;
pub mod lookup;
pub mod me;
pub mod profile;
pub mod register;
pub mod types;

pub use follow::{follow_user, unfollow_user};
pub use login::login;
pub use logout::logout;
pub use lookup::get_user_by_username_handler;
pub use me::get_me;
pub use profile::update_profile_handler;
pub use register::register;
