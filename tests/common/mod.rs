//! Test fixtures and helpers shared by the integration suites.
//!
//! Each test gets its own in-memory SQLite database with migrations applied
//! and a cookie-persisting `TestServer` driving the real router, so requests
//! exercise the same middleware and handlers as production.

#![allow(dead_code)]

use axum_test::{TestServer, TestServerConfig};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use minigram::routes::router::create_router;
use minigram::server::config::Config;
use minigram::server::state::AppState;

/// A running application against a fresh in-memory database.
pub struct TestApp {
    pub server: TestServer,
    pub db: SqlitePool,
}

/// Spawn the app with default test configuration.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Config::default()).await
}

/// Spawn the app with a custom configuration (e.g. a mock AI base URL).
pub async fn spawn_app_with(config: Config) -> TestApp {
    // A single pooled connection keeps the in-memory database alive and
    // shared for the whole test.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse sqlite url")
        .foreign_keys(true);
    let db = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("open in-memory database");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("run migrations");

    let state = AppState::new(db.clone(), config);
    let server = TestServer::new_with_config(
        create_router(state),
        TestServerConfig {
            save_cookies: true,
            ..TestServerConfig::default()
        },
    )
    .expect("start test server");

    TestApp { server, db }
}

/// Register a user; the session cookie lands in the server's jar.
///
/// Returns the `user` object from the response.
pub async fn register_user(server: &TestServer, username: &str, email: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": "password123",
            "passwordConfirm": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), 201, "register {username} failed");
    response.json::<Value>()["user"].clone()
}

/// Log in as an existing user, replacing the server's session cookie.
pub async fn login_user(server: &TestServer, email: &str) -> Value {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;

    assert_eq!(response.status_code(), 200, "login {email} failed");
    response.json::<Value>()["user"].clone()
}

/// Create a post as the currently logged-in user; returns the post object.
pub async fn create_post(server: &TestServer, caption: &str, tags: &[&str]) -> Value {
    let response = server
        .post("/api/posts")
        .json(&json!({
            "caption": caption,
            "imageUrl": "http://x/img.png",
            "tags": tags,
        }))
        .await;

    assert_eq!(response.status_code(), 201, "create post failed");
    response.json::<Value>()["post"].clone()
}
