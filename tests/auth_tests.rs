//! Integration tests for registration, login, sessions, and profiles.

mod common;

use common::{login_user, register_user, spawn_app};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn register_creates_user_and_session() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1",
            "passwordConfirm": "secret1",
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["username"], json!("alice"));
    assert_eq!(body["user"]["email"], json!("a@x.com"));
    // The password never appears in any form.
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    // The session cookie from registration authenticates /me immediately.
    let me = app.server.get("/api/auth/me").await;
    assert_eq!(me.status_code(), 200);
    assert_eq!(me.json::<Value>()["user"]["id"], body["user"]["id"]);
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "",
            "password": "secret1",
            "passwordConfirm": "secret1",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("All fields are required")
    );
}

#[tokio::test]
async fn register_rejects_password_mismatch() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1",
            "passwordConfirm": "secret2",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Passwords do not match")
    );
}

#[tokio::test]
async fn register_rejects_bad_email_and_short_password() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "secret1",
            "passwordConfirm": "secret1",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Invalid email format")
    );

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "short",
            "passwordConfirm": "short",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Password must be at least 6 characters")
    );
}

#[tokio::test]
async fn register_rejects_duplicates_with_distinct_messages() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice2",
            "email": "a@x.com",
            "password": "password123",
            "passwordConfirm": "password123",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Email already registered")
    );

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "other@x.com",
            "password": "password123",
            "passwordConfirm": "password123",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Username already taken")
    );
}

#[tokio::test]
async fn login_round_trips_to_same_user() {
    let mut app = spawn_app().await;
    let registered = register_user(&app.server, "alice", "a@x.com").await;

    app.server.clear_cookies();
    let logged_in = login_user(&app.server, "a@x.com").await;
    assert_eq!(logged_in["id"], registered["id"]);

    let me = app.server.get("/api/auth/me").await;
    assert_eq!(me.status_code(), 200);
    assert_eq!(me.json::<Value>()["user"]["id"], registered["id"]);
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let mut app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;
    app.server.clear_cookies();

    // Wrong password for an existing account.
    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "wrongpass" }))
        .await;

    // Unknown email entirely.
    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@x.com", "password": "password123" }))
        .await;

    // Same status either way: the endpoint is not an enumeration oracle.
    assert_eq!(wrong_password.status_code(), 401);
    assert_eq!(unknown_email.status_code(), 401);
    assert_eq!(
        wrong_password.json::<Value>()["message"],
        unknown_email.json::<Value>()["message"]
    );
}

#[tokio::test]
async fn me_requires_a_session() {
    let app = spawn_app().await;

    let response = app.server.get("/api/auth/me").await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;

    let response = app.server.post("/api/auth/logout").await;
    assert_eq!(response.status_code(), 200);

    let me = app.server.get("/api/auth/me").await;
    assert_eq!(me.status_code(), 401);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let mut app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;
    app.server.clear_cookies();

    let response = app
        .server
        .get("/api/auth/me")
        .add_header(
            axum::http::header::COOKIE,
            axum::http::HeaderValue::from_static("token=not-a-real-token"),
        )
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn profile_update_is_partial() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;

    let response = app
        .server
        .put("/api/auth/profile")
        .json(&json!({ "fullName": "Alice Liddell", "bio": "down the rabbit hole" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let user = &response.json::<Value>()["user"];
    assert_eq!(user["fullName"], json!("Alice Liddell"));
    assert_eq!(user["bio"], json!("down the rabbit hole"));

    // Updating one field leaves the others untouched.
    let response = app
        .server
        .put("/api/auth/profile")
        .json(&json!({ "bio": "still here" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let user = &response.json::<Value>()["user"];
    assert_eq!(user["fullName"], json!("Alice Liddell"));
    assert_eq!(user["bio"], json!("still here"));
}

#[tokio::test]
async fn public_user_lookup() {
    let mut app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;
    app.server.clear_cookies();

    let response = app.server.get("/api/auth/user/alice").await;
    assert_eq!(response.status_code(), 200);
    let user = &response.json::<Value>()["user"];
    assert_eq!(user["username"], json!("alice"));
    assert_eq!(user["followers"], json!([]));
    assert_eq!(user["following"], json!([]));

    let missing = app.server.get("/api/auth/user/nobody").await;
    assert_eq!(missing.status_code(), 404);
}
