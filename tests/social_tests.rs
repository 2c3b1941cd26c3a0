//! Integration tests for the follow graph.

mod common;

use common::{login_user, register_user, spawn_app};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn follow_updates_both_projections() {
    let app = spawn_app().await;
    let bob = register_user(&app.server, "bob", "b@x.com").await;
    register_user(&app.server, "alice", "a@x.com").await;

    let response = app
        .server
        .post(&format!("/api/auth/follow/{}", bob["id"].as_str().unwrap()))
        .await;
    assert_eq!(response.status_code(), 200);

    // The caller's refreshed profile lists bob in "following".
    let user = &response.json::<Value>()["user"];
    assert_eq!(user["following"][0]["username"], json!("bob"));

    // And bob's public profile lists alice in "followers".
    let bob_profile = app.server.get("/api/auth/user/bob").await.json::<Value>();
    assert_eq!(bob_profile["user"]["followers"][0]["username"], json!("alice"));
}

#[tokio::test]
async fn follow_yourself_is_rejected() {
    let app = spawn_app().await;
    let alice = register_user(&app.server, "alice", "a@x.com").await;

    let response = app
        .server
        .post(&format!("/api/auth/follow/{}", alice["id"].as_str().unwrap()))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("You cannot follow yourself")
    );
}

#[tokio::test]
async fn duplicate_follow_is_rejected() {
    let app = spawn_app().await;
    let bob = register_user(&app.server, "bob", "b@x.com").await;
    register_user(&app.server, "alice", "a@x.com").await;

    let bob_id = bob["id"].as_str().unwrap();
    let first = app.server.post(&format!("/api/auth/follow/{bob_id}")).await;
    assert_eq!(first.status_code(), 200);

    let second = app.server.post(&format!("/api/auth/follow/{bob_id}")).await;
    assert_eq!(second.status_code(), 400);
    assert_eq!(
        second.json::<Value>()["message"],
        json!("You are already following this user")
    );
}

#[tokio::test]
async fn follow_unknown_user_is_not_found() {
    let app = spawn_app().await;
    register_user(&app.server, "alice", "a@x.com").await;

    let response = app
        .server
        .post(&format!("/api/auth/follow/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn unfollow_removes_the_edge() {
    let app = spawn_app().await;
    let bob = register_user(&app.server, "bob", "b@x.com").await;
    register_user(&app.server, "alice", "a@x.com").await;

    let bob_id = bob["id"].as_str().unwrap();
    app.server.post(&format!("/api/auth/follow/{bob_id}")).await;

    let response = app
        .server
        .delete(&format!("/api/auth/unfollow/{bob_id}"))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["user"]["following"], json!([]));

    let bob_profile = app.server.get("/api/auth/user/bob").await.json::<Value>();
    assert_eq!(bob_profile["user"]["followers"], json!([]));
}

#[tokio::test]
async fn unfollow_without_follow_is_rejected() {
    let app = spawn_app().await;
    let bob = register_user(&app.server, "bob", "b@x.com").await;
    register_user(&app.server, "alice", "a@x.com").await;

    let response = app
        .server
        .delete(&format!("/api/auth/unfollow/{}", bob["id"].as_str().unwrap()))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("You are not following this user")
    );
}

#[tokio::test]
async fn follow_requires_a_session() {
    let mut app = spawn_app().await;
    let bob = register_user(&app.server, "bob", "b@x.com").await;
    app.server.clear_cookies();

    let response = app
        .server
        .post(&format!("/api/auth/follow/{}", bob["id"].as_str().unwrap()))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn follow_survives_relogin() {
    let mut app = spawn_app().await;
    let bob = register_user(&app.server, "bob", "b@x.com").await;
    register_user(&app.server, "alice", "a@x.com").await;

    app.server
        .post(&format!("/api/auth/follow/{}", bob["id"].as_str().unwrap()))
        .await;

    app.server.clear_cookies();
    login_user(&app.server, "a@x.com").await;

    let me = app.server.get("/api/auth/me").await.json::<Value>();
    assert_eq!(me["user"]["following"][0]["username"], json!("bob"));
}
