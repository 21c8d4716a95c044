//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use malajunta::adapters::mock::{MockHttpClient, MockResponse};
use malajunta::config::{AppConfig, BackendConfig};
use malajunta::context::AppContext;
use malajunta::models::MediaPost;
use malajunta::traits::Method;
use serde_json::{json, Value};
use uuid::Uuid;

pub const BASE: &str = "https://abc.supabase.co";

pub fn rest(path: &str) -> String {
    format!("{}/rest/v1/{}", BASE, path)
}

pub fn token_json(user_id: Uuid) -> Value {
    json!({
        "access_token": "access-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-1",
        "user": {
            "id": user_id,
            "email": "ana@example.com",
            "user_metadata": {"full_name": "Ana Pérez"}
        }
    })
}

pub fn profile_json(user_id: Uuid, avatar_url: Option<&str>) -> Value {
    json!({
        "id": user_id,
        "email": "ana@example.com",
        "full_name": "Ana Pérez",
        "avatar_url": avatar_url,
        "created_at": "2025-05-10T12:00:00+00:00",
        "updated_at": "2025-05-10T12:00:00+00:00"
    })
}

pub fn post(id: Uuid, owner: Uuid, likes: u32) -> MediaPost {
    serde_json::from_value(json!({
        "id": id,
        "user_id": owner,
        "image_url": format!("{}/storage/v1/object/public/media-images/{}/1.png", BASE, owner),
        "description": "Raid del jueves",
        "created_at": "2025-05-10T12:00:00+00:00",
        "author_name": "Ana Pérez",
        "author_avatar": null,
        "like_count": likes,
        "comment_count": 0
    }))
    .unwrap()
}

/// Context over the recording mock, with no session file.
pub fn mock_context() -> (AppContext, MockHttpClient) {
    let mock = MockHttpClient::new();
    let backend = BackendConfig::new(BASE, "anon-key").unwrap();
    let config = AppConfig::new(backend).with_session_path(None);
    let (notice_tx, _notice_rx) = tokio::sync::mpsc::unbounded_channel();
    let ctx = AppContext::with_http(config, Arc::new(mock.clone()), notice_tx);
    (ctx, mock)
}

/// Context with a signed-in user whose profile exists.
pub async fn signed_in_context() -> (AppContext, MockHttpClient, Uuid) {
    let (ctx, mock) = mock_context();
    let user_id = Uuid::new_v4();
    mock.on(
        Method::Post,
        &format!("{}/auth/v1/token", BASE),
        MockResponse::json(200, token_json(user_id)),
    );
    mock.on(
        Method::Get,
        &rest("profiles"),
        MockResponse::json(200, profile_json(user_id, None)),
    );
    ctx.identity
        .sign_in("ana@example.com", "secreto")
        .await
        .unwrap();
    (ctx, mock, user_id)
}
