//! Gateway requests against a local HTTP server.

use std::sync::Arc;

use bytes::Bytes;
use malajunta::adapters::ReqwestHttpClient;
use malajunta::config::BackendConfig;
use malajunta::gateway::{Bucket, Gateway};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> Gateway {
    let config = BackendConfig::new(server.uri(), "anon-key").unwrap();
    Gateway::new(config, Arc::new(ReqwestHttpClient::new()))
}

#[tokio::test]
async fn test_sign_in_posts_credentials() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .and(body_json(json!({"email": "ana@example.com", "password": "secreto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "user": {"id": user_id, "email": "ana@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway(&server);

    let session = gateway.sign_in("  ana@example.com ", "secreto").await.unwrap();

    assert_eq!(session.user.id, user_id);
    assert_eq!(gateway.session().await.unwrap().access_token, "access-1");
}

#[tokio::test]
async fn test_requests_carry_anon_key_when_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/media_posts_with_stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let gateway = gateway(&server);

    let posts = gateway.get_all_media_posts().await.unwrap();
    assert!(posts.is_empty());

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(request.headers.get("apikey").unwrap(), "anon-key");
    assert_eq!(
        request.headers.get("authorization").unwrap(),
        "Bearer anon-key"
    );
}

#[tokio::test]
async fn test_feed_reads_stats_view() {
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/rest/v1/media_posts_with_stats"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": Uuid::new_v4(),
            "user_id": owner,
            "image_url": "https://cdn.example/1.png",
            "description": "Raid",
            "created_at": "2025-05-10T12:00:00+00:00",
            "author_name": "Ana",
            "author_avatar": null,
            "like_count": 3,
            "comment_count": 1
        }])))
        .mount(&server)
        .await;

    let posts = gateway(&server).get_all_media_posts().await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, owner);
    assert_eq!(posts[0].like_count, 3);
}

#[tokio::test]
async fn test_missing_profile_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "details": "The result contains 0 rows",
            "hint": null,
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).get_profile(Uuid::new_v4()).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_error_is_not_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = gateway(&server).get_profile(Uuid::new_v4()).await.unwrap_err();

    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_character_search_is_case_insensitive_substring() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/characters"))
        .and(query_param("name", "ilike.%gro%"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": Uuid::new_v4(),
            "name": "Grommash",
            "subclass": "Brujo",
            "user_id": Uuid::new_v4()
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let found = gateway(&server).search_characters(" gro ").await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Grommash");
}

#[tokio::test]
async fn test_upload_never_overwrites() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/avatars/u1/avatar-1.png"))
        .and(header("x-upsert", "false"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Key": "avatars/u1/avatar-1.png"})))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway(&server);

    gateway
        .upload(
            Bucket::Avatars,
            "u1/avatar-1.png",
            Bytes::from_static(b"\x89PNG"),
            "image/png",
        )
        .await
        .unwrap();

    assert_eq!(
        gateway.public_url(Bucket::Avatars, "u1/avatar-1.png"),
        format!("{}/storage/v1/object/public/avatars/u1/avatar-1.png", server.uri())
    );
}

#[tokio::test]
async fn test_delete_user_calls_rpc() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/delete_user"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server).delete_user().await.unwrap();
}

#[tokio::test]
async fn test_get_user_requires_session() {
    let server = MockServer::start().await;
    let gateway = gateway(&server);

    assert!(gateway.get_user().await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_user_sends_access_token() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "user": {"id": user_id, "email": "ana@example.com"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": "ana@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway(&server);
    gateway.sign_in("ana@example.com", "secreto").await.unwrap();

    let user = gateway.get_user().await.unwrap();

    assert_eq!(user.id, user_id);
}
