//! Feed behavior against the recording mock.

mod common;

use common::{post, rest, signed_in_context};
use malajunta::adapters::mock::MockResponse;
use malajunta::traits::Method;
use malajunta::view_state::{messages, FeedView, PostView};
use uuid::Uuid;

fn feed_with(posts: Vec<malajunta::models::MediaPost>) -> FeedView {
    FeedView {
        posts: posts.into_iter().map(PostView::new).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_failed_delete_keeps_post() {
    let (ctx, mock, user_id) = signed_in_context().await;
    mock.on(
        Method::Delete,
        &rest("media_posts"),
        MockResponse::json(500, serde_json::json!({"message": "boom"})),
    );

    let id = Uuid::new_v4();
    let mut feed = feed_with(vec![post(id, user_id, 0)]);

    assert!(feed.delete_post(&ctx, id).await.is_err());
    assert_eq!(feed.posts.len(), 1);
    assert_eq!(feed.posts[0].error.as_deref(), Some(messages::POST_DELETE_FAILED));
}

#[tokio::test]
async fn test_successful_delete_removes_post() {
    let (ctx, mock, user_id) = signed_in_context().await;
    mock.on(Method::Delete, &rest("media_posts"), MockResponse::status(204));

    let keep = Uuid::new_v4();
    let gone = Uuid::new_v4();
    let mut feed = feed_with(vec![post(keep, user_id, 0), post(gone, user_id, 0)]);
    feed.selected = 1;

    feed.delete_post(&ctx, gone).await.unwrap();
    assert_eq!(feed.posts.len(), 1);
    assert_eq!(feed.posts[0].id(), keep);
    assert_eq!(feed.selected, 0);

    let req = &mock.requests_to(Method::Delete, "/media_posts")[0];
    assert!(req.url.contains(&format!("id=eq.{}", gone)));
}

#[tokio::test]
async fn test_apply_post_update_replaces_in_place() {
    let owner = Uuid::new_v4();
    let id = Uuid::new_v4();
    let mut feed = feed_with(vec![post(Uuid::new_v4(), owner, 0), post(id, owner, 1)]);

    let mut updated = post(id, owner, 9);
    updated.description = "Editada".to_string();
    feed.apply_post_update(updated);

    assert_eq!(feed.posts[1].post.description, "Editada");
    assert_eq!(feed.posts[1].like.count, 9);
    assert_eq!(feed.posts.len(), 2);
}

#[tokio::test]
async fn test_load_fetches_stats_view_and_extras() {
    let (ctx, mock, user_id) = signed_in_context().await;
    let id = Uuid::new_v4();
    let row = serde_json::to_value(post(id, user_id, 2)).unwrap();
    mock.on(
        Method::Get,
        &rest("media_posts_with_stats"),
        MockResponse::json(200, serde_json::json!([row])),
    );
    mock.on(
        Method::Get,
        &rest("post_likes"),
        MockResponse::json(200, serde_json::json!([{"id": Uuid::new_v4()}])),
    );
    mock.on(
        Method::Get,
        &rest("post_tags"),
        MockResponse::json(
            200,
            serde_json::json!([{
                "id": Uuid::new_v4(),
                "post_id": id,
                "character_id": null,
                "character_name": "Grom",
                "position_x": 0.5,
                "position_y": 0.5,
                "characters": null
            }]),
        ),
    );

    let mut feed = FeedView::default();
    feed.load(&ctx).await;

    assert!(feed.error.is_none());
    assert_eq!(feed.posts.len(), 1);
    assert!(feed.posts[0].like.is_liked);
    assert_eq!(feed.posts[0].like.count, 2);
    assert_eq!(feed.posts[0].tags[0].character_name, "Grom");
}

#[tokio::test]
async fn test_upload_modal_requires_sign_in() {
    let (ctx, _mock) = common::mock_context();
    let mut feed = FeedView::default();

    assert!(feed.open_upload(&ctx).is_err());
    assert!(feed.upload.is_none());
    assert_eq!(
        feed.error.as_deref(),
        Some("Debes iniciar sesión para subir fotos")
    );
}
