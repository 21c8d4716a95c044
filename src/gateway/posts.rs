//! Media posts: image upload, row insert, feed reads.

use uuid::Uuid;

use super::storage::post_image_path;
use super::{logged, Bucket, Gateway, Query};
use crate::error::GatewayResult;
use crate::models::{FileUpload, MediaPost, NewMediaPost, NewTag};

const MEDIA_POSTS: &str = "media_posts";
const MEDIA_POSTS_WITH_STATS: &str = "media_posts_with_stats";

impl Gateway {
    /// Publish a post: upload the image, insert the row, then attach tags.
    ///
    /// Tag failures are logged and the post is returned anyway.
    pub async fn create_media_post(
        &self,
        user_id: Uuid,
        image: &FileUpload,
        description: &str,
        tags: &[NewTag],
    ) -> GatewayResult<MediaPost> {
        let path = post_image_path(
            user_id,
            chrono::Utc::now().timestamp_millis(),
            image.extension(),
        );
        self.upload(
            Bucket::MediaImages,
            &path,
            image.bytes.clone(),
            &image.content_type,
        )
        .await?;

        let row = NewMediaPost {
            user_id,
            image_url: self.public_url(Bucket::MediaImages, &path),
            description: description.trim().to_string(),
        };
        let post: MediaPost = logged(
            self.insert_single(MEDIA_POSTS, &row).await,
            "Media post created",
            "Error creating media post",
        )?;

        if !tags.is_empty() {
            if let Err(e) = self.create_post_tags(post.id, tags).await {
                tracing::warn!("Post {} created without its tags: {}", post.id, e);
            }
        }
        Ok(post)
    }

    /// Every post with author and counters.
    pub async fn get_all_media_posts(&self) -> GatewayResult<Vec<MediaPost>> {
        let query = Query::table(MEDIA_POSTS_WITH_STATS).select("*");
        let result: GatewayResult<Vec<MediaPost>> = self.select_many(query).await;
        if let Ok(posts) = &result {
            tracing::debug!("Loaded {} media posts", posts.len());
        }
        logged(result, "Media posts retrieved", "Error loading media posts")
    }

    /// One user's posts with author and counters.
    pub async fn get_user_media_posts(&self, user_id: Uuid) -> GatewayResult<Vec<MediaPost>> {
        let query = Query::table(MEDIA_POSTS_WITH_STATS)
            .select("*")
            .eq("user_id", user_id);
        logged(
            self.select_many(query).await,
            "User media posts retrieved",
            "Error loading user media posts",
        )
    }

    /// Delete a post row. The stored image is left in place.
    pub async fn delete_media_post(&self, post_id: Uuid) -> GatewayResult<()> {
        tracing::debug!("Deleting media post {}", post_id);
        let query = Query::table(MEDIA_POSTS).eq("id", post_id);
        logged(
            self.delete_where(query).await,
            "Media post deleted",
            "Error deleting media post",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_gateway;
    use super::*;
    use crate::adapters::mock::MockResponse;
    use crate::traits::Method;
    use bytes::Bytes;

    const POSTS_URL: &str = "https://abc.supabase.co/rest/v1/media_posts";
    const TAGS_URL: &str = "https://abc.supabase.co/rest/v1/post_tags";
    const UPLOAD_URL: &str = "https://abc.supabase.co/storage/v1/object/media-images/";

    fn post_row(id: Uuid, user: Uuid, image_url: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id, "user_id": user, "image_url": image_url,
            "description": "hola", "created_at": "2025-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_create_media_post_uploads_then_inserts() {
        let (gateway, mock) = test_gateway();
        let user = Uuid::new_v4();
        let post_id = Uuid::new_v4();
        mock.on(Method::Post, UPLOAD_URL, MockResponse::json(200, serde_json::json!({"Key": "k"})));
        mock.on(
            Method::Post,
            POSTS_URL,
            MockResponse::json(201, post_row(post_id, user, "https://cdn/x.png")),
        );
        mock.on(Method::Post, TAGS_URL, MockResponse::json(201, serde_json::json!([])));

        let image = FileUpload::new("foto.png", "image/png", Bytes::from_static(b"png"));
        let tags = vec![NewTag::free_text("Ragnar")];
        let post = gateway
            .create_media_post(user, &image, "  hola  ", &tags)
            .await
            .unwrap();
        assert_eq!(post.id, post_id);

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].url.starts_with(&format!("{}{}/", UPLOAD_URL, user)));
        assert!(requests[0].url.ends_with(".png"));
        assert_eq!(requests[0].header("x-upsert"), Some("false"));

        let row = requests[1].body_json().unwrap();
        assert_eq!(row["description"], "hola");
        let image_url = row["image_url"].as_str().unwrap();
        assert!(image_url.starts_with(&format!(
            "https://abc.supabase.co/storage/v1/object/public/media-images/{}/",
            user
        )));

        let tag_rows = requests[2].body_json().unwrap();
        assert_eq!(tag_rows[0]["post_id"], serde_json::json!(post_id));
    }

    #[tokio::test]
    async fn test_upload_failure_creates_no_row() {
        let (gateway, mock) = test_gateway();
        mock.on(
            Method::Post,
            UPLOAD_URL,
            MockResponse::json(400, serde_json::json!({"message": "Duplicate"})),
        );

        let image = FileUpload::new("foto.png", "image/png", Bytes::from_static(b"png"));
        assert!(gateway
            .create_media_post(Uuid::new_v4(), &image, "", &[])
            .await
            .is_err());
        assert!(mock.requests_to(Method::Post, "/rest/v1/media_posts").is_empty());
    }

    #[tokio::test]
    async fn test_tag_failure_still_returns_post() {
        let (gateway, mock) = test_gateway();
        let user = Uuid::new_v4();
        let post_id = Uuid::new_v4();
        mock.on(Method::Post, UPLOAD_URL, MockResponse::status(200));
        mock.on(Method::Post, POSTS_URL, MockResponse::json(201, post_row(post_id, user, "u")));
        mock.on(
            Method::Post,
            TAGS_URL,
            MockResponse::json(403, serde_json::json!({"message": "denied"})),
        );

        let image = FileUpload::new("foto.jpg", "image/jpeg", Bytes::from_static(b"jpg"));
        let post = gateway
            .create_media_post(user, &image, "", &[NewTag::free_text("x")])
            .await
            .unwrap();
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_user_posts_filter() {
        let (gateway, mock) = test_gateway();
        let user = Uuid::new_v4();
        mock.on(
            Method::Get,
            "https://abc.supabase.co/rest/v1/media_posts_with_stats",
            MockResponse::json(200, serde_json::json!([])),
        );

        gateway.get_user_media_posts(user).await.unwrap();
        assert_eq!(
            mock.get_requests()[0].url,
            format!(
                "https://abc.supabase.co/rest/v1/media_posts_with_stats?select=%2A&user_id=eq.{}",
                user
            )
        );
    }
}
