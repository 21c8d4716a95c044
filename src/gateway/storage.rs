//! Object storage: uploads, public URLs, removal and downloads.

use bytes::Bytes;
use uuid::Uuid;

use super::Gateway;
use crate::error::GatewayResult;
use crate::traits::{Method, Request};

/// Cache lifetime attached to uploaded objects, in seconds.
const CACHE_CONTROL_SECS: u32 = 3600;

/// Public buckets used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Avatars,
    MediaImages,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Avatars => "avatars",
            Bucket::MediaImages => "media-images",
        }
    }
}

/// Object path for a new avatar: `{user_id}/avatar-{millis}.{ext}`.
pub fn avatar_path(user_id: Uuid, millis: i64, ext: &str) -> String {
    format!("{}/avatar-{}.{}", user_id, millis, ext)
}

/// Object path for a new post image: `{user_id}/{millis}.{ext}`.
pub fn post_image_path(user_id: Uuid, millis: i64, ext: &str) -> String {
    format!("{}/{}.{}", user_id, millis, ext)
}

/// Object path of a user's avatar given its public URL.
///
/// Avatars live directly under the owner's folder, so the last URL segment is
/// enough to rebuild the path.
pub fn avatar_object_path(user_id: Uuid, avatar_url: &str) -> Option<String> {
    let file_name = avatar_url
        .split(['?', '#'])
        .next()?
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())?;
    Some(format!("{}/{}", user_id, file_name))
}

impl Gateway {
    /// Upload bytes to `bucket/path`. Existing objects are not overwritten.
    pub async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> GatewayResult<()> {
        tracing::debug!("Uploading {} bytes to {}/{}", bytes.len(), bucket.as_str(), path);
        let url = format!(
            "{}/object/{}/{}",
            self.config.storage_url(),
            bucket.as_str(),
            path
        );
        let request = Request::new(Method::Post, url)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .header("cache-control", format!("max-age={}", CACHE_CONTROL_SECS))
            .body(bytes);
        let result = self.execute_authorized(request).await.map(|_| ());
        super::logged(result, "Object uploaded", "Error uploading object")
    }

    /// Public URL of an object in a public bucket. Makes no request.
    pub fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.config.storage_url(),
            bucket.as_str(),
            path
        )
    }

    /// Remove objects from a bucket.
    pub async fn remove(&self, bucket: Bucket, paths: &[String]) -> GatewayResult<()> {
        tracing::debug!("Removing {:?} from {}", paths, bucket.as_str());
        let url = format!("{}/object/{}", self.config.storage_url(), bucket.as_str());
        let request =
            Request::new(Method::Delete, url).json(&serde_json::json!({ "prefixes": paths }))?;
        let result = self.execute_authorized(request).await.map(|_| ());
        super::logged(result, "Objects removed", "Error removing objects")
    }

    /// Download the bytes behind a public URL.
    pub async fn download(&self, url: &str) -> GatewayResult<Bytes> {
        tracing::debug!("Downloading {}", url);
        let response = self.execute(Request::new(Method::Get, url)).await;
        super::logged(response, "Image downloaded", "Error downloading image").map(|r| r.body)
    }
}
