//! A single post in the feed.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use super::comment::CommentsPanel;
use super::format::{initials, post_age};
use super::like::LikeState;
use super::messages;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::models::{LikeTarget, MediaPost, PostTag, ANONYMOUS_NAME};

#[derive(Debug, Clone)]
pub struct PostView {
    pub post: MediaPost,
    pub like: LikeState,
    pub tags: Vec<PostTag>,
    pub show_tags: bool,
    /// Open comments modal.
    pub comments: Option<CommentsPanel>,
    pub error: Option<String>,
}

impl PostView {
    pub fn new(post: MediaPost) -> Self {
        let like = LikeState::new(post.like_count);
        Self {
            post,
            like,
            tags: Vec::new(),
            show_tags: false,
            comments: None,
            error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.post.id
    }

    pub fn author(&self) -> &str {
        self.post.author_name.as_deref().unwrap_or(ANONYMOUS_NAME)
    }

    pub fn author_initials(&self) -> String {
        initials(self.post.author_name.as_deref(), None)
    }

    pub fn age(&self) -> String {
        post_age(self.post.created_at, Utc::now())
    }

    pub fn can_delete(&self, user_id: Option<Uuid>) -> bool {
        user_id.map_or(false, |id| self.post.is_owned_by(id))
    }

    /// Like flag (when signed in) and tags.
    pub async fn load_extras(&mut self, ctx: &AppContext) {
        self.like.refresh(ctx, LikeTarget::Post(self.post.id)).await;
        match ctx.gateway.get_post_tags(self.post.id).await {
            Ok(tags) => self.tags = tags,
            Err(e) => tracing::error!("Error loading post tags: {}", e),
        }
    }

    pub async fn toggle_like(&mut self, ctx: &AppContext) {
        match self.like.toggle(ctx, LikeTarget::Post(self.post.id)).await {
            Ok(()) => {
                self.post.like_count = self.like.count;
                self.error = None;
            }
            Err(e) => self.error = Some(e.display_message(messages::LIKE_FAILED)),
        }
    }

    pub async fn open_comments(&mut self, ctx: &AppContext) {
        let mut panel = CommentsPanel::default();
        panel.load(ctx, self.post.id).await;
        self.comments = Some(panel);
    }

    pub fn close_comments(&mut self) {
        self.comments = None;
        self.error = None;
    }

    pub async fn submit_comment(&mut self, ctx: &AppContext) -> AppResult<()> {
        let post_id = self.post.id;
        let Some(panel) = self.comments.as_mut() else {
            return Ok(());
        };
        panel.submit(ctx, post_id).await?;
        self.post.comment_count = self.post.comment_count.saturating_add(1);
        Ok(())
    }

    pub async fn delete_comment(&mut self, ctx: &AppContext, comment_id: Uuid) -> AppResult<()> {
        let Some(panel) = self.comments.as_mut() else {
            return Ok(());
        };
        panel.delete(ctx, comment_id).await?;
        self.post.comment_count = self.post.comment_count.saturating_sub(1);
        Ok(())
    }

    /// File name used when saving the image.
    pub fn download_file_name(&self) -> String {
        format!("mala-junta-{}.jpg", self.post.id)
    }

    /// Save the post image into the configured download directory.
    pub async fn download_image(&mut self, ctx: &AppContext) -> AppResult<PathBuf> {
        let result = self.try_download(ctx).await;
        match &result {
            Ok(path) => {
                tracing::info!("Image saved to {}", path.display());
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error downloading image: {}", e);
                self.error = Some(messages::DOWNLOAD_FAILED.to_string());
            }
        }
        result
    }

    async fn try_download(&self, ctx: &AppContext) -> AppResult<PathBuf> {
        let bytes = ctx.gateway.download(&self.post.image_url).await?;
        let dir = &ctx.config.download_dir;
        tokio::fs::create_dir_all(dir).await.map_err(AppError::Io)?;
        let path = dir.join(self.download_file_name());
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}
