//! The `/media` feed.

use uuid::Uuid;

use super::messages;
use super::post::PostView;
use super::upload::UploadForm;
use crate::context::AppContext;
use crate::error::{AppResult, ValidationError};
use crate::models::MediaPost;

#[derive(Debug, Clone, Default)]
pub struct FeedView {
    pub posts: Vec<PostView>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// Open upload modal.
    pub upload: Option<UploadForm>,
}

impl FeedView {
    /// Load every post, then each post's like flag and tags.
    pub async fn load(&mut self, ctx: &AppContext) {
        self.loading = true;
        match ctx.gateway.get_all_media_posts().await {
            Ok(posts) => {
                self.posts = posts.into_iter().map(PostView::new).collect();
                for post in &mut self.posts {
                    post.load_extras(ctx).await;
                }
                self.selected = self.selected.min(self.posts.len().saturating_sub(1));
                self.error = None;
            }
            Err(_) => self.error = Some(messages::POSTS_LOAD_FAILED.to_string()),
        }
        self.loading = false;
    }

    /// Open the upload modal. Signed-out users get an error instead.
    pub fn open_upload(&mut self, ctx: &AppContext) -> Result<(), ValidationError> {
        if ctx.identity.user().is_none() {
            let err = ValidationError::SignInRequired {
                action: "subir fotos",
            };
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.upload = Some(UploadForm::default());
        self.error = None;
        Ok(())
    }

    pub fn close_upload(&mut self) {
        self.upload = None;
    }

    /// Publish the open upload form; on success close it and reload.
    pub async fn submit_upload(&mut self, ctx: &AppContext) -> AppResult<()> {
        let Some(form) = self.upload.as_mut() else {
            return Ok(());
        };
        form.submit(ctx).await?;
        self.upload = None;
        self.load(ctx).await;
        Ok(())
    }

    /// Replace a post in place after it changed.
    pub fn apply_post_update(&mut self, post: MediaPost) {
        if let Some(view) = self.posts.iter_mut().find(|v| v.post.id == post.id) {
            view.like.count = post.like_count;
            view.post = post;
        }
    }

    /// Delete a post. It is removed from the feed only after the backend
    /// confirms.
    pub async fn delete_post(&mut self, ctx: &AppContext, post_id: Uuid) -> AppResult<()> {
        match ctx.gateway.delete_media_post(post_id).await {
            Ok(()) => {
                self.posts.retain(|p| p.post.id != post_id);
                self.selected = self.selected.min(self.posts.len().saturating_sub(1));
                self.error = None;
                Ok(())
            }
            Err(e) => {
                if let Some(view) = self.posts.iter_mut().find(|p| p.post.id == post_id) {
                    view.error = Some(messages::POST_DELETE_FAILED.to_string());
                }
                self.error = Some(messages::POST_DELETE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn selected_post(&self) -> Option<&PostView> {
        self.posts.get(self.selected)
    }

    pub fn selected_post_mut(&mut self) -> Option<&mut PostView> {
        self.posts.get_mut(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.posts.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
