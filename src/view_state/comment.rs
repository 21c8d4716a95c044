//! Comments under a post.

use chrono::Utc;
use uuid::Uuid;

use super::format::comment_age;
use super::like::LikeState;
use super::messages;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::models::{Comment, LikeTarget};
use crate::validation::validate_comment;

/// One comment with its like state.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub like: LikeState,
    pub error: Option<String>,
}

impl CommentView {
    pub fn new(comment: Comment) -> Self {
        let like = LikeState::new(comment.like_count);
        Self {
            comment,
            like,
            error: None,
        }
    }

    pub fn target(&self) -> LikeTarget {
        LikeTarget::Comment(self.comment.id)
    }

    pub fn author(&self) -> &str {
        self.comment
            .author_name
            .as_deref()
            .unwrap_or(crate::models::ANONYMOUS_NAME)
    }

    pub fn age(&self) -> String {
        comment_age(self.comment.created_at, Utc::now())
    }

    pub fn can_delete(&self, user_id: Option<Uuid>) -> bool {
        user_id.map_or(false, |id| self.comment.is_owned_by(id))
    }

    pub async fn toggle_like(&mut self, ctx: &AppContext) {
        let target = self.target();
        self.error = match self.like.toggle(ctx, target).await {
            Ok(()) => None,
            Err(e) => Some(e.display_message(messages::LIKE_FAILED)),
        };
    }
}

/// The comments modal of a post: list plus the new-comment draft.
#[derive(Debug, Clone, Default)]
pub struct CommentsPanel {
    pub comments: Vec<CommentView>,
    pub draft: String,
    pub selected: usize,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CommentsPanel {
    pub async fn load(&mut self, ctx: &AppContext, post_id: Uuid) {
        self.loading = true;
        match ctx.gateway.get_post_comments(post_id).await {
            Ok(comments) => {
                self.comments = comments.into_iter().map(CommentView::new).collect();
                for view in &mut self.comments {
                    let target = view.target();
                    view.like.refresh(ctx, target).await;
                }
                self.selected = 0;
                self.error = None;
            }
            Err(_) => self.error = Some(messages::COMMENTS_LOAD_FAILED.to_string()),
        }
        self.loading = false;
    }

    /// Validate and post the draft. On success the comment is appended with
    /// the current user's display name and the draft is cleared.
    pub async fn submit(&mut self, ctx: &AppContext, post_id: Uuid) -> AppResult<()> {
        let user = ctx.identity.user();
        let result = self.try_submit(ctx, user.as_ref(), post_id).await;
        self.error = result
            .as_ref()
            .err()
            .map(|e| e.display_message(messages::COMMENT_CREATE_FAILED));
        result
    }

    async fn try_submit(
        &mut self,
        ctx: &AppContext,
        user: Option<&crate::models::User>,
        post_id: Uuid,
    ) -> AppResult<()> {
        let content = validate_comment(user, &self.draft)?;
        let Some(user) = user else {
            return Ok(());
        };
        self.submitting = true;
        let result = ctx.gateway.create_comment(user.id, post_id, &content).await;
        self.submitting = false;

        let mut comment = result?;
        comment.author_name = Some(user.display_name());
        comment.author_avatar = None;
        comment.like_count = 0;
        self.comments.push(CommentView::new(comment));
        self.draft.clear();
        Ok(())
    }

    /// Delete a comment; it leaves the list only once the backend agrees.
    pub async fn delete(&mut self, ctx: &AppContext, comment_id: Uuid) -> AppResult<()> {
        match ctx.gateway.delete_comment(comment_id).await {
            Ok(()) => {
                self.comments.retain(|c| c.comment.id != comment_id);
                self.selected = self.selected.min(self.comments.len().saturating_sub(1));
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(messages::COMMENT_DELETE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn selected_comment(&self) -> Option<&CommentView> {
        self.comments.get(self.selected)
    }

    pub fn selected_comment_mut(&mut self) -> Option<&mut CommentView> {
        self.comments.get_mut(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.comments.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
