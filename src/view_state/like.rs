use crate::context::AppContext;
use crate::error::{AppResult, ValidationError};
use crate::models::{LikeAction, LikeTarget};

/// Like flag and counter for one post or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeState {
    pub is_liked: bool,
    pub count: u32,
}

impl LikeState {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Record a confirmed like change. The count never drops below zero.
    pub fn apply(&mut self, action: LikeAction) {
        let liked = action.is_liked();
        if liked == self.is_liked {
            return;
        }
        self.is_liked = liked;
        self.count = if liked {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1)
        };
    }

    /// Ask the backend for the flag when a user is signed in.
    pub async fn refresh(&mut self, ctx: &AppContext, target: LikeTarget) {
        let Some(user) = ctx.identity.user() else {
            self.is_liked = false;
            return;
        };
        match ctx.gateway.user_has_liked(target, user.id).await {
            Ok(liked) => self.is_liked = liked,
            Err(e) => tracing::error!("Error checking like state: {}", e),
        }
    }

    /// Flip the like: one idempotent write to the opposite of the current
    /// flag, applied locally only once it succeeds.
    ///
    /// Key handling awaits each action before reading the next key, so
    /// toggles on one state never overlap.
    pub async fn toggle(&mut self, ctx: &AppContext, target: LikeTarget) -> AppResult<()> {
        let user = ctx
            .identity
            .user()
            .ok_or(ValidationError::SignInRequired { action: "dar like" })?;
        let action = ctx.gateway.set_like(target, user.id, !self.is_liked).await?;
        self.apply(action);
        Ok(())
    }
}
