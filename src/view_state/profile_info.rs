//! The "Info" profile tab.

use std::time::{Duration, Instant};

use super::format::initials;
use super::messages;
use crate::context::AppContext;
use crate::error::{AppError, AppResult, ValidationError};
use crate::identity::Identity;
use crate::models::{FileUpload, ProfileChanges};

/// A success message that disappears after a while.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileInfoView {
    pub editing: bool,
    pub name_draft: String,
    /// Path typed in the avatar field.
    pub avatar_path: String,
    pub saving: bool,
    pub uploading_avatar: bool,
    pub toast: Option<Toast>,
    pub error: Option<String>,
}

impl ProfileInfoView {
    /// Name shown in the form: profile name, else auth metadata name.
    pub fn current_name(identity: &Identity) -> String {
        identity
            .profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .or_else(|| {
                identity
                    .user
                    .as_ref()
                    .and_then(|u| u.user_metadata.full_name.clone())
            })
            .unwrap_or_default()
    }

    pub fn initials(identity: &Identity) -> String {
        let name = Self::current_name(identity);
        let email = identity.user.as_ref().and_then(|u| u.email.as_deref());
        initials(Some(&name), email)
    }

    pub fn start_edit(&mut self, identity: &Identity) {
        self.name_draft = Self::current_name(identity);
        self.editing = true;
        self.error = None;
    }

    pub fn cancel_edit(&mut self, identity: &Identity) {
        self.name_draft = Self::current_name(identity);
        self.editing = false;
        self.error = None;
    }

    pub async fn save(&mut self, ctx: &AppContext) -> AppResult<()> {
        self.saving = true;
        self.error = None;
        let result = ctx
            .identity
            .update_profile(ProfileChanges::full_name(self.name_draft.trim()))
            .await;
        self.saving = false;
        match result {
            Ok(_) => {
                self.editing = false;
                self.show_toast(messages::PROFILE_UPDATED);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(messages::PROFILE_UPDATE_FAILED));
                Err(e)
            }
        }
    }

    /// Read the file at `avatar_path` and make it the avatar.
    pub async fn change_avatar(&mut self, ctx: &AppContext) -> AppResult<()> {
        self.error = None;
        let path = self.avatar_path.trim().to_string();
        let file = match FileUpload::read(&path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path, e);
                self.error = Some(ValidationError::NoImageSelected.to_string());
                return Err(AppError::Io(e));
            }
        };
        self.upload_avatar(ctx, &file).await
    }

    pub async fn upload_avatar(&mut self, ctx: &AppContext, file: &FileUpload) -> AppResult<()> {
        self.uploading_avatar = true;
        let result = ctx.identity.upload_avatar(file).await;
        self.uploading_avatar = false;
        match result {
            Ok(_) => {
                self.avatar_path.clear();
                self.show_toast(messages::AVATAR_UPDATED);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(messages::AVATAR_UPLOAD_FAILED));
                Err(e)
            }
        }
    }

    pub async fn delete_avatar(&mut self, ctx: &AppContext) -> AppResult<()> {
        self.uploading_avatar = true;
        let result = ctx.identity.delete_avatar().await;
        self.uploading_avatar = false;
        match result {
            Ok(Some(_)) => {
                self.show_toast(messages::AVATAR_DELETED);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                self.error = Some(e.display_message(messages::AVATAR_DELETE_FAILED));
                Err(e)
            }
        }
    }

    /// Create the missing profile row.
    pub async fn create_profile(&mut self, ctx: &AppContext) -> AppResult<()> {
        match ctx.identity.create_profile().await {
            Ok(_) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(messages::PROFILE_CREATE_FAILED));
                Err(e)
            }
        }
    }

    fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast {
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }

    /// Toast text while it is still within `duration`.
    pub fn visible_toast(&self, now: Instant, duration: Duration) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| now.duration_since(t.shown_at) < duration)
            .map(|t| t.message.as_str())
    }

    /// Drop an expired toast. Returns true when one was removed.
    pub fn expire_toast(&mut self, now: Instant, duration: Duration) -> bool {
        if self.toast.is_some() && self.visible_toast(now, duration).is_none() {
            self.toast = None;
            return true;
        }
        false
    }
}
