//! Type definitions for the application state.
//!
//! - [`Confirm`] / [`PendingAction`] - yes/no prompt before destructive actions
//! - [`UploadField`] - focused input of the upload modal
//! - [`InfoMode`] - what the profile Info tab is editing

use uuid::Uuid;

/// Destructive action waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    DeletePost(Uuid),
    DeleteComment(Uuid),
    DeleteCharacter(Uuid),
    DeleteAvatar,
}

/// Yes/no prompt shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub message: &'static str,
    pub action: PendingAction,
}

/// Focused input in the upload modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadField {
    #[default]
    Path,
    Description,
    Search,
    FreeTag,
}

impl UploadField {
    pub fn next(&self) -> UploadField {
        match self {
            UploadField::Path => UploadField::Description,
            UploadField::Description => UploadField::Search,
            UploadField::Search => UploadField::FreeTag,
            UploadField::FreeTag => UploadField::Path,
        }
    }
}

/// Text entry state of the Info tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoMode {
    #[default]
    Viewing,
    EditingName,
    AvatarPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_field_cycle() {
        let mut field = UploadField::default();
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, UploadField::Path);
    }
}
