//! The new-post modal.

use super::messages;
use crate::context::AppContext;
use crate::error::{AppResult, ValidationError};
use crate::models::{CharacterSummary, FileUpload, MediaPost, NewTag};
use crate::validation::{check_new_tag, is_searchable, validate_post, validate_post_image};

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<FileUpload>,
    /// Path typed in the file field.
    pub path_input: String,
    pub description: String,
    pub search_term: String,
    pub search_results: Vec<CharacterSummary>,
    pub free_tag: String,
    pub tags: Vec<NewTag>,
    pub uploading: bool,
    pub error: Option<String>,
}

impl UploadForm {
    /// Accept a picked file if it is an image within the size limit.
    pub fn pick_file(&mut self, file: FileUpload) -> Result<(), ValidationError> {
        match validate_post_image(&file) {
            Ok(()) => {
                self.file = Some(file);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.file = None;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Read the file at `path_input` and pick it.
    pub async fn pick_path(&mut self) -> AppResult<()> {
        let path = self.path_input.trim().to_string();
        match FileUpload::read(&path).await {
            Ok(file) => Ok(self.pick_file(file)?),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path, e);
                self.error = Some(ValidationError::NoImageSelected.to_string());
                Err(e.into())
            }
        }
    }

    /// Search characters by name. Short terms clear the results without a
    /// request.
    pub async fn search(&mut self, ctx: &AppContext) {
        if !is_searchable(&self.search_term) {
            self.search_results.clear();
            return;
        }
        match ctx.gateway.search_characters(&self.search_term).await {
            Ok(results) => self.search_results = results,
            Err(_) => {
                self.search_results.clear();
                self.error = Some(messages::SEARCH_FAILED.to_string());
            }
        }
    }

    pub fn add_character_tag(&mut self, character: &CharacterSummary) {
        self.add_tag(NewTag::character(character));
        self.search_term.clear();
        self.search_results.clear();
    }

    /// Add the typed free-text tag. Blank input is ignored.
    pub fn add_free_tag(&mut self) {
        let tag = NewTag::free_text(&self.free_tag);
        if self.add_tag(tag) {
            self.free_tag.clear();
        }
    }

    fn add_tag(&mut self, tag: NewTag) -> bool {
        match check_new_tag(&self.tags, tag) {
            Ok(Some(tag)) => {
                self.tags.push(tag);
                self.error = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn remove_tag(&mut self, index: usize) {
        if index < self.tags.len() {
            self.tags.remove(index);
        }
    }

    /// Validate and publish. Requires a signed-in user.
    pub async fn submit(&mut self, ctx: &AppContext) -> AppResult<MediaPost> {
        let result = self.try_submit(ctx).await;
        if let Err(e) = &result {
            self.error = Some(e.display_message(messages::UPLOAD_FAILED));
        }
        result
    }

    async fn try_submit(&mut self, ctx: &AppContext) -> AppResult<MediaPost> {
        let user = ctx.identity.user().ok_or(ValidationError::SignInRequired {
            action: "subir fotos",
        })?;
        validate_post(self.file.as_ref(), &self.description)?;
        let Some(file) = self.file.as_ref() else {
            return Err(ValidationError::NoImageSelected.into());
        };

        self.uploading = true;
        let result = ctx
            .gateway
            .create_media_post(user.id, file, &self.description, &self.tags)
            .await;
        self.uploading = false;
        Ok(result?)
    }
}
