//! The "Chars" profile tab.

use uuid::Uuid;

use super::messages;
use crate::context::AppContext;
use crate::error::{AppResult, ValidationError};
use crate::models::{Character, CharacterChanges, NewCharacter, Subclass, MAX_CHARACTERS};
use crate::validation::{ensure_character_capacity, validate_character};

/// Create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterForm {
    /// Set when editing an existing character.
    pub editing: Option<Uuid>,
    pub name: String,
    pub subclass: Option<Subclass>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CharacterForm {
    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Editar Personaje"
        } else {
            "Nuevo Personaje"
        }
    }

    /// Step the subclass picker forward, starting at the first option.
    pub fn next_subclass(&mut self) {
        self.subclass = Some(match self.subclass {
            Some(s) => s.next(),
            None => Subclass::ALL[0],
        });
    }

    pub fn prev_subclass(&mut self) {
        self.subclass = Some(match self.subclass {
            Some(s) => s.prev(),
            None => Subclass::ALL[Subclass::ALL.len() - 1],
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct CharactersView {
    pub characters: Vec<Character>,
    pub selected: usize,
    pub loading: bool,
    pub form: Option<CharacterForm>,
    pub error: Option<String>,
}

impl CharactersView {
    /// "Gestiona tus personajes (x/9)".
    pub fn counter(&self) -> String {
        format!(
            "Gestiona tus personajes ({}/{})",
            self.characters.len(),
            MAX_CHARACTERS
        )
    }

    pub fn can_add(&self) -> bool {
        self.characters.len() < MAX_CHARACTERS
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        let Some(user) = ctx.identity.user() else {
            self.characters.clear();
            return;
        };
        self.loading = true;
        match ctx.gateway.get_user_characters(user.id).await {
            Ok(characters) => {
                self.characters = characters;
                self.selected = self.selected.min(self.characters.len().saturating_sub(1));
                self.error = None;
            }
            Err(_) => self.error = Some(messages::CHARACTERS_LOAD_FAILED.to_string()),
        }
        self.loading = false;
    }

    /// Open an empty form; refused at the character limit.
    pub fn open_new(&mut self) -> Result<(), ValidationError> {
        if let Err(e) = ensure_character_capacity(self.characters.len()) {
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.form = Some(CharacterForm::default());
        self.error = None;
        Ok(())
    }

    pub fn open_edit(&mut self, index: usize) {
        if let Some(character) = self.characters.get(index) {
            self.form = Some(CharacterForm {
                editing: Some(character.id),
                name: character.name.clone(),
                subclass: Some(character.subclass),
                ..Default::default()
            });
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate and save the open form, then reload the list.
    pub async fn save(&mut self, ctx: &AppContext) -> AppResult<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        let result = Self::save_form(form, self.characters.len(), ctx).await;
        match &result {
            Ok(()) => {
                self.form = None;
                self.load(ctx).await;
            }
            Err(e) => form.error = Some(e.display_message(messages::CHARACTER_SAVE_FAILED)),
        }
        result
    }

    async fn save_form(form: &mut CharacterForm, current: usize, ctx: &AppContext) -> AppResult<()> {
        let user = ctx.identity.user().ok_or(ValidationError::SignInRequired {
            action: "gestionar personajes",
        })?;
        let (name, subclass) = validate_character(&form.name, form.subclass)?;
        if form.editing.is_none() {
            ensure_character_capacity(current)?;
        }

        form.submitting = true;
        let result = match form.editing {
            Some(id) => {
                let changes = CharacterChanges {
                    name: Some(name),
                    subclass: Some(subclass),
                };
                ctx.gateway.update_character(id, &changes).await.map(|_| ())
            }
            None => {
                let new = NewCharacter {
                    user_id: user.id,
                    name,
                    subclass,
                };
                ctx.gateway.create_character(&new).await.map(|_| ())
            }
        };
        form.submitting = false;
        Ok(result?)
    }

    /// Delete a character after confirmation; the list is reloaded on success.
    pub async fn delete(&mut self, ctx: &AppContext, id: Uuid) -> AppResult<()> {
        match ctx.gateway.delete_character(id).await {
            Ok(()) => {
                self.error = None;
                self.load(ctx).await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(messages::CHARACTER_DELETE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn selected_character(&self) -> Option<&Character> {
        self.characters.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.characters.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
