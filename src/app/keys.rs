//! Keyboard handling.
//!
//! Text keys go to whichever input has focus; everything else is a command
//! for the screen the router currently shows. Destructive commands park a
//! [`Confirm`] prompt and run only after `y`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{settle, App, Confirm, InfoMode, PendingAction, UploadField};
use crate::view_state::{messages, ProfileTab, Resolution, Route};

fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            Some(c)
        }
        _ => None,
    }
}

impl App {
    pub async fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if ctrl(&key, 'c') {
            self.quit();
            return;
        }

        if let Some(confirm) = self.confirm.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.run_pending(confirm.action).await;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.confirm = Some(confirm),
            }
            return;
        }

        if self.edit_focused_text(&key) {
            self.after_text_edit().await;
            return;
        }

        if self.focused_text().is_none() && self.handle_global_key(&key).await {
            return;
        }

        match self.resolution {
            Resolution::Show(Route::Media) => self.handle_media_key(key).await,
            Resolution::Show(Route::Profile) => self.handle_profile_key(key).await,
            Resolution::Show(Route::Login) => self.handle_login_key(key).await,
            _ => {}
        }
    }

    /// Insert pasted text into the focused input, if any.
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(input) = self.focused_text() {
            input.push_str(text.trim_end_matches(['\r', '\n']));
            self.mark_dirty();
        }
    }

    /// The text buffer that receives typed characters right now.
    pub(crate) fn focused_text(&mut self) -> Option<&mut String> {
        match self.resolution {
            Resolution::Show(Route::Login) => Some(self.login.focused_input()),
            Resolution::Show(Route::Media) => {
                if self.feed.upload.is_some() {
                    let form = self.feed.upload.as_mut()?;
                    return Some(match self.upload_field {
                        UploadField::Path => &mut form.path_input,
                        UploadField::Description => &mut form.description,
                        UploadField::Search => &mut form.search_term,
                        UploadField::FreeTag => &mut form.free_tag,
                    });
                }
                self.feed
                    .selected_post_mut()
                    .and_then(|post| post.comments.as_mut())
                    .map(|panel| &mut panel.draft)
            }
            Resolution::Show(Route::Profile) => match self.profile.tab {
                ProfileTab::Info => match self.info_mode {
                    InfoMode::Viewing => None,
                    InfoMode::EditingName => Some(&mut self.profile.info.name_draft),
                    InfoMode::AvatarPath => Some(&mut self.profile.info.avatar_path),
                },
                ProfileTab::Chars => self
                    .profile
                    .characters
                    .form
                    .as_mut()
                    .map(|form| &mut form.name),
                ProfileTab::Options if self.profile.options.confirming => {
                    Some(&mut self.profile.options.confirmation)
                }
                ProfileTab::Options => None,
            },
            _ => None,
        }
    }

    /// Apply a character or backspace to the focused input.
    fn edit_focused_text(&mut self, key: &KeyEvent) -> bool {
        let plain = is_plain_char(key);
        let Some(input) = self.focused_text() else {
            return false;
        };
        match (key.code, plain) {
            (_, Some(c)) => {
                input.push(c);
                true
            }
            (KeyCode::Backspace, _) => {
                input.pop();
                true
            }
            _ => false,
        }
    }

    async fn after_text_edit(&mut self) {
        if self.upload_field != UploadField::Search {
            return;
        }
        if let Some(form) = self.feed.upload.as_mut() {
            form.search(&self.ctx).await;
            self.upload_result = 0;
        }
    }

    /// Navigation and session keys available when no input has focus.
    async fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('1') => self.navigate(Route::Home).await,
            KeyCode::Char('2') => self.navigate(Route::Media).await,
            KeyCode::Char('3') => self.navigate(Route::Profile).await,
            KeyCode::Char('i') if !self.identity.is_signed_in() => {
                self.navigate(Route::Login).await
            }
            KeyCode::Char('o') if self.identity.is_signed_in() => {
                self.sign_out().await;
                self.status = Some(messages::SIGNED_OUT.to_string());
            }
            _ => return false,
        }
        true
    }

    async fn run_pending(&mut self, action: PendingAction) {
        tracing::debug!("Confirmed {:?}", action);
        match action {
            PendingAction::DeletePost(id) => {
                settle("delete post", self.feed.delete_post(&self.ctx, id).await);
            }
            PendingAction::DeleteComment(id) => {
                if let Some(post) = self.feed.selected_post_mut() {
                    settle("delete comment", post.delete_comment(&self.ctx, id).await);
                }
            }
            PendingAction::DeleteCharacter(id) => {
                settle("delete character", self.profile.characters.delete(&self.ctx, id).await);
            }
            PendingAction::DeleteAvatar => {
                settle("delete avatar", self.profile.info.delete_avatar(&self.ctx).await);
                self.identity = self.ctx.identity.snapshot();
            }
        }
    }

    // ------------------------------------------------------------------
    // /media
    // ------------------------------------------------------------------

    async fn handle_media_key(&mut self, key: KeyEvent) {
        if self.feed.upload.is_some() {
            self.handle_upload_key(key).await;
            return;
        }
        let comments_open = self
            .feed
            .selected_post()
            .is_some_and(|post| post.comments.is_some());
        if comments_open {
            self.handle_comments_key(key).await;
            return;
        }

        let user_id = self.identity.user_id();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.feed.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.feed.select_prev(),
            KeyCode::Char('r') => self.feed.load(&self.ctx).await,
            KeyCode::Char('n') => {
                if self.feed.open_upload(&self.ctx).is_ok() {
                    self.upload_field = UploadField::Path;
                    self.upload_result = 0;
                }
            }
            KeyCode::Char('l') => {
                if let Some(post) = self.feed.selected_post_mut() {
                    post.toggle_like(&self.ctx).await;
                }
            }
            KeyCode::Char('c') => {
                if let Some(post) = self.feed.selected_post_mut() {
                    post.open_comments(&self.ctx).await;
                }
            }
            KeyCode::Char('t') => {
                if let Some(post) = self.feed.selected_post_mut() {
                    post.show_tags = !post.show_tags;
                }
            }
            KeyCode::Char('s') => {
                if let Some(post) = self.feed.selected_post_mut() {
                    if let Ok(path) = post.download_image(&self.ctx).await {
                        self.status =
                            Some(format!("{} {}", messages::IMAGE_SAVED, path.display()));
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(post) = self.feed.selected_post() {
                    if post.can_delete(user_id) {
                        self.confirm = Some(Confirm {
                            message: messages::CONFIRM_DELETE_POST,
                            action: PendingAction::DeletePost(post.id()),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    async fn handle_comments_key(&mut self, key: KeyEvent) {
        let user_id = self.identity.user_id();
        let Some(post) = self.feed.selected_post_mut() else {
            return;
        };

        if ctrl(&key, 'l') {
            if let Some(comment) = post
                .comments
                .as_mut()
                .and_then(|panel| panel.selected_comment_mut())
            {
                comment.toggle_like(&self.ctx).await;
            }
            return;
        }
        if ctrl(&key, 'd') {
            let pending = post
                .comments
                .as_ref()
                .and_then(|panel| panel.selected_comment())
                .filter(|comment| comment.can_delete(user_id))
                .map(|comment| comment.comment.id);
            if let Some(id) = pending {
                self.confirm = Some(Confirm {
                    message: messages::CONFIRM_DELETE_COMMENT,
                    action: PendingAction::DeleteComment(id),
                });
            }
            return;
        }

        match key.code {
            KeyCode::Esc => post.close_comments(),
            KeyCode::Enter => {
                settle("comment", post.submit_comment(&self.ctx).await);
            }
            KeyCode::Down => {
                if let Some(panel) = post.comments.as_mut() {
                    panel.select_next();
                }
            }
            KeyCode::Up => {
                if let Some(panel) = post.comments.as_mut() {
                    panel.select_prev();
                }
            }
            _ => {}
        }
    }

    async fn handle_upload_key(&mut self, key: KeyEvent) {
        if ctrl(&key, 's') {
            if self.feed.submit_upload(&self.ctx).await.is_ok() {
                self.status = Some(messages::POST_PUBLISHED.to_string());
            }
            return;
        }
        let Some(form) = self.feed.upload.as_mut() else {
            return;
        };
        if ctrl(&key, 'x') {
            let last = form.tags.len().saturating_sub(1);
            form.remove_tag(last);
            return;
        }

        match key.code {
            KeyCode::Esc => self.feed.close_upload(),
            KeyCode::Tab => self.upload_field = self.upload_field.next(),
            KeyCode::Down if self.upload_field == UploadField::Search => {
                if self.upload_result + 1 < form.search_results.len() {
                    self.upload_result += 1;
                }
            }
            KeyCode::Up if self.upload_field == UploadField::Search => {
                self.upload_result = self.upload_result.saturating_sub(1);
            }
            KeyCode::Enter => match self.upload_field {
                UploadField::Path => {
                    if form.pick_path().await.is_ok() {
                        self.upload_field = UploadField::Description;
                    }
                }
                UploadField::Description => self.upload_field = UploadField::Search,
                UploadField::Search => {
                    if let Some(character) = form.search_results.get(self.upload_result).cloned()
                    {
                        form.add_character_tag(&character);
                        self.upload_result = 0;
                    } else {
                        form.search(&self.ctx).await;
                    }
                }
                UploadField::FreeTag => form.add_free_tag(),
            },
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // /profile
    // ------------------------------------------------------------------

    async fn handle_profile_key(&mut self, key: KeyEvent) {
        let editing = self.focused_text().is_some();
        if key.code == KeyCode::Tab && !editing && self.profile.characters.form.is_none() {
            self.profile.tab = self.profile.tab.next();
            if self.profile.tab == ProfileTab::Chars {
                self.ensure_characters_loaded().await;
            }
            return;
        }

        match self.profile.tab {
            ProfileTab::Info => self.handle_info_key(key).await,
            ProfileTab::Chars => self.handle_characters_key(key).await,
            ProfileTab::Options => self.handle_options_key(key).await,
        }
        self.identity = self.ctx.identity.snapshot();
    }

    async fn handle_info_key(&mut self, key: KeyEvent) {
        let info = &mut self.profile.info;
        match (self.info_mode, key.code) {
            (InfoMode::Viewing, KeyCode::Char('e')) => {
                info.start_edit(&self.identity);
                self.info_mode = InfoMode::EditingName;
            }
            (InfoMode::Viewing, KeyCode::Char('a')) => {
                info.avatar_path.clear();
                self.info_mode = InfoMode::AvatarPath;
            }
            (InfoMode::Viewing, KeyCode::Char('x')) => {
                if self.identity.avatar_url().is_some() {
                    self.confirm = Some(Confirm {
                        message: messages::CONFIRM_DELETE_AVATAR,
                        action: PendingAction::DeleteAvatar,
                    });
                }
            }
            (InfoMode::Viewing, KeyCode::Char('p')) if self.identity.profile.is_none() => {
                settle("create profile", info.create_profile(&self.ctx).await);
            }
            (InfoMode::EditingName, KeyCode::Enter) => {
                if info.save(&self.ctx).await.is_ok() {
                    self.info_mode = InfoMode::Viewing;
                }
            }
            (InfoMode::EditingName, KeyCode::Esc) => {
                info.cancel_edit(&self.identity);
                self.info_mode = InfoMode::Viewing;
            }
            (InfoMode::AvatarPath, KeyCode::Enter) => {
                if info.change_avatar(&self.ctx).await.is_ok() {
                    self.info_mode = InfoMode::Viewing;
                }
            }
            (InfoMode::AvatarPath, KeyCode::Esc) => {
                info.avatar_path.clear();
                info.error = None;
                self.info_mode = InfoMode::Viewing;
            }
            _ => {}
        }
    }

    async fn handle_characters_key(&mut self, key: KeyEvent) {
        let view = &mut self.profile.characters;
        if let Some(form) = view.form.as_mut() {
            match key.code {
                KeyCode::Esc => view.close_form(),
                KeyCode::Left => form.prev_subclass(),
                KeyCode::Right => form.next_subclass(),
                KeyCode::Enter => {
                    settle("save character", view.save(&self.ctx).await);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => view.select_next(),
            KeyCode::Char('k') | KeyCode::Up => view.select_prev(),
            KeyCode::Char('n') => {
                settle("new character", view.open_new().map_err(Into::into));
            }
            KeyCode::Char('e') => view.open_edit(view.selected),
            KeyCode::Char('d') => {
                if let Some(character) = view.selected_character() {
                    self.confirm = Some(Confirm {
                        message: messages::CONFIRM_DELETE_CHARACTER,
                        action: PendingAction::DeleteCharacter(character.id),
                    });
                }
            }
            KeyCode::Char('r') => view.load(&self.ctx).await,
            _ => {}
        }
    }

    async fn handle_options_key(&mut self, key: KeyEvent) {
        let options = &mut self.profile.options;
        if !options.confirming {
            if key.code == KeyCode::Char('D') {
                options.start_delete();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => options.cancel_delete(),
            KeyCode::Enter => {
                if options.delete_account(&self.ctx).await.is_ok() {
                    self.account_deleted();
                    self.navigate(Route::Home).await;
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // /login
    // ------------------------------------------------------------------

    async fn handle_login_key(&mut self, key: KeyEvent) {
        if ctrl(&key, 't') {
            self.login.toggle_mode();
            return;
        }
        if ctrl(&key, 'r') {
            settle("reset password", self.login.reset_password(&self.ctx).await);
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.login.next_field(),
            KeyCode::Esc => self.navigate(Route::Home).await,
            KeyCode::Enter => {
                if let Ok(true) = self.login.submit(&self.ctx).await {
                    self.identity = self.ctx.identity.snapshot();
                    self.navigate(Route::Home).await;
                }
            }
            _ => {}
        }
    }
}
