//! Message handling for the App.

use std::time::Instant;

use super::{App, AppMessage};
use crate::view_state::Route;

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub async fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Identity(notice) => {
                tracing::debug!("Identity notice: {:?}", notice);
                self.sync_identity().await;
            }
            AppMessage::SessionRestored { error } => {
                if let Some(error) = error {
                    tracing::warn!("Session restore failed: {}", error);
                }
                self.sync_identity().await;
            }
        }
    }

    /// Refresh the identity copy and reload whatever depends on the user.
    pub(crate) async fn sync_identity(&mut self) {
        let previous = self.identity.user_id();
        self.identity = self.ctx.identity.snapshot();
        let current = self.identity.user_id();

        if previous != current {
            tracing::info!("Signed-in user changed");
            self.characters_loaded_for = None;
            self.profile.info.cancel_edit(&self.identity);
            if self.feed_loaded {
                // Like flags depend on who is looking
                self.feed.load(&self.ctx).await;
            }
        }
        if self.router.current() == Route::Profile {
            self.ensure_characters_loaded().await;
        }
        self.resolve_route(Instant::now());
    }
}
