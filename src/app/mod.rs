//! Application state and logic for the TUI.
//!
//! [`App`] owns every view state, the router and the shared
//! [`AppContext`]. The event loop in `main` feeds it key presses and
//! [`AppMessage`]s; `ui::render` draws it.

mod handlers;
mod keys;
mod messages;
mod types;

pub use messages::AppMessage;
pub use types::{Confirm, InfoMode, PendingAction, UploadField};

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::identity::{Identity, IdentityNotice};
use crate::view_state::{FeedView, LoginView, ProfileView, Resolution, Route, Router};

/// Main application state
pub struct App {
    pub ctx: AppContext,
    pub router: Router,
    /// Latest route resolution, recomputed every loop iteration.
    pub resolution: Resolution,
    /// Copy of the identity, refreshed on every identity notice.
    pub identity: Identity,
    pub feed: FeedView,
    pub profile: ProfileView,
    pub login: LoginView,
    pub confirm: Option<Confirm>,
    pub upload_field: UploadField,
    /// Highlighted search result in the upload modal.
    pub upload_result: usize,
    pub info_mode: InfoMode,
    /// One-line status shown in the footer.
    pub status: Option<String>,
    pub should_quit: bool,
    pub needs_redraw: bool,
    pub tick_count: u64,
    /// Receiver for async messages (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub(crate) feed_loaded: bool,
    pub(crate) characters_loaded_for: Option<Uuid>,
}

impl App {
    pub fn new(
        ctx: AppContext,
        message_tx: mpsc::UnboundedSender<AppMessage>,
        message_rx: mpsc::UnboundedReceiver<AppMessage>,
    ) -> Self {
        let router = Router::new(ctx.config.profile_loading_fallback);
        Self {
            ctx,
            router,
            resolution: Resolution::Show(Route::Home),
            identity: Identity::default(),
            feed: FeedView::default(),
            profile: ProfileView::default(),
            login: LoginView::default(),
            confirm: None,
            upload_field: UploadField::default(),
            upload_result: 0,
            info_mode: InfoMode::default(),
            status: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_rx: Some(message_rx),
            message_tx,
            feed_loaded: false,
            characters_loaded_for: None,
        }
    }

    /// Forward identity notices into the app message channel.
    pub fn forward_identity_notices(&self, mut notices: mpsc::UnboundedReceiver<IdentityNotice>) {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            while let Some(notice) = notices.recv().await {
                if tx.send(AppMessage::Identity(notice)).is_err() {
                    break;
                }
            }
        });
    }

    /// Restore the session in the background and start listening for auth
    /// events.
    pub fn start_identity(&mut self) {
        self.identity.loading = true;
        let identity = Arc::clone(&self.ctx.identity);
        let _watcher = identity.watch_auth_events();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let error = identity.start().await.err().map(|e| e.to_string());
            let _ = tx.send(AppMessage::SessionRestored { error });
        });
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance animations and expire the toast.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        let now = Instant::now();
        if self
            .profile
            .info
            .expire_toast(now, self.ctx.config.toast_duration)
        {
            self.mark_dirty();
        }
        let before = self.resolution;
        self.resolve_route(now);
        if self.resolution != before || self.resolution == Resolution::Loading {
            self.mark_dirty();
        }
    }

    /// Apply route guards; a redirect lands on its target immediately.
    pub fn resolve_route(&mut self, now: Instant) {
        self.resolution = self.router.resolve(&self.identity, now);
        if let Resolution::Redirect(_) = self.resolution {
            self.resolution = self.router.resolve(&self.identity, now);
        }
    }

    pub async fn navigate(&mut self, route: Route) {
        self.router.navigate(route);
        self.confirm = None;
        self.resolve_route(Instant::now());
        match self.router.current() {
            Route::Media if !self.feed_loaded => {
                self.feed.load(&self.ctx).await;
                self.feed_loaded = true;
            }
            Route::Profile => self.ensure_characters_loaded().await,
            _ => {}
        }
        self.mark_dirty();
    }

    pub(crate) async fn ensure_characters_loaded(&mut self) {
        let user = self.identity.user_id();
        if user.is_some() && self.characters_loaded_for != user {
            self.profile.characters.load(&self.ctx).await;
            self.characters_loaded_for = user;
        }
    }

    pub async fn sign_out(&mut self) {
        // Never fails; local state is cleared first
        let _ = self.ctx.identity.sign_out().await;
        self.identity = self.ctx.identity.snapshot();
        self.profile = ProfileView::default();
        self.info_mode = InfoMode::Viewing;
        self.characters_loaded_for = None;
        self.navigate(Route::Home).await;
    }

    /// Status shown after the account was deleted.
    pub(crate) fn account_deleted(&mut self) {
        self.status = Some(crate::view_state::messages::ACCOUNT_DELETED.to_string());
        self.profile = ProfileView::default();
        self.identity = self.ctx.identity.snapshot();
    }
}

/// Log the outcome of a view action whose error the view already shows.
pub(crate) fn settle<T>(action: &str, result: AppResult<T>) {
    let Err(err) = result else {
        return;
    };
    let category = err.category();
    if category.is_expected() {
        tracing::debug!("{} rejected ({}): {}", action, category, err);
    } else if category.is_fatal() {
        tracing::error!("{} failed [{}]: {}", action, err.error_code(), err);
    } else {
        tracing::warn!("{} failed [{}]: {}", action, err.error_code(), err);
    }
}
