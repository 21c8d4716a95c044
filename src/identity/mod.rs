//! Session and profile holder.
//!
//! [`IdentityContext`] is the one place that knows who is signed in. It is
//! fed by the gateway (sign in/up/out, restored sessions, auth events) and
//! loads the member's profile row in the background whenever the signed-in
//! user changes. Views read an [`Identity`] snapshot and call the mutating
//! operations here.

mod state;

pub use state::{Identity, IdentityState, ProfileStatus};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::error::{AppResult, GatewayResult, ValidationError};
use crate::gateway::storage::{avatar_object_path, avatar_path};
use crate::gateway::{AuthChange, AuthEvent, Bucket, Gateway};
use crate::models::{FileUpload, Profile, ProfileChanges, Session, User, UserMetadata};
use crate::validation::{validate_avatar, validate_credentials, validate_delete_confirmation};

/// Sent whenever the identity snapshot changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityNotice {
    SessionChanged,
    ProfileChanged,
}

/// Explicit identity holder shared by the views.
pub struct IdentityContext {
    gateway: Arc<Gateway>,
    identity: RwLock<Identity>,
    notifier: Option<mpsc::UnboundedSender<IdentityNotice>>,
}

impl IdentityContext {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            identity: RwLock::new(Identity::default()),
            notifier: None,
        }
    }

    /// Report snapshot changes on `tx` (the UI loop redraws on each).
    pub fn with_notifier(mut self, tx: mpsc::UnboundedSender<IdentityNotice>) -> Self {
        self.notifier = Some(tx);
        self
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Copy of the current identity.
    pub fn snapshot(&self) -> Identity {
        self.read().clone()
    }

    pub fn state(&self) -> IdentityState {
        self.read().state()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Identity> {
        self.identity.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Identity> {
        self.identity.write().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, notice: IdentityNotice) {
        if let Some(tx) = &self.notifier {
            let _ = tx.send(notice);
        }
    }

    fn require_user(&self, action: &'static str) -> Result<User, ValidationError> {
        self.user()
            .ok_or(ValidationError::SignInRequired { action })
    }

    /// Restore the persisted session at app start.
    ///
    /// `loading` is cleared as soon as the session is known; the profile is
    /// fetched in the background.
    pub async fn start(self: &Arc<Self>) -> AppResult<()> {
        self.write().loading = true;
        self.notify(IdentityNotice::SessionChanged);

        match self.gateway.get_session().await {
            Ok(session) => {
                self.apply_session(session);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                self.apply_session(None);
                Err(e.into())
            }
        }
    }

    /// Forward gateway auth events into this context until the gateway is
    /// dropped.
    pub fn watch_auth_events(self: &Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.gateway.subscribe();
        let this = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) => this.handle_auth_event(change),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Missed {} auth events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// React to an auth state change.
    pub fn handle_auth_event(self: &Arc<Self>, change: AuthChange) {
        tracing::debug!("Auth event {:?}", change.event);
        match change.event {
            AuthEvent::SignedOut => self.clear_local(),
            AuthEvent::InitialSession
            | AuthEvent::SignedIn
            | AuthEvent::TokenRefreshed
            | AuthEvent::UserUpdated => self.apply_session(change.session),
        }
    }

    /// Hold `session`, loading the profile when the user changed.
    fn apply_session(self: &Arc<Self>, session: Option<Session>) {
        let reload = {
            let mut identity = self.write();
            identity.loading = false;
            match session {
                Some(session) => {
                    let same_user = identity.user_id() == Some(session.user.id);
                    identity.user = Some(session.user.clone());
                    identity.session = Some(session);
                    if same_user && identity.profile_status != ProfileStatus::Idle {
                        false
                    } else {
                        identity.profile = None;
                        identity.profile_status = ProfileStatus::Loading;
                        true
                    }
                }
                None => {
                    identity.clear();
                    false
                }
            }
        };
        self.notify(IdentityNotice::SessionChanged);
        if reload {
            self.load_profile();
        }
    }

    fn clear_local(&self) {
        self.write().clear();
        self.notify(IdentityNotice::SessionChanged);
    }

    /// Fetch the current user's profile in a spawned task.
    pub fn load_profile(self: &Arc<Self>) {
        let Some(user_id) = self.read().user_id() else {
            return;
        };
        self.write().profile_status = ProfileStatus::Loading;
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let result = this.gateway.get_profile(user_id).await;
            this.finish_profile_load(user_id, result);
        });
    }

    fn finish_profile_load(&self, user_id: uuid::Uuid, result: GatewayResult<Profile>) {
        {
            let mut identity = self.write();
            if identity.user_id() != Some(user_id) {
                tracing::debug!("Discarding profile for a user no longer signed in");
                return;
            }
            match result {
                Ok(profile) => {
                    identity.profile = Some(profile);
                    identity.profile_status = ProfileStatus::Loaded;
                }
                Err(e) if e.is_not_found() => {
                    tracing::warn!("User {} has no profile yet", user_id);
                    identity.profile = None;
                    identity.profile_status = ProfileStatus::Missing;
                }
                Err(e) => {
                    identity.profile = None;
                    identity.profile_status = ProfileStatus::Failed(e.to_string());
                }
            }
        }
        self.notify(IdentityNotice::ProfileChanged);
    }

    pub async fn sign_in(self: &Arc<Self>, email: &str, password: &str) -> AppResult<()> {
        validate_credentials(email, password)?;
        self.write().loading = true;
        self.notify(IdentityNotice::SessionChanged);

        match self.gateway.sign_in(email, password).await {
            Ok(session) => {
                self.apply_session(Some(session));
                Ok(())
            }
            Err(e) => {
                self.write().loading = false;
                self.notify(IdentityNotice::SessionChanged);
                Err(e.into())
            }
        }
    }

    /// Register an account. Returns `true` when the backend asks for e-mail
    /// confirmation before a session is issued.
    pub async fn sign_up(
        self: &Arc<Self>,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> AppResult<bool> {
        validate_credentials(email, password)?;
        self.write().loading = true;
        self.notify(IdentityNotice::SessionChanged);

        let metadata = UserMetadata {
            full_name: Some(full_name.trim().to_string()).filter(|n| !n.is_empty()),
            avatar_url: None,
        };
        let result = self.gateway.sign_up(email, password, &metadata).await;
        match result {
            Ok(outcome) => {
                let needs_confirmation = outcome.session.is_none();
                match outcome.session {
                    Some(session) => self.apply_session(Some(session)),
                    None => {
                        self.write().loading = false;
                        self.notify(IdentityNotice::SessionChanged);
                    }
                }
                Ok(needs_confirmation)
            }
            Err(e) => {
                self.write().loading = false;
                self.notify(IdentityNotice::SessionChanged);
                Err(e.into())
            }
        }
    }

    /// Sign out. Local state is cleared first and the call succeeds whatever
    /// the backend answers.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.clear_local();
        if let Err(e) = self.gateway.sign_out().await {
            tracing::warn!("Remote sign out failed, signed out locally: {}", e);
        }
        Ok(())
    }

    pub async fn update_profile(&self, changes: ProfileChanges) -> AppResult<Profile> {
        let user = self.require_user("editar tu perfil")?;
        let profile = self.gateway.update_profile(user.id, &changes).await?;
        self.set_profile(profile.clone());
        Ok(profile)
    }

    fn set_profile(&self, profile: Profile) {
        {
            let mut identity = self.write();
            identity.profile = Some(profile);
            identity.profile_status = ProfileStatus::Loaded;
        }
        self.notify(IdentityNotice::ProfileChanged);
    }

    /// Upload a new avatar and point the profile at it.
    ///
    /// If the profile update fails the uploaded object stays in the bucket.
    pub async fn upload_avatar(&self, file: &FileUpload) -> AppResult<Profile> {
        let user = self.require_user("cambiar tu avatar")?;
        validate_avatar(file)?;

        let path = avatar_path(
            user.id,
            chrono::Utc::now().timestamp_millis(),
            file.extension(),
        );
        self.gateway
            .upload(Bucket::Avatars, &path, file.bytes.clone(), &file.content_type)
            .await?;
        let url = self.gateway.public_url(Bucket::Avatars, &path);
        self.update_profile(ProfileChanges::avatar_url(Some(url))).await
    }

    /// Clear the profile's avatar. Does nothing without a user or an avatar.
    pub async fn delete_avatar(&self) -> AppResult<Option<Profile>> {
        let has_avatar = {
            let identity = self.read();
            identity.user.is_some()
                && identity
                    .profile
                    .as_ref()
                    .map_or(false, |p| p.avatar_url.is_some())
        };
        if !has_avatar {
            return Ok(None);
        }
        self.update_profile(ProfileChanges::avatar_url(None))
            .await
            .map(Some)
    }

    /// Create the profile row from the auth user's metadata.
    pub async fn create_profile(&self) -> AppResult<Profile> {
        let user = self.require_user("crear tu perfil")?;
        let profile = self.gateway.create_profile(&user).await?;
        self.set_profile(profile.clone());
        Ok(profile)
    }

    /// Delete the account after the typed confirmation.
    ///
    /// The profile row and avatar are removed best-effort; the auth account
    /// deletion must succeed before local state is cleared.
    pub async fn delete_account(&self, confirmation: &str) -> AppResult<()> {
        validate_delete_confirmation(confirmation)?;
        let user = self.require_user("eliminar tu cuenta")?;
        let avatar_url = self
            .read()
            .profile
            .as_ref()
            .and_then(|p| p.avatar_url.clone());

        if let Err(e) = self.gateway.delete_profile(user.id).await {
            tracing::error!("Profile row not deleted: {}", e);
        }
        if let Some(path) = avatar_url.and_then(|url| avatar_object_path(user.id, &url)) {
            if let Err(e) = self.gateway.remove(Bucket::Avatars, &[path]).await {
                tracing::error!("Avatar not removed: {}", e);
            }
        }
        self.gateway.delete_user().await?;

        self.clear_local();
        if let Err(e) = self.gateway.sign_out().await {
            tracing::debug!("Sign out after account deletion failed: {}", e);
        }
        tracing::info!("Account {} deleted", user.id);
        Ok(())
    }
}
