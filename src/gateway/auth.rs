//! Password auth, session lifecycle and auth-state notifications.

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::broadcast;

use super::Gateway;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{Session, User, UserMetadata};
use crate::traits::{Method, Request};

/// Kind of auth-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A persisted session was restored (or found absent) at start
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// An auth-state change and the session after it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

/// Result of a sign-up. `session` is `None` when the backend requires e-mail
/// confirmation before the first sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpOutcome {
    pub user: User,
    pub session: Option<Session>,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl From<TokenResponse> for Session {
    fn from(t: TokenResponse) -> Self {
        let expires_at = t
            .expires_at
            .or_else(|| t.expires_in.map(|secs| Utc::now().timestamp() + secs));
        Session {
            access_token: t.access_token,
            refresh_token: t.refresh_token,
            expires_at,
            user: t.user,
        }
    }
}

/// Sign-up returns either a full token response or just the user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    Wrapped { user: User },
    User(User),
}

impl Gateway {
    /// Subscribe to auth-state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.events.subscribe()
    }

    /// The session currently held in memory.
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    fn emit(&self, event: AuthEvent, session: Option<Session>) {
        tracing::debug!("Auth event {:?}", event);
        // No subscribers is fine
        let _ = self.events.send(AuthChange { event, session });
    }

    /// Replace the in-memory session and mirror it to the session store.
    async fn store_session(&self, session: Option<Session>) {
        *self.session.write().await = session.clone();

        let Some(store) = &self.store else {
            return;
        };
        let result = match &session {
            Some(s) => store.save(s).await,
            None => store.clear().await,
        };
        if let Err(e) = result {
            tracing::warn!("Session store update failed: {}", e);
        }
    }

    fn auth_request(&self, method: Method, path: &str) -> Request {
        Request::new(method, format!("{}{}", self.config.auth_url(), path))
            .header("apikey", self.config.anon_key.clone())
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
    }

    /// Register a new account.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> GatewayResult<SignUpOutcome> {
        tracing::debug!("Signing up {}", email);
        let body = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "data": {
                "full_name": metadata.full_name.clone().unwrap_or_default(),
                "avatar_url": metadata.avatar_url.clone().unwrap_or_default(),
            },
        });
        let request = self.auth_request(Method::Post, "/signup").json(&body)?;
        let response = match self.execute(request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Error in sign up: {}", e);
                return Err(e);
            }
        };

        let outcome = match response.json::<SignUpResponse>()? {
            SignUpResponse::Session(token) => {
                let session = Session::from(token);
                SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpResponse::Wrapped { user } | SignUpResponse::User(user) => SignUpOutcome {
                user,
                session: None,
            },
        };

        if let Some(session) = &outcome.session {
            self.store_session(Some(session.clone())).await;
            self.emit(AuthEvent::SignedIn, Some(session.clone()));
        }
        tracing::info!("Sign up completed for {}", email);
        Ok(outcome)
    }

    /// Sign in with e-mail and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        tracing::debug!("Signing in {}", email);
        let body = serde_json::json!({ "email": email.trim(), "password": password });
        let request = self
            .auth_request(Method::Post, "/token?grant_type=password")
            .json(&body)?;

        let session: Session = match self.execute(request).await {
            Ok(response) => response.json::<TokenResponse>()?.into(),
            Err(e) => {
                tracing::error!("Error in sign in: {}", e);
                return Err(e);
            }
        };

        self.store_session(Some(session.clone())).await;
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        tracing::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    /// Sign out.
    ///
    /// The local and persisted session are dropped before the remote call, so
    /// the client is signed out even when the call fails.
    pub async fn sign_out(&self) -> GatewayResult<()> {
        let token = self.session.read().await.as_ref().map(|s| s.access_token.clone());
        self.store_session(None).await;
        self.emit(AuthEvent::SignedOut, None);

        let Some(token) = token else {
            return Ok(());
        };
        let request = self
            .auth_request(Method::Post, "/logout")
            .header("Authorization", format!("Bearer {}", token));
        match self.execute(request).await {
            Ok(_) => {
                tracing::info!("Signed out");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Remote sign out failed: {}", e);
                Err(e)
            }
        }
    }

    /// The current session, restoring it from the session store on first use
    /// and refreshing it when expired.
    pub async fn get_session(&self) -> GatewayResult<Option<Session>> {
        let held = self.session.read().await.clone();
        let session = match held {
            Some(s) => s,
            None => {
                let restored = match &self.store {
                    Some(store) => store.load().await.unwrap_or_else(|e| {
                        tracing::warn!("Could not read stored session: {}", e);
                        None
                    }),
                    None => None,
                };
                match restored {
                    Some(s) => {
                        *self.session.write().await = Some(s.clone());
                        s
                    }
                    None => {
                        self.emit(AuthEvent::InitialSession, None);
                        return Ok(None);
                    }
                }
            }
        };

        let session = if session.is_expired() {
            tracing::debug!("Stored session expired, refreshing");
            match self.refresh_session().await {
                Ok(s) => s,
                Err(e) => {
                    // A rejected refresh token will never work again
                    if e.status().is_some() {
                        self.store_session(None).await;
                    }
                    return Err(e);
                }
            }
        } else {
            session
        };

        self.emit(AuthEvent::InitialSession, Some(session.clone()));
        Ok(Some(session))
    }

    /// Exchange the refresh token for a new session.
    pub async fn refresh_session(&self) -> GatewayResult<Session> {
        let refresh_token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(GatewayError::NotAuthenticated)?;

        let body = serde_json::json!({ "refresh_token": refresh_token });
        let request = self
            .auth_request(Method::Post, "/token?grant_type=refresh_token")
            .json(&body)?;

        let session: Session = match self.execute(request).await {
            Ok(response) => response.json::<TokenResponse>()?.into(),
            Err(e) => {
                tracing::error!("Error refreshing session: {}", e);
                return Err(e);
            }
        };

        self.store_session(Some(session.clone())).await;
        self.emit(AuthEvent::TokenRefreshed, Some(session.clone()));
        tracing::info!("Session refreshed");
        Ok(session)
    }

    /// Fetch the authenticated user from the auth API.
    pub async fn get_user(&self) -> GatewayResult<User> {
        if self.session.read().await.is_none() {
            return Err(GatewayError::NotAuthenticated);
        }
        let token = self.bearer_token().await;
        let request = self
            .auth_request(Method::Get, "/user")
            .header("Authorization", format!("Bearer {}", token));
        let user: User = match self.execute(request).await {
            Ok(response) => response.json()?,
            Err(e) => {
                tracing::error!("Error getting user: {}", e);
                return Err(e);
            }
        };

        let updated = {
            let mut guard = self.session.write().await;
            match guard.as_mut() {
                Some(session) if session.user != user => {
                    session.user = user.clone();
                    Some(session.clone())
                }
                _ => None,
            }
        };
        if let Some(session) = updated {
            self.store_session(Some(session.clone())).await;
            self.emit(AuthEvent::UserUpdated, Some(session));
        }
        Ok(user)
    }

    /// Send a password-reset e-mail.
    pub async fn reset_password(&self, email: &str) -> GatewayResult<()> {
        let path = match &self.config.redirect_url {
            Some(to) => format!("/recover?redirect_to={}", urlencoding::encode(to)),
            None => "/recover".to_string(),
        };
        let request = self
            .auth_request(Method::Post, &path)
            .json(&serde_json::json!({ "email": email.trim() }))?;
        super::logged(
            self.execute(request).await.map(|_| ()),
            "Password reset e-mail requested",
            "Error requesting password reset",
        )
    }
}
