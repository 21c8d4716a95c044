use crate::models::{Profile, Session, User};

/// Where the identity lifecycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityState {
    Unauthenticated,
    LoadingProfile,
    AuthenticatedWithProfile,
    /// Signed in, but no profile row exists (or it failed to load).
    AuthenticatedWithoutProfile,
}

/// Progress of the profile fetch for the current user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Missing,
    Failed(String),
}

/// Point-in-time copy of who is signed in.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub user: Option<User>,
    pub session: Option<Session>,
    pub profile: Option<Profile>,
    /// Set while the session itself is being resolved (start, sign in/up).
    pub loading: bool,
    pub profile_status: ProfileStatus,
}

impl Identity {
    pub fn state(&self) -> IdentityState {
        if self.user.is_none() {
            return IdentityState::Unauthenticated;
        }
        match (&self.profile, &self.profile_status) {
            (Some(_), _) => IdentityState::AuthenticatedWithProfile,
            (None, ProfileStatus::Loading) => IdentityState::LoadingProfile,
            (None, _) => IdentityState::AuthenticatedWithoutProfile,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<uuid::Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Name shown for the current member: profile name, then auth metadata.
    pub fn display_name(&self) -> Option<String> {
        match (&self.profile, &self.user) {
            (Some(profile), _) => Some(profile.display_name()),
            (None, Some(user)) => Some(user.display_name()),
            _ => None,
        }
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.avatar_url.as_deref())
            .or_else(|| {
                self.user
                    .as_ref()
                    .and_then(|u| u.user_metadata.avatar_url.as_deref())
            })
    }

    pub(crate) fn clear(&mut self) {
        *self = Identity::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserMetadata;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("ana@example.com".to_string()),
            user_metadata: UserMetadata::default(),
        }
    }

    #[test]
    fn test_states() {
        let mut identity = Identity::default();
        assert_eq!(identity.state(), IdentityState::Unauthenticated);

        identity.user = Some(user());
        identity.profile_status = ProfileStatus::Loading;
        assert_eq!(identity.state(), IdentityState::LoadingProfile);

        identity.profile_status = ProfileStatus::Missing;
        assert_eq!(identity.state(), IdentityState::AuthenticatedWithoutProfile);

        identity.profile_status = ProfileStatus::Failed("boom".to_string());
        assert_eq!(identity.state(), IdentityState::AuthenticatedWithoutProfile);
    }

    #[test]
    fn test_display_name_falls_back_to_user() {
        let mut identity = Identity::default();
        assert!(identity.display_name().is_none());
        identity.user = Some(user());
        assert_eq!(identity.display_name().as_deref(), Some("ana"));
    }

    #[test]
    fn test_clear() {
        let mut identity = Identity {
            user: Some(user()),
            loading: true,
            ..Default::default()
        };
        identity.clear();
        assert!(!identity.is_signed_in());
        assert!(!identity.loading);
    }
}
