use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_non_empty, email_local_part, User};

/// A member's public record, keyed by the auth user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub avatar_url: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Display name: full name, else e-mail local part.
    pub fn display_name(&self) -> String {
        match (&self.full_name, &self.email) {
            (Some(name), _) => name.clone(),
            (None, Some(email)) => email_local_part(email).to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Row inserted when a profile is created from the auth user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProfile {
    pub fn from_user(user: &User) -> Self {
        let now = Utc::now();
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.user_metadata.full_name.clone().unwrap_or_default(),
            avatar_url: user.user_metadata.avatar_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// `Some(None)` clears the avatar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Option<String>>,
}

impl ProfileChanges {
    pub fn full_name(name: impl Into<String>) -> Self {
        Self {
            full_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn avatar_url(url: Option<String>) -> Self {
        Self {
            avatar_url: Some(url),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserMetadata;

    #[test]
    fn test_profile_from_row_with_nulls() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{}","email":"neo@matrix.io","full_name":null,"avatar_url":null,
                "created_at":"2025-03-01T10:00:00+00:00","updated_at":"2025-03-02T10:00:00+00:00"}}"#,
            id
        );
        let profile: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile.id, id);
        assert!(profile.full_name.is_none());
        assert_eq!(profile.display_name(), "neo");
    }

    #[test]
    fn test_changes_serialization() {
        let json = serde_json::to_value(ProfileChanges::full_name("Trinity")).unwrap();
        assert_eq!(json, serde_json::json!({"full_name": "Trinity"}));

        let json = serde_json::to_value(ProfileChanges::avatar_url(None)).unwrap();
        assert_eq!(json, serde_json::json!({"avatar_url": null}));
    }

    #[test]
    fn test_new_profile_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            email: Some("ana@example.com".to_string()),
            user_metadata: UserMetadata {
                full_name: None,
                avatar_url: Some("https://cdn/a.png".to_string()),
            },
        };
        let row = NewProfile::from_user(&user);
        assert_eq!(row.full_name, "");
        assert_eq!(row.avatar_url.as_deref(), Some("https://cdn/a.png"));
        assert_eq!(row.created_at, row.updated_at);
    }
}
