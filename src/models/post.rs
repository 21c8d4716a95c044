use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_count, deserialize_non_empty, deserialize_nullable_string};

/// A media post. Rows from `media_posts_with_stats` carry the author and
/// counters; plain `media_posts` rows leave them at their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub author_avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub like_count: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub comment_count: u32,
}

impl MediaPost {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMediaPost {
    pub user_id: Uuid,
    pub image_url: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_row() {
        let json = format!(
            r#"{{"id":"{}","user_id":"{}","image_url":"https://cdn/x.png","description":null,
                "created_at":"2025-05-01T12:00:00Z","author_name":"Ana","author_avatar":null,
                "like_count":3,"comment_count":null}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let post: MediaPost = serde_json::from_str(&json).unwrap();
        assert_eq!(post.description, "");
        assert_eq!(post.author_name.as_deref(), Some("Ana"));
        assert_eq!(post.like_count, 3);
        assert_eq!(post.comment_count, 0);
    }

    #[test]
    fn test_plain_row_defaults() {
        let user = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{}","user_id":"{}","image_url":"u","description":"hola"}}"#,
            Uuid::new_v4(),
            user
        );
        let post: MediaPost = serde_json::from_str(&json).unwrap();
        assert!(post.author_name.is_none());
        assert_eq!(post.like_count, 0);
        assert!(post.is_owned_by(user));
    }
}
