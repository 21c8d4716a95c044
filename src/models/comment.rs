use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_count, deserialize_non_empty, deserialize_nullable_string};

/// A comment on a media post. Stats fields are filled by
/// `comments_with_stats` and default otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub author_avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub like_count: u32,
}

impl Comment {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewComment {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
}
