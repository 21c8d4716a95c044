//! Rows and payloads exchanged with the backend.
//!
//! Row types deserialize leniently: nullable text columns become empty
//! strings and missing stats columns default to zero.

mod character;
mod comment;
mod like;
mod post;
mod profile;
mod session;
mod tag;
mod upload;

pub use character::{
    Character, CharacterChanges, CharacterSummary, NewCharacter, Subclass, MAX_CHARACTERS,
};
pub use comment::{Comment, NewComment};
pub use like::{LikeAction, LikeTarget};
pub use post::{MediaPost, NewMediaPost};
pub use profile::{NewProfile, Profile, ProfileChanges};
pub use session::{Session, User, UserMetadata, ANONYMOUS_NAME};
pub use tag::{NewTag, PostTag, TagCharacter, DEFAULT_TAG_POSITION};
pub use upload::FileUpload;

use serde::{Deserialize, Deserializer};

/// Deserialize nullable strings as empty string.
/// Handles both missing fields and explicit null values.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Deserialize optional strings, treating `""` like null.
pub(crate) fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a nullable count as zero, clamped to the `u32` range.
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer)
        .map(|opt| u32::try_from(opt.unwrap_or(0).max(0)).unwrap_or(u32::MAX))
}

/// Local part of an e-mail address (before the `@`).
pub(crate) fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_nullable_string")]
        text: String,
        #[serde(default, deserialize_with = "deserialize_non_empty")]
        avatar: Option<String>,
        #[serde(default, deserialize_with = "deserialize_count")]
        count: u32,
    }

    #[test]
    fn test_lenient_row() {
        let row: Row = serde_json::from_str(r#"{"text":null,"avatar":"","count":null}"#).unwrap();
        assert_eq!(row.text, "");
        assert!(row.avatar.is_none());
        assert_eq!(row.count, 0);

        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.count, 0);

        let row: Row = serde_json::from_str(r#"{"count":-3,"avatar":"a.png"}"#).unwrap();
        assert_eq!(row.count, 0);
        assert_eq!(row.avatar.as_deref(), Some("a.png"));

        let row: Row = serde_json::from_str(r#"{"count":4294967296}"#).unwrap();
        assert_eq!(row.count, u32::MAX);
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("ana@example.com"), "ana");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
    }
}
