use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{CharacterSummary, Subclass};

/// Default tag position (image center), normalized to `[0, 1]`.
pub const DEFAULT_TAG_POSITION: f64 = 0.5;

/// Character joined onto a tag row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagCharacter {
    pub name: String,
    pub subclass: Subclass,
}

/// A tag attached to a post, as read back with its joined character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostTag {
    pub id: Uuid,
    #[serde(default)]
    pub post_id: Option<Uuid>,
    #[serde(default)]
    pub character_id: Option<Uuid>,
    pub character_name: String,
    #[serde(default, deserialize_with = "deserialize_position")]
    pub position_x: f64,
    #[serde(default, deserialize_with = "deserialize_position")]
    pub position_y: f64,
    #[serde(default)]
    pub characters: Option<TagCharacter>,
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|opt| opt.unwrap_or(0.0))
}

impl PostTag {
    /// True when the tag links to a stored character rather than free text.
    pub fn is_linked(&self) -> bool {
        self.character_id.is_some()
    }
}

/// A tag on a draft post, before it is inserted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTag {
    pub character_id: Option<Uuid>,
    pub character_name: String,
    pub position_x: f64,
    pub position_y: f64,
}

impl NewTag {
    /// Tag linked to an existing character, centered.
    pub fn character(character: &CharacterSummary) -> Self {
        Self {
            character_id: Some(character.id),
            character_name: character.name.clone(),
            position_x: DEFAULT_TAG_POSITION,
            position_y: DEFAULT_TAG_POSITION,
        }
    }

    /// Free-text tag, centered. The name is trimmed.
    pub fn free_text(name: &str) -> Self {
        Self {
            character_id: None,
            character_name: name.trim().to_string(),
            position_x: DEFAULT_TAG_POSITION,
            position_y: DEFAULT_TAG_POSITION,
        }
    }

    /// Clamp the position into `[0, 1]`; non-finite values become 0.
    pub fn normalized(mut self) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        self.position_x = clamp(self.position_x);
        self.position_y = clamp(self.position_y);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_row_with_join() {
        let json = format!(
            r#"{{"id":"{}","character_name":"Ragnar","position_x":0.25,"position_y":0.75,
                "character_id":"{}","characters":{{"name":"Ragnar","subclass":"Barbaro"}}}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let tag: PostTag = serde_json::from_str(&json).unwrap();
        assert!(tag.is_linked());
        assert_eq!(tag.characters.unwrap().subclass, Subclass::Barbaro);
    }

    #[test]
    fn test_free_text_row() {
        let json = format!(
            r#"{{"id":"{}","character_name":"Invitado","position_x":null,"position_y":0.5,"character_id":null,"characters":null}}"#,
            Uuid::new_v4()
        );
        let tag: PostTag = serde_json::from_str(&json).unwrap();
        assert!(!tag.is_linked());
        assert_eq!(tag.position_x, 0.0);
    }

    #[test]
    fn test_new_tags() {
        let summary = CharacterSummary {
            id: Uuid::new_v4(),
            name: "Lyra".to_string(),
            subclass: Subclass::Brujo,
            user_id: Uuid::new_v4(),
        };
        let tag = NewTag::character(&summary);
        assert_eq!(tag.character_id, Some(summary.id));
        assert_eq!(tag.position_x, 0.5);

        let tag = NewTag::free_text("  Invitado ");
        assert_eq!(tag.character_name, "Invitado");
        assert!(tag.character_id.is_none());
    }

    #[test]
    fn test_normalized() {
        let mut tag = NewTag::free_text("x");
        tag.position_x = 1.7;
        tag.position_y = f64::NAN;
        let tag = tag.normalized();
        assert_eq!(tag.position_x, 1.0);
        assert_eq!(tag.position_y, 0.0);
    }
}
