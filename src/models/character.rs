use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Most characters a single profile may own.
pub const MAX_CHARACTERS: usize = 9;

/// Character subclass. Stored unaccented, shown with accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Subclass {
    Barbaro,
    Brujo,
    Caballero,
    Cazador,
    Conjurador,
    Tirador,
}

impl Subclass {
    pub const ALL: [Subclass; 6] = [
        Subclass::Barbaro,
        Subclass::Brujo,
        Subclass::Caballero,
        Subclass::Cazador,
        Subclass::Conjurador,
        Subclass::Tirador,
    ];

    /// Value stored in the `subclass` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subclass::Barbaro => "Barbaro",
            Subclass::Brujo => "Brujo",
            Subclass::Caballero => "Caballero",
            Subclass::Cazador => "Cazador",
            Subclass::Conjurador => "Conjurador",
            Subclass::Tirador => "Tirador",
        }
    }

    /// Label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Subclass::Barbaro => "Bárbaro",
            other => other.as_str(),
        }
    }

    /// The next subclass in [`Subclass::ALL`], wrapping around.
    pub fn next(&self) -> Subclass {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous subclass in [`Subclass::ALL`], wrapping around.
    pub fn prev(&self) -> Subclass {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for Subclass {
    type Err = String;

    /// Accepts the stored value or the accented label, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|sub| {
                sub.as_str().eq_ignore_ascii_case(needle)
                    || sub.label().to_lowercase() == needle.to_lowercase()
            })
            .ok_or_else(|| s.to_string())
    }
}

impl TryFrom<String> for Subclass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Subclass> for String {
    fn from(value: Subclass) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Subclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A character owned by a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub subclass: Subclass,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Search result row (`id, name, subclass, user_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterSummary {
    pub id: Uuid,
    pub name: String,
    pub subclass: Subclass,
    pub user_id: Uuid,
}

impl From<&Character> for CharacterSummary {
    fn from(c: &Character) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            subclass: c.subclass,
            user_id: c.user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewCharacter {
    pub user_id: Uuid,
    pub name: String,
    pub subclass: Subclass,
}

/// Partial character update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CharacterChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subclass: Option<Subclass>,
}
