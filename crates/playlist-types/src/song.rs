use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::classification::{MelodyType, SongCategory};

/// Minimum length (in characters) of titles, descriptions and pitches.
pub const MIN_TEXT_LEN: usize = 3;
/// Maximum length (in characters) of titles, descriptions and pitches.
pub const MAX_TEXT_LEN: usize = 50;

/// Store-assigned identifier of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub i64);

/// Store-assigned identifier of a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MelodyId(pub i64);

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MelodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SongId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl FromStr for MelodyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// The melodic line of a song. Never exists on its own: it is created,
/// stored and deleted together with its owning [`Song`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Melody {
    /// Assigned by the store on first persist; `None` on create input.
    #[serde(default)]
    pub id: Option<MelodyId>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub pitch: String,
    /// Opaque text such as "03:56"; never parsed.
    #[serde(default, deserialize_with = "nullable_string")]
    pub duration: String,
    /// Optional on input so that a missing type is reported by the catalog
    /// service rather than by the JSON decoder. Always `Some` once stored.
    #[serde(rename = "type", default)]
    pub melody_type: Option<MelodyType>,
}

impl Melody {
    /// A melody that has not been persisted yet.
    pub fn new(pitch: impl Into<String>, duration: impl Into<String>, melody_type: MelodyType) -> Self {
        Self {
            id: None,
            pitch: pitch.into(),
            duration: duration.into(),
            melody_type: Some(melody_type),
        }
    }
}

/// A catalog song owning exactly one [`Melody`].
///
/// Serializes to the REST payload shape:
/// `{id, title, description, artistName, duration, category, melody}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(default)]
    pub id: Option<SongId>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub duration: String,
    pub category: SongCategory,
    pub melody: Melody,
}

impl Song {
    /// A song that has not been persisted yet.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        artist_name: impl Into<String>,
        duration: impl Into<String>,
        category: SongCategory,
        melody: Melody,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            artist_name: artist_name.into(),
            duration: duration.into(),
            category,
            melody,
        }
    }

    /// Copy the scalar fields (title, description, artist name, category,
    /// duration) from `other`. Identity and melody are left alone.
    pub fn copy_scalars_from(&mut self, other: &Song) {
        self.title.clone_from(&other.title);
        self.description.clone_from(&other.description);
        self.artist_name.clone_from(&other.artist_name);
        self.category = other.category;
        self.duration.clone_from(&other.duration);
    }

    /// Check the field constraints enforced at the API boundary.
    ///
    /// Returns every violation found (empty when the song is acceptable).
    /// A blank melody pitch is not reported here; the catalog service rejects
    /// it with its own message.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        check_required_text("title", &self.title, &mut violations);
        check_required_text("description", &self.description, &mut violations);
        if !is_blank(&self.melody.pitch) {
            check_length("melody.pitch", "pitch", &self.melody.pitch, &mut violations);
        }
        violations
    }
}

/// A single field constraint violation reported at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path of the offending field (e.g. `melody.pitch`).
    pub field: String,
    pub message: String,
}

/// True when the text is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn check_required_text(field: &str, value: &str, violations: &mut Vec<FieldViolation>) {
    if is_blank(value) {
        violations.push(FieldViolation {
            field: field.to_string(),
            message: format!("{field} must not be blank"),
        });
    }
    check_length(field, field, value, violations);
}

fn check_length(field: &str, label: &str, value: &str, violations: &mut Vec<FieldViolation>) {
    let len = value.chars().count();
    if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
        violations.push(FieldViolation {
            field: field.to_string(),
            message: format!("{label} must be between {MIN_TEXT_LEN} and {MAX_TEXT_LEN} characters"),
        });
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
