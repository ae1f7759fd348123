//! Closed classification sets for songs and melodies.
//!
//! Both enums resolve free text case-insensitively against their member
//! names and always render in canonical uppercase. Parsing, `Display` and
//! serde all go through [`Classification::resolve`], so a value that is not a
//! member can never enter the domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A closed set of named members with case-insensitive name resolution.
pub trait Classification: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Canonical (uppercase) name of this member.
    fn name(&self) -> &'static str;

    /// Resolve free text to a member.
    ///
    /// Exact match on the member name, ignoring case. No trimming, no partial
    /// matches; unknown text yields `None`.
    fn resolve(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.name().eq_ignore_ascii_case(text))
    }
}

/// Song categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongCategory {
    Pop,
    Rock,
    Jazz,
    Classical,
    Rap,
    Electro,
}

impl Classification for SongCategory {
    const ALL: &'static [Self] = &[
        SongCategory::Pop,
        SongCategory::Rock,
        SongCategory::Jazz,
        SongCategory::Classical,
        SongCategory::Rap,
        SongCategory::Electro,
    ];

    fn name(&self) -> &'static str {
        match self {
            SongCategory::Pop => "POP",
            SongCategory::Rock => "ROCK",
            SongCategory::Jazz => "JAZZ",
            SongCategory::Classical => "CLASSICAL",
            SongCategory::Rap => "RAP",
            SongCategory::Electro => "ELECTRO",
        }
    }
}

/// Melody types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MelodyType {
    Color,
    Blends,
    Direction,
}

impl Classification for MelodyType {
    const ALL: &'static [Self] = &[MelodyType::Color, MelodyType::Blends, MelodyType::Direction];

    fn name(&self) -> &'static str {
        match self {
            MelodyType::Color => "COLOR",
            MelodyType::Blends => "BLENDS",
            MelodyType::Direction => "DIRECTION",
        }
    }
}

/// Implements `Display`, `FromStr` and serde for a [`Classification`] enum.
macro_rules! classification_impls {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::resolve(s).ok_or_else(|| {
                    let expected: Vec<&str> = <$ty>::ALL.iter().map(|m| m.name()).collect();
                    format!(
                        "invalid {}: '{s}' (expected one of {})",
                        $label,
                        expected.join(", ")
                    )
                })
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

classification_impls!(SongCategory, "song category");
classification_impls!(MelodyType, "melody type");
