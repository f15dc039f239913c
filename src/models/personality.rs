// src/models/personality.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of personality traits. Every projected vector has this length.
pub const TRAIT_COUNT: usize = 5;

/// Number of genres in the archetype table.
pub const GENRE_COUNT: usize = 5;

/// A personality dimension scored by every quiz option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Creative,
    Independent,
    Confident,
    Intelligent,
    Judgment,
}

impl Trait {
    /// Canonical trait order, used for every vector projection.
    pub const ALL: [Trait; TRAIT_COUNT] = [
        Trait::Creative,
        Trait::Independent,
        Trait::Confident,
        Trait::Intelligent,
        Trait::Judgment,
    ];

    /// Position of the trait in [`Trait::ALL`].
    pub fn index(self) -> usize {
        match self {
            Trait::Creative => 0,
            Trait::Independent => 1,
            Trait::Confident => 2,
            Trait::Intelligent => 3,
            Trait::Judgment => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trait::Creative => "creative",
            Trait::Independent => "independent",
            Trait::Confident => "confident",
            Trait::Intelligent => "intelligent",
            Trait::Judgment => "judgment",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literary genre a respondent can be matched with.
///
/// The lowercase name doubles as the subject slug of the book catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Business,
    History,
    Computers,
    Law,
    Art,
}

impl Genre {
    pub const ALL: [Genre; GENRE_COUNT] = [
        Genre::Business,
        Genre::History,
        Genre::Computers,
        Genre::Law,
        Genre::Art,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Business => "business",
            Genre::History => "history",
            Genre::Computers => "computers",
            Genre::Law => "law",
            Genre::Art => "art",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weight for every trait.
///
/// Each trait is a required field, so a partial mapping cannot be
/// deserialized or constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TraitScore {
    pub creative: i32,
    pub independent: i32,
    pub confident: i32,
    pub intelligent: i32,
    pub judgment: i32,
}

impl TraitScore {
    pub const fn new(
        creative: i32,
        independent: i32,
        confident: i32,
        intelligent: i32,
        judgment: i32,
    ) -> Self {
        Self {
            creative,
            independent,
            confident,
            intelligent,
            judgment,
        }
    }

    /// Builds a score by asking `f` for the weight of each trait.
    pub fn from_fn(mut f: impl FnMut(Trait) -> i32) -> Self {
        Self {
            creative: f(Trait::Creative),
            independent: f(Trait::Independent),
            confident: f(Trait::Confident),
            intelligent: f(Trait::Intelligent),
            judgment: f(Trait::Judgment),
        }
    }

    pub fn get(&self, t: Trait) -> i32 {
        match t {
            Trait::Creative => self.creative,
            Trait::Independent => self.independent,
            Trait::Confident => self.confident,
            Trait::Intelligent => self.intelligent,
            Trait::Judgment => self.judgment,
        }
    }

    /// Iterates `(trait, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, i32)> + '_ {
        Trait::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}
