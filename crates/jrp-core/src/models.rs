//! Domain models for generated phrases and their provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted phrase with its provenance and favorite state.
///
/// `prefix` and `suffix` record which half the user pinned at generation
/// time. `None` means the half was sampled; it is stored as SQL NULL and is
/// never conflated with an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub id: i64,
    pub phrase: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub is_favorited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A phrase that has not been persisted yet. The store assigns the id on
/// insert; [`crate::Database::save_all`] returns the saved [`History`] rows
/// in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistory {
    pub phrase: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub is_favorited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A lexical entry read from the Japanese WordNet database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub lemma: String,
    pub pos: PartOfSpeech,
}

/// Part-of-speech tags recognised by the sampler. WordNet tags outside
/// `a`/`v`/`n` (e.g. adverbs) map to `Other` and are never accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Adjective,
    Verb,
    Noun,
    Other,
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartOfSpeech::Adjective => write!(f, "a"),
            PartOfSpeech::Verb => write!(f, "v"),
            PartOfSpeech::Noun => write!(f, "n"),
            PartOfSpeech::Other => write!(f, "-"),
        }
    }
}

impl From<&str> for PartOfSpeech {
    fn from(s: &str) -> Self {
        match s {
            "a" => PartOfSpeech::Adjective,
            "v" => PartOfSpeech::Verb,
            "n" => PartOfSpeech::Noun,
            _ => PartOfSpeech::Other,
        }
    }
}

/// How the two halves of a phrase are chosen. The sum type makes
/// "both halves pinned" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateMode {
    /// Sample both halves.
    Random,
    /// Left half fixed by the user; sample a noun for the right half.
    Prefix(String),
    /// Right half fixed by the user; sample an adjective or verb for the
    /// left half.
    Suffix(String),
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
