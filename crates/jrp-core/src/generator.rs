//! Bounded rejection sampling over the WordNet catalog.
//!
//! A phrase is an adjective-or-verb half followed by a noun half. Candidates
//! are drawn uniformly and discarded until the part-of-speech predicate for
//! the current mode accepts one, with the attempt budget fixed at the
//! catalog size. Attempts are independent; a batch may therefore come back
//! shorter than requested even when valid pairings exist.

use chrono::Utc;
use rand::Rng;

use crate::models::{GenerateMode, NewHistory, PartOfSpeech, Word};

/// Source of uniform indices in `[0, bound)`. Production code passes any
/// `rand` generator; tests pass a scripted cursor.
pub trait IndexSource {
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: rand::RngCore> IndexSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Sample at most one phrase from the catalog.
///
/// Each attempt draws fresh indices; the budget equals `words.len()`. The
/// budget matching the catalog size is part of the generation contract, not
/// a tuning knob. Returns `None` for an empty catalog or an exhausted
/// budget.
pub fn generate_one<S: IndexSource + ?Sized>(
    words: &[Word],
    mode: &GenerateMode,
    source: &mut S,
) -> Option<NewHistory> {
    if words.is_empty() {
        return None;
    }

    let budget = words.len();
    for _ in 0..budget {
        let halves = match mode {
            GenerateMode::Prefix(prefix) => {
                let word = &words[source.next_index(words.len())];
                (word.pos == PartOfSpeech::Noun).then(|| (prefix.clone(), word.lemma.clone()))
            }
            GenerateMode::Suffix(suffix) => {
                let word = &words[source.next_index(words.len())];
                matches!(word.pos, PartOfSpeech::Adjective | PartOfSpeech::Verb)
                    .then(|| (word.lemma.clone(), suffix.clone()))
            }
            GenerateMode::Random => {
                let left = &words[source.next_index(words.len())];
                let right = &words[source.next_index(words.len())];
                (matches!(left.pos, PartOfSpeech::Adjective | PartOfSpeech::Verb)
                    && right.pos == PartOfSpeech::Noun)
                    .then(|| (left.lemma.clone(), right.lemma.clone()))
            }
        };

        if let Some((left, right)) = halves {
            let (prefix, suffix) = match mode {
                GenerateMode::Prefix(p) => (Some(p.clone()), None),
                GenerateMode::Suffix(s) => (None, Some(s.clone())),
                GenerateMode::Random => (None, None),
            };
            let now = Utc::now();
            return Some(NewHistory {
                phrase: format!("{left}{right}"),
                prefix,
                suffix,
                is_favorited: false,
                created_at: now,
                updated_at: now,
            });
        }
    }

    None
}

/// Sample up to `count` phrases, invoking [`generate_one`] once per desired
/// output. Failed attempts are dropped, so the result may be shorter.
pub fn generate_batch<S: IndexSource + ?Sized>(
    words: &[Word],
    mode: &GenerateMode,
    count: usize,
    source: &mut S,
) -> Vec<NewHistory> {
    let mut drafts = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(draft) = generate_one(words, mode, source) {
            drafts.push(draft);
        }
    }
    drafts
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
