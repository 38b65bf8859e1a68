//! Answer matching: decide whether a free-text guess identifies a subject.
//!
//! Guesses and reference names are both canonicalized by [`normalize`], then
//! compared by a priority cascade of rules: exact equality, edit-distance
//! similarity, substring containment, base-model equivalence, and word-level
//! matching. Base-model hits are reported as partial matches.

pub mod designation;
pub mod similarity;

pub use designation::extract_base_model;
pub use similarity::{edit_distance, similarity};

use serde::{Deserialize, Serialize};

/// Similarity at or above this counts a whole guess as a typo of the name.
const FULL_MATCH_THRESHOLD: f64 = 0.85;
/// Per-word similarity threshold for multi-word guesses.
const WORD_MATCH_THRESHOLD: f64 = 0.8;

/// Result of classifying a guess against a set of acceptable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Whether the guess is accepted at all.
    pub matched: bool,
    /// Accepted only via base-model equivalence, not an exact/fuzzy/word hit.
    pub partial: bool,
}

impl MatchOutcome {
    fn none() -> Self {
        Self {
            matched: false,
            partial: false,
        }
    }

    fn full() -> Self {
        Self {
            matched: true,
            partial: false,
        }
    }

    fn partial() -> Self {
        Self {
            matched: true,
            partial: true,
        }
    }
}

/// Canonicalize text for comparison.
///
/// Lower-cases, drops everything outside `[a-z0-9]` and whitespace, collapses
/// whitespace runs, and trims. Idempotent; empty input yields an empty
/// string. Both guesses and reference names must pass through here before
/// any comparison.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify a guess against the acceptable names for a subject.
///
/// Any full match on any name wins over any partial match; a partial result
/// means the guess was accepted exclusively through base-model equivalence.
/// Total over all string inputs; never panics.
pub fn classify(guess: &str, acceptable_names: &[String]) -> MatchOutcome {
    let guess = normalize(guess);
    // Trivial strings would match by substring/fuzzy rules.
    if guess.len() < 3 {
        return MatchOutcome::none();
    }

    let mut partial_hit = false;
    for raw in acceptable_names {
        let name = normalize(raw);
        if name.is_empty() {
            continue;
        }
        match match_name(&guess, &name) {
            NameMatch::Full => return MatchOutcome::full(),
            NameMatch::Partial => partial_hit = true,
            NameMatch::None => {}
        }
    }

    if partial_hit {
        MatchOutcome::partial()
    } else {
        MatchOutcome::none()
    }
}

enum NameMatch {
    Full,
    Partial,
    None,
}

/// Evaluate one normalized name against the normalized guess. Rules are in
/// priority order; the first hit wins for this name.
fn match_name(guess: &str, name: &str) -> NameMatch {
    if guess == name {
        return NameMatch::Full;
    }

    if similarity(guess, name) >= FULL_MATCH_THRESHOLD {
        return NameMatch::Full;
    }

    // Short correct designations typed without the variant suffix.
    if name.contains(guess) && guess.len() >= 4 {
        return NameMatch::Full;
    }

    // Guess names a variant of the base model the name refers to.
    let base = extract_base_model(guess);
    if base != guess
        && base.len() >= 2
        && (base == name || (base.len() >= 3 && name.contains(&base)))
    {
        return NameMatch::Partial;
    }

    if word_match(guess, name) {
        return NameMatch::Full;
    }

    NameMatch::None
}

fn word_match(guess: &str, name: &str) -> bool {
    let guess_words: Vec<&str> = guess.split(' ').collect();
    let name_words: Vec<&str> = name.split(' ').collect();

    if guess_words.len() == 1 {
        let word = guess_words[0];
        if word.len() < 4 {
            return false;
        }
        return name_words.iter().any(|nw| {
            *nw == word
                || similarity(word, nw) >= FULL_MATCH_THRESHOLD
                || (word.len() >= 5 && nw.starts_with(word))
        });
    }

    // Multi-word guess: enough of its words must each hit some name word.
    let needed = guess_words.len().div_ceil(2).max(2);
    let matched = guess_words
        .iter()
        .filter(|gw| name_words.iter().any(|nw| words_agree(gw, nw)))
        .count();
    matched >= needed
}

fn words_agree(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a) || similarity(a, b) >= WORD_MATCH_THRESHOLD
}
