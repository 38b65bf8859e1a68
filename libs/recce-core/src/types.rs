//! Core types for the identification quiz.

use crate::error::{QuizError, Result};
use serde::{Deserialize, Serialize};

/// One playable image in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableItem {
    /// Stable identity, unique across the catalog.
    pub id: String,
    /// Locator for the image shown to the player; the viewer resolves it.
    pub image_ref: String,
    /// Joins to [`ReferenceEntry::ref_id`].
    pub ref_id: String,
    #[serde(default)]
    pub disregard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Acceptable names and metadata for one subject, joined by `ref_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub ref_id: String,
    /// Up to 5 candidate names; order reflects display preference only.
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub disregard: bool,
}

impl ReferenceEntry {
    /// Names with empty or whitespace-only entries filtered out.
    pub fn display_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect()
    }

    /// Whether the entry carries a usable link.
    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// Payload handed to the display layer when an item is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceInfo {
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How the player answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Reveal-only; no scoring.
    Flashcard,
    /// Typed guesses scored by the matcher.
    Typed,
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Flashcard
    }
}

/// Scoring outcome for a single revealed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOutcome {
    Correct,
    /// Accepted only through base-model equivalence.
    Partial,
    Incorrect,
    /// Flash-card reveal; no guess was scored.
    Unscored,
}

/// Session configuration. Persisted by the external settings layer; the
/// core only takes it at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    pub round_size: usize,
    pub time_per_item_secs: u32,
    pub mode: GameMode,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            round_size: 10,
            time_per_item_secs: 30,
            mode: GameMode::default(),
        }
    }
}

impl QuizConfig {
    /// Create a config, validating that `round_size` is within 1..=50.
    pub fn new(round_size: usize, time_per_item_secs: u32, mode: GameMode) -> Result<Self> {
        if round_size == 0 || round_size > 50 {
            return Err(QuizError::InvalidRoundSize { value: round_size });
        }
        Ok(Self {
            round_size,
            time_per_item_secs,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.round_size, 10);
        assert_eq!(config.time_per_item_secs, 30);
        assert_eq!(config.mode, GameMode::Flashcard);
    }

    #[test]
    fn reject_out_of_range_round_size() {
        assert!(matches!(
            QuizConfig::new(0, 30, GameMode::Typed),
            Err(QuizError::InvalidRoundSize { value: 0 })
        ));
        assert!(matches!(
            QuizConfig::new(51, 30, GameMode::Typed),
            Err(QuizError::InvalidRoundSize { value: 51 })
        ));
        assert!(QuizConfig::new(50, 30, GameMode::Typed).is_ok());
    }

    #[test]
    fn display_names_skip_blanks() {
        let entry = ReferenceEntry {
            ref_id: "r1".into(),
            names: vec!["T-72".into(), "".into(), "  ".into(), "Ural".into()],
            link: None,
            disregard: false,
        };
        assert_eq!(entry.display_names(), vec!["T-72", "Ural"]);
    }

    #[test]
    fn blank_link_counts_as_missing() {
        let mut entry = ReferenceEntry {
            ref_id: "r1".into(),
            names: vec!["T-72".into()],
            link: Some("  ".into()),
            disregard: false,
        };
        assert!(!entry.has_link());
        entry.link = Some("https://example.org/t-72".into());
        assert!(entry.has_link());
    }
}
