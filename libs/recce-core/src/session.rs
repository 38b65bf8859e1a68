//! Round/session state machine.
//!
//! The session is a plain synchronous machine: the UI layer (buttons, the
//! countdown timer, image load callbacks) delivers commands one at a time
//! and receives events describing what to display. The core performs no I/O
//! and owns no timers; `timeout()` arrives from outside when the per-item
//! countdown expires.

use crate::catalog::ReferenceIndex;
use crate::error::{QuizError, Result};
use crate::matching::classify;
use crate::selection::select_round;
use crate::types::{GameMode, PlayableItem, QuizConfig, ReferenceInfo, ScoreOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// An item is on screen awaiting a reveal, guess, or timeout.
    ItemShown,
    /// The answer for the current item is on screen.
    ItemRevealed,
    RoundFinished,
    /// The eligible catalog is exhausted; terminal until new data arrives.
    NoContent,
}

/// Events emitted toward the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SessionEvent {
    ItemShown {
        item: PlayableItem,
    },
    ItemRevealed {
        /// `None` means no reference entry joined ("no information found").
        info: Option<ReferenceInfo>,
        outcome: ScoreOutcome,
    },
    RoundFinished {
        correct: u32,
        incorrect: u32,
    },
    NoContent,
}

#[derive(Debug)]
struct Round {
    items: Vec<PlayableItem>,
    current_index: usize,
    correct: u32,
    incorrect: u32,
    /// Whether the current item has already been scored, so a guess followed
    /// by a timeout can never double-count.
    scored: bool,
}

/// A quiz session: the catalog, the cross-round used-id set, and the round
/// in progress.
#[derive(Debug)]
pub struct QuizSession {
    catalog: Vec<PlayableItem>,
    references: ReferenceIndex,
    used_ids: HashSet<String>,
    config: QuizConfig,
    phase: Phase,
    round: Option<Round>,
    rng: StdRng,
}

impl QuizSession {
    pub fn new(catalog: Vec<PlayableItem>, references: ReferenceIndex, config: QuizConfig) -> Self {
        Self::with_rng(catalog, references, config, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests and replays.
    pub fn with_seed(
        catalog: Vec<PlayableItem>,
        references: ReferenceIndex,
        config: QuizConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(catalog, references, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        catalog: Vec<PlayableItem>,
        references: ReferenceIndex,
        config: QuizConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            references,
            used_ids: HashSet::new(),
            config,
            phase: Phase::Idle,
            round: None,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// `(correct, incorrect)` for the round in progress, `(0, 0)` otherwise.
    pub fn score(&self) -> (u32, u32) {
        match &self.round {
            Some(round) => (round.correct, round.incorrect),
            None => (0, 0),
        }
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.round
            .as_ref()
            .and_then(|round| round.items.get(round.current_index))
    }

    /// `(current position, round length)`, 1-based, while a round exists.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.round
            .as_ref()
            .map(|round| (round.current_index + 1, round.items.len()))
    }

    /// Begin a new round, drawing fresh items from the catalog.
    pub fn start_round(&mut self) -> Result<Vec<SessionEvent>> {
        match self.phase {
            Phase::Idle | Phase::RoundFinished | Phase::NoContent => {}
            _ => return Err(self.rejected("start_round")),
        }

        let items = select_round(
            &self.catalog,
            &self.references,
            &mut self.used_ids,
            self.config.round_size,
            &mut self.rng,
        );

        if items.is_empty() {
            tracing::info!("no eligible items remain");
            self.round = None;
            self.phase = Phase::NoContent;
            return Ok(vec![SessionEvent::NoContent]);
        }

        let first = items[0].clone();
        self.round = Some(Round {
            items,
            current_index: 0,
            correct: 0,
            incorrect: 0,
            scored: false,
        });
        self.phase = Phase::ItemShown;
        Ok(vec![SessionEvent::ItemShown { item: first }])
    }

    /// Reveal the current item's answer, scoring `guess` if one was typed.
    ///
    /// An empty or whitespace-only guess is rejected without any state
    /// change so the UI can prompt for a retry.
    pub fn reveal(&mut self, guess: Option<&str>) -> Result<Vec<SessionEvent>> {
        if self.phase != Phase::ItemShown {
            return Err(self.rejected("reveal"));
        }

        let outcome = match guess {
            None => ScoreOutcome::Unscored,
            Some(text) => {
                if text.trim().is_empty() {
                    return Err(QuizError::EmptyGuess);
                }
                self.score_guess(text)
            }
        };

        self.finish_item(outcome)
    }

    /// Move to the next item after a reveal.
    pub fn advance(&mut self) -> Result<Vec<SessionEvent>> {
        if self.phase != Phase::ItemRevealed {
            return Err(self.rejected("advance"));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(self.rejected("advance"));
        };

        // A reveal on the last item goes straight to RoundFinished, so
        // ItemRevealed implies there is a next item.
        round.current_index += 1;
        round.scored = false;
        let item = round.items[round.current_index].clone();
        self.phase = Phase::ItemShown;
        Ok(vec![SessionEvent::ItemShown { item }])
    }

    /// The external countdown expired for the current item.
    ///
    /// In typed mode an item the player never answered counts as incorrect;
    /// in flash-card mode nothing is scored. Either way the item is revealed.
    pub fn timeout(&mut self) -> Result<Vec<SessionEvent>> {
        if self.phase != Phase::ItemShown {
            return Err(self.rejected("timeout"));
        }

        let outcome = if self.config.mode == GameMode::Typed {
            if let Some(round) = self.round.as_mut() {
                if !round.scored {
                    round.incorrect += 1;
                    round.scored = true;
                }
            }
            ScoreOutcome::Incorrect
        } else {
            ScoreOutcome::Unscored
        };

        self.finish_item(outcome)
    }

    /// Swap the current item for a fresh eligible one after the viewer gave
    /// up loading its image. The failed item's id returns to the pool.
    ///
    /// Returns no events when the pool is empty; the caller then falls back
    /// to revealing and advancing past the broken item.
    pub fn replace_current_item(&mut self) -> Result<Vec<SessionEvent>> {
        if self.phase != Phase::ItemShown {
            return Err(self.rejected("replace_current_item"));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(self.rejected("replace_current_item"));
        };

        let replacement = select_round(
            &self.catalog,
            &self.references,
            &mut self.used_ids,
            1,
            &mut self.rng,
        )
        .pop();

        match replacement {
            Some(item) => {
                let failed = std::mem::replace(&mut round.items[round.current_index], item.clone());
                self.used_ids.remove(&failed.id);
                tracing::warn!("replaced item {} with {} after image failure", failed.id, item.id);
                Ok(vec![SessionEvent::ItemShown { item }])
            }
            None => {
                tracing::warn!("no replacement available for failed item");
                Ok(vec![])
            }
        }
    }

    /// Classify the guess against the joined reference names and bump the
    /// matching counter, at most once per item.
    fn score_guess(&mut self, guess: &str) -> ScoreOutcome {
        let Some(round) = self.round.as_mut() else {
            return ScoreOutcome::Unscored;
        };
        let item = &round.items[round.current_index];
        let names: Vec<String> = match self.references.lookup(&item.ref_id) {
            Some(entry) => entry.display_names().iter().map(|s| s.to_string()).collect(),
            None => Vec::new(),
        };

        let result = classify(guess, &names);
        if result.matched {
            if !round.scored {
                round.correct += 1;
                round.scored = true;
            }
            if result.partial {
                ScoreOutcome::Partial
            } else {
                ScoreOutcome::Correct
            }
        } else {
            if !round.scored {
                round.incorrect += 1;
                round.scored = true;
            }
            ScoreOutcome::Incorrect
        }
    }

    /// Emit the reveal event and advance the phase, closing the round when
    /// the current item was the last one.
    fn finish_item(&mut self, outcome: ScoreOutcome) -> Result<Vec<SessionEvent>> {
        let Some(round) = self.round.as_ref() else {
            return Err(self.rejected("reveal"));
        };
        let item = &round.items[round.current_index];

        let info = self.references.lookup(&item.ref_id).map(|entry| ReferenceInfo {
            names: entry
                .display_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            link: entry.link.clone(),
            description: item.description.clone(),
        });
        if info.is_none() {
            tracing::warn!("no reference entry for {}", item.ref_id);
        }

        let mut events = vec![SessionEvent::ItemRevealed { info, outcome }];
        if round.current_index + 1 == round.items.len() {
            events.push(SessionEvent::RoundFinished {
                correct: round.correct,
                incorrect: round.incorrect,
            });
            self.phase = Phase::RoundFinished;
        } else {
            self.phase = Phase::ItemRevealed;
        }
        Ok(events)
    }

    fn rejected(&self, action: &'static str) -> QuizError {
        tracing::warn!("{} rejected in {:?} state", action, self.phase);
        QuizError::InvalidTransition {
            action,
            state: self.phase,
        }
    }
}
