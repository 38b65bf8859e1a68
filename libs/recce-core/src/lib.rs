//! Core engine for an image-identification quiz.
//!
//! Provides:
//! - Answer matching for typed guesses (normalization, edit-distance
//!   similarity, base-model designation decomposition)
//! - Round selection with a non-repeating, uniformly shuffled draw
//! - The round/session state machine driven by UI commands and emitting
//!   display events
//! - Shared types (PlayableItem, ReferenceEntry, QuizConfig, etc.)
//!
//! The rendering surface, pan/zoom viewer, countdown timer, and settings
//! persistence are external collaborators: they send commands in and render
//! the emitted [`session::SessionEvent`]s.

pub mod catalog;
pub mod error;
pub mod matching;
pub mod selection;
pub mod session;
pub mod types;

pub use catalog::ReferenceIndex;
pub use error::{QuizError, Result};
pub use matching::{
    classify, edit_distance, extract_base_model, normalize, similarity, MatchOutcome,
};
pub use selection::select_round;
pub use session::{Phase, QuizSession, SessionEvent};
pub use types::{
    GameMode, PlayableItem, QuizConfig, ReferenceEntry, ReferenceInfo, ScoreOutcome,
};
