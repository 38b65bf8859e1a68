//! Error types for recce-core.

use crate::session::Phase;
use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors that can occur while driving a quiz session.
///
/// All variants are recoverable; none of them invalidates the session.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("{action} is not valid in the {state:?} state")]
    InvalidTransition { action: &'static str, state: Phase },

    #[error("guess is empty")]
    EmptyGuess,

    #[error("duplicate reference entry for {ref_id}")]
    DuplicateReference { ref_id: String },

    #[error("round size {value} is outside 1..=50")]
    InvalidRoundSize { value: usize },
}
