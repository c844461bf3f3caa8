//! Errors returned by quiz transitions.

use thiserror::Error;

use crate::quiz::GamePhase;

/// Rejected quiz action. State is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("{input:?} is not a number")]
    InvalidAnswer { input: String },
    #[error("cannot {action} while {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: GamePhase,
    },
    #[error("hint has not been revealed for this question")]
    HintNotRevealed,
    #[error("option {index} does not exist ({len} options shown)")]
    NoSuchOption { index: usize, len: usize },
}
