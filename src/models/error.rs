//! Error taxonomy shared by the ledger, bracket engine and result store.

use crate::models::game::Game;
use crate::models::player::PlayerId;
use crate::models::tournament::MatchId;
use thiserror::Error;

/// Every way a scoreboard operation can be rejected. None of them change state.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScoreboardError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// A result already exists; resubmit with `overwrite` to replace it.
    #[error("A result already exists for this game; confirm to overwrite")]
    DuplicateExists,

    /// The player spent their one doping bonus on another result.
    #[error("Player {player} already used doping for {game}")]
    DopingAlreadyUsed { player: PlayerId, game: Game },

    /// Doping flag on a bracket match outside the first round.
    #[error("Doping can only be used in the first round")]
    DopingNotAllowed,

    #[error("No tournament has been generated for {0}")]
    TournamentNotFound(Game),

    #[error("A tournament for {0} already exists")]
    AlreadyExists(Game),

    /// A match result was recorded, so the bracket is frozen until clear-all.
    #[error("Results were recorded for {0}; the bracket can no longer be regenerated")]
    RegenerationLocked(Game),

    #[error("Match {0} is not part of the current round")]
    MatchNotFound(MatchId),

    #[error("Match {0} is already completed")]
    AlreadyCompleted(MatchId),

    #[error("Player {0} does not play in this match")]
    InvalidWinner(PlayerId),

    /// Ordering is not a permutation of the full roster.
    #[error("The ordering must contain every registered player exactly once")]
    IncompleteOrdering,
}

pub type ScoreboardResult<T> = Result<T, ScoreboardError>;

impl ScoreboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        ScoreboardError::Validation(message.into())
    }

    /// Stable snake_case code for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreboardError::Validation(_) => "validation_error",
            ScoreboardError::DuplicateExists => "duplicate_exists",
            ScoreboardError::DopingAlreadyUsed { .. } => "doping_already_used",
            ScoreboardError::DopingNotAllowed => "doping_not_allowed",
            ScoreboardError::TournamentNotFound(_) => "tournament_not_found",
            ScoreboardError::AlreadyExists(_) => "already_exists",
            ScoreboardError::RegenerationLocked(_) => "regeneration_locked",
            ScoreboardError::MatchNotFound(_) => "match_not_found",
            ScoreboardError::AlreadyCompleted(_) => "already_completed",
            ScoreboardError::InvalidWinner(_) => "invalid_winner",
            ScoreboardError::IncompleteOrdering => "incomplete_ordering",
        }
    }

    /// Doping errors are shown differently from generic validation in the UI.
    pub fn is_doping_error(&self) -> bool {
        matches!(
            self,
            ScoreboardError::DopingAlreadyUsed { .. } | ScoreboardError::DopingNotAllowed
        )
    }
}
