//! Data structures for the scoreboard: players, games, brackets, results, rankings.

mod error;
mod game;
mod player;
mod ranking;
mod result;
mod tournament;

pub use error::{ScoreboardError, ScoreboardResult};
pub use game::{Game, GameKind, Jersey, UnknownGame};
pub use player::{Player, PlayerId, Roster};
pub use ranking::{JerseyWinner, RankingEntry, Rankings};
pub use result::{AnswerResult, Accepted, BracketOutcome, Grade, Payload, Submission};
pub use tournament::{rounds_needed, Match, MatchId, PlayerRef, Tournament, TournamentId};
