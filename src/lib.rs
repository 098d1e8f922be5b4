//! Field day scoreboard: library with models and business logic.
//!
//! Six games feed four jersey rankings; petanque and kubb are played as knock-out
//! brackets, and every player may spend one doping bonus to double a single result.

pub mod config;
pub mod logic;
pub mod models;
pub mod persistence;

pub use logic::{
    compute_rankings, AnswerKeys, BracketEngine, DopingLedger, MatchReport, ResultStore,
    Scoreboard,
};
pub use models::{
    Accepted, AnswerResult, BracketOutcome, Game, GameKind, Grade, Jersey, JerseyWinner, Match,
    MatchId, Payload, Player, PlayerId, PlayerRef, RankingEntry, Rankings, Roster,
    ScoreboardError, ScoreboardResult, Submission, Tournament, TournamentId,
};
