//! Scoreboard business logic: doping, brackets, results, scoring and rankings.

mod answers;
mod bracket;
mod doping;
mod ranking;
mod results;
mod scoreboard;
mod scoring;

pub use answers::{AnswerKeys, QUESTIONS_PER_GAME};
pub use bracket::{BracketEngine, MatchReport};
pub use doping::DopingLedger;
pub use ranking::{compute_rankings, jersey_ranking, jersey_winners};
pub use results::ResultStore;
pub use scoreboard::Scoreboard;
pub use scoring::{
    bracket_placements, placements, position_points, Placement, CHAMPION_POINTS,
    ELIMINATION_POINTS, POSITION_POINTS,
};
