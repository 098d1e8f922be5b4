//! The scoreboard: owns the roster and every store, and is the single entry point for
//! mutations. Each operation validates before it writes, so a rejected call leaves the
//! scoreboard exactly as it was.

use crate::logic::answers::AnswerKeys;
use crate::logic::bracket::{BracketEngine, MatchReport};
use crate::logic::doping::DopingLedger;
use crate::logic::ranking;
use crate::logic::results::ResultStore;
use crate::models::{
    Accepted, BracketOutcome, Game, JerseyWinner, Match, Player, PlayerId, Rankings, Roster,
    ScoreboardResult, Submission, Tournament,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    roster: Roster,
    #[serde(default)]
    doping: DopingLedger,
    #[serde(default)]
    brackets: BracketEngine,
    #[serde(default)]
    results: ResultStore,
    #[serde(default)]
    answer_keys: AnswerKeys,
}

impl Scoreboard {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn register_player(&mut self, name: impl Into<String>, number: u32) -> ScoreboardResult<Player> {
        self.roster.register(name, number).cloned()
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn doping(&self) -> &DopingLedger {
        &self.doping
    }

    pub fn doping_usage(&self) -> &BTreeMap<PlayerId, Game> {
        self.doping.usage()
    }

    /// Submit a non-bracket result. See [`ResultStore::submit`].
    pub fn submit(&mut self, submission: Submission) -> ScoreboardResult<Accepted> {
        self.results
            .submit(submission, &self.roster, &mut self.doping, &self.answer_keys)
    }

    pub fn has_result(&self, game: Game, player: PlayerId) -> bool {
        self.results.has_result(game, player)
    }

    /// Generate a randomly seeded bracket from the whole roster.
    pub fn generate_bracket(&mut self, game: Game) -> ScoreboardResult<&Tournament> {
        self.brackets.generate(game, self.roster.players())
    }

    /// Generate a bracket seeded in the given player order (players not on the roster are rejected).
    pub fn generate_bracket_with_order(
        &mut self,
        game: Game,
        order: &[PlayerId],
    ) -> ScoreboardResult<&Tournament> {
        let players = order
            .iter()
            .map(|&id| self.roster.require(id).cloned())
            .collect::<ScoreboardResult<Vec<Player>>>()?;
        self.brackets.generate_with_order(game, &players)
    }

    pub fn regenerate_bracket(&mut self, game: Game) -> ScoreboardResult<&Tournament> {
        self.brackets.regenerate(game, self.roster.players())
    }

    pub fn can_regenerate(&self, game: Game) -> bool {
        self.brackets.can_regenerate(game)
    }

    pub fn bracket(&self, game: Game) -> Option<&Tournament> {
        self.brackets.tournament(game)
    }

    pub fn current_matches(&self, game: Game) -> ScoreboardResult<&[Match]> {
        self.brackets.current_matches(game)
    }

    /// Record a bracket match and file the outcome with the results.
    pub fn record_match_result(
        &mut self,
        game: Game,
        report: &MatchReport,
    ) -> ScoreboardResult<BracketOutcome> {
        let outcome = self
            .brackets
            .record_match_result(game, report, &mut self.doping)?;
        self.results.record_bracket_outcome(game, outcome.clone());
        Ok(outcome)
    }

    pub fn rankings(&self) -> Rankings {
        ranking::compute_rankings(&self.roster, &self.results, &self.doping)
    }

    pub fn jersey_winners(&self) -> Vec<JerseyWinner> {
        ranking::jersey_winners(&self.roster, &self.results, &self.doping)
    }

    pub fn answer_key(&self, game: Game) -> &[String] {
        self.answer_keys.get(game)
    }

    pub fn set_answer_key(&mut self, game: Game, answers: Vec<String>) -> ScoreboardResult<()> {
        self.answer_keys.set(game, answers)
    }

    /// Wipe results, doping and brackets. The roster and answer keys stay.
    pub fn clear_all(&mut self) {
        self.results.reset();
        self.doping.reset();
        self.brackets.reset();
        log::info!("All results, doping usage and brackets cleared");
    }
}
