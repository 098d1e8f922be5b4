//! Knock-out brackets for petanque and kubb (single elimination, no loser bracket).

use crate::logic::doping::DopingLedger;
use crate::models::{
    BracketOutcome, Game, Match, MatchId, Player, PlayerId, PlayerRef, ScoreboardError,
    ScoreboardResult, Tournament,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

/// Result of one bracket match as reported by the scorekeeper.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_id: MatchId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    /// Doping for the match's `player1`.
    #[serde(default)]
    pub doping1: bool,
    /// Doping for the match's `player2`.
    #[serde(default)]
    pub doping2: bool,
}

impl MatchReport {
    pub fn new(match_id: impl Into<MatchId>, winner_id: PlayerId, loser_id: PlayerId) -> Self {
        Self {
            match_id: match_id.into(),
            winner_id,
            loser_id,
            doping1: false,
            doping2: false,
        }
    }

    pub fn with_doping(mut self, doping1: bool, doping2: bool) -> Self {
        self.doping1 = doping1;
        self.doping2 = doping2;
        self
    }
}

/// One tournament per bracket game.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketEngine {
    tournaments: BTreeMap<Game, Tournament>,
}

impl BracketEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a bracket with random seeding.
    pub fn generate(&mut self, game: Game, players: &[Player]) -> ScoreboardResult<&Tournament> {
        self.generate_with_order(game, &shuffled(players))
    }

    /// Generate a bracket seeded in the given order: players 0 and 1 meet, then 2 and 3, ...
    ///
    /// With an odd count the last player gets a bye. Fails with `AlreadyExists` if the game
    /// already has a bracket.
    pub fn generate_with_order(
        &mut self,
        game: Game,
        players: &[Player],
    ) -> ScoreboardResult<&Tournament> {
        if self.tournaments.contains_key(&game) {
            return Err(ScoreboardError::AlreadyExists(game));
        }
        let tournament = seed(game, players)?;
        Ok(self.tournaments.entry(game).or_insert(tournament))
    }

    /// Replace the bracket, allowed only while no match result has been recorded.
    /// The old bracket stays in place if the new one cannot be built.
    pub fn regenerate(&mut self, game: Game, players: &[Player]) -> ScoreboardResult<&Tournament> {
        if !self.can_regenerate(game) {
            return Err(ScoreboardError::RegenerationLocked(game));
        }
        let tournament = seed(game, &shuffled(players))?;
        match self.tournaments.entry(game) {
            Entry::Occupied(mut slot) => {
                slot.insert(tournament);
                Ok(slot.into_mut())
            }
            Entry::Vacant(slot) => Ok(slot.insert(tournament)),
        }
    }

    /// False once any real match of the game's bracket has a result.
    pub fn can_regenerate(&self, game: Game) -> bool {
        self.tournaments
            .get(&game)
            .map_or(true, |t| !t.has_results())
    }

    pub fn tournament(&self, game: Game) -> Option<&Tournament> {
        self.tournaments.get(&game)
    }

    /// Matches of the current round; empty once the champion is known.
    pub fn current_matches(&self, game: Game) -> ScoreboardResult<&[Match]> {
        self.tournaments
            .get(&game)
            .map(Tournament::current_matches)
            .ok_or(ScoreboardError::TournamentNotFound(game))
    }

    /// Record a match result, spending doping in `ledger` for flagged players.
    ///
    /// Validates everything (including doping) before touching state. When the last open
    /// match of a round completes, the next round is built from the winners in bracket order.
    pub fn record_match_result(
        &mut self,
        game: Game,
        report: &MatchReport,
        ledger: &mut DopingLedger,
    ) -> ScoreboardResult<BracketOutcome> {
        let tournament = self
            .tournaments
            .get(&game)
            .ok_or(ScoreboardError::TournamentNotFound(game))?;
        let round = tournament.current_round;
        let idx = tournament
            .current_matches()
            .iter()
            .position(|m| m.match_id == report.match_id)
            .ok_or_else(|| ScoreboardError::MatchNotFound(report.match_id.clone()))?;
        let m = &tournament.current_matches()[idx];
        if m.completed {
            return Err(ScoreboardError::AlreadyCompleted(m.match_id.clone()));
        }
        if !m.involves(report.winner_id) {
            return Err(ScoreboardError::InvalidWinner(report.winner_id));
        }
        if m.opponent_of(report.winner_id) != Some(report.loser_id) {
            return Err(ScoreboardError::validation(format!(
                "Player {} is not the opponent in match {}",
                report.loser_id, m.match_id
            )));
        }
        if (report.doping1 || report.doping2) && round != 0 {
            return Err(ScoreboardError::DopingNotAllowed);
        }

        let mut dopers = Vec::new();
        if report.doping1 {
            dopers.push(m.player1.id);
        }
        if report.doping2 {
            dopers.extend(m.player2.as_ref().map(|p| p.id));
        }
        for &player in &dopers {
            ledger.check(player)?;
        }
        for &player in &dopers {
            ledger.record(player, game)?;
        }

        let tournament = self
            .tournaments
            .get_mut(&game)
            .ok_or(ScoreboardError::TournamentNotFound(game))?;
        let total_rounds = tournament.total_rounds;
        let m = &mut tournament.rounds[round][idx];
        m.completed = true;
        m.winner = Some(report.winner_id);
        m.loser = Some(report.loser_id);
        m.doping1 = report.doping1;
        m.doping2 = report.doping2;
        let outcome = BracketOutcome {
            match_id: m.match_id.clone(),
            round,
            total_rounds,
            winner: report.winner_id,
            loser: report.loser_id,
        };
        log::info!(
            "{game} {}: {} beat {}",
            outcome.match_id,
            outcome.winner,
            outcome.loser
        );

        if tournament.current_matches().iter().all(|m| m.completed) {
            advance_round(tournament);
        }
        Ok(outcome)
    }

    /// Drop every bracket.
    pub fn reset(&mut self) {
        self.tournaments.clear();
    }
}

/// Close the current round: either crown the champion or build the next round.
fn advance_round(tournament: &mut Tournament) {
    let winners: Vec<PlayerRef> = tournament
        .current_matches()
        .iter()
        .filter_map(|m| m.winner_ref().cloned())
        .collect();
    let next = tournament.current_round + 1;
    if winners.len() > 1 {
        let round = build_round(tournament.game, next, winners, &mut tournament.bye_players);
        tournament.rounds.push(round);
        log::info!("{} advanced to round {}", tournament.game, next + 1);
    } else if let Some(champion) = winners.first() {
        log::info!("{} won by player {}", tournament.game, champion.id);
    }
    tournament.current_round = next;
}

fn shuffled(players: &[Player]) -> Vec<Player> {
    let mut seeded = players.to_vec();
    seeded.shuffle(&mut rand::thread_rng());
    seeded
}

/// Build a fresh tournament with its first round. Every player may appear only once.
fn seed(game: Game, players: &[Player]) -> ScoreboardResult<Tournament> {
    if !game.is_bracket() {
        return Err(ScoreboardError::validation(format!(
            "{game} is not played as a tournament"
        )));
    }
    if players.len() < 2 {
        return Err(ScoreboardError::validation(
            "At least 2 players are needed for a tournament",
        ));
    }
    let mut seen = HashSet::with_capacity(players.len());
    if let Some(twice) = players.iter().find(|p| !seen.insert(p.id)) {
        return Err(ScoreboardError::validation(format!(
            "Player {} is seeded more than once",
            twice.id
        )));
    }

    let mut tournament = Tournament::new(game, players.len());
    let entrants: Vec<PlayerRef> = players.iter().map(PlayerRef::from).collect();
    let first_round = build_round(game, 0, entrants, &mut tournament.bye_players);
    tournament.rounds.push(first_round);
    log::info!(
        "Generated {game} tournament {} for {} players ({} rounds)",
        tournament.id,
        players.len(),
        tournament.total_rounds
    );
    Ok(tournament)
}

/// Pair entrants in order. An odd entrant out gets a bye, placed as the last match: the
/// last entrant in bracket order who has not had a bye yet, or the last entrant if all have.
fn build_round(
    game: Game,
    round: usize,
    mut entrants: Vec<PlayerRef>,
    bye_players: &mut Vec<PlayerId>,
) -> Vec<Match> {
    let bye = if entrants.len() % 2 == 1 {
        let idx = entrants
            .iter()
            .rposition(|p| !bye_players.contains(&p.id))
            .unwrap_or(entrants.len() - 1);
        let player = entrants.remove(idx);
        bye_players.push(player.id);
        Some(player)
    } else {
        None
    };

    let mut matches: Vec<Match> = entrants
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Match::new(game, round, i, pair[0].clone(), pair[1].clone()))
        .collect();
    if let Some(player) = bye {
        let index = matches.len();
        matches.push(Match::bye(game, round, index, player));
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: u32) -> Vec<Player> {
        (1..=n).map(|i| Player::new(i, format!("P{i}"), i)).collect()
    }

    #[test]
    fn odd_round_gives_bye_to_a_player_without_one() {
        let mut byes = vec![5];
        let entrants: Vec<PlayerRef> = players(5).iter().map(PlayerRef::from).collect();
        let round = build_round(Game::Kubb, 1, entrants, &mut byes);
        assert_eq!(round.len(), 3);
        let bye = round.last().unwrap();
        assert!(bye.is_bye());
        assert_eq!(bye.player1.id, 4);
        assert_eq!(byes, vec![5, 4]);
        assert_eq!((round[0].player1.id, round[0].player2.as_ref().unwrap().id), (1, 2));
        assert_eq!((round[1].player1.id, round[1].player2.as_ref().unwrap().id), (3, 5));
    }

    #[test]
    fn non_bracket_game_is_rejected() {
        let mut engine = BracketEngine::new();
        assert!(matches!(
            engine.generate(Game::Rebus, &players(4)),
            Err(ScoreboardError::Validation(_))
        ));
    }

    #[test]
    fn single_player_cannot_start_a_bracket() {
        let mut engine = BracketEngine::new();
        assert!(engine.generate(Game::Kubb, &players(1)).is_err());
        assert!(engine.tournament(Game::Kubb).is_none());
    }

    #[test]
    fn loser_must_be_the_opponent() {
        let mut engine = BracketEngine::new();
        let mut ledger = DopingLedger::new();
        engine.generate_with_order(Game::Kubb, &players(4)).unwrap();
        let err = engine
            .record_match_result(Game::Kubb, &MatchReport::new("kubb_r1_m0", 1, 3), &mut ledger)
            .unwrap_err();
        assert!(matches!(err, ScoreboardError::Validation(_)));
        assert!(engine.can_regenerate(Game::Kubb));
    }
}
