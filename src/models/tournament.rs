//! Bracket data: matches, rounds and the per-game tournament.

use crate::models::game::Game;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Match identifier, unique within a bracket (e.g. `kubb_r1_m0`).
pub type MatchId = String;

/// Unique identifier of one generated bracket instance.
pub type TournamentId = Uuid;

/// Display copy of a player inside a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
    pub number: u32,
}

impl From<&Player> for PlayerRef {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            number: p.number,
        }
    }
}

/// A single 1v1 bracket match. `player2 == None` is a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    /// Zero-based round index.
    pub round: usize,
    pub player1: PlayerRef,
    pub player2: Option<PlayerRef>,
    pub completed: bool,
    pub winner: Option<PlayerId>,
    pub loser: Option<PlayerId>,
    pub doping1: bool,
    pub doping2: bool,
}

impl Match {
    pub fn new(game: Game, round: usize, index: usize, player1: PlayerRef, player2: PlayerRef) -> Self {
        Self {
            match_id: match_id(game, round, index),
            round,
            player1,
            player2: Some(player2),
            completed: false,
            winner: None,
            loser: None,
            doping1: false,
            doping2: false,
        }
    }

    /// A bye: completed on creation, `player1` advances.
    pub fn bye(game: Game, round: usize, index: usize, player1: PlayerRef) -> Self {
        let winner = Some(player1.id);
        Self {
            match_id: match_id(game, round, index),
            round,
            player1,
            player2: None,
            completed: true,
            winner,
            loser: None,
            doping1: false,
            doping2: false,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player2.is_none()
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.player1.id == id || self.player2.as_ref().is_some_and(|p| p.id == id)
    }

    /// The other participant, if `id` plays in this match and it is not a bye.
    pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        let p2 = self.player2.as_ref()?;
        if self.player1.id == id {
            Some(p2.id)
        } else if p2.id == id {
            Some(self.player1.id)
        } else {
            None
        }
    }

    /// Display copy of the winner, once decided.
    pub fn winner_ref(&self) -> Option<&PlayerRef> {
        let w = self.winner?;
        if self.player1.id == w {
            Some(&self.player1)
        } else {
            self.player2.as_ref().filter(|p| p.id == w)
        }
    }
}

fn match_id(game: Game, round: usize, index: usize) -> MatchId {
    format!("{}_r{}_m{}", game, round + 1, index)
}

/// Single-elimination bracket for one game. Rounds are materialized as they are reached.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub game: Game,
    /// Rounds reached so far, round 0 first.
    pub rounds: Vec<Vec<Match>>,
    /// Index of the round being played; equals `rounds.len()` once the final is decided.
    pub current_round: usize,
    /// Rounds needed to reach a champion: ceil(log2 players).
    pub total_rounds: usize,
    /// Players that already received a bye (no one gets two while others are eligible).
    pub bye_players: Vec<PlayerId>,
}

impl Tournament {
    pub fn new(game: Game, player_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            game,
            rounds: Vec::new(),
            current_round: 0,
            total_rounds: rounds_needed(player_count),
            bye_players: Vec::new(),
        }
    }

    /// Matches of the round being played; empty once the tournament is complete.
    pub fn current_matches(&self) -> &[Match] {
        self.rounds
            .get(self.current_round)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_complete(&self) -> bool {
        !self.rounds.is_empty() && self.current_round >= self.rounds.len()
    }

    /// True once any real (non-bye) match has a result.
    pub fn has_results(&self) -> bool {
        self.rounds
            .iter()
            .flatten()
            .any(|m| m.completed && !m.is_bye())
    }

    pub fn champion(&self) -> Option<PlayerId> {
        if !self.is_complete() {
            return None;
        }
        self.rounds.last()?.first()?.winner
    }

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flatten()
    }
}

/// Number of rounds for a knock-out of `players`: ceil(log2 players).
pub fn rounds_needed(players: usize) -> usize {
    players.max(1).next_power_of_two().trailing_zeros() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pref(id: PlayerId) -> PlayerRef {
        PlayerRef {
            id,
            name: format!("P{id}"),
            number: id,
        }
    }

    #[test]
    fn rounds_needed_is_ceil_log2() {
        assert_eq!(rounds_needed(2), 1);
        assert_eq!(rounds_needed(3), 2);
        assert_eq!(rounds_needed(4), 2);
        assert_eq!(rounds_needed(5), 3);
        assert_eq!(rounds_needed(16), 4);
        assert_eq!(rounds_needed(17), 5);
    }

    #[test]
    fn bye_is_completed_with_player1_as_winner() {
        let m = Match::bye(Game::Kubb, 0, 2, pref(5));
        assert!(m.completed && m.is_bye());
        assert_eq!(m.winner, Some(5));
        assert_eq!(m.match_id, "kubb_r1_m2");
        assert!(!m.doping1 && !m.doping2);
    }

    #[test]
    fn opponent_lookup() {
        let m = Match::new(Game::Petanque, 1, 0, pref(1), pref(2));
        assert_eq!(m.opponent_of(1), Some(2));
        assert_eq!(m.opponent_of(2), Some(1));
        assert_eq!(m.opponent_of(3), None);
        assert_eq!(m.match_id, "petanque_r2_m0");
    }
}
