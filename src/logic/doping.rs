//! Doping ledger: every player may double the points of exactly one game result, ever.

use crate::models::{Game, PlayerId, ScoreboardError, ScoreboardResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DopingLedger {
    used: BTreeMap<PlayerId, Game>,
}

impl DopingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Game where the player spent their doping, if any.
    pub fn is_used(&self, player: PlayerId) -> Option<Game> {
        self.used.get(&player).copied()
    }

    /// Fails if the player already has an entry, whatever the game.
    pub fn check(&self, player: PlayerId) -> ScoreboardResult<()> {
        match self.is_used(player) {
            Some(game) => Err(ScoreboardError::DopingAlreadyUsed { player, game }),
            None => Ok(()),
        }
    }

    /// Like [`check`](Self::check), but an entry for `game` itself is accepted.
    /// Returns whether a new entry still has to be recorded.
    pub fn check_for(&self, player: PlayerId, game: Game) -> ScoreboardResult<bool> {
        match self.is_used(player) {
            Some(g) if g == game => Ok(false),
            Some(g) => Err(ScoreboardError::DopingAlreadyUsed { player, game: g }),
            None => Ok(true),
        }
    }

    pub fn record(&mut self, player: PlayerId, game: Game) -> ScoreboardResult<()> {
        self.check(player)?;
        self.used.insert(player, game);
        log::info!("Player {player} used doping for {game}");
        Ok(())
    }

    /// Whether `player`'s points for `game` are doubled.
    pub fn doubles(&self, player: PlayerId, game: Game) -> bool {
        self.is_used(player) == Some(game)
    }

    /// Player id -> game map, for disabling the doping toggle in the UI.
    pub fn usage(&self) -> &BTreeMap<PlayerId, Game> {
        &self.used
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doping_is_global_across_games() {
        let mut ledger = DopingLedger::new();
        ledger.record(1, Game::Rebus).unwrap();
        assert_eq!(
            ledger.record(1, Game::Kubb),
            Err(ScoreboardError::DopingAlreadyUsed {
                player: 1,
                game: Game::Rebus
            })
        );
        assert_eq!(ledger.is_used(1), Some(Game::Rebus));
        assert!(ledger.doubles(1, Game::Rebus));
        assert!(!ledger.doubles(1, Game::Kubb));
    }

    #[test]
    fn check_for_accepts_the_same_game() {
        let mut ledger = DopingLedger::new();
        assert_eq!(ledger.check_for(2, Game::Maths), Ok(true));
        ledger.record(2, Game::Maths).unwrap();
        assert_eq!(ledger.check_for(2, Game::Maths), Ok(false));
        assert!(ledger.check_for(2, Game::Rebus).is_err());
    }

    #[test]
    fn reset_clears_every_entry() {
        let mut ledger = DopingLedger::new();
        ledger.record(1, Game::Kubb).unwrap();
        ledger.record(2, Game::Petanque).unwrap();
        ledger.reset();
        assert!(ledger.usage().is_empty());
        assert_eq!(ledger.is_used(1), None);
    }
}
