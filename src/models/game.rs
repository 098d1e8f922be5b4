//! Games, the kind of result each one produces, and the jerseys that aggregate them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six field-day games. Serialized with its scoreboard id (e.g. `"kubb"`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Game {
    #[serde(rename = "touwspringen")]
    RopeSkipping,
    #[serde(rename = "stoelendans")]
    MusicalChairs,
    #[serde(rename = "petanque")]
    Petanque,
    #[serde(rename = "kubb")]
    Kubb,
    #[serde(rename = "rebus")]
    Rebus,
    #[serde(rename = "wiskunde")]
    Maths,
}

/// How a game's raw results are shaped, and therefore how they are validated and scored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// One count per player, higher is better (jumps in 30 seconds).
    Count,
    /// One finishing order for the whole roster, winner first.
    Ordering,
    /// Single-elimination bracket.
    Bracket,
    /// Ten answers graded against a key, plus elapsed time.
    Answers,
}

impl Game {
    pub const ALL: [Game; 6] = [
        Game::RopeSkipping,
        Game::MusicalChairs,
        Game::Petanque,
        Game::Kubb,
        Game::Rebus,
        Game::Maths,
    ];

    /// Scoreboard id, as used on the wire and in match ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Game::RopeSkipping => "touwspringen",
            Game::MusicalChairs => "stoelendans",
            Game::Petanque => "petanque",
            Game::Kubb => "kubb",
            Game::Rebus => "rebus",
            Game::Maths => "wiskunde",
        }
    }

    pub fn kind(self) -> GameKind {
        match self {
            Game::RopeSkipping => GameKind::Count,
            Game::MusicalChairs => GameKind::Ordering,
            Game::Petanque | Game::Kubb => GameKind::Bracket,
            Game::Rebus | Game::Maths => GameKind::Answers,
        }
    }

    pub fn is_bracket(self) -> bool {
        self.kind() == GameKind::Bracket
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known game id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownGame(pub String);

impl fmt::Display for UnknownGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown game: {}", self.0)
    }
}

impl std::error::Error for UnknownGame {}

impl FromStr for Game {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGame(s.to_string()))
    }
}

/// Ranking category. Each jersey sums points over a fixed set of games.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jersey {
    /// Yellow jersey: all six games.
    Overall,
    /// Green jersey: rope skipping and musical chairs.
    Speed,
    /// Polka-dot jersey: petanque and kubb.
    Ball,
    /// White jersey: rebus and maths.
    Brain,
}

impl Jersey {
    pub const ALL: [Jersey; 4] = [Jersey::Overall, Jersey::Speed, Jersey::Ball, Jersey::Brain];

    /// Games whose points count towards this jersey.
    pub fn games(self) -> &'static [Game] {
        match self {
            Jersey::Overall => &Game::ALL,
            Jersey::Speed => &[Game::RopeSkipping, Game::MusicalChairs],
            Jersey::Ball => &[Game::Petanque, Game::Kubb],
            Jersey::Brain => &[Game::Rebus, Game::Maths],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_ids_round_trip_through_from_str() {
        for game in Game::ALL {
            assert_eq!(game.as_str().parse::<Game>(), Ok(game));
        }
        assert!("darts".parse::<Game>().is_err());
    }

    #[test]
    fn serde_uses_scoreboard_ids() {
        assert_eq!(serde_json::to_string(&Game::Maths).unwrap(), "\"wiskunde\"");
        let g: Game = serde_json::from_str("\"touwspringen\"").unwrap();
        assert_eq!(g, Game::RopeSkipping);
    }

    #[test]
    fn overall_covers_every_category_game() {
        for jersey in [Jersey::Speed, Jersey::Ball, Jersey::Brain] {
            for game in jersey.games() {
                assert!(Jersey::Overall.games().contains(game));
            }
        }
        assert_eq!(Jersey::Ball.games(), &[Game::Petanque, Game::Kubb]);
    }
}
