//! Submitted payloads and the raw results kept per game.

use crate::models::game::{Game, GameKind};
use crate::models::player::PlayerId;
use crate::models::tournament::MatchId;
use serde::{Deserialize, Serialize};

/// A result submission for a non-bracket game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub game: Game,
    #[serde(flatten)]
    pub payload: Payload,
    /// Replace an existing result instead of rejecting with `DuplicateExists`.
    #[serde(default)]
    pub overwrite: bool,
}

/// Game-specific fields of a submission. Must match the game's [`GameKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Count {
        player_id: PlayerId,
        jumps: u32,
        #[serde(default)]
        doping: bool,
    },
    Ordering {
        /// Winner first, every registered player exactly once.
        ordering: Vec<PlayerId>,
        #[serde(default)]
        doping_players: Vec<PlayerId>,
    },
    Answers {
        player_id: PlayerId,
        answers: Vec<String>,
        #[serde(alias = "time_seconds_total", alias = "time")]
        time_seconds: f64,
        #[serde(default)]
        doping: bool,
    },
}

impl Payload {
    pub fn kind(&self) -> GameKind {
        match self {
            Payload::Count { .. } => GameKind::Count,
            Payload::Ordering { .. } => GameKind::Ordering,
            Payload::Answers { .. } => GameKind::Answers,
        }
    }
}

impl Submission {
    pub fn count(player_id: PlayerId, jumps: u32, doping: bool) -> Self {
        Self {
            game: Game::RopeSkipping,
            payload: Payload::Count {
                player_id,
                jumps,
                doping,
            },
            overwrite: false,
        }
    }

    pub fn ordering(ordering: Vec<PlayerId>, doping_players: Vec<PlayerId>) -> Self {
        Self {
            game: Game::MusicalChairs,
            payload: Payload::Ordering {
                ordering,
                doping_players,
            },
            overwrite: false,
        }
    }

    pub fn answers(
        game: Game,
        player_id: PlayerId,
        answers: Vec<String>,
        time_seconds: f64,
        doping: bool,
    ) -> Self {
        Self {
            game,
            payload: Payload::Answers {
                player_id,
                answers,
                time_seconds,
                doping,
            },
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}

/// Stored brain-game result. `correct` is graded at submission time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answers: Vec<String>,
    pub time_seconds: f64,
    pub correct: u32,
}

/// A decided bracket match, as seen by the ranking aggregator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketOutcome {
    pub match_id: MatchId,
    pub round: usize,
    pub total_rounds: usize,
    pub winner: PlayerId,
    pub loser: PlayerId,
}

impl BracketOutcome {
    pub fn is_final(&self) -> bool {
        self.round + 1 == self.total_rounds
    }
}

/// Grading feedback returned for brain games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub correct: u32,
    pub questions: usize,
    pub time_seconds: f64,
}

/// Successful submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Accepted {
    pub game: Game,
    /// An earlier result was overwritten.
    pub replaced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_each_payload_shape() {
        let s: Submission =
            serde_json::from_str(r#"{"game":"touwspringen","player_id":3,"jumps":41}"#).unwrap();
        assert_eq!(s, Submission::count(3, 41, false));

        let s: Submission = serde_json::from_str(
            r#"{"game":"stoelendans","ordering":[2,1],"doping_players":[1],"overwrite":true}"#,
        )
        .unwrap();
        assert_eq!(s, Submission::ordering(vec![2, 1], vec![1]).with_overwrite());

        let s: Submission = serde_json::from_str(
            r#"{"game":"rebus","player_id":1,"answers":["a"],"time_seconds_total":12.5,"doping":true}"#,
        )
        .unwrap();
        assert_eq!(s.payload.kind(), GameKind::Answers);
    }
}
