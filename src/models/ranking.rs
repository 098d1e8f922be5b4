//! Ranking output: one ordered table per jersey.

use crate::models::game::Jersey;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub number: u32,
    pub points: u32,
}

/// The four jersey rankings, each sorted by points descending.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub overall: Vec<RankingEntry>,
    pub speed: Vec<RankingEntry>,
    pub ball: Vec<RankingEntry>,
    pub brain: Vec<RankingEntry>,
}

impl Rankings {
    pub fn get(&self, jersey: Jersey) -> &[RankingEntry] {
        match jersey {
            Jersey::Overall => &self.overall,
            Jersey::Speed => &self.speed,
            Jersey::Ball => &self.ball,
            Jersey::Brain => &self.brain,
        }
    }

    pub fn is_empty(&self) -> bool {
        Jersey::ALL.iter().all(|j| self.get(*j).is_empty())
    }
}

/// Leader of a jersey whose games have all been scored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct JerseyWinner {
    pub jersey: Jersey,
    pub player_id: PlayerId,
    pub name: String,
    pub number: u32,
    pub points: u32,
    pub picture: Option<String>,
}
