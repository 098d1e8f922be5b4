//! Player and the roster (player registry).

use crate::models::error::{ScoreboardError, ScoreboardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;

/// Stable player identifier, assigned at registration.
pub type PlayerId = u32;

/// A registered player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Start number worn on the shirt; unique within the roster.
    pub number: u32,
    /// Picture file reference, if one was uploaded.
    #[serde(default)]
    pub picture: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, number: u32) -> Self {
        Self {
            id,
            name: name.into(),
            number,
            picture: None,
            registered_at: Utc::now(),
        }
    }

    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}

/// One row of a roster CSV: `name,number[,picture]`.
#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    number: u32,
    #[serde(default)]
    picture: Option<String>,
}

/// Ordered list of registered players. Registration order is id order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from an existing snapshot. Ids and numbers must be unique.
    pub fn from_players(players: Vec<Player>) -> ScoreboardResult<Self> {
        let mut ids = HashSet::new();
        let mut numbers = HashSet::new();
        for p in &players {
            if !ids.insert(p.id) {
                return Err(ScoreboardError::validation(format!(
                    "Duplicate player id {}",
                    p.id
                )));
            }
            if !numbers.insert(p.number) {
                return Err(ScoreboardError::validation(format!(
                    "Start number {} is already in use",
                    p.number
                )));
            }
        }
        Ok(Self { players })
    }

    /// Import players from CSV with a `name,number[,picture]` header.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> ScoreboardResult<Self> {
        let mut roster = Self::new();
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for row in csv_reader.deserialize::<RosterRow>() {
            let row = row.map_err(|e| ScoreboardError::validation(format!("Invalid roster CSV: {e}")))?;
            let player = roster.register(row.name, row.number)?;
            let id = player.id;
            if let Some(picture) = row.picture.filter(|p| !p.is_empty()) {
                if let Some(p) = roster.players.iter_mut().find(|p| p.id == id) {
                    p.picture = Some(picture);
                }
            }
        }
        Ok(roster)
    }

    /// Register a new player with the next free id. Name must be non-blank, number unused.
    pub fn register(&mut self, name: impl Into<String>, number: u32) -> ScoreboardResult<&Player> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreboardError::validation("Name and start number are required"));
        }
        if self.players.iter().any(|p| p.number == number) {
            return Err(ScoreboardError::validation(format!(
                "Start number {number} is already in use"
            )));
        }
        let id = self.players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.players.push(Player::new(id, name, number));
        log::info!("Registered player {id} ({name}, #{number})");
        Ok(&self.players[self.players.len() - 1])
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Fails with a validation error when `id` is not registered.
    pub fn require(&self, id: PlayerId) -> ScoreboardResult<&Player> {
        self.get(id)
            .ok_or_else(|| ScoreboardError::validation(format!("Unknown player {id}")))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_assigns_sequential_ids() {
        let mut roster = Roster::new();
        assert_eq!(roster.register("Ann", 7).unwrap().id, 1);
        assert_eq!(roster.register("  Bob ", 8).unwrap().id, 2);
        assert_eq!(roster.get(2).unwrap().name, "Bob");
    }

    #[test]
    fn register_rejects_blank_name_and_taken_number() {
        let mut roster = Roster::new();
        roster.register("Ann", 7).unwrap();
        assert!(matches!(roster.register("   ", 9), Err(ScoreboardError::Validation(_))));
        assert!(matches!(roster.register("Bob", 7), Err(ScoreboardError::Validation(_))));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn csv_import_reads_optional_picture() {
        let data = "name,number,picture\nAnn,7,ann.png\nBob,8,\n";
        let roster = Roster::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(1).unwrap().picture.as_deref(), Some("ann.png"));
        assert_eq!(roster.get(2).unwrap().picture, None);
    }

    #[test]
    fn csv_import_rejects_duplicate_numbers() {
        let data = "name,number\nAnn,7\nBob,7\n";
        assert!(Roster::from_csv_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn from_players_rejects_duplicate_ids() {
        let players = vec![Player::new(1, "Ann", 1), Player::new(1, "Bob", 2)];
        assert!(Roster::from_players(players).is_err());
    }
}
