//! Answer keys for the brain games and grading of submitted answers.

use crate::models::{Game, GameKind, ScoreboardError, ScoreboardResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every brain game has ten questions.
pub const QUESTIONS_PER_GAME: usize = 10;

const DEFAULT_REBUS_KEY: [&str; QUESTIONS_PER_GAME] = [
    "Rock Brakel",
    "Overbevolkt",
    "Omloop het nieuwsblad",
    "Kopgroep",
    "de",
    "Peloton",
    "59",
    "b",
    "1",
    "Henri,Maya,Ona,Esmee",
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnswerKeys {
    keys: BTreeMap<Game, Vec<String>>,
}

impl Default for AnswerKeys {
    fn default() -> Self {
        let mut keys = BTreeMap::new();
        keys.insert(
            Game::Rebus,
            DEFAULT_REBUS_KEY.iter().map(|s| s.to_string()).collect(),
        );
        keys.insert(Game::Maths, Vec::new());
        Self { keys }
    }
}

impl AnswerKeys {
    pub fn get(&self, game: Game) -> &[String] {
        self.keys.get(&game).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace a brain game's key. Exactly ten answers are required.
    pub fn set(&mut self, game: Game, answers: Vec<String>) -> ScoreboardResult<()> {
        if game.kind() != GameKind::Answers {
            return Err(ScoreboardError::validation(format!(
                "{game} has no answer key"
            )));
        }
        if answers.len() != QUESTIONS_PER_GAME {
            return Err(ScoreboardError::validation(format!(
                "An answer key needs exactly {QUESTIONS_PER_GAME} answers"
            )));
        }
        self.keys.insert(game, answers);
        log::info!("Answer key updated for {game}");
        Ok(())
    }

    /// Count correct answers. A submission whose length differs from the key scores 0.
    pub fn grade(&self, game: Game, answers: &[String]) -> u32 {
        let key = self.get(game);
        if key.is_empty() || key.len() != answers.len() {
            return 0;
        }
        let correct = answers
            .iter()
            .zip(key)
            .enumerate()
            .filter(|(i, (given, expected))| {
                if is_multi_part(game, *i) {
                    parts(given) == parts(expected)
                } else {
                    normalise(given) == normalise(expected)
                }
            })
            .count();
        correct as u32
    }
}

/// Questions answered with several comma-separated values, compared in any order.
fn is_multi_part(game: Game, question: usize) -> bool {
    matches!((game, question), (Game::Rebus, 9) | (Game::Maths, 0) | (Game::Maths, 1))
}

fn normalise(answer: &str) -> String {
    answer.trim().to_lowercase()
}

fn parts(answer: &str) -> Vec<String> {
    let mut parts: Vec<String> = answer.split(',').map(normalise).collect();
    parts.sort();
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn grading_ignores_case_and_whitespace() {
        let keys = AnswerKeys::default();
        let mut answers: Vec<String> = DEFAULT_REBUS_KEY.iter().map(|s| s.to_uppercase()).collect();
        answers[0] = "  rock brakel ".to_string();
        answers[9] = "esmee, ona ,MAYA,henri".to_string();
        assert_eq!(keys.grade(Game::Rebus, &answers), 10);
    }

    #[test]
    fn multi_part_needs_every_part() {
        let keys = AnswerKeys::default();
        let mut answers = strings(&DEFAULT_REBUS_KEY);
        answers[9] = "Henri,Maya,Ona".to_string();
        answers[1] = "wrong".to_string();
        assert_eq!(keys.grade(Game::Rebus, &answers), 8);
    }

    #[test]
    fn length_mismatch_and_empty_key_grade_zero() {
        let keys = AnswerKeys::default();
        assert_eq!(keys.grade(Game::Rebus, &strings(&["Rock Brakel"])), 0);
        assert_eq!(keys.grade(Game::Maths, &strings(&["1"; 10])), 0);
    }

    #[test]
    fn maths_pairs_compare_as_sets() {
        let mut keys = AnswerKeys::default();
        let mut key = strings(&["1"; 10]);
        key[0] = "2,3".to_string();
        keys.set(Game::Maths, key.clone()).unwrap();
        let mut answers = key;
        answers[0] = "3, 2".to_string();
        assert_eq!(keys.grade(Game::Maths, &answers), 10);
    }

    #[test]
    fn set_requires_ten_answers_for_a_brain_game() {
        let mut keys = AnswerKeys::default();
        assert!(keys.set(Game::Maths, strings(&["1"; 9])).is_err());
        assert!(keys.set(Game::Kubb, strings(&["1"; 10])).is_err());
        assert!(keys.get(Game::Maths).is_empty());
    }
}
