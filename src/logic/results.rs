//! Result store: raw results per game, duplicate protection and submission validation.

use crate::logic::answers::AnswerKeys;
use crate::logic::doping::DopingLedger;
use crate::models::{
    Accepted, AnswerResult, BracketOutcome, Game, GameKind, Grade, Payload, PlayerId, Roster,
    ScoreboardError, ScoreboardResult, Submission,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultStore {
    /// Count games: jumps per player.
    counts: BTreeMap<Game, BTreeMap<PlayerId, u32>>,
    /// Ordering games: one finishing order for the whole roster.
    orderings: BTreeMap<Game, Vec<PlayerId>>,
    /// Brain games: graded answers per player.
    answers: BTreeMap<Game, BTreeMap<PlayerId, AnswerResult>>,
    /// Bracket games: decided matches in the order they were played.
    brackets: BTreeMap<Game, Vec<BracketOutcome>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a submission. Nothing is stored (and no doping is spent) on error.
    pub fn submit(
        &mut self,
        submission: Submission,
        roster: &Roster,
        ledger: &mut DopingLedger,
        keys: &AnswerKeys,
    ) -> ScoreboardResult<Accepted> {
        let Submission {
            game,
            payload,
            overwrite,
        } = submission;
        if game.kind() == GameKind::Bracket {
            return Err(ScoreboardError::validation(format!(
                "{game} is scored through its tournament"
            )));
        }
        if payload.kind() != game.kind() {
            return Err(ScoreboardError::validation(format!(
                "Payload does not match the fields of {game}"
            )));
        }

        match payload {
            Payload::Count {
                player_id,
                jumps,
                doping,
            } => {
                roster.require(player_id)?;
                let replaced = self.has_result(game, player_id);
                if replaced && !overwrite {
                    return Err(ScoreboardError::DuplicateExists);
                }
                let dopers = doping_claims(ledger, game, doping.then_some(player_id))?;
                spend_doping(ledger, game, &dopers)?;
                self.counts.entry(game).or_default().insert(player_id, jumps);
                Ok(Accepted {
                    game,
                    replaced,
                    grade: None,
                })
            }
            Payload::Ordering {
                ordering,
                doping_players,
            } => {
                validate_ordering(&ordering, roster)?;
                if let Some(&stranger) = doping_players.iter().find(|p| !ordering.contains(p)) {
                    return Err(ScoreboardError::validation(format!(
                        "Player {stranger} is not part of the ordering"
                    )));
                }
                let replaced = self.orderings.contains_key(&game);
                if replaced && !overwrite {
                    return Err(ScoreboardError::DuplicateExists);
                }
                let mut doping_players = doping_players;
                doping_players.sort_unstable();
                doping_players.dedup();
                let dopers = doping_claims(ledger, game, doping_players)?;
                spend_doping(ledger, game, &dopers)?;
                self.orderings.insert(game, ordering);
                Ok(Accepted {
                    game,
                    replaced,
                    grade: None,
                })
            }
            Payload::Answers {
                player_id,
                answers,
                time_seconds,
                doping,
            } => {
                roster.require(player_id)?;
                if !time_seconds.is_finite() || time_seconds < 0.0 {
                    return Err(ScoreboardError::validation("Total time is required"));
                }
                let replaced = self.has_result(game, player_id);
                if replaced && !overwrite {
                    return Err(ScoreboardError::DuplicateExists);
                }
                let dopers = doping_claims(ledger, game, doping.then_some(player_id))?;
                spend_doping(ledger, game, &dopers)?;
                let correct = keys.grade(game, &answers);
                let grade = Grade {
                    correct,
                    questions: answers.len(),
                    time_seconds,
                };
                self.answers.entry(game).or_default().insert(
                    player_id,
                    AnswerResult {
                        answers,
                        time_seconds,
                        correct,
                    },
                );
                Ok(Accepted {
                    game,
                    replaced,
                    grade: Some(grade),
                })
            }
        }
    }

    /// Append a decided bracket match.
    pub fn record_bracket_outcome(&mut self, game: Game, outcome: BracketOutcome) {
        self.brackets.entry(game).or_default().push(outcome);
    }

    /// Whether a score already exists for this player (ordering games: placed in the ordering).
    pub fn has_result(&self, game: Game, player: PlayerId) -> bool {
        match game.kind() {
            GameKind::Count => self.counts(game).contains_key(&player),
            GameKind::Ordering => self
                .ordering(game)
                .is_some_and(|ordering| ordering.contains(&player)),
            GameKind::Answers => self.answers(game).contains_key(&player),
            GameKind::Bracket => self
                .bracket_outcomes(game)
                .iter()
                .any(|o| o.winner == player || o.loser == player),
        }
    }

    /// Whether every rostered player has a score for the game (bracket: champion decided).
    pub fn is_fully_scored(&self, game: Game, roster: &Roster) -> bool {
        if roster.is_empty() {
            return false;
        }
        match game.kind() {
            GameKind::Bracket => self.bracket_outcomes(game).iter().any(BracketOutcome::is_final),
            _ => roster.players().iter().all(|p| self.has_result(game, p.id)),
        }
    }

    pub fn counts(&self, game: Game) -> &BTreeMap<PlayerId, u32> {
        static EMPTY: BTreeMap<PlayerId, u32> = BTreeMap::new();
        self.counts.get(&game).unwrap_or(&EMPTY)
    }

    pub fn ordering(&self, game: Game) -> Option<&[PlayerId]> {
        self.orderings.get(&game).map(Vec::as_slice)
    }

    pub fn answers(&self, game: Game) -> &BTreeMap<PlayerId, AnswerResult> {
        static EMPTY: BTreeMap<PlayerId, AnswerResult> = BTreeMap::new();
        self.answers.get(&game).unwrap_or(&EMPTY)
    }

    pub fn bracket_outcomes(&self, game: Game) -> &[BracketOutcome] {
        self.brackets.get(&game).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(BTreeMap::is_empty)
            && self.orderings.is_empty()
            && self.answers.values().all(BTreeMap::is_empty)
            && self.brackets.values().all(Vec::is_empty)
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.orderings.clear();
        self.answers.clear();
        self.brackets.clear();
    }
}

/// Ordering must be a permutation of the full roster.
fn validate_ordering(ordering: &[PlayerId], roster: &Roster) -> ScoreboardResult<()> {
    if ordering.len() != roster.len() {
        return Err(ScoreboardError::IncompleteOrdering);
    }
    let mut seen = HashSet::with_capacity(ordering.len());
    for &id in ordering {
        if !roster.contains(id) || !seen.insert(id) {
            return Err(ScoreboardError::IncompleteOrdering);
        }
    }
    Ok(())
}

/// Players that still need a ledger entry. Fails if any of them spent doping elsewhere.
fn doping_claims(
    ledger: &DopingLedger,
    game: Game,
    players: impl IntoIterator<Item = PlayerId>,
) -> ScoreboardResult<Vec<PlayerId>> {
    let mut claims = Vec::new();
    for player in players {
        if ledger.check_for(player, game)? {
            claims.push(player);
        }
    }
    Ok(claims)
}

fn spend_doping(ledger: &mut DopingLedger, game: Game, players: &[PlayerId]) -> ScoreboardResult<()> {
    for &player in players {
        ledger.record(player, game)?;
    }
    Ok(())
}
