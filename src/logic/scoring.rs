//! Per-game placement and base points, dispatched on the game's kind.

use crate::logic::results::ResultStore;
use crate::models::{BracketOutcome, Game, GameKind, PlayerId};
use std::cmp::Reverse;

/// Points by finishing position (1st = 25) for count, ordering and answer games.
pub const POSITION_POINTS: [u32; 16] = [25, 22, 19, 15, 12, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 0];

/// Bracket champion.
pub const CHAMPION_POINTS: u32 = 25;

/// Bracket losers by elimination round counted back from the final:
/// final, semi-final, quarter-final, round of 16. Earlier losers score 0.
pub const ELIMINATION_POINTS: [u32; 4] = [22, 15, 8, 4];

/// A player's finishing position and base points in one game (before doping).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Placement {
    pub player_id: PlayerId,
    /// 1-based.
    pub position: usize,
    pub points: u32,
}

/// Points for a 1-based position; positions past the table score 0.
pub fn position_points(position: usize) -> u32 {
    position
        .checked_sub(1)
        .and_then(|i| POSITION_POINTS.get(i))
        .copied()
        .unwrap_or(0)
}

/// Placements of every player scored in `game` so far, best first.
pub fn placements(game: Game, results: &ResultStore) -> Vec<Placement> {
    match game.kind() {
        GameKind::Count => {
            let mut ranked: Vec<(PlayerId, u32)> =
                results.counts(game).iter().map(|(&p, &c)| (p, c)).collect();
            ranked.sort_by_key(|&(p, count)| (Reverse(count), p));
            by_position(ranked.into_iter().map(|(p, _)| p))
        }
        GameKind::Ordering => by_position(results.ordering(game).unwrap_or(&[]).iter().copied()),
        GameKind::Answers => {
            let mut ranked: Vec<_> = results.answers(game).iter().collect();
            ranked.sort_by(|(pa, a), (pb, b)| {
                b.correct
                    .cmp(&a.correct)
                    .then(a.time_seconds.total_cmp(&b.time_seconds))
                    .then(pa.cmp(pb))
            });
            by_position(ranked.into_iter().map(|(&p, _)| p))
        }
        GameKind::Bracket => bracket_placements(results.bracket_outcomes(game)),
    }
}

fn by_position(players: impl Iterator<Item = PlayerId>) -> Vec<Placement> {
    players
        .enumerate()
        .map(|(i, player_id)| Placement {
            player_id,
            position: i + 1,
            points: position_points(i + 1),
        })
        .collect()
}

/// Placements for players whose bracket result is decided: every loser, plus the champion
/// once the final has been played. Players still in the running are not placed yet.
pub fn bracket_placements(outcomes: &[BracketOutcome]) -> Vec<Placement> {
    // (player, points, round reached)
    let mut decided: Vec<(PlayerId, u32, usize)> = Vec::new();
    for o in outcomes {
        let from_final = o.total_rounds.saturating_sub(o.round + 1);
        let points = ELIMINATION_POINTS.get(from_final).copied().unwrap_or(0);
        decided.push((o.loser, points, o.round));
        if o.is_final() {
            decided.push((o.winner, CHAMPION_POINTS, o.total_rounds));
        }
    }
    decided.sort_by_key(|&(p, points, round)| (Reverse(points), Reverse(round), p));
    decided
        .into_iter()
        .enumerate()
        .map(|(i, (player_id, points, _))| Placement {
            player_id,
            position: i + 1,
            points,
        })
        .collect()
}
