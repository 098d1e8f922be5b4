//! Jersey rankings computed from the result store and the doping ledger.
//!
//! Nothing here holds state: each call re-derives the tables from the stores it is given.

use crate::logic::doping::DopingLedger;
use crate::logic::results::ResultStore;
use crate::logic::scoring::{placements, Placement};
use crate::models::{Game, Jersey, JerseyWinner, PlayerId, RankingEntry, Rankings, Roster};
use std::collections::BTreeMap;

/// Base placements of every game, computed once per ranking pass.
struct GamePlacements(BTreeMap<Game, Vec<Placement>>);

impl GamePlacements {
    fn compute(results: &ResultStore) -> Self {
        Self(
            Game::ALL
                .into_iter()
                .map(|g| (g, placements(g, results)))
                .collect(),
        )
    }

    fn of(&self, game: Game) -> &[Placement] {
        self.0.get(&game).map(Vec::as_slice).unwrap_or(&[])
    }

    fn position(&self, game: Game, player: PlayerId) -> Option<usize> {
        self.of(game)
            .iter()
            .find(|p| p.player_id == player)
            .map(|p| p.position)
    }
}

/// All four jersey rankings.
pub fn compute_rankings(roster: &Roster, results: &ResultStore, ledger: &DopingLedger) -> Rankings {
    let placements = GamePlacements::compute(results);
    let rank = |jersey| rank_jersey(jersey, &placements, roster, ledger);
    Rankings {
        overall: rank(Jersey::Overall),
        speed: rank(Jersey::Speed),
        ball: rank(Jersey::Ball),
        brain: rank(Jersey::Brain),
    }
}

/// One jersey's ranking.
pub fn jersey_ranking(
    jersey: Jersey,
    roster: &Roster,
    results: &ResultStore,
    ledger: &DopingLedger,
) -> Vec<RankingEntry> {
    rank_jersey(jersey, &GamePlacements::compute(results), roster, ledger)
}

/// Leaders of the jerseys whose games are scored for the whole roster.
pub fn jersey_winners(roster: &Roster, results: &ResultStore, ledger: &DopingLedger) -> Vec<JerseyWinner> {
    let rankings = compute_rankings(roster, results, ledger);
    Jersey::ALL
        .into_iter()
        .filter(|j| j.games().iter().all(|g| results.is_fully_scored(*g, roster)))
        .filter_map(|jersey| {
            let leader = rankings.get(jersey).first()?;
            Some(JerseyWinner {
                jersey,
                player_id: leader.player_id,
                name: leader.name.clone(),
                number: leader.number,
                points: leader.points,
                picture: roster.get(leader.player_id).and_then(|p| p.picture.clone()),
            })
        })
        .collect()
}

/// Sum points over the jersey's games; doping doubles the game it was spent on.
/// Sorted by points descending, then (ball jersey) petanque position, then player id.
fn rank_jersey(
    jersey: Jersey,
    placements: &GamePlacements,
    roster: &Roster,
    ledger: &DopingLedger,
) -> Vec<RankingEntry> {
    let mut totals: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for &game in jersey.games() {
        for p in placements.of(game) {
            let multiplier = if ledger.doubles(p.player_id, game) { 2 } else { 1 };
            *totals.entry(p.player_id).or_insert(0) += p.points * multiplier;
        }
    }

    let mut entries: Vec<RankingEntry> = totals
        .into_iter()
        .filter_map(|(player_id, points)| {
            let player = roster.get(player_id)?;
            Some(RankingEntry {
                player_id,
                name: player.name.clone(),
                number: player.number,
                points,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        let by_points = b.points.cmp(&a.points);
        let by_petanque = if jersey == Jersey::Ball {
            let pos = |e: &RankingEntry| {
                placements
                    .position(Game::Petanque, e.player_id)
                    .unwrap_or(usize::MAX)
            };
            pos(a).cmp(&pos(b))
        } else {
            std::cmp::Ordering::Equal
        };
        by_points.then(by_petanque).then(a.player_id.cmp(&b.player_id))
    });
    entries
}
