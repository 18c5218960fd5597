//! Conflict-Graph Greedy: a deterministic construction. Builds a conflict
//! graph over on-court players (edge weight = teammate + opponent count),
//! then greedily seats the highest-conflict unplaced player onto whichever
//! court minimizes its conflict with players already seated there.

use crate::court::config::CostWeights;
use crate::court::domain::model::{Court, Player, PlayerId, Team};
use crate::court::rng::EngineRng;
use crate::court::service::history::HistoryTracker;
use crate::court::service::optimizer::Optimizer;
use crate::court::service::team_split::choose_team_split;

pub struct ConflictGraphOptimizer;

impl ConflictGraphOptimizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConflictGraphOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn edge_weight(history: &HistoryTracker, a: &str, b: &str) -> u32 {
    history.teammate_count(a, b) + history.opponent_count(a, b)
}

impl Optimizer for ConflictGraphOptimizer {
    fn optimize(
        &self,
        history: &HistoryTracker,
        _rng: &mut EngineRng,
        on_court_players: &[Player],
        first_court_number: u32,
        weights: CostWeights,
    ) -> Vec<Court> {
        tracing::debug!(players = on_court_players.len(), "running conflict-graph greedy optimizer");
        if on_court_players.is_empty() {
            return Vec::new();
        }

        let quads = on_court_players.len() / 4;
        let remainder = on_court_players.len() % 4;
        debug_assert!(remainder == 0 || remainder == 2, "bench selection must leave an even on-court count");

        let mut capacities: Vec<usize> = std::iter::repeat(4).take(quads).collect();
        if remainder == 2 {
            capacities.push(2);
        }
        let mut seats: Vec<Vec<PlayerId>> = capacities.iter().map(|c| Vec::with_capacity(*c)).collect();

        let mut remaining: Vec<&Player> = on_court_players.iter().collect();

        while let Some(pick_idx) = pick_highest_conflict(history, &remaining) {
            let player = remaining.remove(pick_idx);
            let court_idx = best_court_for(history, player, &seats, &capacities);
            seats[court_idx].push(player.id.clone());
        }

        let mut courts = Vec::with_capacity(seats.len());
        for (i, members) in seats.into_iter().enumerate() {
            let court_number = first_court_number + i as u32;
            if members.len() == 4 {
                let ids: [PlayerId; 4] = [
                    members[0].clone(),
                    members[1].clone(),
                    members[2].clone(),
                    members[3].clone(),
                ];
                let split = choose_team_split(history, &ids, weights);
                courts.push(Court {
                    court_number,
                    players: members,
                    team1: split.team1,
                    team2: split.team2,
                    waiting: None,
                    winner: None,
                    was_manually_assigned: false,
                });
            } else if members.len() == 2 {
                courts.push(Court {
                    court_number,
                    team1: Team::singles(members[0].clone()),
                    team2: Team::singles(members[1].clone()),
                    players: members,
                    waiting: None,
                    winner: None,
                    was_manually_assigned: false,
                });
            }
        }
        courts
    }
}

/// Picks the unplaced player with the highest total conflict weight against
/// every other unplaced player. Ties break by (bench_count asc, id asc).
fn pick_highest_conflict(history: &HistoryTracker, remaining: &[&Player]) -> Option<usize> {
    if remaining.is_empty() {
        return None;
    }
    let scores: Vec<u32> = remaining
        .iter()
        .map(|p| {
            remaining
                .iter()
                .filter(|other| other.id != p.id)
                .map(|other| edge_weight(history, &p.id, &other.id))
                .sum()
        })
        .collect();

    let mut best_idx = 0;
    for i in 1..remaining.len() {
        let better = scores[i] > scores[best_idx]
            || (scores[i] == scores[best_idx]
                && tie_break_key(history, remaining[i]) < tie_break_key(history, remaining[best_idx]));
        if better {
            best_idx = i;
        }
    }
    Some(best_idx)
}

fn tie_break_key(history: &HistoryTracker, player: &Player) -> (u32, PlayerId) {
    (history.bench_count(&player.id), player.id.clone())
}

/// Picks the court with room that minimizes the sum of edge weights between
/// `player` and the players already seated there. Ties break by ascending
/// court index.
fn best_court_for(
    history: &HistoryTracker,
    player: &Player,
    seats: &[Vec<PlayerId>],
    capacities: &[usize],
) -> usize {
    let mut best_idx = None;
    let mut best_score = u32::MAX;
    for (idx, members) in seats.iter().enumerate() {
        if members.len() >= capacities[idx] {
            continue;
        }
        let score: u32 = members
            .iter()
            .map(|other| edge_weight(history, &player.id, other))
            .sum();
        if score < best_score {
            best_score = score;
            best_idx = Some(idx);
        }
    }
    best_idx.expect("capacity must match the number of on-court players")
}
