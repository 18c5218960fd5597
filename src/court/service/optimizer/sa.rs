//! Simulated Annealing: start from one Monte Carlo candidate, then explore
//! cross-court player swaps and intra-court split flips, accepting worse
//! neighbors with probability `exp(-ΔCost / T)` as the temperature decays.

use crate::court::config::{CostWeights, SaConfig};
use crate::court::domain::model::{Court, Player, Team};
use crate::court::rng::EngineRng;
use crate::court::service::candidate::generate_candidate;
use crate::court::service::cost::court_cost;
use crate::court::service::history::HistoryTracker;
use crate::court::service::optimizer::Optimizer;
use crate::court::service::team_split::choose_team_split;

pub struct SimulatedAnnealingOptimizer {
    config: SaConfig,
}

impl SimulatedAnnealingOptimizer {
    pub fn new(config: SaConfig) -> Self {
        Self { config }
    }
}

impl Optimizer for SimulatedAnnealingOptimizer {
    fn optimize(
        &self,
        history: &HistoryTracker,
        rng: &mut EngineRng,
        on_court_players: &[Player],
        first_court_number: u32,
        weights: CostWeights,
    ) -> Vec<Court> {
        tracing::debug!(iterations = self.config.iterations, "running simulated annealing optimizer");
        let seed = generate_candidate(history, rng, on_court_players, first_court_number, weights);
        if seed.courts.is_empty() {
            return seed.courts;
        }

        let mut current = seed.courts;
        let mut current_cost = total_cost(history, &current, weights);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = self.config.t0;
        for _ in 0..self.config.iterations {
            let Some(proposal) = propose_neighbor(history, rng, &current, weights) else {
                continue;
            };
            let proposal_cost = total_cost(history, &proposal, weights);
            let delta = proposal_cost - current_cost;
            let accept = delta <= 0.0 || rng.gen_f64() < (-delta / temperature.max(self.config.floor)).exp();
            if accept {
                current = proposal;
                current_cost = proposal_cost;
                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            }
            temperature = (temperature * self.config.decay).max(self.config.floor);
        }

        best
    }
}

fn total_cost(history: &HistoryTracker, courts: &[Court], weights: CostWeights) -> f64 {
    courts
        .iter()
        .filter(|c| !c.team1.players.is_empty() && !c.team2.players.is_empty())
        .map(|c| court_cost(history, &c.team1, &c.team2, weights))
        .sum()
}

/// Proposes a neighbor by either swapping two on-court players between
/// courts, or swapping a team-split within one court. Returns `None` when
/// there are too few courts to propose a swap.
fn propose_neighbor(
    history: &HistoryTracker,
    rng: &mut EngineRng,
    courts: &[Court],
    weights: CostWeights,
) -> Option<Vec<Court>> {
    if courts.is_empty() {
        return None;
    }
    let mut next = courts.to_vec();

    let use_cross_court_swap = courts.len() >= 2 && rng.gen_range(0, 2) == 0;
    if use_cross_court_swap {
        let i = rng.gen_range(0, courts.len() as u32) as usize;
        let mut j = rng.gen_range(0, courts.len() as u32) as usize;
        if j == i {
            j = (j + 1) % courts.len();
        }
        let slot_i = rng.gen_range(0, next[i].players.len() as u32) as usize;
        let slot_j = rng.gen_range(0, next[j].players.len() as u32) as usize;
        let player_i = next[i].players[slot_i].clone();
        let player_j = next[j].players[slot_j].clone();
        swap_player_in_court(&mut next[i], slot_i, player_j);
        swap_player_in_court(&mut next[j], slot_j, player_i);
        // Re-derive the best split for any 4-player court touched, since the
        // membership changed under it.
        for idx in [i, j] {
            if next[idx].players.len() == 4 {
                rebuild_doubles_split(history, &mut next[idx], weights);
            }
        }
    } else {
        // Intra-court split flip: only meaningful for doubles courts.
        let doubles_indices: Vec<usize> = next
            .iter()
            .enumerate()
            .filter(|(_, c)| c.players.len() == 4)
            .map(|(i, _)| i)
            .collect();
        if doubles_indices.is_empty() {
            return None;
        }
        let pick = doubles_indices[rng.gen_range(0, doubles_indices.len() as u32) as usize];
        flip_split(&mut next[pick]);
    }

    Some(next)
}

fn swap_player_in_court(court: &mut Court, slot: usize, new_player: String) {
    let old_player = court.players[slot].clone();
    court.players[slot] = new_player.clone();
    for team in [&mut court.team1, &mut court.team2] {
        if let Some(pos) = team.players.iter().position(|p| *p == old_player) {
            team.players[pos] = new_player.clone();
        }
    }
}

fn rebuild_doubles_split(history: &HistoryTracker, court: &mut Court, weights: CostWeights) {
    let ids: [String; 4] = [
        court.players[0].clone(),
        court.players[1].clone(),
        court.players[2].clone(),
        court.players[3].clone(),
    ];
    let split = choose_team_split(history, &ids, weights);
    court.team1 = split.team1;
    court.team2 = split.team2;
}

/// Cycles a 4-player court to the next of the three canonical splits.
fn flip_split(court: &mut Court) {
    let ids = &court.players;
    if ids.len() != 4 {
        return;
    }
    let (p0, p1, p2, p3) = (ids[0].clone(), ids[1].clone(), ids[2].clone(), ids[3].clone());
    let current = (court.team1.players.clone(), court.team2.players.clone());
    let s1 = (vec![p0.clone(), p1.clone()], vec![p2.clone(), p3.clone()]);
    let s2 = (vec![p0.clone(), p2.clone()], vec![p1.clone(), p3.clone()]);
    let s3 = (vec![p0.clone(), p3.clone()], vec![p1.clone(), p2.clone()]);
    let next = if current == s1 || (current.0 == s1.1 && current.1 == s1.0) {
        s2
    } else if current == s2 || (current.0 == s2.1 && current.1 == s2.0) {
        s3
    } else {
        s1
    };
    court.team1 = Team::doubles(next.0[0].clone(), next.0[1].clone());
    court.team2 = Team::doubles(next.1[0].clone(), next.1[1].clone());
}
