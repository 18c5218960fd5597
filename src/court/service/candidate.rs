//! C6: the Candidate Generator.

use crate::court::config::CostWeights;
use crate::court::domain::model::{Court, Player, PlayerId};
use crate::court::rng::EngineRng;
use crate::court::service::history::HistoryTracker;
use crate::court::service::team_split::choose_team_split;

pub struct Candidate {
    pub courts: Vec<Court>,
    pub total_cost: f64,
}

/// Shuffles `on_court_players`, consumes them sequentially four at a time,
/// and builds one full candidate round. Court numbers start at
/// `first_court_number`.
///
/// If exactly 2 players remain after consuming groups of 4, a singles court
/// is formed; fewer than 2 are discarded (they should have already been
/// benched by §4.3).
pub fn generate_candidate(
    history: &HistoryTracker,
    rng: &mut EngineRng,
    on_court_players: &[Player],
    first_court_number: u32,
    weights: CostWeights,
) -> Candidate {
    let mut shuffled: Vec<Player> = on_court_players.to_vec();
    shuffle(rng, &mut shuffled);

    let mut courts = Vec::new();
    let mut total_cost = 0.0;
    let mut court_number = first_court_number;
    let mut chunks = shuffled.chunks(4);

    while let Some(chunk) = chunks.next() {
        match chunk.len() {
            4 => {
                let ids: [PlayerId; 4] = [
                    chunk[0].id.clone(),
                    chunk[1].id.clone(),
                    chunk[2].id.clone(),
                    chunk[3].id.clone(),
                ];
                let split = choose_team_split(history, &ids, weights);
                total_cost += split.cost;
                courts.push(Court {
                    court_number,
                    players: ids.to_vec(),
                    team1: split.team1,
                    team2: split.team2,
                    waiting: None,
                    winner: None,
                    was_manually_assigned: false,
                });
                court_number += 1;
            }
            2 => {
                let a = chunk[0].id.clone();
                let b = chunk[1].id.clone();
                let team1 = crate::court::domain::model::Team::singles(a.clone());
                let team2 = crate::court::domain::model::Team::singles(b.clone());
                total_cost += crate::court::service::cost::court_cost(history, &team1, &team2, weights);
                courts.push(Court {
                    court_number,
                    players: vec![a, b],
                    team1,
                    team2,
                    waiting: None,
                    winner: None,
                    was_manually_assigned: false,
                });
                court_number += 1;
            }
            _ => {
                // The bench selector (§4.3) guarantees an even on-court
                // count, so a 3-player remainder never reaches the
                // optimizer (§3 invariant 1); fewer than 2 is discarded,
                // not benched, here.
                debug_assert_ne!(chunk.len(), 3, "bench selection must leave no 3-player remainder");
            }
        }
    }

    Candidate { courts, total_cost }
}

fn shuffle(rng: &mut EngineRng, players: &mut [Player]) {
    // Fisher-Yates using the engine's single RNG source.
    for i in (1..players.len()).rev() {
        let j = rng.gen_range(0, (i + 1) as u32) as usize;
        players.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(format!("p{i}"), format!("Player {i}"))).collect()
    }

    #[test]
    fn groups_of_four_become_doubles_courts() {
        let history = HistoryTracker::new();
        let mut rng = EngineRng::seeded(7);
        let candidate = generate_candidate(&history, &mut rng, &players(8), 1, CostWeights::default());
        assert_eq!(candidate.courts.len(), 2);
        for court in &candidate.courts {
            assert_eq!(court.players.len(), 4);
        }
    }

    #[test]
    fn leftover_pair_becomes_singles() {
        let history = HistoryTracker::new();
        let mut rng = EngineRng::seeded(7);
        let candidate = generate_candidate(&history, &mut rng, &players(6), 1, CostWeights::default());
        assert_eq!(candidate.courts.len(), 2);
        assert!(candidate.courts.iter().any(|c| c.players.len() == 2));
    }

    #[test]
    fn every_player_appears_exactly_once() {
        let history = HistoryTracker::new();
        let mut rng = EngineRng::seeded(99);
        let roster = players(12);
        let candidate = generate_candidate(&history, &mut rng, &roster, 1, CostWeights::default());
        let mut seen = std::collections::HashSet::new();
        for court in &candidate.courts {
            for id in &court.players {
                assert!(seen.insert(id.clone()), "player {id} appeared twice");
            }
        }
        assert_eq!(seen.len(), 12);
    }
}
