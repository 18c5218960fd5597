//! C4: the Team-Split Chooser.

use crate::court::config::CostWeights;
use crate::court::domain::model::{PlayerId, Team};
use crate::court::service::cost::court_cost;
use crate::court::service::history::HistoryTracker;

pub struct SplitChoice {
    pub team1: Team,
    pub team2: Team,
    pub cost: f64,
}

/// Given exactly 4 ordered players, enumerates the three distinct pairings
/// and keeps the minimum-cost one, ties broken by enumeration order
/// (S1 < S2 < S3).
pub fn choose_team_split(
    history: &HistoryTracker,
    players: &[PlayerId; 4],
    weights: CostWeights,
) -> SplitChoice {
    let [p0, p1, p2, p3] = players;
    let candidates = [
        (
            Team::doubles(p0.clone(), p1.clone()),
            Team::doubles(p2.clone(), p3.clone()),
        ),
        (
            Team::doubles(p0.clone(), p2.clone()),
            Team::doubles(p1.clone(), p3.clone()),
        ),
        (
            Team::doubles(p0.clone(), p3.clone()),
            Team::doubles(p1.clone(), p2.clone()),
        ),
    ];

    let mut best: Option<SplitChoice> = None;
    for (team1, team2) in candidates {
        let cost = court_cost(history, &team1, &team2, weights);
        let is_better = match &best {
            None => true,
            Some(current) => cost < current.cost,
        };
        if is_better {
            best = Some(SplitChoice { team1, team2, cost });
        }
    }
    best.expect("three candidates were enumerated")
}
