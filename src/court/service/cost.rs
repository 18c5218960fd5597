//! C5: the Court Cost Function.

use crate::court::config::CostWeights;
use crate::court::domain::model::Team;
use crate::court::service::history::HistoryTracker;

/// Scores a proposed team split by summing teammate/opponent/skill-imbalance
/// penalties (§4.5). Courts without a defined pair of teams are not scored
/// here; callers skip them entirely (they contribute 0).
pub fn court_cost(
    history: &HistoryTracker,
    team1: &Team,
    team2: &Team,
    weights: CostWeights,
) -> f64 {
    let mut cost = 0.0;

    // Teammate term: 0 for singles (no intra-team pair exists).
    if team1.players.len() == 2 {
        cost += weights.teammate
            * history.teammate_count(&team1.players[0], &team1.players[1]) as f64;
    }
    if team2.players.len() == 2 {
        cost += weights.teammate
            * history.teammate_count(&team2.players[0], &team2.players[1]) as f64;
    }

    // Opponent term: every cross-team pair.
    for a in &team1.players {
        for b in &team2.players {
            cost += weights.opponent * history.opponent_count(a, b) as f64;
        }
    }

    // Skill-balance term: |winSum(team1) - winSum(team2)|.
    let win_sum = |team: &Team| -> f64 {
        team.players
            .iter()
            .map(|id| history.win_count(id) as f64)
            .sum()
    };
    cost += weights.skill * (win_sum(team1) - win_sum(team2)).abs();

    cost
}
