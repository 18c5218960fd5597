//! Monte Carlo: run the candidate generator N times, keep the lowest cost.

use crate::court::config::{CostWeights, McConfig};
use crate::court::domain::model::{Court, Player};
use crate::court::rng::EngineRng;
use crate::court::service::candidate::generate_candidate;
use crate::court::service::history::HistoryTracker;
use crate::court::service::optimizer::Optimizer;

pub struct MonteCarloOptimizer {
    config: McConfig,
}

impl MonteCarloOptimizer {
    pub fn new(config: McConfig) -> Self {
        Self { config }
    }
}

impl Optimizer for MonteCarloOptimizer {
    fn optimize(
        &self,
        history: &HistoryTracker,
        rng: &mut EngineRng,
        on_court_players: &[Player],
        first_court_number: u32,
        weights: CostWeights,
    ) -> Vec<Court> {
        tracing::debug!(samples = self.config.samples, "running Monte Carlo optimizer");
        let mut best: Option<(f64, Vec<Court>)> = None;
        for attempt in 0..self.config.samples {
            let candidate =
                generate_candidate(history, rng, on_court_players, first_court_number, weights);
            let better = match &best {
                None => true,
                Some((best_cost, _)) => candidate.total_cost < *best_cost,
            };
            if better {
                tracing::trace!(attempt, cost = candidate.total_cost, "new best candidate");
                best = Some((candidate.total_cost, candidate.courts));
            }
        }
        best.map(|(_, courts)| courts).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_samples_yields_empty_round() {
        let history = HistoryTracker::new();
        let mut rng = EngineRng::seeded(1);
        let optimizer = MonteCarloOptimizer::new(McConfig { samples: 0 });
        let players = vec![Player::new("p0", "A"), Player::new("p1", "B")];
        let courts = optimizer.optimize(&history, &mut rng, &players, 1, CostWeights::default());
        assert!(courts.is_empty());
    }

    #[test]
    fn more_samples_never_increase_total_cost() {
        let mut history = HistoryTracker::new();
        for _ in 0..4 {
            history.bump_teammate("p0", "p1");
        }
        let players: Vec<Player> = (0..8).map(|i| Player::new(format!("p{i}"), format!("P{i}"))).collect();

        let mut rng_small = EngineRng::seeded(5);
        let small = MonteCarloOptimizer::new(McConfig { samples: 1 });
        let courts_small = small.optimize(&history, &mut rng_small, &players, 1, CostWeights::default());
        let cost_small: f64 = courts_small
            .iter()
            .map(|c| crate::court::service::cost::court_cost(&history, &c.team1, &c.team2, CostWeights::default()))
            .sum();

        let mut rng_large = EngineRng::seeded(5);
        let large = MonteCarloOptimizer::new(McConfig { samples: 50 });
        let courts_large = large.optimize(&history, &mut rng_large, &players, 1, CostWeights::default());
        let cost_large: f64 = courts_large
            .iter()
            .map(|c| crate::court::service::cost::court_cost(&history, &c.team1, &c.team2, CostWeights::default()))
            .sum();

        assert!(cost_large <= cost_small);
    }
}
