//! C7: the Optimizer Variants. Monte Carlo, Simulated Annealing, and
//! Conflict-Graph Greedy all share this trait, the cost function (C5), and
//! the candidate generator (C4/C6).

pub mod cg;
pub mod mc;
pub mod sa;

use crate::court::config::{CostWeights, EngineConfig, OptimizerKind};
use crate::court::domain::model::{Court, Player};
use crate::court::rng::EngineRng;
use crate::court::service::history::HistoryTracker;

/// Shared interface for the three optimizer variants (§9 "prefer a
/// tagged-variant over deep inheritance").
pub trait Optimizer {
    fn optimize(
        &self,
        history: &HistoryTracker,
        rng: &mut EngineRng,
        on_court_players: &[Player],
        first_court_number: u32,
        weights: CostWeights,
    ) -> Vec<Court>;
}

/// A sum type over the three variants, dispatched by the facade. Switching
/// variants never alters history state: all three read and write the same
/// [`HistoryTracker`].
pub enum Variant {
    Mc(mc::MonteCarloOptimizer),
    Sa(sa::SimulatedAnnealingOptimizer),
    Cg(cg::ConflictGraphOptimizer),
}

impl Variant {
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.engine_type {
            OptimizerKind::Mc => Variant::Mc(mc::MonteCarloOptimizer::new(config.mc)),
            OptimizerKind::Sa => Variant::Sa(sa::SimulatedAnnealingOptimizer::new(config.sa)),
            OptimizerKind::Cg => Variant::Cg(cg::ConflictGraphOptimizer::new()),
        }
    }

    pub fn kind(&self) -> OptimizerKind {
        match self {
            Variant::Mc(_) => OptimizerKind::Mc,
            Variant::Sa(_) => OptimizerKind::Sa,
            Variant::Cg(_) => OptimizerKind::Cg,
        }
    }
}

impl Optimizer for Variant {
    fn optimize(
        &self,
        history: &HistoryTracker,
        rng: &mut EngineRng,
        on_court_players: &[Player],
        first_court_number: u32,
        weights: CostWeights,
    ) -> Vec<Court> {
        match self {
            Variant::Mc(v) => v.optimize(history, rng, on_court_players, first_court_number, weights),
            Variant::Sa(v) => v.optimize(history, rng, on_court_players, first_court_number, weights),
            Variant::Cg(v) => v.optimize(history, rng, on_court_players, first_court_number, weights),
        }
    }
}
