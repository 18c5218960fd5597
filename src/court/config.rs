//! Engine-wide configuration, mirroring the teacher's
//! `OptimizationConfig::default()` pattern: a plain struct with a `Default`
//! impl threaded through the service layer.

use serde::{Deserialize, Serialize};

/// Selects which optimizer variant the facade delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    Mc,
    Sa,
    Cg,
}

impl Default for OptimizerKind {
    fn default() -> Self {
        OptimizerKind::Sa
    }
}

/// Relative weights of the three cost terms in §4.5. All default to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostWeights {
    pub teammate: f64,
    pub opponent: f64,
    pub skill: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            teammate: 1.0,
            opponent: 1.0,
            skill: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McConfig {
    pub samples: u32,
}

impl Default for McConfig {
    fn default() -> Self {
        Self { samples: 300 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaConfig {
    pub iterations: u32,
    pub t0: f64,
    pub decay: f64,
    pub floor: f64,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            iterations: 5000,
            t0: 10.0,
            decay: 0.999,
            floor: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    pub engine_type: OptimizerKind,
    pub mc: McConfig,
    pub sa: SaConfig,
    pub cost_weights: CostWeights,
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_type: OptimizerKind::default(),
            mc: McConfig::default(),
            sa: SaConfig::default(),
            cost_weights: CostWeights::default(),
            rng_seed: None,
        }
    }
}
