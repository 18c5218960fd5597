//! A single explicit RNG source, threaded through bench tie-breaking,
//! shuffles, Monte Carlo sampling, and simulated-annealing acceptance, per
//! the spec's randomness-and-reproducibility design note.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct EngineRng(StdRng);

impl EngineRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// A time-based seed, acceptable for production per §5.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn gen_range(&mut self, low: u32, high_exclusive: u32) -> u32 {
        self.0.gen_range(low..high_exclusive)
    }

    pub fn gen_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}
