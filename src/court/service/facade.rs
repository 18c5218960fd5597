//! C10: the Engine Facade. Unifies C1-C9 behind a single interface, selects
//! the active optimizer variant, and owns the persistence hooks.

use std::collections::HashSet;

use crate::court::config::EngineConfig;
use crate::court::domain::model::{Player, PlayerId, Round, Winner};
use crate::court::error::{EngineError, EngineResult};
use crate::court::rng::EngineRng;
use crate::court::service::bench::select_on_court_and_bench;
use crate::court::service::history::{HistoryTracker, StateSnapshot, SubscriptionId};
use crate::court::service::optimizer::{Optimizer, Variant};
use crate::court::service::pin::{apply_manual_pin, ManualPin};
use crate::court::service::winner;

/// The host's storage medium, kept fully external per §1/§6 — the engine
/// only knows how to serialize/deserialize a [`StateSnapshot`], never how or
/// where it is stored.
#[cfg_attr(test, mockall::automock)]
pub trait StateStorage {
    fn save(&mut self, json: &str) -> Result<(), String>;
    fn load(&mut self) -> Result<Option<String>, String>;
}

/// Default storage key agreed with the host, per §6.
pub const DEFAULT_STORAGE_KEY: &str = "badminton-court-engine-state";

/// Unifies the generation, history, persistence, and observation
/// operations behind one type. A process can hold a single shared instance
/// or multiple isolated ones; switching the active optimizer variant never
/// alters history state, since all three share the same [`HistoryTracker`].
pub struct Engine {
    history: HistoryTracker,
    rng: EngineRng,
    config: EngineConfig,
    variant: Variant,
    current_round: Round,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => EngineRng::seeded(seed),
            None => EngineRng::from_entropy(),
        };
        let variant = Variant::from_config(&config);
        Self {
            history: HistoryTracker::new(),
            rng,
            config,
            variant,
            current_round: Round::empty(),
        }
    }

    /// Replaces the active optimizer variant in place. History state is
    /// untouched.
    pub fn set_variant(&mut self, config: EngineConfig) {
        self.variant = Variant::from_config(&config);
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates a full round: records pending winners on the previously
    /// held round, clears the session, separates pinned/force-benched
    /// players, computes the bench, runs the active optimizer, and commits
    /// the round's bench/single/teammate/opponent increments (§2 data flow).
    pub fn generate(
        &mut self,
        players: &[Player],
        number_of_courts: u32,
        manual_pin: Option<&ManualPin>,
        force_bench_ids: Option<&HashSet<PlayerId>>,
    ) -> Round {
        tracing::info!(
            roster = players.len(),
            number_of_courts,
            "generating round"
        );

        // Record any pending winners on the currently-held round before it
        // is discarded.
        self.history.record_wins(&self.current_round.courts);
        self.history.clear_current_session();

        if players.is_empty() || number_of_courts == 0 {
            self.current_round = Round::empty();
            return self.current_round.clone();
        }

        let present: Vec<Player> = players.iter().filter(|p| p.is_present).cloned().collect();

        let pin_outcome = apply_manual_pin(&self.history, &present, manual_pin, self.config.cost_weights);

        // A pin occupies court 1, so the optimizer only fills the rest; with
        // `number_of_courts == 1` this leaves 0 remaining courts and every
        // other present player benched for the round, which is correct (the
        // caller asked for 1 court and got exactly 1 — the pinned one).
        let remaining_courts = if pin_outcome.court.is_some() {
            number_of_courts.saturating_sub(1)
        } else {
            number_of_courts
        };

        let empty_force_bench = HashSet::new();
        let force_bench = force_bench_ids.unwrap_or(&empty_force_bench);
        let (on_court, bench) = select_on_court_and_bench(
            &self.history,
            &mut self.rng,
            &pin_outcome.residual_present,
            remaining_courts,
            force_bench,
        );

        let first_court_number = if pin_outcome.court.is_some() { 2 } else { 1 };
        let optimized_courts = self.variant.optimize(
            &self.history,
            &mut self.rng,
            &on_court,
            first_court_number,
            self.config.cost_weights,
        );

        let mut courts = Vec::new();
        if let Some(pinned) = pin_outcome.court {
            courts.push(pinned);
        }
        courts.extend(optimized_courts);

        self.history.commit_round(&courts, &bench);

        let round = Round { courts, bench };
        self.current_round = round.clone();
        round
    }

    /// Returns the subset of `players` on the bench for `round`.
    pub fn get_benched_players(round: &Round, players: &[Player]) -> Vec<Player> {
        let bench: HashSet<&PlayerId> = round.bench.iter().collect();
        players.iter().filter(|p| bench.contains(&p.id)).cloned().collect()
    }

    pub fn record_wins(&mut self, round: &Round) {
        self.history.record_wins(&round.courts);
    }

    /// Applies, changes, or clears the winner of a court in the currently
    /// held round (§4.9), returning the updated round.
    pub fn update_winner(&mut self, court_number: u32, new_winner: Option<Winner>) -> Round {
        winner::update_winner(&mut self.history, &mut self.current_round, court_number, new_winner);
        self.current_round.clone()
    }

    pub fn reverse_win_for_court(&mut self, court_number: u32) {
        self.history.reverse_win_for_court(court_number);
    }

    pub fn get_win_counts(&self) -> std::collections::HashMap<PlayerId, u32> {
        self.history.get_win_counts()
    }

    pub fn get_bench_counts(&self) -> std::collections::HashMap<PlayerId, u32> {
        self.history.get_bench_counts()
    }

    pub fn reset_history(&mut self) {
        self.history.reset_history();
        self.current_round = Round::empty();
    }

    pub fn clear_current_session(&mut self) {
        self.history.clear_current_session();
    }

    pub fn prepare_state_for_saving(&self) -> StateSnapshot {
        let mut snapshot = self.history.prepare_state_for_saving();
        snapshot.engine_type = Some(match self.variant.kind() {
            crate::court::config::OptimizerKind::Mc => "mc".to_string(),
            crate::court::config::OptimizerKind::Sa => "sa".to_string(),
            crate::court::config::OptimizerKind::Cg => "cg".to_string(),
        });
        snapshot
    }

    /// Loads a previously saved snapshot. Leaves in-memory state intact on
    /// parse failure (§4.2 failure model).
    pub fn load_state(&mut self, snapshot: StateSnapshot) {
        self.history.load_state(snapshot);
    }

    pub fn on_state_change<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.history.on_state_change(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.history.unsubscribe(id);
    }

    /// Serializes the current state and hands it to the host's storage
    /// medium. IO failures are surfaced as [`EngineError::StorageUnavailable`];
    /// in-memory state is never mutated by this call.
    pub fn save_state(&self, storage: &mut dyn StateStorage) -> EngineResult<()> {
        let snapshot = self.prepare_state_for_saving();
        let json = serde_json::to_string(&snapshot).map_err(EngineError::StateCorruption)?;
        storage.save(&json).map_err(EngineError::StorageUnavailable)
    }

    /// Reads and parses a snapshot from the host's storage medium. A
    /// missing snapshot is not an error: it leaves history untouched.
    pub fn load_state_from(&mut self, storage: &mut dyn StateStorage) -> EngineResult<()> {
        let Some(json) = storage.load().map_err(EngineError::StorageUnavailable)? else {
            return Ok(());
        };
        let snapshot: StateSnapshot = serde_json::from_str(&json)?;
        self.load_state(snapshot);
        Ok(())
    }
}
