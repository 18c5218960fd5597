//! Court assignment engine: schedules players into badminton doubles
//! matches across a sequence of rounds, rotating teammates, opponents, and
//! benches as fairly as possible while keeping skill-balanced teams.
//!
//! The crate is a single-threaded, synchronous library: no operation
//! suspends or awaits, and there is no built-in CLI or wire protocol. Hosts
//! own the UI, OCR/name extraction, and the storage medium; this crate owns
//! the cost model, the optimizer variants, and the persistent history.

pub mod court;

pub use court::config::{CostWeights, EngineConfig, McConfig, OptimizerKind, SaConfig};
pub use court::domain::model::{Court, MatchRecord, Player, PlayerId, Round, Team, Winner};
pub use court::error::{EngineError, EngineResult};
pub use court::service::facade::{Engine, StateStorage, DEFAULT_STORAGE_KEY};
pub use court::service::history::StateSnapshot;
pub use court::service::pin::ManualPin;

/// Initializes a stdout-only `tracing` subscriber, for host binaries and
/// tests that want the engine's `tracing::debug!`/`info!` spans visible.
/// The engine itself never calls this; it only emits events.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::builder()
        .with_default_directive("court_engine=info".parse().expect("default directive is valid"))
        .with_env_var("COURT_ENGINE_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .try_init();
}
