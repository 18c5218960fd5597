use thiserror::Error;

/// Recoverable errors surfaced at the engine boundary.
///
/// Programming errors (negative player counts, a non-positive court number
/// passed to [`crate::court::service::facade::Engine::update_winner`], or a
/// broken internal invariant) are not represented here: they are
/// `debug_assert!`/`panic!` at the call site, per the spec's error taxonomy.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("persisted state is malformed: {0}")]
    /// A snapshot passed to `load_state` failed to parse.
    StateCorruption(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    /// The host's storage medium could not be read or written.
    StorageUnavailable(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
