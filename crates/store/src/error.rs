use glucoloop_engine::SimulationError;
use thiserror::Error;

/// Errors that can occur while producing or persisting a result.
///
/// This enum is marked `#[non_exhaustive]` so that backends which can fail
/// may add variants.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The engine rejected the inputs; nothing was stored.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}
