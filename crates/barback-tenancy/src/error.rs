//! Resolution error types.

use barback_core::error::BarbackError;
use thiserror::Error;

/// Why a selection could not be resolved into a committed context.
///
/// Typed and surfaced to the caller. A failed resolution never unwinds
/// past the selection store and never replaces the active context.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// One of the three entity records does not exist.
    #[error("entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The fetched records do not cross-reference each other: the
    /// directory summary was stale (e.g., a brand moved organizations
    /// after the listing was produced).
    #[error("inconsistent hierarchy: {detail}")]
    Inconsistent { detail: String },

    /// Network or storage failure. Retryable by the caller; the
    /// resolver itself never retries.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The resolution completed after a newer selection was issued and
    /// its result was discarded (last-request-wins). Not a failure;
    /// callers must treat it as silent, never display it.
    #[error("selection superseded by a newer request")]
    Superseded,
}

impl From<BarbackError> for ResolutionError {
    fn from(err: BarbackError) -> Self {
        match err {
            BarbackError::NotFound { entity, id } => ResolutionError::NotFound { entity, id },
            other => ResolutionError::Transport(other.to_string()),
        }
    }
}
