//! Error taxonomy for the adherence engine.
//!
//! Nothing here is fatal to the process. Every failure is recoverable by
//! re-running a reconciliation pass, which is idempotent and side-effect-free.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A collection failed to load. The previous (possibly stale) view must
  /// stay visible; callers never clear state on this error.
  #[error("failed to load {collection}: {source}")]
  Fetch {
    collection: &'static str,
    #[source]
    source:     Box<dyn std::error::Error + Send + Sync>,
  },

  /// The persist step of a status change failed. The speculative local
  /// patch must be discarded by a full reconciliation pass.
  #[error("failed to persist adherence record: {0}")]
  Write(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
