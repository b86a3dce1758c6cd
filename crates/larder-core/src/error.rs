//! Error types for `larder-core`.

use thiserror::Error;

/// Errors surfaced by the lifecycle operations.
///
/// Business-rule rejections (archived rows are terminal, a draft attached
/// to a non-published row) are *not* errors — those come back as the failed
/// result of the operation (`None` / `false`) and are logged where they
/// occur.
#[derive(Debug, Error)]
pub enum Error {
  /// The incoming record carries no publication status.
  #[error("recipe has no publication status")]
  MissingStatus,

  /// Update operations require a stored (positive) row id.
  #[error("recipe id is missing or not a stored id")]
  MissingId,

  /// The update target does not exist.
  #[error("recipe {0} not found")]
  NotFound(i64),

  /// The store backend itself failed.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
