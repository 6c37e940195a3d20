/*! Error types for tapio operations. */

use crate::a11y::Action;

/// Errors that can occur during tapio operations.
///
/// Staleness, absence and timeouts are normal in a live UI and never cross the
/// public query surface as errors - they become empty/`None`/`false` results.
/// The variants here travel between the platform boundary and the engine, plus
/// the one genuine programmer error ([`TapioError::InvalidPattern`]).
#[derive(Debug, thiserror::Error)]
pub enum TapioError {
  /// The host can no longer resolve the node handle.
  #[error("Node is no longer attached to the tree: {0}")]
  NodeGone(String),

  #[error("Action '{action}' failed: {reason}")]
  ActionFailed { action: Action, reason: String },

  #[error("Invalid selector pattern: {0}")]
  InvalidPattern(#[from] regex::Error),

  #[error("Operation not supported: {0}")]
  NotSupported(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

/// Result type for tapio operations.
pub type TapioResult<T> = Result<T, TapioError>;
