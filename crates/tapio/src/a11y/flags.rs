/*! Boolean state flags of a tree node. */

use serde::{Deserialize, Serialize};

/// The boolean state flags a node reports, fetched in one read.
///
/// Defaults are all-false, which doubles as the fallback when the underlying
/// handle has gone stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
  pub clickable: bool,
  pub long_clickable: bool,
  pub checkable: bool,
  pub checked: bool,
  pub selected: bool,
  pub enabled: bool,
  pub scrollable: bool,
  pub editable: bool,
  pub multi_line: bool,
  pub password: bool,
}
