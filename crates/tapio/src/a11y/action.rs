/*! Node actions, the single primitive every interaction funnels through. */

use derive_more::Display;

/// Scroll directions a scrollable node can be driven in.
///
/// `Forward`/`Backward` follow the node's natural content direction; the four
/// absolute directions are only honored by hosts that expose directional
/// scrolling.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
  #[display("forward")]
  Forward,
  #[display("backward")]
  Backward,
  #[display("up")]
  Up,
  #[display("down")]
  Down,
  #[display("left")]
  Left,
  #[display("right")]
  Right,
}

/// An action performed against one node of the accessibility tree.
///
/// Argument-bearing actions carry their payload inline; the host translates
/// each variant into its own action id plus argument bundle.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum Action {
  #[display("click")]
  Click,
  #[display("long_click")]
  LongClick,
  #[display("scroll_{_0}")]
  Scroll(ScrollDirection),
  #[display("set_text")]
  SetText(String),
  #[display("set_selection")]
  SetSelection { start: i32, end: i32 },
  #[display("set_progress")]
  SetProgress(f32),
  #[display("focus")]
  Focus,
  #[display("clear_focus")]
  ClearFocus,
  #[display("dismiss")]
  Dismiss,
  #[display("collapse")]
  Collapse,
  #[display("expand")]
  Expand,
}
