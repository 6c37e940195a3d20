/*!
Node - wraps one host tree handle with tree position and defaulted reads.

Attribute accessors never fail: a stale handle yields the documented default
(empty string, all-false flags, zero rect) and logs at debug level. Actions
funnel through [`Node::perform`], which converts host failures to `false`.

Ownership: a `Node` holds exactly one live handle. [`Node::recycle`] consumes
the wrapper and gives the handle back to the host; the borrow checker rules
out use-after-recycle and double recycle.
*/

use crate::a11y::{Action, NodeFlags, ScrollDirection};
use crate::platform::UiNode;
use crate::types::{Rect, TapioResult};

pub struct Node<H: UiNode> {
  handle: H,
  depth: usize,
  index_in_parent: Option<usize>,
}

impl<H: UiNode> std::fmt::Debug for Node<H> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Node")
      .field("depth", &self.depth)
      .field("index_in_parent", &self.index_in_parent)
      .finish_non_exhaustive()
  }
}

/// Swallow a failed read into its default, logging the staleness.
fn read_or_default<T: Default>(what: &str, result: TapioResult<T>) -> T {
  match result {
    Ok(value) => value,
    Err(err) => {
      log::debug!("{what} read failed on stale node: {err}");
      T::default()
    }
  }
}

impl<H: UiNode> Node<H> {
  /// Wrap a tree root. Depth 0, position unknown.
  pub fn root(handle: H) -> Self {
    Self {
      handle,
      depth: 0,
      index_in_parent: None,
    }
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  /// Index within the parent's children, when known.
  pub fn index_in_parent(&self) -> Option<usize> {
    self.index_in_parent
  }

  // --- Attribute reads (defaulted, never fail) ---

  pub fn text(&self) -> String {
    read_or_default("text", self.handle.text())
  }

  pub fn description(&self) -> String {
    read_or_default("description", self.handle.description())
  }

  pub fn class_name(&self) -> String {
    read_or_default("class_name", self.handle.class_name())
  }

  /// Platform-qualified view id (`<package>:id/<name>`), empty if unset.
  pub fn full_id(&self) -> String {
    read_or_default("view_id", self.handle.view_id())
  }

  /// View id with the `<current_package>:id/` prefix stripped. Ids qualified
  /// by any other package come back unchanged.
  pub fn bare_id(&self, current_package: &str) -> String {
    let full = self.full_id();
    match full.strip_prefix(current_package) {
      Some(rest) => match rest.strip_prefix(":id/") {
        Some(bare) => bare.to_string(),
        None => full,
      },
      None => full,
    }
  }

  pub fn package(&self) -> String {
    read_or_default("package", self.handle.package())
  }

  pub fn flags(&self) -> NodeFlags {
    read_or_default("flags", self.handle.flags())
  }

  /// Drawing order within the parent; `None` on hosts that predate the
  /// attribute.
  pub fn drawing_order(&self) -> Option<i32> {
    read_or_default("drawing_order", self.handle.drawing_order())
  }

  pub fn bounds_in_screen(&self) -> Rect {
    read_or_default("bounds_in_screen", self.handle.bounds_in_screen())
  }

  pub fn bounds_in_parent(&self) -> Rect {
    read_or_default("bounds_in_parent", self.handle.bounds_in_parent())
  }

  pub fn child_count(&self) -> usize {
    read_or_default("child_count", self.handle.child_count())
  }

  // --- Traversal ---

  /// Child at `index`, one level deeper. Absence and staleness both map to
  /// `None`.
  pub fn child(&self, index: usize) -> Option<Node<H>> {
    read_or_default("child", self.try_child(index))
  }

  /// Parent wrapper, freshly acquired on every call. `None` for roots.
  pub fn parent(&self) -> Option<Node<H>> {
    let handle = read_or_default("parent", self.handle.parent())?;
    Some(Node {
      handle,
      depth: self.depth.saturating_sub(1),
      index_in_parent: None,
    })
  }

  /// Fallible child fetch for the search engine, which must abort a walk on
  /// host failure instead of treating it as absence.
  pub(crate) fn try_child(&self, index: usize) -> TapioResult<Option<Node<H>>> {
    Ok(self.handle.child(index)?.map(|handle| Node {
      handle,
      depth: self.depth + 1,
      index_in_parent: Some(index),
    }))
  }

  pub(crate) fn try_child_count(&self) -> TapioResult<usize> {
    self.handle.child_count()
  }

  /// Acquire an independently released wrapper for the same element,
  /// keeping the tree position. `None` when the handle has gone stale.
  pub fn acquire(&self) -> Option<Node<H>> {
    let handle = match self.handle.acquire() {
      Ok(handle) => handle,
      Err(err) => {
        log::debug!("acquire failed on stale node: {err}");
        return None;
      }
    };
    Some(Node {
      handle,
      depth: self.depth,
      index_in_parent: self.index_in_parent,
    })
  }

  // --- Actions ---

  /// Perform an action, converting any host failure to `false`.
  pub fn perform(&self, action: &Action) -> bool {
    match self.handle.perform(action) {
      Ok(()) => true,
      Err(err) => {
        log::debug!("action {action} failed: {err}");
        false
      }
    }
  }

  pub fn click(&self) -> bool {
    self.perform(&Action::Click)
  }

  pub fn long_click(&self) -> bool {
    self.perform(&Action::LongClick)
  }

  pub fn scroll(&self, direction: ScrollDirection) -> bool {
    self.perform(&Action::Scroll(direction))
  }

  pub fn scroll_forward(&self) -> bool {
    self.scroll(ScrollDirection::Forward)
  }

  pub fn scroll_backward(&self) -> bool {
    self.scroll(ScrollDirection::Backward)
  }

  pub fn set_text(&self, text: &str) -> bool {
    self.perform(&Action::SetText(text.to_string()))
  }

  pub fn set_selection(&self, start: i32, end: i32) -> bool {
    self.perform(&Action::SetSelection { start, end })
  }

  pub fn set_progress(&self, value: f32) -> bool {
    self.perform(&Action::SetProgress(value))
  }

  pub fn focus(&self) -> bool {
    self.perform(&Action::Focus)
  }

  pub fn clear_focus(&self) -> bool {
    self.perform(&Action::ClearFocus)
  }

  pub fn dismiss(&self) -> bool {
    self.perform(&Action::Dismiss)
  }

  pub fn collapse(&self) -> bool {
    self.perform(&Action::Collapse)
  }

  pub fn expand(&self) -> bool {
    self.perform(&Action::Expand)
  }

  /// Give the handle back to the host. Consumes the node.
  pub fn recycle(self) {
    self.handle.release();
  }
}
