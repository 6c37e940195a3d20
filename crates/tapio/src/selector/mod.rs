/*!
Selector - a fluent, append-only chain of predicates plus the query
operations that evaluate it.

Clauses accumulate and are never removed; evaluation is a logical AND in
insertion order, short-circuiting on the first failing clause. Terminal
operations walk the current set of visible windows breadth-first (see
[`crate::search`]) or a caller-supplied subtree.

Blocking operations (`find_one`, `wait_for`) poll at the engine's configured
interval. The untimed variants block indefinitely by design; callers that
need to bail out use the timeout variants and re-issue.
*/

mod predicate;

use std::thread;
use std::time::{Duration, Instant};

use predicate::{BoundsMode, FlagAttr, Predicate, StrAttr, StrMatch};
use regex::Regex;

use crate::engine::Engine;
use crate::node::Node;
use crate::platform::Platform;
use crate::search;
use crate::types::{Rect, TapioResult};

pub struct Selector<P: Platform> {
  engine: Engine<P>,
  predicates: Vec<Predicate<P::Node>>,
}

impl<P: Platform> std::fmt::Debug for Selector<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Selector")
      .field("predicates", &self.predicates)
      .finish_non_exhaustive()
  }
}

impl<P: Platform> Selector<P> {
  pub(crate) fn new(engine: Engine<P>) -> Self {
    Self {
      engine,
      predicates: Vec::new(),
    }
  }

  fn push(mut self, predicate: Predicate<P::Node>) -> Self {
    self.predicates.push(predicate);
    self
  }

  fn str_clause(self, attr: StrAttr, matcher: StrMatch) -> Self {
    self.push(Predicate::Str { attr, matcher })
  }

  fn regex_clause(self, attr: StrAttr, pattern: &str) -> TapioResult<Self> {
    let regex = Regex::new(pattern)?;
    Ok(self.str_clause(attr, StrMatch::Matches(regex)))
  }

  // --- Text clauses ---

  pub fn text(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Text, StrMatch::Equals(value.into()))
  }

  pub fn text_contains(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Text, StrMatch::Contains(value.into()))
  }

  pub fn text_starts_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Text, StrMatch::StartsWith(value.into()))
  }

  pub fn text_ends_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Text, StrMatch::EndsWith(value.into()))
  }

  /// A malformed pattern is a programmer error; this is the one clause that
  /// can fail.
  pub fn text_matches(self, pattern: &str) -> TapioResult<Self> {
    self.regex_clause(StrAttr::Text, pattern)
  }

  // --- Description clauses ---

  pub fn desc(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Desc, StrMatch::Equals(value.into()))
  }

  pub fn desc_contains(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Desc, StrMatch::Contains(value.into()))
  }

  pub fn desc_starts_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Desc, StrMatch::StartsWith(value.into()))
  }

  pub fn desc_ends_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Desc, StrMatch::EndsWith(value.into()))
  }

  pub fn desc_matches(self, pattern: &str) -> TapioResult<Self> {
    self.regex_clause(StrAttr::Desc, pattern)
  }

  // --- Id clauses (bare id: foreground-package prefix stripped) ---

  pub fn id(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::BareId, StrMatch::Equals(value.into()))
  }

  pub fn id_contains(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::BareId, StrMatch::Contains(value.into()))
  }

  pub fn id_starts_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::BareId, StrMatch::StartsWith(value.into()))
  }

  pub fn id_ends_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::BareId, StrMatch::EndsWith(value.into()))
  }

  pub fn id_matches(self, pattern: &str) -> TapioResult<Self> {
    self.regex_clause(StrAttr::BareId, pattern)
  }

  /// Match the fully qualified `<package>:id/<name>` form.
  pub fn full_id(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::FullId, StrMatch::Equals(value.into()))
  }

  // --- Class name clauses ---

  pub fn class_name(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::ClassName, StrMatch::Equals(value.into()))
  }

  pub fn class_name_contains(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::ClassName, StrMatch::Contains(value.into()))
  }

  pub fn class_name_starts_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::ClassName, StrMatch::StartsWith(value.into()))
  }

  pub fn class_name_ends_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::ClassName, StrMatch::EndsWith(value.into()))
  }

  pub fn class_name_matches(self, pattern: &str) -> TapioResult<Self> {
    self.regex_clause(StrAttr::ClassName, pattern)
  }

  // --- Package clauses ---

  pub fn package_name(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Package, StrMatch::Equals(value.into()))
  }

  pub fn package_name_contains(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Package, StrMatch::Contains(value.into()))
  }

  pub fn package_name_starts_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Package, StrMatch::StartsWith(value.into()))
  }

  pub fn package_name_ends_with(self, value: impl Into<String>) -> Self {
    self.str_clause(StrAttr::Package, StrMatch::EndsWith(value.into()))
  }

  pub fn package_name_matches(self, pattern: &str) -> TapioResult<Self> {
    self.regex_clause(StrAttr::Package, pattern)
  }

  // --- State flag clauses ---

  pub fn clickable(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Clickable,
      expected,
    })
  }

  pub fn long_clickable(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::LongClickable,
      expected,
    })
  }

  pub fn checkable(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Checkable,
      expected,
    })
  }

  pub fn checked(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Checked,
      expected,
    })
  }

  pub fn selected(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Selected,
      expected,
    })
  }

  pub fn enabled(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Enabled,
      expected,
    })
  }

  pub fn scrollable(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Scrollable,
      expected,
    })
  }

  pub fn editable(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Editable,
      expected,
    })
  }

  pub fn multi_line(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::MultiLine,
      expected,
    })
  }

  pub fn password(self, expected: bool) -> Self {
    self.push(Predicate::Flag {
      attr: FlagAttr::Password,
      expected,
    })
  }

  // --- Geometry clauses ---

  /// Screen bounds equal `rect` exactly.
  pub fn bounds(self, rect: Rect) -> Self {
    self.push(Predicate::Bounds {
      mode: BoundsMode::Equals,
      rect,
    })
  }

  /// Screen bounds lie fully inside `rect`.
  pub fn bounds_inside(self, rect: Rect) -> Self {
    self.push(Predicate::Bounds {
      mode: BoundsMode::Inside,
      rect,
    })
  }

  /// Screen bounds fully contain `rect`.
  pub fn bounds_contains(self, rect: Rect) -> Self {
    self.push(Predicate::Bounds {
      mode: BoundsMode::Contains,
      rect,
    })
  }

  /// Drawing order within the parent. Never matches on hosts that do not
  /// expose the attribute.
  pub fn drawing_order(self, order: i32) -> Self {
    self.push(Predicate::DrawingOrder(order))
  }

  // --- Escape hatch ---

  /// Caller-supplied predicate.
  pub fn filter(self, check: impl Fn(&Node<P::Node>) -> bool + Send + Sync + 'static) -> Self {
    self.push(Predicate::Custom(Box::new(check)))
  }

  // --- Evaluation ---

  /// AND of all clauses in insertion order, short-circuiting.
  pub(crate) fn matches(&self, node: &Node<P::Node>) -> bool {
    let package = self.engine.current_package();
    self
      .predicates
      .iter()
      .all(|predicate| predicate.matches(node, &package))
  }

  // --- Single-pass queries ---

  /// First match over all visible windows, in window order then BFS order.
  pub fn find_once(&self) -> Option<Node<P::Node>> {
    self.collect(1).pop()
  }

  /// First match under a caller-supplied root. The root stays live.
  pub fn find_once_under(&self, root: &Node<P::Node>) -> Option<Node<P::Node>> {
    self.collect_under(root, 1).pop()
  }

  /// All matches over all visible windows.
  pub fn find_all(&self) -> Vec<Node<P::Node>> {
    self.collect(usize::MAX)
  }

  /// All matches under a caller-supplied root.
  pub fn find_all_under(&self, root: &Node<P::Node>) -> Vec<Node<P::Node>> {
    self.collect_under(root, usize::MAX)
  }

  /// Whether at least one node currently matches.
  pub fn exists(&self) -> bool {
    let found = self.collect(1);
    let exists = !found.is_empty();
    for node in found {
      node.recycle();
    }
    exists
  }

  // --- Blocking queries ---

  /// Block until a match appears. No timeout: callers that cannot tolerate
  /// indefinite blocking use [`Selector::find_one_timeout`].
  pub fn find_one(&self) -> Node<P::Node> {
    let interval = self.engine.config().poll_interval;
    loop {
      if let Some(node) = self.find_once() {
        return node;
      }
      thread::sleep(interval);
    }
  }

  /// Block until a match appears or `timeout` expires.
  pub fn find_one_timeout(&self, timeout: Duration) -> Option<Node<P::Node>> {
    let interval = self.engine.config().poll_interval;
    let deadline = Instant::now() + timeout;
    loop {
      if let Some(node) = self.find_once() {
        return Some(node);
      }
      if Instant::now() >= deadline {
        return None;
      }
      thread::sleep(interval);
    }
  }

  /// Block until a match exists.
  pub fn wait_for(&self) -> bool {
    let interval = self.engine.config().poll_interval;
    loop {
      if self.exists() {
        return true;
      }
      thread::sleep(interval);
    }
  }

  /// Block until a match exists or `timeout` expires.
  pub fn wait_for_timeout(&self, timeout: Duration) -> bool {
    let interval = self.engine.config().poll_interval;
    let deadline = Instant::now() + timeout;
    loop {
      if self.exists() {
        return true;
      }
      if Instant::now() >= deadline {
        return false;
      }
      thread::sleep(interval);
    }
  }

  // --- Walk plumbing ---

  /// Walk every visible window's tree, collecting up to `max` matches.
  /// Window roots acquired here are released when the walk is done with
  /// them; a host failure mid-walk yields the empty result.
  fn collect(&self, max: usize) -> Vec<Node<P::Node>> {
    if !self.engine.platform().is_active() {
      return Vec::new();
    }

    let mut out: Vec<Node<P::Node>> = Vec::new();
    for handle in self.engine.platform().window_roots() {
      let remaining = max - out.len();
      let root = Node::root(handle);
      match search::bfs(root, &|node| self.matches(node), remaining) {
        Ok(walk) => {
          out.extend(walk.matches);
          if let Some(root) = walk.root {
            root.recycle();
          }
        }
        Err(aborted) => {
          log::debug!("window walk aborted: {}", aborted.error);
          if let Some(root) = aborted.root {
            root.recycle();
          }
          for node in out {
            node.recycle();
          }
          return Vec::new();
        }
      }
      if out.len() >= max {
        break;
      }
    }
    out
  }

  /// Walk under a borrowed root via an independently released duplicate.
  fn collect_under(&self, root: &Node<P::Node>, max: usize) -> Vec<Node<P::Node>> {
    let Some(duplicate) = root.acquire() else {
      return Vec::new();
    };
    match search::bfs(duplicate, &|node| self.matches(node), max) {
      Ok(walk) => {
        if let Some(duplicate) = walk.root {
          duplicate.recycle();
        }
        walk.matches
      }
      Err(aborted) => {
        log::debug!("subtree walk aborted: {}", aborted.error);
        if let Some(duplicate) = aborted.root {
          duplicate.recycle();
        }
        Vec::new()
      }
    }
  }
}
