/*!
Breadth-first search over one tree root, with handle recycling.

The walk owns every node it wraps. Visited nodes that do not match are
released immediately; nodes still queued when the walk stops early are
released before returning. The root is the one handle the engine never
releases - it travels back to the caller through [`Walk::root`] (or
[`Aborted::root`] on failure), so ownership stays where it started.

Result order is part of the contract: shallow-to-deep, left-to-right within
a level. Children are enqueued on dequeue of their parent, before the parent
is evaluated, which makes the visit a true level-order walk.
*/

use std::collections::VecDeque;

use crate::node::Node;
use crate::platform::UiNode;
use crate::types::TapioError;

/// A completed walk: matches in BFS order, plus the root handed back when it
/// was not among them.
pub(crate) struct Walk<H: UiNode> {
  pub(crate) matches: Vec<Node<H>>,
  pub(crate) root: Option<Node<H>>,
}

/// A walk cut short by a host failure. Every engine-owned node has already
/// been released; only the root survives, handed back untouched.
pub(crate) struct Aborted<H: UiNode> {
  pub(crate) error: TapioError,
  pub(crate) root: Option<Node<H>>,
}

enum Entry<H: UiNode> {
  Root(Node<H>),
  Owned(Node<H>),
}

/// Level-order walk under `root`, collecting up to `max` matching nodes.
pub(crate) fn bfs<H: UiNode>(
  root: Node<H>,
  predicate: &dyn Fn(&Node<H>) -> bool,
  max: usize,
) -> Result<Walk<H>, Aborted<H>> {
  if max == 0 {
    return Ok(Walk {
      matches: Vec::new(),
      root: Some(root),
    });
  }

  let mut queue: VecDeque<Entry<H>> = VecDeque::new();
  queue.push_back(Entry::Root(root));

  let mut matches: Vec<Node<H>> = Vec::new();
  let mut root_matched = false;
  let mut unmatched_root: Option<Node<H>> = None;

  while let Some(entry) = queue.pop_front() {
    let (current, is_root) = match entry {
      Entry::Root(node) => (node, true),
      Entry::Owned(node) => (node, false),
    };

    // Children are enqueued unconditionally; matching happens on dequeue.
    if let Err(error) = enqueue_children(&current, &mut queue) {
      let root = abort_cleanup(current, is_root, queue, matches, root_matched);
      return Err(Aborted { error, root });
    }

    if predicate(&current) {
      if is_root {
        root_matched = true;
      }
      matches.push(current);
      if matches.len() >= max {
        break;
      }
    } else if is_root {
      unmatched_root = Some(current);
    } else {
      current.recycle();
    }
  }

  // Early exit leaves queued nodes behind; release them rather than leak.
  for entry in queue {
    match entry {
      Entry::Owned(node) => node.recycle(),
      Entry::Root(node) => unmatched_root = Some(node),
    }
  }

  Ok(Walk {
    matches,
    root: unmatched_root,
  })
}

fn enqueue_children<H: UiNode>(
  parent: &Node<H>,
  queue: &mut VecDeque<Entry<H>>,
) -> Result<(), TapioError> {
  let count = parent.try_child_count()?;
  for index in 0..count {
    if let Some(child) = parent.try_child(index)? {
      queue.push_back(Entry::Owned(child));
    }
  }
  Ok(())
}

/// Release everything the walk owns, preserving only the root.
fn abort_cleanup<H: UiNode>(
  current: Node<H>,
  current_is_root: bool,
  queue: VecDeque<Entry<H>>,
  matches: Vec<Node<H>>,
  root_matched: bool,
) -> Option<Node<H>> {
  let mut root = None;

  if current_is_root {
    root = Some(current);
  } else {
    current.recycle();
  }

  for entry in queue {
    match entry {
      Entry::Owned(node) => node.recycle(),
      Entry::Root(node) => root = Some(node),
    }
  }

  // If the root matched it sits at the front of the matches.
  let mut matches = matches.into_iter();
  if root_matched {
    root = matches.next();
  }
  for node in matches {
    node.recycle();
  }

  root
}
