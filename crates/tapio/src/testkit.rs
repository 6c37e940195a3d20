/*!
Test doubles: an in-memory node tree with release counting, and a scriptable
platform.

`FakeNodeData` is the shared backing store for a node; every handle acquired
on it bumps the same release counter, which is what the recycling invariants
assert against.
*/

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::a11y::{Action, NodeFlags};
use crate::gesture::Stroke;
use crate::platform::{GestureCallback, Platform, UiNode};
use crate::types::{Rect, TapioError, TapioResult};

pub(crate) struct FakeNodeData {
  text: String,
  description: String,
  class_name: String,
  view_id: String,
  package: String,
  flags: NodeFlags,
  bounds: Rect,
  bounds_in_parent: Rect,
  drawing_order: Option<i32>,
  children: Vec<Arc<FakeNodeData>>,
  parent: Mutex<Weak<FakeNodeData>>,
  released: AtomicUsize,
  fail_reads: bool,
  fail_traversal: bool,
  refuse_actions: bool,
  pub(crate) performed: Mutex<Vec<Action>>,
}

/// Start building a fake node. The label doubles as its text.
pub(crate) fn node(label: &str) -> FakeNodeBuilder {
  FakeNodeBuilder {
    data: FakeNodeData {
      text: label.to_string(),
      description: String::new(),
      class_name: String::new(),
      view_id: String::new(),
      package: String::new(),
      flags: NodeFlags::default(),
      bounds: Rect::EMPTY,
      bounds_in_parent: Rect::EMPTY,
      drawing_order: None,
      children: Vec::new(),
      parent: Mutex::new(Weak::new()),
      released: AtomicUsize::new(0),
      fail_reads: false,
      fail_traversal: false,
      refuse_actions: false,
      performed: Mutex::new(Vec::new()),
    },
  }
}

/// How many times handles on this node have been released.
pub(crate) fn released(data: &Arc<FakeNodeData>) -> usize {
  data.released.load(Ordering::SeqCst)
}

pub(crate) struct FakeNodeBuilder {
  data: FakeNodeData,
}

impl FakeNodeBuilder {
  pub(crate) fn view_id(mut self, view_id: &str) -> Self {
    self.data.view_id = view_id.to_string();
    self
  }

  pub(crate) fn class_name(mut self, class_name: &str) -> Self {
    self.data.class_name = class_name.to_string();
    self
  }

  pub(crate) fn flags(mut self, flags: NodeFlags) -> Self {
    self.data.flags = flags;
    self
  }

  pub(crate) fn bounds(mut self, bounds: Rect) -> Self {
    self.data.bounds = bounds;
    self
  }

  pub(crate) fn drawing_order(mut self, order: i32) -> Self {
    self.data.drawing_order = Some(order);
    self
  }

  pub(crate) fn children(mut self, children: Vec<Arc<FakeNodeData>>) -> Self {
    self.data.children = children;
    self
  }

  /// Every attribute read fails, as on a stale handle.
  pub(crate) fn fail_reads(mut self) -> Self {
    self.data.fail_reads = true;
    self
  }

  /// Child and parent enumeration fails, as when the tree mutates mid-walk.
  pub(crate) fn fail_traversal(mut self) -> Self {
    self.data.fail_traversal = true;
    self
  }

  /// Actions are refused by the host.
  pub(crate) fn refuse_actions(mut self) -> Self {
    self.data.refuse_actions = true;
    self
  }

  pub(crate) fn build(self) -> Arc<FakeNodeData> {
    let arc = Arc::new(self.data);
    for child in &arc.children {
      *child.parent.lock() = Arc::downgrade(&arc);
    }
    arc
  }
}

/// Handle over shared node data. Mirrors a host handle: cheap to acquire,
/// released exactly once each.
pub(crate) struct FakeNode(pub(crate) Arc<FakeNodeData>);

fn stale() -> TapioError {
  TapioError::NodeGone("fake node marked stale".to_string())
}

impl UiNode for FakeNode {
  fn child_count(&self) -> TapioResult<usize> {
    if self.0.fail_traversal {
      return Err(stale());
    }
    Ok(self.0.children.len())
  }

  fn child(&self, index: usize) -> TapioResult<Option<Self>> {
    if self.0.fail_traversal {
      return Err(stale());
    }
    Ok(self.0.children.get(index).cloned().map(FakeNode))
  }

  fn parent(&self) -> TapioResult<Option<Self>> {
    if self.0.fail_traversal {
      return Err(stale());
    }
    Ok(self.0.parent.lock().upgrade().map(FakeNode))
  }

  fn text(&self) -> TapioResult<String> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.text.clone())
  }

  fn description(&self) -> TapioResult<String> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.description.clone())
  }

  fn class_name(&self) -> TapioResult<String> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.class_name.clone())
  }

  fn view_id(&self) -> TapioResult<String> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.view_id.clone())
  }

  fn package(&self) -> TapioResult<String> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.package.clone())
  }

  fn flags(&self) -> TapioResult<NodeFlags> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.flags)
  }

  fn drawing_order(&self) -> TapioResult<Option<i32>> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.drawing_order)
  }

  fn bounds_in_screen(&self) -> TapioResult<Rect> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.bounds)
  }

  fn bounds_in_parent(&self) -> TapioResult<Rect> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(self.0.bounds_in_parent)
  }

  fn perform(&self, action: &Action) -> TapioResult<()> {
    if self.0.refuse_actions {
      return Err(TapioError::ActionFailed {
        action: action.clone(),
        reason: "refused by fake host".to_string(),
      });
    }
    self.0.performed.lock().push(action.clone());
    Ok(())
  }

  fn acquire(&self) -> TapioResult<Self> {
    if self.0.fail_reads {
      return Err(stale());
    }
    Ok(FakeNode(Arc::clone(&self.0)))
  }

  fn release(self) {
    self.0.released.fetch_add(1, Ordering::SeqCst);
  }
}

/// What the fake host does with a submitted gesture.
#[derive(Debug, Clone, Copy)]
pub(crate) enum GestureOutcome {
  /// Call back with success after the delay.
  Succeed(Duration),
  /// Call back with cancellation after the delay.
  Cancel(Duration),
  /// Refuse the submission; the callback never fires.
  RejectSubmit,
}

pub(crate) struct FakePlatform {
  active: AtomicBool,
  pub(crate) roots: Mutex<Vec<Arc<FakeNodeData>>>,
  installed: Mutex<HashSet<String>>,
  activities: Mutex<HashMap<(String, String), String>>,
  own_package: String,
  gesture_outcome: Mutex<GestureOutcome>,
  pub(crate) dispatched: Mutex<Vec<Vec<Stroke>>>,
}

impl FakePlatform {
  pub(crate) fn new() -> Arc<Self> {
    Arc::new(Self {
      active: AtomicBool::new(true),
      roots: Mutex::new(Vec::new()),
      installed: Mutex::new(HashSet::new()),
      activities: Mutex::new(HashMap::new()),
      own_package: "com.tapio.app".to_string(),
      gesture_outcome: Mutex::new(GestureOutcome::Succeed(Duration::ZERO)),
      dispatched: Mutex::new(Vec::new()),
    })
  }

  pub(crate) fn with_roots(roots: Vec<Arc<FakeNodeData>>) -> Arc<Self> {
    let platform = Self::new();
    *platform.roots.lock() = roots;
    platform
  }

  pub(crate) fn install(&self, package: &str) {
    self.installed.lock().insert(package.to_string());
  }

  pub(crate) fn add_activity(&self, package: &str, class_name: &str, activity: &str) {
    self
      .activities
      .lock()
      .insert((package.to_string(), class_name.to_string()), activity.to_string());
  }

  pub(crate) fn set_active(&self, active: bool) {
    self.active.store(active, Ordering::SeqCst);
  }

  pub(crate) fn set_gesture_outcome(&self, outcome: GestureOutcome) {
    *self.gesture_outcome.lock() = outcome;
  }
}

impl Platform for FakePlatform {
  type Node = FakeNode;

  fn is_active(&self) -> bool {
    self.active.load(Ordering::SeqCst)
  }

  fn window_roots(&self) -> Vec<FakeNode> {
    if !self.is_active() {
      return Vec::new();
    }
    self.roots.lock().iter().cloned().map(FakeNode).collect()
  }

  fn is_package_installed(&self, package: &str) -> bool {
    self.installed.lock().contains(package)
  }

  fn resolve_activity(&self, package: &str, class_name: &str) -> Option<String> {
    self
      .activities
      .lock()
      .get(&(package.to_string(), class_name.to_string()))
      .cloned()
  }

  fn dispatch_gesture(&self, strokes: &[Stroke], done: GestureCallback) -> bool {
    self.dispatched.lock().push(strokes.to_vec());
    let outcome = *self.gesture_outcome.lock();
    match outcome {
      GestureOutcome::RejectSubmit => false,
      GestureOutcome::Succeed(delay) => {
        spawn_callback(delay, done, true);
        true
      }
      GestureOutcome::Cancel(delay) => {
        spawn_callback(delay, done, false);
        true
      }
    }
  }

  fn own_package(&self) -> &str {
    &self.own_package
  }
}

fn spawn_callback(delay: Duration, done: GestureCallback, succeeded: bool) {
  thread::spawn(move || {
    if !delay.is_zero() {
      thread::sleep(delay);
    }
    done(succeeded);
  });
}
