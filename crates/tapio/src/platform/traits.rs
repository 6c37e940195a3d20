/*!
Platform abstraction traits.

These traits define the contract between the engine and the host platform.
The host implements them; engine code only uses these traits - never concrete
host types directly.

Every node handle is owned by the host. The engine holds references it must
explicitly give back via [`UiNode::release`]; release consumes the handle, so
double release and use-after-release are compile-time errors.
*/

use crate::a11y::{Action, NodeFlags};
use crate::gesture::Stroke;
use crate::types::{Rect, TapioResult};

/// Completion callback for a dispatched gesture. Fires exactly once,
/// asynchronously, with `true` on completion and `false` on cancellation.
pub type GestureCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// A live node of the externally owned accessibility tree.
///
/// All reads are fallible: the host may invalidate a handle at any time, and
/// a stale handle surfaces as `Err`. The wrapper layer decides what default
/// stands in for the failed read.
pub trait UiNode: Sized + Send + 'static {
  /// Number of children the host currently reports.
  fn child_count(&self) -> TapioResult<usize>;

  /// Child handle at `index`. `Ok(None)` when the host reports no node
  /// there - absence, not an error.
  fn child(&self, index: usize) -> TapioResult<Option<Self>>;

  /// Parent handle. `Ok(None)` for tree roots.
  fn parent(&self) -> TapioResult<Option<Self>>;

  /// Visible text. Empty when the node carries none.
  fn text(&self) -> TapioResult<String>;

  /// Content description. Empty when unset.
  fn description(&self) -> TapioResult<String>;

  /// Widget class name.
  fn class_name(&self) -> TapioResult<String>;

  /// Platform-qualified view identifier (`<package>:id/<name>`). Empty when
  /// the app did not assign one.
  fn view_id(&self) -> TapioResult<String>;

  /// Package of the app that owns this node.
  fn package(&self) -> TapioResult<String>;

  /// The boolean state flags, in one read.
  fn flags(&self) -> TapioResult<NodeFlags>;

  /// Drawing order within the parent. `Ok(None)` on host versions that do
  /// not expose the attribute.
  fn drawing_order(&self) -> TapioResult<Option<i32>>;

  /// Bounds in screen coordinates.
  fn bounds_in_screen(&self) -> TapioResult<Rect>;

  /// Bounds relative to the parent node.
  fn bounds_in_parent(&self) -> TapioResult<Rect>;

  /// Perform an action against this node.
  fn perform(&self, action: &Action) -> TapioResult<()>;

  /// Acquire a fresh reference to the same underlying element. The copy is
  /// released independently of `self`.
  fn acquire(&self) -> TapioResult<Self>;

  /// Give the handle back to the host. Consumes the handle.
  fn release(self);
}

/// Host-global operations: window enumeration, package queries, gesture
/// dispatch, service availability.
pub trait Platform: Send + Sync + 'static {
  /// Node handle type for this host.
  type Node: UiNode;

  /// Whether the automation service is currently connected and usable.
  /// While inactive, queries return empty and gestures return `false`.
  fn is_active(&self) -> bool;

  /// Fresh root handles for the windows currently visible to the user, in
  /// host z-order. Empty while the service is not ready. The caller owns
  /// every returned handle.
  fn window_roots(&self) -> Vec<Self::Node>;

  /// Whether `package` resolves to an installed app.
  fn is_package_installed(&self, package: &str) -> bool;

  /// Resolve the activity name for a `(package, class)` pair, if the class
  /// names an activity of that app.
  fn resolve_activity(&self, package: &str, class_name: &str) -> Option<String>;

  /// Submit a gesture for asynchronous dispatch. Returns `false` when
  /// submission itself failed, in which case `done` will never fire.
  fn dispatch_gesture(&self, strokes: &[Stroke], done: GestureCallback) -> bool;

  /// Package name of the automation app itself.
  fn own_package(&self) -> &str;
}
