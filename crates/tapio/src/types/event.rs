/*! Event types delivered by the host and fanned out to listeners. */

use serde::{Deserialize, Serialize};

/// Raw UI event pushed by the host event source into the hub.
///
/// The host registers the hub as its single event sink and forwards every
/// accessibility event it receives, already split by event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
  /// A top-level window came to the foreground or changed state.
  WindowState {
    package: String,
    class_name: String,
  },

  /// A notification was posted, or a toast was shown.
  ///
  /// Real notifications carry a [`NotificationPayload`]; toasts arrive as
  /// bare text fragments with no payload.
  NotificationState {
    package: String,
    texts: Vec<String>,
    payload: Option<NotificationPayload>,
  },
}

/// Payload of a posted notification, as extracted by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
  pub title: String,
  pub text: String,
}

/// A posted notification, ready for listener fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub package: String,
  pub title: String,
  pub text: String,
}

/// A toast shown by a foreground app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
  pub package: String,
  /// Text fragments in the order the host reported them.
  pub texts: Vec<String>,
}

impl Toast {
  /// All fragments joined into one line.
  pub fn text(&self) -> String {
    self.texts.join(" ")
  }
}

/// An accepted window-state change, delivered to window listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEvent {
  pub package: String,
  /// Resolved activity name, or the originating class when unresolvable.
  pub activity: String,
  pub class_name: String,
}

/// Key press direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
  Down,
  Up,
}

/// A hardware key event observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
  pub code: u32,
  pub action: KeyAction,
}

impl KeyEvent {
  pub const fn new(code: u32, action: KeyAction) -> Self {
    Self { code, action }
  }
}
