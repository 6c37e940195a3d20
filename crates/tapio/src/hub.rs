/*!
Event hub - ingests host UI events, tracks the foreground app, and fans
events out to registered listeners.

The host registers the hub as its single event sink. Everything else -
window listeners, notification and toast capture, key monitoring and
interception - hangs off the hub's registries.

Fan-out discipline, uniform across categories: listeners run in
registration order; a panicking listener is isolated (logged, skipped) so it
cannot starve the rest; no de-duplication; removal is by `Arc` identity.

The `(package, activity)` pair is written under one lock so a concurrent
reader never observes a torn update.
*/

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::platform::Platform;
use crate::types::{KeyEvent, Notification, Toast, UiEvent, WindowEvent};

/// Observes accepted foreground window changes.
pub trait WindowListener: Send + Sync {
  fn on_window_state(&self, event: &WindowEvent);
}

/// Observes posted notifications.
pub trait NotificationListener: Send + Sync {
  fn on_notification(&self, notification: &Notification);
}

/// Observes toasts from foreground apps.
pub trait ToastListener: Send + Sync {
  fn on_toast(&self, toast: &Toast);
}

/// Observes key events. Observation only - cannot consume.
pub trait KeyListener: Send + Sync {
  fn on_key(&self, key: &KeyEvent);
}

/// Offered each key event after the monitors; returning `true` consumes it.
pub trait KeyInterceptor: Send + Sync {
  fn intercept(&self, key: &KeyEvent) -> bool;
}

/// Widget/view classes the platform itself paints; window events from these
/// say nothing about which app is in the foreground.
const GENERIC_CLASS_PREFIXES: &[&str] = &["android.widget.", "android.view.", "android.webkit."];

fn is_generic_view_class(class_name: &str) -> bool {
  GENERIC_CLASS_PREFIXES
    .iter()
    .any(|prefix| class_name.starts_with(prefix))
}

/// Latest foreground app, written as one unit.
#[derive(Debug, Clone, Default)]
struct Frontmost {
  package: String,
  activity: String,
}

/// One listener registry: insertion-ordered, duplicates allowed.
struct Registry<L: ?Sized>(Mutex<Vec<Arc<L>>>);

impl<L: ?Sized> Registry<L> {
  fn new() -> Self {
    Self(Mutex::new(Vec::new()))
  }

  fn add(&self, listener: Arc<L>) {
    self.0.lock().push(listener);
  }

  /// Remove by identity. Returns whether anything was removed.
  fn remove(&self, listener: &Arc<L>) -> bool {
    let mut listeners = self.0.lock();
    let before = listeners.len();
    listeners.retain(|existing| !Arc::ptr_eq(existing, listener));
    listeners.len() != before
  }

  /// Snapshot for delivery, so listeners can re-register without deadlock.
  fn snapshot(&self) -> Vec<Arc<L>> {
    self.0.lock().clone()
  }
}

/// Deliver to every listener, isolating individual faults.
fn fan_out<L: ?Sized>(registry: &Registry<L>, category: &str, deliver: impl Fn(&L)) {
  for listener in registry.snapshot() {
    if catch_unwind(AssertUnwindSafe(|| deliver(&listener))).is_err() {
      log::warn!("{category} listener panicked; continuing fan-out");
    }
  }
}

pub struct EventHub<P: Platform> {
  platform: Arc<P>,
  frontmost: Mutex<Frontmost>,
  window_listeners: Registry<dyn WindowListener>,
  notification_listeners: Registry<dyn NotificationListener>,
  toast_listeners: Registry<dyn ToastListener>,
  key_monitors: Registry<dyn KeyListener>,
  key_interceptors: Registry<dyn KeyInterceptor>,
}

impl<P: Platform> std::fmt::Debug for EventHub<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EventHub")
      .field("frontmost", &*self.frontmost.lock())
      .finish_non_exhaustive()
  }
}

impl<P: Platform> EventHub<P> {
  pub(crate) fn new(platform: Arc<P>) -> Self {
    Self {
      platform,
      frontmost: Mutex::new(Frontmost::default()),
      window_listeners: Registry::new(),
      notification_listeners: Registry::new(),
      toast_listeners: Registry::new(),
      key_monitors: Registry::new(),
      key_interceptors: Registry::new(),
    }
  }

  // --- Derived state ---

  /// Package of the latest accepted foreground window.
  pub fn latest_package(&self) -> String {
    self.frontmost.lock().package.clone()
  }

  /// Activity of the latest accepted foreground window.
  pub fn latest_activity(&self) -> String {
    self.frontmost.lock().activity.clone()
  }

  /// Both halves read under one lock.
  pub fn frontmost(&self) -> (String, String) {
    let f = self.frontmost.lock();
    (f.package.clone(), f.activity.clone())
  }

  // --- Ingest ---

  /// Host event sink. The host forwards every accessibility event here.
  pub fn on_event(&self, event: UiEvent) {
    match event {
      UiEvent::WindowState {
        package,
        class_name,
      } => self.on_window_state(package, class_name),
      UiEvent::NotificationState {
        package,
        texts,
        payload,
      } => self.on_notification_state(package, texts, payload),
    }
  }

  fn on_window_state(&self, package: String, class_name: String) {
    if package.is_empty() {
      return;
    }
    if is_generic_view_class(&class_name) {
      return;
    }
    if !self.platform.is_package_installed(&package) {
      log::debug!("window event from uninstalled package {package}, ignoring");
      return;
    }

    let activity = self
      .platform
      .resolve_activity(&package, &class_name)
      .unwrap_or_else(|| class_name.clone());

    {
      let mut frontmost = self.frontmost.lock();
      frontmost.package = package.clone();
      frontmost.activity = activity.clone();
    }

    let event = WindowEvent {
      package,
      activity,
      class_name,
    };
    fan_out(&self.window_listeners, "window", |l| {
      l.on_window_state(&event);
    });
  }

  fn on_notification_state(
    &self,
    package: String,
    texts: Vec<String>,
    payload: Option<crate::types::NotificationPayload>,
  ) {
    if let Some(payload) = payload {
      let notification = Notification {
        package,
        title: payload.title,
        text: payload.text,
      };
      fan_out(&self.notification_listeners, "notification", |l| {
        l.on_notification(&notification);
      });
      return;
    }

    // No payload: a toast, unless it is our own or carries no text.
    if package == self.platform.own_package() || texts.iter().all(String::is_empty) {
      return;
    }
    let toast = Toast { package, texts };
    fan_out(&self.toast_listeners, "toast", |l| {
      l.on_toast(&toast);
    });
  }

  /// Key event entry point. Monitors observe first; then interceptors are
  /// offered the key in registration order, and the first to return `true`
  /// consumes it. An interceptor fault counts as "did not intercept".
  pub fn on_key_event(&self, key: &KeyEvent) -> bool {
    fan_out(&self.key_monitors, "key", |l| {
      l.on_key(key);
    });

    for interceptor in self.key_interceptors.snapshot() {
      let intercepted = catch_unwind(AssertUnwindSafe(|| interceptor.intercept(key)));
      match intercepted {
        Ok(true) => return true,
        Ok(false) => {}
        Err(_) => {
          log::warn!("key interceptor panicked; treating as not intercepted");
        }
      }
    }
    false
  }

  // --- Registration ---

  pub fn add_window_listener(&self, listener: Arc<dyn WindowListener>) {
    self.window_listeners.add(listener);
  }

  pub fn remove_window_listener(&self, listener: &Arc<dyn WindowListener>) -> bool {
    self.window_listeners.remove(listener)
  }

  pub fn add_notification_listener(&self, listener: Arc<dyn NotificationListener>) {
    self.notification_listeners.add(listener);
  }

  pub fn remove_notification_listener(&self, listener: &Arc<dyn NotificationListener>) -> bool {
    self.notification_listeners.remove(listener)
  }

  pub fn add_toast_listener(&self, listener: Arc<dyn ToastListener>) {
    self.toast_listeners.add(listener);
  }

  pub fn remove_toast_listener(&self, listener: &Arc<dyn ToastListener>) -> bool {
    self.toast_listeners.remove(listener)
  }

  pub fn add_key_listener(&self, listener: Arc<dyn KeyListener>) {
    self.key_monitors.add(listener);
  }

  pub fn remove_key_listener(&self, listener: &Arc<dyn KeyListener>) -> bool {
    self.key_monitors.remove(listener)
  }

  pub fn add_key_interceptor(&self, interceptor: Arc<dyn KeyInterceptor>) {
    self.key_interceptors.add(interceptor);
  }

  pub fn remove_key_interceptor(&self, interceptor: &Arc<dyn KeyInterceptor>) -> bool {
    self.key_interceptors.remove(interceptor)
  }
}
