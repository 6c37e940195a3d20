/*!
Engine - the context object everything hangs off.

One engine per automation service connection: it owns the platform handle,
the event hub, and the tunables. Construction is explicit - there is no
global instance - and calls made before the service is active return
empty/false rather than failing.

Clone is cheap (`Arc` bumps); selectors hold a clone.
*/

use std::sync::Arc;
use std::time::Duration;

use crate::gesture::{self, Stroke};
use crate::hub::EventHub;
use crate::platform::Platform;
use crate::selector::Selector;
use crate::types::Point;

/// Tunables for query polling and gesture synthesis.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
  /// Sleep between query attempts in `find_one`/`wait_for`.
  pub poll_interval: Duration,
  /// Press duration used by `click_at`.
  pub tap_duration: Duration,
  /// Press duration used by `long_click_at`.
  pub long_press_duration: Duration,
  /// Per-step offset bound for humanized swipes, in pixels.
  pub swipe_jitter: f32,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      poll_interval: Duration::from_millis(100),
      tap_duration: Duration::from_millis(100),
      long_press_duration: Duration::from_millis(600),
      swipe_jitter: 10.0,
    }
  }
}

/// Builder for configuring an [`Engine`].
#[must_use = "Builder does nothing until .build() is called"]
pub struct EngineBuilder<P: Platform> {
  platform: Arc<P>,
  config: EngineConfig,
}

impl<P: Platform> std::fmt::Debug for EngineBuilder<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EngineBuilder")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

impl<P: Platform> EngineBuilder<P> {
  pub fn poll_interval(mut self, interval: Duration) -> Self {
    self.config.poll_interval = interval;
    self
  }

  pub fn tap_duration(mut self, duration: Duration) -> Self {
    self.config.tap_duration = duration;
    self
  }

  pub fn long_press_duration(mut self, duration: Duration) -> Self {
    self.config.long_press_duration = duration;
    self
  }

  pub fn swipe_jitter(mut self, jitter: f32) -> Self {
    self.config.swipe_jitter = jitter;
    self
  }

  pub fn build(self) -> Engine<P> {
    let hub = Arc::new(EventHub::new(Arc::clone(&self.platform)));
    Engine {
      platform: self.platform,
      hub,
      config: self.config,
    }
  }
}

/// The automation engine: queries, events, gestures.
pub struct Engine<P: Platform> {
  platform: Arc<P>,
  hub: Arc<EventHub<P>>,
  config: EngineConfig,
}

impl<P: Platform> Clone for Engine<P> {
  fn clone(&self) -> Self {
    Self {
      platform: Arc::clone(&self.platform),
      hub: Arc::clone(&self.hub),
      config: self.config,
    }
  }
}

impl<P: Platform> std::fmt::Debug for Engine<P> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Engine")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

impl<P: Platform> Engine<P> {
  /// Create an engine with default tunables.
  pub fn new(platform: Arc<P>) -> Self {
    Self::builder(platform).build()
  }

  /// Create a builder for a configured engine.
  pub fn builder(platform: Arc<P>) -> EngineBuilder<P> {
    EngineBuilder {
      platform,
      config: EngineConfig::default(),
    }
  }

  /// Start an empty selector chain bound to this engine.
  pub fn select(&self) -> Selector<P> {
    Selector::new(self.clone())
  }

  /// The event hub: listener registration and the host event sink.
  pub fn events(&self) -> &EventHub<P> {
    &self.hub
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  pub(crate) fn platform(&self) -> &P {
    &self.platform
  }

  /// Package of the latest foreground window.
  pub fn current_package(&self) -> String {
    self.hub.latest_package()
  }

  /// Activity of the latest foreground window.
  pub fn current_activity(&self) -> String {
    self.hub.latest_activity()
  }

  // --- Gestures ---

  /// Dispatch strokes and block until the host reports the outcome.
  pub fn perform_gesture(&self, strokes: &[Stroke]) -> bool {
    gesture::dispatch_blocking(&*self.platform, strokes)
  }

  /// Tap at screen coordinates.
  pub fn click_at(&self, x: f32, y: f32) -> bool {
    self.press(x, y, self.config.tap_duration)
  }

  /// Long-press at screen coordinates.
  pub fn long_click_at(&self, x: f32, y: f32) -> bool {
    self.press(x, y, self.config.long_press_duration)
  }

  /// Press at screen coordinates for an explicit duration.
  pub fn press(&self, x: f32, y: f32, duration: Duration) -> bool {
    self.perform_gesture(&[Stroke::tap(Point::new(x, y), duration)])
  }

  /// Straight-line swipe.
  pub fn swipe(&self, from: Point, to: Point, duration: Duration) -> bool {
    self.perform_gesture(&[Stroke::line(from, to, duration)])
  }

  /// Swipe along a jittered multi-segment path instead of a straight line.
  pub fn swipe_humanized(&self, from: Point, to: Point, duration: Duration) -> bool {
    let mut rng = rand::thread_rng();
    let path = gesture::humanized_path(from, to, self.config.swipe_jitter, &mut rng);
    self.perform_gesture(&[Stroke::along(path, duration)])
  }

  /// One stroke through an arbitrary sequence of points.
  pub fn gesture(&self, duration: Duration, points: &[Point]) -> bool {
    if points.is_empty() {
      return false;
    }
    self.perform_gesture(&[Stroke::along(points.to_vec(), duration)])
  }
}
