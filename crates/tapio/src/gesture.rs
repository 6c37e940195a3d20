/*!
Gesture dispatch - stroke descriptions plus the async-to-blocking bridge.

The host accepts a gesture and calls back exactly once, asynchronously, with
success or cancellation. Scripts want a plain blocking call, so dispatch
parks the calling thread on a one-shot completion cell that the callback
fills. No polling and no timeout: the host's exactly-once callback contract
bounds the wait.
*/

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::types::Point;

/// One path with a start delay and a duration - the unit of gesture
/// dispatch. Multi-stroke gestures (pinch, two-finger swipe) are lists of
/// these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
  /// Points of the path, in order. Never empty; a tap is a single point.
  pub path: Vec<Point>,
  /// Delay before the stroke starts, relative to gesture submission.
  pub start_delay: Duration,
  pub duration: Duration,
}

impl Stroke {
  /// A stationary press at `point`.
  pub fn tap(point: Point, duration: Duration) -> Self {
    Self {
      path: vec![point],
      start_delay: Duration::ZERO,
      duration,
    }
  }

  /// A straight line from `from` to `to`.
  pub fn line(from: Point, to: Point, duration: Duration) -> Self {
    Self {
      path: vec![from, to],
      start_delay: Duration::ZERO,
      duration,
    }
  }

  /// A stroke along an arbitrary path.
  pub fn along(path: Vec<Point>, duration: Duration) -> Self {
    Self {
      path,
      start_delay: Duration::ZERO,
      duration,
    }
  }

  pub fn with_start_delay(mut self, delay: Duration) -> Self {
    self.start_delay = delay;
    self
  }
}

/// One-shot completion cell shared between the dispatching thread and the
/// host callback.
pub(crate) struct Completion {
  state: Mutex<Option<bool>>,
  done: Condvar,
}

impl Completion {
  pub(crate) fn new() -> Self {
    Self {
      state: Mutex::new(None),
      done: Condvar::new(),
    }
  }

  pub(crate) fn set(&self, succeeded: bool) {
    let mut state = self.state.lock();
    *state = Some(succeeded);
    self.done.notify_all();
  }

  /// Block until the callback fires.
  pub(crate) fn wait(&self) -> bool {
    let mut state = self.state.lock();
    while state.is_none() {
      self.done.wait(&mut state);
    }
    (*state).unwrap_or(false)
  }
}

/// Submit strokes and block until the host reports completion.
///
/// `false` immediately when the service is inactive or submission fails -
/// in neither case will the callback ever fire.
pub(crate) fn dispatch_blocking<P: Platform>(platform: &P, strokes: &[Stroke]) -> bool {
  if !platform.is_active() {
    log::debug!("gesture dropped: automation service inactive");
    return false;
  }

  let completion = Arc::new(Completion::new());
  let signal = Arc::clone(&completion);
  let submitted = platform.dispatch_gesture(
    strokes,
    Box::new(move |succeeded| {
      signal.set(succeeded);
    }),
  );
  if !submitted {
    log::debug!("gesture dropped: host rejected submission");
    return false;
  }

  completion.wait()
}

/// A jittered multi-segment path from `from` to `to`.
///
/// Intermediate points sit on the straight line plus a per-step random
/// offset bounded by `jitter`, so the path trends from source to
/// destination without being one. Endpoints are exact.
pub(crate) fn humanized_path<R: Rng>(from: Point, to: Point, jitter: f32, rng: &mut R) -> Vec<Point> {
  let distance = from.distance_to(to);
  let segments = ((distance / 60.0).round() as usize).clamp(4, 16);

  let mut path = Vec::with_capacity(segments + 1);
  path.push(from);
  for step in 1..segments {
    let t = step as f32 / segments as f32;
    let base = from.lerp(to, t);
    let dx = rng.gen_range(-jitter..=jitter);
    let dy = rng.gen_range(-jitter..=jitter);
    path.push(Point::new((base.x + dx).max(0.0), (base.y + dy).max(0.0)));
  }
  path.push(to);
  path
}
