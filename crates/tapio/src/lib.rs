/*!
Tapio - Tap I/O: accessibility-tree querying and synthetic touch gestures.

The engine reads a live, externally owned UI tree through the
[`platform::Platform`] contract, matches nodes with fluent selector chains,
and drives the screen with synthetic gestures. It is built for a
single-threaded automation script: every blocking call parks the calling
thread, and nothing here ever panics across the public boundary for
conditions that are normal in a live UI (staleness, absence, timeout).

```ignore
use std::time::Duration;
use tapio::{Engine, Point};

// One engine per service connection; `platform` is the host-side
// implementation of tapio::platform::Platform.
let engine = Engine::new(platform);

// Query the current tree (blocks until the button appears).
let send = engine.select().text("Send").clickable(true).find_one();
send.click();
send.recycle();

// Touch input.
engine.click_at(540.0, 1200.0);
engine.swipe_humanized(
    Point::new(540.0, 1600.0),
    Point::new(540.0, 400.0),
    Duration::from_millis(300),
);

// Events: the host feeds engine.events(), listeners hang off it.
let toasts = engine.events();
```
*/

mod engine;
mod gesture;
mod hub;
mod node;
mod search;
mod selector;

pub mod a11y;
pub mod platform;

mod types;
pub use types::*;

#[cfg(test)]
pub(crate) mod testkit;

pub use engine::{Engine, EngineBuilder, EngineConfig};
pub use gesture::Stroke;
pub use hub::{
  EventHub, KeyInterceptor, KeyListener, NotificationListener, ToastListener, WindowListener,
};
pub use node::Node;
pub use selector::Selector;
