/*! Core types for tapio. */

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;

pub use error::{TapioError, TapioResult};
pub use event::{KeyAction, KeyEvent, Notification, NotificationPayload, Toast, UiEvent, WindowEvent};
pub use geometry::{Point, Rect};
