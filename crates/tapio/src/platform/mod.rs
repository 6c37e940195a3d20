/*!
Platform abstraction.

The engine never talks to the host accessibility layer directly - everything
goes through these traits. The host side of an integration implements them
once; the rest of the crate is generic over [`Platform`].
*/

mod traits;

pub use traits::{GestureCallback, Platform, UiNode};
