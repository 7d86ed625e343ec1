//! Pointer-driven pixel sampling with a zoomed "dropper" magnifier.
//!
//! The host binds a primary [`Surface`], draws a decoded [`Bitmap`] into it and
//! forwards pointer events; [`SamplingEngine`] reports the hex color under the
//! pointer on every move and, while the dropper is on, on every click. The
//! dropper itself is a grid of the nearby pixels, scaled up, rendered into a
//! second surface that follows the pointer.

pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod loader;
pub mod magnifier;
pub mod observer;
pub mod sampling;
pub mod surface;
pub mod types;

pub use config::{DropperConfig, Viewport};
pub use engine::{DropperState, SamplingEngine};
pub use error::{Error, Result};
pub use observer::{ChannelObserver, ColorObserver, ObserverError};
pub use surface::{Canvas, Surface};
pub use types::{Bitmap, ColorEvent, ColorSample, FrameBuffer, HexColor, Offset, PointerEvent, PointerKind};
