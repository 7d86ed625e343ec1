// Host-side drawing elements.
// The host creates and destroys these; the engine only binds to them,
// writes their pixels and (for the dropper container) moves them around.

use crate::types::{FrameBuffer, Offset};

/// A drawing element owned by the host.
pub trait Surface {
    /// Screen position of the element's top-left corner.
    fn origin(&self) -> Offset;

    /// Move the element (the engine does this for the dropper container).
    fn set_origin(&mut self, origin: Offset);

    fn opacity(&self) -> f32;

    fn set_opacity(&mut self, opacity: f32);

    /// The 2D drawing context, or `None` when the element cannot provide one.
    fn context_2d(&mut self) -> Option<&mut FrameBuffer>;

    /// Read-only view of the pixels, `None` under the same condition.
    fn frame(&self) -> Option<&FrameBuffer>;
}

/// In-process drawing element used by the demo window and tests.
#[derive(Clone, Debug)]
pub struct Canvas {
    origin: Offset,
    opacity: f32,
    frame: Option<FrameBuffer>, // None = no 2D context available
}

impl Canvas {
    /// An empty (0x0) canvas placed at `origin` on screen.
    pub fn new(origin: Offset) -> Self {
        Self { origin, opacity: 1.0, frame: Some(FrameBuffer::default()) }
    }

    /// A canvas whose context cannot be acquired.
    pub fn without_context(origin: Offset) -> Self {
        Self { origin, opacity: 1.0, frame: None }
    }
}

impl Surface for Canvas {
    fn origin(&self) -> Offset {
        self.origin
    }

    fn set_origin(&mut self, origin: Offset) {
        self.origin = origin;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn context_2d(&mut self) -> Option<&mut FrameBuffer> {
        self.frame.as_mut()
    }

    fn frame(&self) -> Option<&FrameBuffer> {
        self.frame.as_ref()
    }
}
