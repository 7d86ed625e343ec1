// Magnifier and viewport constants.
// Visual: these decide how big the dropper is and where the hex label sits.

use crate::error::{Error, Result};

/// Amount of zoomed pixels per magnifier side. Must be ODD so one pixel
/// is the visual center.
pub const DEFAULT_ZOOMED_PIXELS: usize = 7;
/// Scale factor of each zoomed pixel (screen pixels per source pixel).
pub const DEFAULT_PIXEL_MULTIPLIER: usize = 45;
/// How far the hex label baseline sits above the magnifier center.
pub const DEFAULT_TEXT_Y_OFFSET: i32 = 35;
/// Height of the hex label text.
pub const DEFAULT_TEXT_SIZE: usize = 25;
/// Padding of the white label background.
pub const DEFAULT_TEXT_PADDING: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropperConfig {
    pub zoomed_pixels: usize,
    pub pixel_multiplier: usize,
    pub text_y_offset: i32,
    pub text_size: usize,
    pub text_padding: i32,
}

impl Default for DropperConfig {
    fn default() -> Self {
        Self {
            zoomed_pixels: DEFAULT_ZOOMED_PIXELS,
            pixel_multiplier: DEFAULT_PIXEL_MULTIPLIER,
            text_y_offset: DEFAULT_TEXT_Y_OFFSET,
            text_size: DEFAULT_TEXT_SIZE,
            text_padding: DEFAULT_TEXT_PADDING,
        }
    }
}

impl DropperConfig {
    /// Side length of the magnifier surface in pixels.
    pub fn real_size(&self) -> usize {
        self.zoomed_pixels * self.pixel_multiplier
    }

    pub fn validate(&self) -> Result<()> {
        if self.zoomed_pixels == 0 || self.zoomed_pixels % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "zoomed_pixels must be odd and non-zero, got {}",
                self.zoomed_pixels
            )));
        }
        if self.pixel_multiplier == 0 {
            return Err(Error::InvalidConfig("pixel_multiplier must be non-zero".into()));
        }
        if self.text_size == 0 {
            return Err(Error::InvalidConfig("text_size must be non-zero".into()));
        }
        Ok(())
    }
}

/// Visible area the primary surface must fit into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1024, height: 768 }
    }
}

impl Viewport {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Size an image of `w`x`h` gets when blitted: never larger than the viewport.
    pub fn clamp(&self, w: usize, h: usize) -> (usize, usize) {
        (self.width.min(w), self.height.min(h))
    }
}
