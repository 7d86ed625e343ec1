// Core value types shared by the engine, the drawing helpers and the host.

use image::RgbaImage;
use std::fmt;

/// A raster drawing target. Each entry is 0xAARRGGBB, which minifb
/// presents directly (it ignores the alpha byte).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // pixels per row
    pub height: usize,    // number of rows
    pub pixels: Vec<u32>, // length = width * height, row-major
}

impl FrameBuffer {
    /// A fresh buffer with every pixel transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Read one pixel. Outside the buffer this is transparent black,
    /// the same thing a 1x1 canvas read returns off-canvas.
    pub fn sample(&self, x: i32, y: i32) -> ColorSample {
        if x < 0 || y < 0 {
            return ColorSample::TRANSPARENT;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return ColorSample::TRANSPARENT;
        }
        ColorSample::from_argb(self.pixels[y * self.width + x])
    }

    /// True when no pixel has been written (all transparent black).
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }
}

/// Raw RGBA channel values of one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorSample {
    pub const TRANSPARENT: ColorSample = ColorSample { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: ColorSample = ColorSample { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: ColorSample = ColorSample { r: 0, g: 0, b: 0, a: 255 };
    pub const RED: ColorSample = ColorSample { r: 255, g: 0, b: 0, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn from_argb(px: u32) -> Self {
        Self {
            a: ((px >> 24) & 0xFF) as u8,
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }

    #[inline]
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_hex(self) -> HexColor {
        HexColor::from(self)
    }
}

/// "#rrggbb" form of a sample; alpha is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ColorSample> for HexColor {
    fn from(c: ColorSample) -> Self {
        HexColor(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A screen-space position (surface origin, container top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Click,
}

/// One pointer event in screen coordinates. Not kept after handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    pub const fn moved(x: i32, y: i32) -> Self {
        Self { kind: PointerKind::Move, x, y }
    }

    pub const fn click(x: i32, y: i32) -> Self {
        Self { kind: PointerKind::Click, x, y }
    }
}

/// What observers receive: the screen position and the color under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorEvent {
    pub x: i32,
    pub y: i32,
    pub color: HexColor,
}

/// A fully decoded source image. Read-only to the engine.
#[derive(Clone, Debug)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}
