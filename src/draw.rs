// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the loaded image and the dropper on top of it.
// 2) Filled / outlined rectangles with canvas-style source-over opacity.
// 3) A tiny 5x7 bitmap font, scalable, for the hex label and the HUD.

use crate::error::Error;
use crate::types::{ColorSample, FrameBuffer, Offset};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the primary surface (+ HUD strip).
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixels, `None` when the pointer is outside.
    pub fn mouse_pos(&self) -> Option<(i32, i32)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x as i32, y as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Visual: flips the dropper on/off.
    pub fn d_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::D, KeyRepeat::No)
    }
}

/* ---------- Software drawing: pixels, rectangles, compositing ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Source-over one pixel. `opacity` multiplies the color's own alpha.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: ColorSample, opacity: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = over(ColorSample::from_argb(fb.pixels[idx]), color, opacity).to_argb();
}

/// Non-premultiplied source-over of `src` (scaled by `opacity`) onto `dst`.
fn over(dst: ColorSample, src: ColorSample, opacity: f32) -> ColorSample {
    let sa = (src.a as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if sa >= 1.0 {
        return ColorSample { a: 255, ..src };
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    ColorSample {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

/// Reset every pixel to transparent black.
pub fn clear(fb: &mut FrameBuffer) {
    for p in &mut fb.pixels { *p = 0; }
}

/// Fill a `w`x`h` rectangle at (x,y). Parts outside the buffer are skipped.
/// Visual: a solid (or see-through, with opacity < 1) block appears.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: ColorSample, opacity: f32) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(fb.width as i32);
    let y1 = (y + h).min(fb.height as i32);
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(fb, px, py, color, opacity);
        }
    }
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// 1px outline along the inner edge of a `w`x`h` rectangle at (x,y).
/// Visual: a thin frame around one magnified cell.
pub fn stroke_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: ColorSample) {
    if w <= 0 || h <= 0 {
        return;
    }
    let c = color.to_argb();
    let (r, b) = (x + w - 1, y + h - 1);
    draw_line(fb, x, y, r, y, c); // top
    draw_line(fb, x, b, r, b, c); // bottom
    draw_line(fb, x, y, x, b, c); // left
    draw_line(fb, r, y, r, b, c); // right
}

/// Paint `src` onto `dst` with its top-left at `at`.
/// Visual: the dropper appears floating over the image.
pub fn composite(dst: &mut FrameBuffer, src: &FrameBuffer, at: Offset, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    for sy in 0..src.height {
        for sx in 0..src.width {
            let px = src.pixels[sy * src.width + sx];
            if px >> 24 == 0 { continue; } // fully transparent
            blend_pixel(dst, at.x + sx as i32, at.y + sy as i32, ColorSample::from_argb(px), opacity);
        }
    }
}

/* ---------- 5x7 bitmap font (hex digits + the HUD words) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Lowercase hex digits
        'a' => g!(0b00000,0b00000,0b01110,0b00001,0b01111,0b10001,0b01111),
        'b' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b11110),
        'c' => g!(0b00000,0b00000,0b01110,0b10000,0b10000,0b10001,0b01110),
        'd' => g!(0b00001,0b00001,0b01101,0b10011,0b10001,0b10001,0b01111),
        'e' => g!(0b00000,0b00000,0b01110,0b10001,0b11111,0b10000,0b01110),
        'f' => g!(0b00110,0b01001,0b01000,0b11100,0b01000,0b01000,0b01000),

        // Uppercase letters for the HUD
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),

        // Punctuation: space, hash, vertical bar, colon, dot, dash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`x`scale` block.
fn draw_char_scaled(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) == 0 { continue; }
                for dy in 0..scale {
                    for dx in 0..scale {
                        put_pixel(fb, x + rx * scale + dx, y + ry as i32 * scale + dy, color);
                    }
                }
            }
        }
    }
}

/// Integer glyph scale for a text `size` (glyph height in pixels).
#[inline]
fn text_scale(size: usize) -> i32 {
    (size as i32 / 7).max(1)
}

/// Width in pixels `text` takes at `size`.
/// Each glyph is 5 wide with 1 column spacing; no trailing spacing.
pub fn measure_text(text: &str, size: usize) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        return 0;
    }
    let scale = text_scale(size);
    n * 6 * scale - scale
}

/// Draw `text` with its left edge at `x` and its baseline at `baseline_y`.
/// Visual: the hex label inside the dropper.
pub fn fill_text(fb: &mut FrameBuffer, x: i32, baseline_y: i32, text: &str, size: usize, color: ColorSample) {
    let scale = text_scale(size);
    let top = baseline_y - 7 * scale;
    let mut pen = x;
    for ch in text.chars() {
        draw_char_scaled(fb, pen, top, ch, scale, color.to_argb());
        pen += 6 * scale;
    }
}

/// Draw a text string using unscaled 5x7 glyphs with a 1-pixel black shadow.
/// Visual: a compact HUD string appears.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_scaled(fb, x + 1, y + 1, ch, 1, 0xFF_00_00_00); // shadow
        draw_char_scaled(fb, x, y, ch, 1, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
