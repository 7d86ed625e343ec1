// The dropper: a zoomed grid of the pixels around the cursor, the exact
// pixel outlined in red, and its hex value on a white label above center.

use crate::config::DropperConfig;
use crate::draw::{clear, fill_rect, fill_text, measure_text, stroke_rect};
use crate::surface::Surface;
use crate::types::{ColorSample, FrameBuffer, HexColor, Offset};

/// A mounted magnifier. Holds the host's container while the dropper is on.
pub struct Magnifier<S> {
    container: S,
    size: usize, // side length in pixels
}

impl<S: Surface> Magnifier<S> {
    /// Give the container a brand-new `size`x`size` buffer and make it visible.
    /// Hands the container back if it has no 2D context.
    pub fn mount(mut container: S, size: usize) -> Result<Self, S> {
        if container.context_2d().is_none() {
            return Err(container);
        }
        if let Some(ctx) = container.context_2d() {
            *ctx = FrameBuffer::new(size, size);
        }
        container.set_opacity(1.0);
        Ok(Self { container, size })
    }

    /// Hide the container and drop its pixels; the next mount starts clean.
    pub fn unmount(mut self) -> S {
        if let Some(ctx) = self.container.context_2d() {
            *ctx = FrameBuffer::default();
        }
        self.container.set_opacity(0.0);
        self.container
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn container(&self) -> &S {
        &self.container
    }

    /// Center the container on the pointer (screen coordinates).
    pub fn follow(&mut self, x: i32, y: i32) {
        let half = (self.size / 2) as i32;
        self.container.set_origin(Offset::new(x - half, y - half));
    }

    /// Redraw everything from `grid` (row-major, `zoomed_pixels`² samples)
    /// and label it with `hex`. Same inputs always give the same pixels.
    pub fn render(&mut self, grid: &[ColorSample], hex: &HexColor, cfg: &DropperConfig) {
        let size = self.size as i32;
        let Some(fb) = self.container.context_2d() else {
            return;
        };
        clear(fb);
        draw_pixels(fb, grid, cfg.zoomed_pixels, cfg.pixel_multiplier);
        draw_label(fb, size / 2, hex.as_str(), cfg);
    }
}

/// Each sample becomes a `mult`x`mult` square; alpha is the fill opacity.
fn draw_pixels(fb: &mut FrameBuffer, grid: &[ColorSample], n: usize, mult: usize) {
    let m = mult as i32;
    for row in 0..n {
        for col in 0..n {
            let Some(&c) = grid.get(row * n + col) else { continue };
            let opacity = c.a as f32 / 255.0;
            fill_rect(fb, col as i32 * m, row as i32 * m, m, m, ColorSample { a: 255, ..c }, opacity);
        }
    }

    // Outline the sampled pixel
    let center = (n / 2) as i32;
    stroke_rect(fb, center * m, center * m, m, m, ColorSample::RED);
}

/// White box + black text, horizontally centered, `text_y_offset` above `center`.
fn draw_label(fb: &mut FrameBuffer, center: i32, text: &str, cfg: &DropperConfig) {
    let size = cfg.text_size as i32;
    let pad = cfg.text_padding;
    let half_w = measure_text(text, cfg.text_size) / 2;
    let baseline = center - cfg.text_y_offset;

    fill_rect(
        fb,
        center - half_w - pad,
        baseline - size,
        (half_w + pad) * 2,
        size + pad * 2,
        ColorSample::WHITE,
        1.0,
    );
    fill_text(fb, center - half_w, baseline, text, cfg.text_size, ColorSample::BLACK);
}
