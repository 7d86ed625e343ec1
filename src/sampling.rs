// Coordinate mapping, image blit and neighborhood extraction.
// Visual expectation: the image lands on the primary surface at most
// viewport-sized, and every hover reads the exact pixel under the cursor.

use crate::config::Viewport;
use crate::types::{Bitmap, ColorSample, FrameBuffer, Offset};
use image::imageops::{self, FilterType};

/// Screen position -> canvas-local pixel, given the surface origin.
#[inline]
pub fn canvas_local(x: i32, y: i32, offset: Offset) -> (i32, i32) {
    (x - offset.x, y - offset.y)
}

/// Replace `fb` with the bitmap scaled into `min(viewport, bitmap)`.
/// The buffer is recreated, never resized in place, so nothing from the
/// previous image survives.
pub fn blit_scaled(fb: &mut FrameBuffer, bitmap: &Bitmap, viewport: Viewport) {
    let (w, h) = viewport.clamp(bitmap.width() as usize, bitmap.height() as usize);
    let mut out = FrameBuffer::new(w, h);

    let src = bitmap.as_rgba();
    let resized;
    let pixels = if (src.width() as usize, src.height() as usize) == (w, h) {
        src
    } else {
        // Stretch the whole image into the clamped region (smoothed like a canvas blit).
        resized = imageops::resize(src, w as u32, h as u32, FilterType::Triangle);
        &resized
    };

    for (x, y, p) in pixels.enumerate_pixels() {
        let c = ColorSample::new(p[0], p[1], p[2], p[3]);
        out.pixels[y as usize * w + x as usize] = c.to_argb();
    }
    *fb = out;
}

/// Top-left of the magnifier grid for a canvas-local cursor.
///
/// The grid starts `ceil(n / 2)` pixels up-left of the cursor and is then
/// clamped into `[0, surface - n]` on each axis so no read leaves the surface
/// (when the surface is smaller than the grid it pins to 0).
pub fn neighborhood_origin(local: (i32, i32), n: usize, surface_w: usize, surface_h: usize) -> (i32, i32) {
    let reach = n.div_ceil(2) as i32;
    let max_x = (surface_w as i32 - n as i32).max(0);
    let max_y = (surface_h as i32 - n as i32).max(0);
    (
        (local.0 - reach).clamp(0, max_x),
        (local.1 - reach).clamp(0, max_y),
    )
}

/// Read an `n`x`n` grid row-major starting at `origin`.
/// Always `n * n` single-pixel reads, whatever the image size.
pub fn extract_neighborhood(fb: &FrameBuffer, origin: (i32, i32), n: usize) -> Vec<ColorSample> {
    let mut colors = Vec::with_capacity(n * n);
    for dy in 0..n as i32 {
        for dx in 0..n as i32 {
            colors.push(fb.sample(origin.0 + dx, origin.1 + dy));
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(w: u32, h: u32) -> Bitmap {
        Bitmap::from_rgba(RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 7, 255])))
    }

    #[test]
    fn local_subtracts_origin() {
        assert_eq!(canvas_local(120, 80, Offset::new(20, 30)), (100, 50));
        assert_eq!(canvas_local(5, 5, Offset::new(10, 10)), (-5, -5));
    }

    #[test]
    fn same_size_blit_is_exact() {
        let mut fb = FrameBuffer::default();
        blit_scaled(&mut fb, &gradient(40, 30), Viewport::new(100, 100));
        assert_eq!((fb.width, fb.height), (40, 30));
        assert_eq!(fb.sample(12, 9), ColorSample::new(12, 9, 7, 255));
        assert_eq!(fb.sample(39, 29), ColorSample::new(39, 29, 7, 255));
    }

    #[test]
    fn oversized_blit_clamps_to_viewport() {
        let big = Bitmap::from_rgba(RgbaImage::from_pixel(1500, 1000, Rgba([9, 9, 9, 255])));
        let mut fb = FrameBuffer::default();
        blit_scaled(&mut fb, &big, Viewport::new(1024, 768));
        assert_eq!((fb.width, fb.height), (1024, 768));
        assert_eq!(fb.pixels.len(), 1024 * 768);
        assert_eq!(fb.sample(500, 500), ColorSample::new(9, 9, 9, 255));
    }

    #[test]
    fn origin_clamps_near_top_left() {
        for cursor in 0..4 {
            assert_eq!(neighborhood_origin((cursor, cursor), 7, 100, 100), (0, 0));
        }
        assert_eq!(neighborhood_origin((10, 20), 7, 100, 100), (6, 16));
    }

    #[test]
    fn origin_clamps_near_bottom_right() {
        assert_eq!(neighborhood_origin((99, 99), 7, 100, 100), (93, 93));
        // surface smaller than the grid pins to 0
        assert_eq!(neighborhood_origin((2, 2), 7, 3, 3), (0, 0));
    }

    #[test]
    fn extraction_is_fixed_size() {
        let mut fb = FrameBuffer::default();
        blit_scaled(&mut fb, &gradient(200, 200), Viewport::default());
        let grid = extract_neighborhood(&fb, (10, 20), 7);
        assert_eq!(grid.len(), 49);
        assert_eq!(grid[0], ColorSample::new(10, 20, 7, 255));
        assert_eq!(grid[8], ColorSample::new(11, 21, 7, 255)); // row 1, col 1
        assert_eq!(grid[48], ColorSample::new(16, 26, 7, 255));
    }
}
