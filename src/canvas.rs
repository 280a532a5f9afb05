//! Canvas - Pixel Buffer and Shape Primitives
//!
//! A thin wrapper over `image::RgbImage` with the primitive set the
//! composer paints with: rects, rounded rects, circles, lines, triangles
//! and alpha blending. All primitives clip to the buffer, so painters can
//! position by offset arithmetic without bounds bookkeeping.

use image::RgbImage;

use crate::theme::Color;

/// Uniform smoothing kernel: 1s around a 5 center, scale 13. Integer
/// arithmetic so uniform regions pass through bit-exact.
const SMOOTH_CENTER: u32 = 5;
const SMOOTH_SCALE: u32 = 13;

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background.rgb()),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color(self.img.get_pixel(x, y).0)
    }

    /// Set one pixel; silently clips.
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color.rgb());
        }
    }

    /// Blend `color` over one pixel at `alpha` in 0.0..=1.0; silently clips.
    pub fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as u32 >= self.img.width() || y as u32 >= self.img.height() {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let under = self.img.get_pixel(x as u32, y as u32).0;
        let mut out = [0u8; 3];
        for i in 0..3 {
            out[i] = (color.0[i] as f32 * a + under[i] as f32 * (1.0 - a)).round() as u8;
        }
        self.img.put_pixel(x as u32, y as u32, image::Rgb(out));
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        for py in y..y + h {
            for px in x..x + w {
                self.put(px, py, color);
            }
        }
    }

    pub fn blend_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color, alpha: f32) {
        for py in y..y + h {
            for px in x..x + w {
                self.blend(px, py, color, alpha);
            }
        }
    }

    /// 1px hollow rectangle.
    pub fn stroke_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    pub fn fill_rounded_rect(&mut self, x: i64, y: i64, w: i64, h: i64, radius: i64, color: Color) {
        let r = radius.min(w / 2).min(h / 2).max(0);
        for py in 0..h {
            for px in 0..w {
                if rounded_contains(w, h, r, px, py) {
                    self.put(x + px, y + py, color);
                }
            }
        }
    }

    /// Rounded rectangle with an optional 1px border, painted as an outer
    /// fill in the border color under an inset fill.
    pub fn rounded_rect(
        &mut self,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        radius: i64,
        fill: Color,
        outline: Option<Color>,
    ) {
        match outline {
            Some(border) => {
                self.fill_rounded_rect(x, y, w, h, radius, border);
                self.fill_rounded_rect(x + 1, y + 1, w - 2, h - 2, (radius - 1).max(0), fill);
            }
            None => self.fill_rounded_rect(x, y, w, h, radius, fill),
        }
    }

    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Color) {
        for dy in -radius..=radius {
            let dx = ((radius * radius - dy * dy) as f64).sqrt() as i64;
            self.fill_rect(cx - dx, cy + dy, dx * 2 + 1, 1, color);
        }
    }

    /// Line segment with square pen of side `width`.
    pub fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color, width: i64) {
        let pen = width.max(1);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.fill_rect(x - pen / 2, y - pen / 2, pen, pen, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled triangle by horizontal scanline.
    pub fn fill_triangle(&mut self, p0: (i64, i64), p1: (i64, i64), p2: (i64, i64), color: Color) {
        let min_y = p0.1.min(p1.1).min(p2.1);
        let max_y = p0.1.max(p1.1).max(p2.1);
        for y in min_y..=max_y {
            let mut xs: Vec<i64> = Vec::with_capacity(2);
            for (a, b) in [(p0, p1), (p1, p2), (p2, p0)] {
                if let Some(x) = edge_intersect_row(a, b, y) {
                    xs.push(x);
                }
            }
            if let (Some(&lo), Some(&hi)) = (xs.iter().min(), xs.iter().max()) {
                self.fill_rect(lo, y, hi - lo + 1, 1, color);
            }
        }
    }

    /// Apply the uniform smoothing filter, consuming the canvas. Edge
    /// samples clamp to the border so output dimensions are unchanged.
    pub fn smoothed(self) -> RgbImage {
        let (w, h) = (self.img.width(), self.img.height());
        let mut out = RgbImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0u32; 3];
                for dy in -1..=1i64 {
                    for dx in -1..=1i64 {
                        let sx = (x as i64 + dx).clamp(0, w as i64 - 1) as u32;
                        let sy = (y as i64 + dy).clamp(0, h as i64 - 1) as u32;
                        let weight = if dx == 0 && dy == 0 { SMOOTH_CENTER } else { 1 };
                        let p = self.img.get_pixel(sx, sy).0;
                        for (a, &v) in acc.iter_mut().zip(p.iter()) {
                            *a += weight * v as u32;
                        }
                    }
                }
                let rounded = acc.map(|a| ((a + SMOOTH_SCALE / 2) / SMOOTH_SCALE) as u8);
                out.put_pixel(x, y, image::Rgb(rounded));
            }
        }
        out
    }
}

fn rounded_contains(w: i64, h: i64, r: i64, px: i64, py: i64) -> bool {
    if px < 0 || py < 0 || px >= w || py >= h {
        return false;
    }
    if px >= r && px < w - r {
        return true;
    }
    if py >= r && py < h - r {
        return true;
    }
    let cx = if px < r { r } else { w - 1 - r };
    let cy = if py < r { r } else { h - 1 - r };
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

fn edge_intersect_row(a: (i64, i64), b: (i64, i64), y: i64) -> Option<i64> {
    let (lo, hi) = if a.1 <= b.1 { (a, b) } else { (b, a) };
    if y < lo.1 || y > hi.1 {
        return None;
    }
    if lo.1 == hi.1 {
        return Some(lo.0.min(hi.0));
    }
    Some(lo.0 + (hi.0 - lo.0) * (y - lo.1) / (hi.1 - lo.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color = Color([0, 0, 0]);
    const INK: Color = Color([255, 255, 255]);

    #[test]
    fn fill_rect_paints_and_clips() {
        let mut c = Canvas::new(10, 10, BG);
        c.fill_rect(8, 8, 5, 5, INK);
        assert_eq!(c.pixel(9, 9), INK);
        assert_eq!(c.pixel(7, 7), BG);
        // Fully out of bounds is a no-op, not a panic.
        c.fill_rect(-20, -20, 5, 5, INK);
        assert_eq!(c.pixel(0, 0), BG);
    }

    #[test]
    fn rounded_rect_spares_corners() {
        let mut c = Canvas::new(40, 40, BG);
        c.fill_rounded_rect(0, 0, 40, 40, 10, INK);
        assert_eq!(c.pixel(0, 0), BG);
        assert_eq!(c.pixel(20, 0), INK);
        assert_eq!(c.pixel(0, 20), INK);
        assert_eq!(c.pixel(20, 20), INK);
    }

    #[test]
    fn rounded_rect_outline_is_one_pixel() {
        let mut c = Canvas::new(40, 20, BG);
        let border = Color([9, 9, 9]);
        c.rounded_rect(0, 0, 40, 20, 4, INK, Some(border));
        assert_eq!(c.pixel(20, 0), border);
        assert_eq!(c.pixel(20, 1), INK);
    }

    #[test]
    fn circle_fills_center_not_bbox_corner() {
        let mut c = Canvas::new(21, 21, BG);
        c.fill_circle(10, 10, 8, INK);
        assert_eq!(c.pixel(10, 10), INK);
        assert_eq!(c.pixel(2, 2), BG);
    }

    #[test]
    fn triangle_contains_centroid() {
        let mut c = Canvas::new(30, 30, BG);
        c.fill_triangle((15, 2), (2, 27), (28, 27), INK);
        assert_eq!(c.pixel(15, 18), INK);
        assert_eq!(c.pixel(2, 2), BG);
    }

    #[test]
    fn blend_half_mixes_channels() {
        let mut c = Canvas::new(1, 1, Color([0, 0, 100]));
        c.blend(0, 0, Color([200, 0, 0]), 0.5);
        assert_eq!(c.pixel(0, 0), Color([100, 0, 50]));
    }

    #[test]
    fn smoothing_keeps_uniform_regions_uniform() {
        let c = Canvas::new(16, 16, Color([120, 130, 140]));
        let img = c.smoothed();
        assert_eq!(img.get_pixel(8, 8).0, [120, 130, 140]);
        // Edge clamping keeps borders uniform as well.
        assert_eq!(img.get_pixel(0, 0).0, [120, 130, 140]);
        assert_eq!(img.get_pixel(15, 15).0, [120, 130, 140]);
    }
}
