//! Text Rendering - Resolution Chain and Fallback Face
//!
//! Font lookup is an ordered list of strategies tried in sequence: the
//! caller-preferred TTF path first, then well-known system locations.
//! The first font that loads wins. When nothing loads, a built-in 5x7
//! bitmap face takes over, so drawing text can never fail a render.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use log::debug;

use crate::canvas::Canvas;
use crate::theme::Color;

/// System locations probed after the preferred path.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

enum Face {
    Outline(FontVec),
    Builtin,
}

/// A resolved font: either a loaded outline face or the builtin bitmap
/// face. Construction never fails.
pub struct FontStack {
    face: Face,
}

impl FontStack {
    /// Try each candidate in order; fall back to the builtin face.
    pub fn resolve(preferred: Option<&Path>) -> Self {
        for candidate in candidates(preferred) {
            match load_outline(&candidate) {
                Ok(font) => {
                    debug!("resolved font: {}", candidate.display());
                    return Self {
                        face: Face::Outline(font),
                    };
                }
                Err(_) => continue,
            }
        }
        debug!("no outline font available, using builtin face");
        Self {
            face: Face::Builtin,
        }
    }

    /// The builtin bitmap face, regardless of installed fonts.
    pub fn builtin() -> Self {
        Self {
            face: Face::Builtin,
        }
    }

    pub fn is_outline(&self) -> bool {
        matches!(self.face, Face::Outline(_))
    }

    /// Paint `text` with its top-left corner at (x, y).
    pub fn draw_text(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, size: u32, color: Color) {
        match &self.face {
            Face::Outline(font) => draw_outline(font, canvas, x, y, text, size, color),
            Face::Builtin => draw_builtin(canvas, x, y, text, size, color),
        }
    }

    /// Bounding box (width, height) of `text` at `size`.
    pub fn measure(&self, text: &str, size: u32) -> (i64, i64) {
        match &self.face {
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size as f32));
                let mut width = 0.0f32;
                let mut last = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = last {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    last = Some(id);
                }
                (
                    width.ceil() as i64,
                    (scaled.ascent() - scaled.descent()).ceil() as i64,
                )
            }
            Face::Builtin => {
                let s = builtin_scale(size);
                (text.chars().count() as i64 * 6 * s, 8 * s)
            }
        }
    }
}

fn candidates(preferred: Option<&Path>) -> Vec<PathBuf> {
    let mut list = Vec::with_capacity(1 + SYSTEM_FONTS.len());
    if let Some(p) = preferred {
        list.push(p.to_path_buf());
    }
    list.extend(SYSTEM_FONTS.iter().map(PathBuf::from));
    list
}

fn load_outline(path: &Path) -> Result<FontVec, FontLoadError> {
    let bytes = fs::read(path)?;
    Ok(FontVec::try_from_vec(bytes)?)
}

#[derive(Debug, thiserror::Error)]
enum FontLoadError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a parsable font: {0}")]
    Parse(#[from] ab_glyph::InvalidFont),
}

fn draw_outline(font: &FontVec, canvas: &mut Canvas, x: i64, y: i64, text: &str, size: u32, color: Color) {
    let scaled = font.as_scaled(PxScale::from(size as f32));
    let baseline = y as f32 + scaled.ascent();
    let mut caret = x as f32;
    let mut last = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = last {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(PxScale::from(size as f32), point(caret, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                canvas.blend(
                    bounds.min.x as i64 + gx as i64,
                    bounds.min.y as i64 + gy as i64,
                    color,
                    coverage,
                );
            });
        }
        caret += scaled.h_advance(id);
        last = Some(id);
    }
}

fn builtin_scale(size: u32) -> i64 {
    (size as i64 / 10).max(1)
}

fn draw_builtin(canvas: &mut Canvas, x: i64, y: i64, text: &str, size: u32, color: Color) {
    let s = builtin_scale(size);
    let mut cx = x;
    for ch in text.chars() {
        let glyph = builtin_glyph(ch);
        for (col, bits) in glyph.iter().enumerate() {
            for row in 0..7i64 {
                if bits & (1u8 << row) != 0 {
                    canvas.fill_rect(cx + col as i64 * s, y + row * s, s, s, color);
                }
            }
        }
        cx += 6 * s;
    }
}

fn builtin_glyph(ch: char) -> [u8; 5] {
    let idx = ch as usize;
    if (0x20..=0x7e).contains(&idx) {
        FONT_5X7[idx - 0x20]
    } else {
        // Unmapped characters render as a filled block.
        [0x7f; 5]
    }
}

/// Classic 5x7 column-major ASCII face (0x20..=0x7E). Bit 0 is the top
/// row of each column.
#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // '#'
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1c, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1c, 0x00], // ')'
    [0x14, 0x08, 0x3e, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3e, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // '0'
    [0x00, 0x42, 0x7f, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4b, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7f, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1e], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3e], // '@'
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // 'A'
    [0x7f, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3e, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // 'D'
    [0x7f, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7f, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // 'G'
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // 'H'
    [0x00, 0x41, 0x7f, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3f, 0x01], // 'J'
    [0x7f, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7f, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // 'M'
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // 'N'
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // 'O'
    [0x7f, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // 'Q'
    [0x7f, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7f, 0x01, 0x01], // 'T'
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // 'U'
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // 'V'
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7f, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7f, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7f], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7e, 0x09, 0x01, 0x02], // 'f'
    [0x0c, 0x52, 0x52, 0x52, 0x3e], // 'g'
    [0x7f, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7d, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3d, 0x00], // 'j'
    [0x7f, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7f, 0x40, 0x00], // 'l'
    [0x7c, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7c, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7c, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7c], // 'q'
    [0x7c, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3f, 0x44, 0x40, 0x20], // 't'
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // 'u'
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // 'v'
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0c, 0x50, 0x50, 0x50, 0x3c], // 'y'
    [0x44, 0x64, 0x54, 0x4c, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7f, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x10, 0x08, 0x08, 0x10, 0x08], // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_never_fails_to_draw() {
        let stack = FontStack::builtin();
        let mut canvas = Canvas::new(120, 20, Color([0, 0, 0]));
        stack.draw_text(&mut canvas, 2, 2, "Hello 100% \u{263a}", 12, Color([255, 255, 255]));
        // Something got painted.
        let painted = canvas
            .image()
            .pixels()
            .any(|p| p.0 != [0, 0, 0]);
        assert!(painted);
    }

    #[test]
    fn builtin_measure_is_cell_based() {
        let stack = FontStack::builtin();
        assert_eq!(stack.measure("abcd", 12), (24, 8));
        assert_eq!(stack.measure("", 12), (0, 8));
        // Larger sizes scale the cell.
        assert_eq!(stack.measure("a", 24), (12, 16));
    }

    #[test]
    fn resolve_with_bogus_path_still_usable() {
        let stack = FontStack::resolve(Some(Path::new("/definitely/not/a/font.ttf")));
        let mut canvas = Canvas::new(60, 20, Color([0, 0, 0]));
        stack.draw_text(&mut canvas, 0, 0, "ok", 14, Color([255, 255, 255]));
    }
}
