//! Bitmap text drawing with the 8x8 `font8x8` glyphs, scaled to a pixel size.

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

const GLYPH_CELLS: f32 = 8.0;

/// How to draw a run of text.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Glyph height (and advance) in pixels.
    pub size: f32,
    pub bold: bool,
    pub color: Color,
}

/// Advance width of `text` at `size`; every glyph is one `size` wide.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size
}

/// Draw `text` horizontally centered on `center_x`, sitting on `baseline`.
pub fn draw_centered(pixmap: &mut Pixmap, text: &str, center_x: f32, baseline: f32, style: &TextStyle) {
    let scale = style.size / GLYPH_CELLS;
    // Row 7 of the font is the descender row; the baseline sits under row 6.
    let top = baseline - scale * 7.0;
    let mut x = center_x - text_width(text, style.size) / 2.0;
    // Bold widens each lit cell so vertical strokes thicken.
    let cell_width = if style.bold { scale * 1.5 } else { scale };

    let mut paint = Paint::default();
    paint.set_color(style.color);
    paint.anti_alias = false;

    for c in text.chars() {
        let glyph = glyph_for(c);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8u8 {
                if bits & (1u8 << col) == 0 {
                    continue;
                }
                let px = x + col as f32 * scale;
                let py = top + row as f32 * scale;
                if let Some(rect) = Rect::from_xywh(px, py, cell_width, scale) {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
        }
        x += style.size;
    }
}

fn glyph_for(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}
