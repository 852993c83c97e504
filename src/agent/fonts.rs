// SYNOID Shorts Fonts
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Outline fonts are rasterized with rusttype. When no font file can be read
// the built-in 5x7 bitmap face takes over, so loading never fails.

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Ink extent of a rendered string, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub width: u32,
    pub height: u32,
}

pub trait TextMeasure {
    fn measure(&self, text: &str) -> TextBox;
}

pub enum FontFace {
    Outline { font: Font<'static>, source: PathBuf },
    Bitmap,
}

impl FontFace {
    /// Try `requested`, then each fallback path, then the bitmap face.
    pub fn load(requested: &Path, fallbacks: &[PathBuf]) -> Self {
        if let Some(face) = Self::from_file(requested) {
            return face;
        }
        warn!("[FONT] ⚠️ Custom font {:?} not found! Trying fallbacks.", requested);

        for path in fallbacks {
            if let Some(face) = Self::from_file(path) {
                return face;
            }
        }

        warn!("[FONT] ⚠️ No outline font available. Using built-in bitmap font.");
        FontFace::Bitmap
    }

    fn from_file(path: &Path) -> Option<Self> {
        let bytes = fs::read(path).ok()?;
        let font = Font::try_from_vec(bytes)?;
        info!("[FONT] Loaded {:?}", path);
        Some(FontFace::Outline {
            font,
            source: path.to_path_buf(),
        })
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, FontFace::Bitmap)
    }

    pub fn source(&self) -> Option<&Path> {
        match self {
            FontFace::Outline { source, .. } => Some(source),
            FontFace::Bitmap => None,
        }
    }

    pub fn sized(&self, px: f32) -> SizedFont<'_> {
        SizedFont { face: self, px }
    }
}

/// A face at a fixed pixel size.
pub struct SizedFont<'a> {
    face: &'a FontFace,
    px: f32,
}

impl SizedFont<'_> {
    /// Draw `text` with the top of its line box at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbImage, x: f32, y: f32, text: &str, color: [u8; 3]) {
        match self.face {
            FontFace::Outline { font, .. } => {
                let scale = Scale::uniform(self.px);
                let ascent = font.v_metrics(scale).ascent;
                for glyph in font.layout(text, scale, point(x, y + ascent)) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        blend(
                            canvas,
                            bb.min.x + gx as i32,
                            bb.min.y + gy as i32,
                            color,
                            coverage,
                        );
                    });
                }
            }
            FontFace::Bitmap => {
                let cell = bitmap_cell(self.px) as i32;
                let (ox, oy) = (x.round() as i32, y.round() as i32);
                for (i, c) in text.chars().enumerate() {
                    let columns = bitmap_glyph(c);
                    for (col, bits) in columns.iter().enumerate() {
                        for row in 0..GLYPH_ROWS {
                            if bits & (1 << row) == 0 {
                                continue;
                            }
                            let px = ox + (i as i32 * GLYPH_ADVANCE + col as i32) * cell;
                            let py = oy + row as i32 * cell;
                            for dy in 0..cell {
                                for dx in 0..cell {
                                    blend(canvas, px + dx, py + dy, color, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl TextMeasure for SizedFont<'_> {
    fn measure(&self, text: &str) -> TextBox {
        match self.face {
            FontFace::Outline { font, .. } => {
                let scale = Scale::uniform(self.px);
                let ascent = font.v_metrics(scale).ascent;
                let mut bounds: Option<(i32, i32, i32, i32)> = None;
                for glyph in font.layout(text, scale, point(0.0, ascent)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        bounds = Some(match bounds {
                            None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                            Some((x0, y0, x1, y1)) => (
                                x0.min(bb.min.x),
                                y0.min(bb.min.y),
                                x1.max(bb.max.x),
                                y1.max(bb.max.y),
                            ),
                        });
                    }
                }
                bounds
                    .map(|(x0, y0, x1, y1)| TextBox {
                        width: (x1 - x0) as u32,
                        height: (y1 - y0) as u32,
                    })
                    .unwrap_or_default()
            }
            FontFace::Bitmap => {
                let count = text.chars().count() as u32;
                if count == 0 {
                    return TextBox::default();
                }
                let cell = bitmap_cell(self.px);
                TextBox {
                    width: (count * GLYPH_ADVANCE as u32 - 1) * cell,
                    height: GLYPH_ROWS * cell,
                }
            }
        }
    }
}

fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: [u8; 3], coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    let Rgb(dst) = canvas.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        dst[i] = (color[i] as f32 * a + dst[i] as f32 * (1.0 - a)).round() as u8;
    }
}

// ---------------------------------------------------------------------------
// Built-in 5x7 bitmap face (ASCII 0x20..=0x7E, column-major, bit 0 = top row)
// ---------------------------------------------------------------------------

const GLYPH_ROWS: u32 = 7;
/// Five glyph columns plus one column of spacing.
const GLYPH_ADVANCE: i32 = 6;

/// Integer scale so the bitmap face roughly matches the requested pixel size.
fn bitmap_cell(px: f32) -> u32 {
    ((px / 8.0).round() as u32).max(1)
}

fn bitmap_glyph(c: char) -> [u8; 5] {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        GLYPHS[(code - 0x20) as usize]
    } else {
        GLYPHS[(b'?' - 0x20) as usize]
    }
}

const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
];
