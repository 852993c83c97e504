// SYNOID Shorts Frame Composer
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Lays out the hook inside the label band and the wrapped body below it,
// then rasterizes the still frame the clip is built from. Layout is pure
// arithmetic over `TextMeasure`, so it can be checked without a font file.

use crate::agent::fonts::{FontFace, TextBox, TextMeasure};
use crate::agent::io_shield::FrameFile;
use crate::config::{BodyPlacement, LayoutConfig, PathsConfig};
use image::{ImageError, Rgb, RgbImage};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: TextBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub hook: PlacedLine,
    pub body: Vec<PlacedLine>,
}

/// Horizontal offset that centres `text_width` on `canvas_width`.
pub fn center_offset(canvas_width: u32, text_width: u32) -> f32 {
    (canvas_width as f32 - text_width as f32) / 2.0
}

/// Greedy word wrap by character count. Words longer than `max_chars`
/// are kept whole on their own line.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl FrameLayout {
    pub fn compute(
        hook: &str,
        body: &str,
        layout: &LayoutConfig,
        hook_font: &impl TextMeasure,
        body_font: &impl TextMeasure,
    ) -> Self {
        let hook_size = hook_font.measure(hook);
        let hook_line = PlacedLine {
            text: hook.to_string(),
            x: center_offset(layout.canvas_width, hook_size.width),
            y: layout.label_top as f32
                + (layout.label_height as f32 - hook_size.height as f32) / 2.0
                - layout.hook_optical_offset,
            size: hook_size,
        };

        let wrapped = wrap_words(body, layout.max_chars_per_line);
        let sizes: Vec<TextBox> = wrapped.iter().map(|l| body_font.measure(l)).collect();
        let padding = layout.line_padding as f32;

        let mut y = match layout.body_placement {
            BodyPlacement::FixedFraction { fraction } => {
                (layout.canvas_height as f32 * fraction).floor()
            }
            BodyPlacement::CenteredBelowLabel => {
                let area_top = (layout.label_top + layout.label_height) as f32;
                let block: f32 = sizes.iter().map(|s| s.height as f32).sum::<f32>()
                    + padding * sizes.len().saturating_sub(1) as f32;
                area_top + (layout.canvas_height as f32 - area_top - block) / 2.0
            }
        };

        let mut body_lines = Vec::with_capacity(wrapped.len());
        for (text, size) in wrapped.into_iter().zip(sizes) {
            body_lines.push(PlacedLine {
                x: center_offset(layout.canvas_width, size.width),
                y,
                text,
                size,
            });
            y += size.height as f32 + padding;
        }

        Self {
            hook: hook_line,
            body: body_lines,
        }
    }
}

pub struct FrameComposer {
    layout: LayoutConfig,
    face: FontFace,
}

impl FrameComposer {
    pub fn new(layout: LayoutConfig, paths: &PathsConfig) -> Self {
        let face = FontFace::load(&paths.font, &paths.fallback_fonts);
        Self { layout, face }
    }

    pub fn with_face(layout: LayoutConfig, face: FontFace) -> Self {
        Self { layout, face }
    }

    pub fn layout_for(&self, hook: &str, body: &str) -> FrameLayout {
        FrameLayout::compute(
            hook,
            body,
            &self.layout,
            &self.face.sized(self.layout.hook_font_size),
            &self.face.sized(self.layout.body_font_size),
        )
    }

    pub fn compose(&self, hook: &str, body: &str) -> RgbImage {
        let l = &self.layout;
        let mut canvas = RgbImage::from_pixel(l.canvas_width, l.canvas_height, Rgb(l.background));

        let label_bottom = (l.label_top + l.label_height).min(l.canvas_height);
        for y in l.label_top.min(l.canvas_height)..label_bottom {
            for x in 0..l.canvas_width {
                canvas.put_pixel(x, y, Rgb(l.label_fill));
            }
        }

        let frame = self.layout_for(hook, body);
        let hook_font = self.face.sized(l.hook_font_size);
        hook_font.draw(&mut canvas, frame.hook.x, frame.hook.y, &frame.hook.text, l.hook_color);

        let body_font = self.face.sized(l.body_font_size);
        for line in &frame.body {
            body_font.draw(&mut canvas, line.x, line.y, &line.text, l.body_color);
        }
        canvas
    }

    /// Render and save the frame. The returned guard deletes the file when
    /// dropped; a failed save removes any partial file straight away.
    pub fn write_frame(&self, hook: &str, body: &str, path: &Path) -> Result<FrameFile, ImageError> {
        let guard = FrameFile::new(path);
        let canvas = self.compose(hook, body);
        canvas.save(guard.path())?;
        info!(
            "[FRAME] 🖼️ Frame written: {:?} ({}x{})",
            guard.path(),
            canvas.width(),
            canvas.height()
        );
        Ok(guard)
    }
}
