//! Fonts, text alignment, and cached text images.
//!
//! Glyph rasterization belongs to the host's rendering backend. The toolkit
//! only needs a text image's extent to center it, so [`TextRasterizer`] is the
//! seam: the backend turns a string into a [`TextImage`] once, and widgets blit
//! that cached image every frame.

use crate::{Color, Size};
use serde::{Deserialize, Serialize};

/// A font description: family name and pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font family
    pub family: String,
    /// Font size in pixels
    pub size: f32,
}

impl Font {
    /// Create a new font description.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// The fonts a panel resolves `style` keys against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSet {
    /// Default widget label font (`"label"`)
    pub label: Font,
    /// Small label font (`"smallLabel"`)
    pub small_label: Font,
    /// Icon glyph font (`"icon"`)
    pub icon: Font,
    /// Header font (`"header"`)
    pub header: Font,
    /// Body copy font (`"body"`)
    pub body: Font,
    /// Footer font (`"footer"`)
    pub footer: Font,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            label: Font::new("Helvetica", 16.0),
            small_label: Font::new("Helvetica", 12.0),
            icon: Font::new("Glyphicons Halflings", 22.0),
            header: Font::new("Helvetica", 48.0),
            body: Font::new("Garamond", 19.0),
            footer: Font::new("Garamond Italic", 14.0),
        }
    }
}

impl FontSet {
    /// Resolve a style key. Unknown keys fall back to the label font.
    #[must_use]
    pub fn get(&self, style: &str) -> &Font {
        match style {
            "icon" => &self.icon,
            "header" => &self.header,
            "body" => &self.body,
            "footer" => &self.footer,
            "smallLabel" => &self.small_label,
            _ => &self.label,
        }
    }
}

/// Horizontal text alignment within a text image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Flush left
    Left,
    /// Flush right
    Right,
    /// Centered
    #[default]
    Center,
}

impl TextAlign {
    /// Parse a `justification` value; anything but `left`/`right` centers.
    #[must_use]
    pub fn from_justification(value: &str) -> Self {
        match value {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Center,
        }
    }
}

/// Text laid out and rasterized once, ready to be blitted.
#[derive(Debug, Clone, PartialEq)]
pub struct TextImage {
    /// Source text
    pub text: String,
    /// Font used
    pub font: Font,
    /// Text color
    pub color: Color,
    /// Alignment within `size.width`
    pub align: TextAlign,
    /// Pixel extent of the image
    pub size: Size,
    /// Laid-out lines
    pub lines: Vec<String>,
}

/// Turns strings into cached [`TextImage`]s.
pub trait TextRasterizer {
    /// Lay out and rasterize `text`, wrapping at `max_width`.
    fn rasterize(
        &self,
        text: &str,
        font: &Font,
        color: Color,
        align: TextAlign,
        max_width: f32,
    ) -> TextImage;
}

/// Rasterizer using fixed glyph metrics.
///
/// Each glyph advances `0.6 * size` and each line is `1.2 * size` tall. Useful
/// for headless hosts and tests; GPU backends supply their own rasterizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsRasterizer;

impl MetricsRasterizer {
    const ADVANCE: f32 = 0.6;
    const LINE_HEIGHT: f32 = 1.2;

    fn wrap(text: &str, advance: f32, max_width: f32) -> Vec<String> {
        let max_chars = if advance > 0.0 && max_width > 0.0 {
            ((max_width / advance).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let needed = if line.is_empty() {
                    word.chars().count()
                } else {
                    line.chars().count() + 1 + word.chars().count()
                };
                if needed > max_chars && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
            }
            lines.push(line);
        }
        lines
    }
}

impl TextRasterizer for MetricsRasterizer {
    fn rasterize(
        &self,
        text: &str,
        font: &Font,
        color: Color,
        align: TextAlign,
        max_width: f32,
    ) -> TextImage {
        let advance = font.size * Self::ADVANCE;
        let lines = Self::wrap(text, advance, max_width);
        let height = lines.len() as f32 * font.size * Self::LINE_HEIGHT;
        // The image grows vertically and spans the full layout width, like a
        // text box sized (width, grow).
        let width = if max_width > 0.0 {
            max_width
        } else {
            lines
                .iter()
                .map(|l| l.chars().count() as f32 * advance)
                .fold(0.0, f32::max)
        };

        TextImage {
            text: text.to_string(),
            font: font.clone(),
            color,
            align,
            size: Size::new(width, height),
            lines,
        }
    }
}
