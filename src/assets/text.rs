use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::error::{HaloError, HaloResult};

/// Font selection for banner text.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// CSS-style family list, e.g. `sans-serif` or a registered family name.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// OpenType weight (400 regular, 700 bold).
    pub weight: f32,
}

impl FontSpec {
    /// Default generic family.
    pub const DEFAULT_FAMILY: &'static str = "sans-serif";
    /// Banner text is always bold.
    pub const BOLD: f32 = 700.0;

    /// Bold `sans-serif` at `size_px`.
    pub fn bold_sans(size_px: f32) -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_owned(),
            size_px,
            weight: Self::BOLD,
        }
    }
}

/// Anything that can report the rendered advance width of a string.
///
/// The arc layout takes both the whole-string width and each character's width from the same
/// measurer so the two stay consistent.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels.
    fn advance(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// A glyph positioned relative to the shaped string's origin (top-left of the line box).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph id within the run's font.
    pub id: u32,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position (baseline already applied).
    pub y: f32,
}

/// One font run of shaped glyphs.
#[derive(Clone, Debug)]
pub struct ShapedRun {
    /// Font the glyph ids index into.
    pub font: vello_cpu::peniko::FontData,
    /// Size the run was shaped at.
    pub font_size: f32,
    /// Positioned glyphs.
    pub glyphs: Vec<PositionedGlyph>,
}

/// A single line of shaped text plus the metrics needed to centre it.
#[derive(Clone, Debug, Default)]
pub struct ShapedText {
    /// Advance width including trailing whitespace.
    pub width: f64,
    /// Baseline offset from the top of the line box.
    pub baseline: f32,
    /// Font ascent.
    pub ascent: f32,
    /// Font descent (positive, below the baseline).
    pub descent: f32,
    /// Glyph runs in visual order.
    pub runs: Vec<ShapedRun>,
}

impl ShapedText {
    /// Offset that moves the shaped string so its horizontal centre and the middle of its em box
    /// sit on the local origin.
    pub fn center_offset(&self) -> (f64, f64) {
        let middle = f64::from(self.baseline) - f64::from(self.ascent - self.descent) / 2.0;
        (-self.width / 2.0, -middle)
    }

    /// `true` when there is nothing to paint.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.glyphs.is_empty())
    }
}

/// Parley-backed shaping and measurement.
///
/// Fonts resolve from the system collection unless font bytes are registered explicitly.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    warned_missing_font: bool,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("cached_fonts", &self.font_cache.len())
            .finish_non_exhaustive()
    }
}

impl TextEngine {
    /// Construct an engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            font_cache: HashMap::new(),
            warned_missing_font: false,
        }
    }

    /// Register font bytes and return the family name to use in a [`FontSpec`].
    pub fn register_font(&mut self, font_bytes: Vec<u8>) -> HaloResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            HaloError::validation("no font families registered from font bytes")
        })?;

        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HaloError::validation("registered font family has no name"))?
            .to_string();
        tracing::debug!(family = %name, "registered font");
        Ok(name)
    }

    /// Shape `text` as a single unbroken line.
    pub fn shape(&mut self, text: &str, font: &FontSpec) -> ShapedText {
        if text.is_empty() || !font.size_px.is_finite() || font.size_px <= 0.0 {
            return ShapedText::default();
        }

        // One line only: line breaks measure and render as spaces.
        let text: Cow<'_, str> = if text.contains(['\n', '\r']) {
            Cow::Owned(text.replace(['\n', '\r'], " "))
        } else {
            Cow::Borrowed(text)
        };
        let text: &str = &text;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(font.weight),
        ));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut out = ShapedText {
            width: f64::from(layout.full_width()),
            ..ShapedText::default()
        };
        for (i, line) in layout.lines().enumerate() {
            if i == 0 {
                let m = line.metrics();
                out.baseline = m.baseline;
                out.ascent = m.ascent;
                out.descent = m.descent;
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let run = glyph_run.run();
                let font_data = run.font();
                let key = (font_data.data.id(), font_data.index);
                let peniko_font = self
                    .font_cache
                    .entry(key)
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(font_data.data.data().to_vec()),
                            font_data.index,
                        )
                    })
                    .clone();
                let glyphs = glyph_run
                    .positioned_glyphs()
                    .map(|g| PositionedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                out.runs.push(ShapedRun {
                    font: peniko_font,
                    font_size: run.font_size(),
                    glyphs,
                });
            }
        }

        if out.is_empty() && !text.trim().is_empty() && !self.warned_missing_font {
            self.warned_missing_font = true;
            tracing::warn!(family = %font.family, "no font resolved; text will not be painted");
        }
        out
    }
}

impl TextMeasure for TextEngine {
    fn advance(&mut self, text: &str, font: &FontSpec) -> f64 {
        self.shape(text, font).width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
