use serde::{Deserialize, Serialize};

use crate::assets::color::HexColor;
use crate::assets::decode::DecodedImage;
use crate::assets::text::FontSpec;
use crate::foundation::core::{Affine, Point, SurfaceSize, Vec2};
use crate::foundation::error::{HaloError, HaloResult};

/// Placement of the uploaded bitmap: `offset` is where the image's centre lands on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Screen x of the image centre.
    pub offset_x: f64,
    /// Screen y of the image centre.
    pub offset_y: f64,
    /// Positive size multiplier, 1.0 is native size.
    pub scale: f64,
}

impl ImageTransform {
    /// Centred on the surface at native size.
    pub fn centered(surface: SurfaceSize) -> Self {
        let c = surface.center();
        Self {
            offset_x: c.x,
            offset_y: c.y,
            scale: 1.0,
        }
    }

    /// Image centre as a point.
    pub fn center(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Move the image centre.
    pub fn set_center(&mut self, p: Point) {
        self.offset_x = p.x;
        self.offset_y = p.y;
    }

    /// Affine mapping image pixel space onto the surface.
    pub fn image_to_surface(&self, width: u32, height: u32) -> Affine {
        let w = f64::from(width) * self.scale;
        let h = f64::from(height) * self.scale;
        Affine::translate(Vec2::new(self.offset_x - w / 2.0, self.offset_y - h / 2.0))
            * Affine::scale(self.scale)
    }
}

/// Text and banner styling, as produced by the style controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextStyleConfig {
    /// Banner text; empty disables the banner entirely.
    pub text: String,
    /// Glyph colour (always fully opaque).
    pub text_color: HexColor,
    /// Gradient colour at the 9 o'clock end.
    pub banner_color_1: HexColor,
    /// Gradient colour at the 5 o'clock end.
    pub banner_color_2: HexColor,
    /// Banner opacity in [0,1].
    pub banner_opacity: f64,
    /// Font size in pixels.
    pub font_size_px: u32,
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: HexColor::from_rgb(0xff, 0xff, 0xff),
            banner_color_1: HexColor::from_rgb(0x0a, 0x66, 0xc2),
            banner_color_2: HexColor::from_rgb(0x2e, 0xcc, 0x71),
            banner_opacity: 0.85,
            font_size_px: 24,
        }
    }
}

impl TextStyleConfig {
    /// Check the ranges the controls guarantee.
    pub fn validate(&self) -> HaloResult<()> {
        if self.font_size_px == 0 {
            return Err(HaloError::validation("font_size_px must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.banner_opacity) {
            return Err(HaloError::validation(format!(
                "banner_opacity must be in [0,1], got {}",
                self.banner_opacity
            )));
        }
        Ok(())
    }

    /// Bold font at the configured size in `family`.
    pub fn font(&self, family: &str) -> FontSpec {
        FontSpec {
            family: family.to_owned(),
            size_px: self.font_size_px as f32,
            weight: FontSpec::BOLD,
        }
    }
}

/// Immutable view of everything one redraw needs.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    /// Target surface.
    pub surface: SurfaceSize,
    /// Loaded image, if any.
    pub image: Option<&'a DecodedImage>,
    /// Current image placement.
    pub transform: ImageTransform,
    /// Current text style.
    pub style: &'a TextStyleConfig,
    /// Font family to shape with.
    pub font_family: &'a str,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
