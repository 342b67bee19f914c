//! Curved banner text geometry.
//!
//! Angles are radians in the surface's convention: 0 points along +x and angles grow
//! clockwise on screen (y points down). The banner occupies a fixed wedge from
//! [`ARC_START`] (5 o'clock) to [`ARC_END`] (9 o'clock) regardless of text length.

use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::Shape;

use crate::assets::text::{FontSpec, TextMeasure};
use crate::foundation::core::{Affine, BezPath, Point, SurfaceSize};

/// Wedge start (5 o'clock).
pub const ARC_START: f64 = PI / 3.0;
/// Wedge end (9 o'clock).
pub const ARC_END: f64 = PI;
/// Banner thickness as a multiple of the font size.
pub const BANNER_HEIGHT_FACTOR: f64 = 1.5;

const PATH_TOLERANCE: f64 = 0.1;

/// Middle of the wedge, where the text block is centred.
pub fn arc_center_angle() -> f64 {
    (ARC_START + ARC_END) / 2.0
}

/// The stroked backdrop arc behind the text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BannerGeometry {
    /// Centre of the circle (surface centre).
    pub center: Point,
    /// Radius of the stroke's centre line; text sits on this radius too.
    pub radius: f64,
    /// Stroke width.
    pub thickness: f64,
    /// x where the gradient starts (colour stop 0), at the 9 o'clock end of the wedge.
    pub gradient_x0: f64,
    /// x where the gradient ends (colour stop 1), at the 5 o'clock end of the wedge.
    pub gradient_x1: f64,
}

impl BannerGeometry {
    /// Derive banner geometry for a surface and font size.
    ///
    /// The outer edge of the stroke touches the surface's inscribed circle.
    pub fn new(surface: SurfaceSize, font_size_px: f64) -> Self {
        let thickness = font_size_px * BANNER_HEIGHT_FACTOR;
        let radius = surface.half_width() - thickness / 2.0;
        let center = surface.center();
        Self {
            center,
            radius,
            thickness,
            gradient_x0: center.x + ARC_END.cos() * radius,
            gradient_x1: center.x + ARC_START.cos() * radius,
        }
    }

    /// Centre line of the banner.
    pub fn arc(&self) -> kurbo::Arc {
        kurbo::Arc::new(
            self.center,
            (self.radius, self.radius),
            ARC_START,
            ARC_END - ARC_START,
            0.0,
        )
    }

    /// Filled outline of the stroked arc (butt caps).
    pub fn outline(&self) -> BezPath {
        let style = kurbo::Stroke::new(self.thickness).with_caps(kurbo::Cap::Butt);
        kurbo::stroke(
            self.arc().path_elements(PATH_TOLERANCE),
            &style,
            &kurbo::StrokeOpts::default(),
            PATH_TOLERANCE,
        )
    }
}

/// One character placed on the arc.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedChar {
    /// The character.
    pub ch: char,
    /// Index of the character in the caller's (unreversed) string.
    pub source_index: usize,
    /// Placement angle of the character's centre.
    pub angle: f64,
    /// Measured advance width.
    pub width: f64,
}

impl PlacedChar {
    /// Transform taking glyph-local coordinates (origin at the glyph's centre, y down) to
    /// surface coordinates: rotate to the placement angle, push out to the radius, then turn
    /// a further -90 degrees so the glyph stands on the arc.
    pub fn transform(&self, center: Point, radius: f64) -> Affine {
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.angle)
            * Affine::translate((radius, 0.0))
            * Affine::rotate(-FRAC_PI_2)
    }

    /// Surface position of the character's centre.
    pub fn anchor(&self, center: Point, radius: f64) -> Point {
        self.transform(center, radius) * Point::ORIGIN
    }
}

/// Complete layout for one redraw of the banner and its text.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcTextLayout {
    /// Backdrop geometry.
    pub banner: BannerGeometry,
    /// Font used for measurement (and painting).
    pub font: FontSpec,
    /// Width of the reversed string as one unit.
    pub total_width: f64,
    /// `total_width / radius`.
    pub total_angle: f64,
    /// Cursor position before the first character.
    pub start_angle: f64,
    /// Characters in drawing order (the reversed string).
    pub chars: Vec<PlacedChar>,
}

/// Lay `text` out along the banner arc.
///
/// The string is reversed before layout: the cursor advances in increasing angle, which runs
/// right-to-left across the bottom of the circle, so drawing the reversed string is what makes
/// the result read left-to-right. Text wider than the wedge is not clamped; it overruns both
/// ends symmetrically.
pub fn layout_arc_text<M: TextMeasure + ?Sized>(
    text: &str,
    surface: SurfaceSize,
    font: &FontSpec,
    measure: &mut M,
) -> ArcTextLayout {
    let banner = BannerGeometry::new(surface, f64::from(font.size_px));
    let radius = banner.radius;

    let reversed: String = text.chars().rev().collect();
    let total_width = measure.advance(&reversed, font);
    let total_angle = total_width / radius;
    let start_angle = arc_center_angle() - total_angle / 2.0;

    let n = text.chars().count();
    let mut chars = Vec::with_capacity(n);
    let mut cursor = start_angle;
    let mut buf = [0u8; 4];
    for (i, ch) in reversed.chars().enumerate() {
        let width = measure.advance(ch.encode_utf8(&mut buf), font);
        let char_angle = width / radius;
        chars.push(PlacedChar {
            ch,
            source_index: n - 1 - i,
            angle: cursor + char_angle / 2.0,
            width,
        });
        cursor += char_angle;
    }

    ArcTextLayout {
        banner,
        font: font.clone(),
        total_width,
        total_angle,
        start_angle,
        chars,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/arc.rs"]
mod tests;
