use crate::foundation::error::{HaloError, HaloResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// The square raster target. Width and height are both `px`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Edge length in pixels.
    pub px: u32,
}

impl SurfaceSize {
    /// Create a validated surface size.
    ///
    /// The CPU raster backend addresses pixels with `u16`, so edges above `u16::MAX` are
    /// rejected together with zero.
    pub fn new(px: u32) -> HaloResult<Self> {
        if px == 0 {
            return Err(HaloError::validation("surface size must be > 0"));
        }
        if px > u32::from(u16::MAX) {
            return Err(HaloError::validation(format!(
                "surface size {px} exceeds {}",
                u16::MAX
            )));
        }
        Ok(Self { px })
    }

    /// Edge length as `f64`.
    pub fn width(self) -> f64 {
        f64::from(self.px)
    }

    /// Radius of the inscribed clip circle.
    pub fn half_width(self) -> f64 {
        self.width() / 2.0
    }

    /// Centre of the surface, which is also the centre of the clip circle.
    pub fn center(self) -> Point {
        Point::new(self.half_width(), self.half_width())
    }

    pub(crate) fn edge_u16(self) -> u16 {
        // Range is enforced by `new`.
        u16::try_from(self.px).unwrap_or(u16::MAX)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: mul_div255(r, a),
            g: mul_div255(g, a),
            b: mul_div255(b, a),
            a,
        }
    }

    /// Linear interpolation in premultiplied space, `t` clamped to [0,1].
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let af = f64::from(a);
            let bf = f64::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub(crate) fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub(crate) fn mul_div255(c: u8, a: u8) -> u8 {
    (((u16::from(c) * u16::from(a)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
