use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{HaloError, HaloResult};

/// Straight-alpha colour as produced by [`hex_to_rgba`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    /// Red, 0..=255.
    pub r: u8,
    /// Green, 0..=255.
    pub g: u8,
    /// Blue, 0..=255.
    pub b: u8,
    /// Alpha exactly as supplied by the caller.
    pub a: f64,
}

impl RgbaColor {
    /// Convert to the surface's premultiplied RGBA8, clamping alpha to [0,1].
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let a = if self.a.is_finite() {
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }
}

/// Convert a `#RRGGBB` string and an opacity into an [`RgbaColor`].
///
/// Bytes are read from fixed positions after the leading `#`. A pair that is missing or not
/// hexadecimal yields `0` for that channel; callers are expected to hand in validated hex.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> RgbaColor {
    let channel = |range: std::ops::Range<usize>| -> u8 {
        hex.get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    RgbaColor {
        r: channel(1..3),
        g: channel(3..5),
        b: channel(5..7),
        a: alpha,
    }
}

/// A validated `#RRGGBB` colour as handed out by a colour-picker control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse and validate a `#RRGGBB` string (case-insensitive).
    pub fn parse(s: &str) -> HaloResult<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| HaloError::validation(format!("hex color \"{s}\" must start with '#'")))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HaloError::validation(format!(
                "hex color \"{s}\" must be #RRGGBB"
            )));
        }
        Ok(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    /// Build from channel bytes.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// The normalized `#rrggbb` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shorthand for [`hex_to_rgba`] on this colour.
    pub fn with_alpha(&self, alpha: f64) -> RgbaColor {
        hex_to_rgba(&self.0, alpha)
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
