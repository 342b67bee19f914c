use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{HaloError, HaloResult};
use crate::scene::model::TextStyleConfig;

/// Default surface edge in pixels.
pub const DEFAULT_SURFACE_PX: u32 = 500;
/// Default zoom slider range.
pub const DEFAULT_ZOOM_RANGE: [f64; 2] = [0.1, 5.0];

/// Font source for the banner text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Family list resolved against system fonts (ignored when `path` is set).
    pub family: String,
    /// Font file to register and use instead of a system family.
    pub path: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: crate::assets::text::FontSpec::DEFAULT_FAMILY.to_owned(),
            path: None,
        }
    }
}

/// Editor configuration: surface, font source, initial style and control ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Square surface edge in pixels.
    pub surface_px: u32,
    /// Font source.
    pub font: FontConfig,
    /// Initial text style.
    pub style: TextStyleConfig,
    /// `[min, max]` the zoom control clamps to.
    pub zoom_range: [f64; 2],
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            surface_px: DEFAULT_SURFACE_PX,
            font: FontConfig::default(),
            style: TextStyleConfig::default(),
            zoom_range: DEFAULT_ZOOM_RANGE,
        }
    }
}

impl FrameConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> HaloResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| HaloError::serde(format!("parse frame config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HaloResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open frame config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every range the controls are expected to respect.
    pub fn validate(&self) -> HaloResult<()> {
        SurfaceSize::new(self.surface_px)?;
        self.style.validate()?;
        let [min, max] = self.zoom_range;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(HaloError::validation(format!(
                "zoom_range must satisfy 0 < min <= max, got [{min}, {max}]"
            )));
        }
        Ok(())
    }

    /// The validated surface size.
    pub fn surface(&self) -> HaloResult<SurfaceSize> {
        SurfaceSize::new(self.surface_px)
    }

    /// Clamp a raw slider value into the zoom range. Non-finite values fall back to 1.0.
    pub fn clamp_zoom(&self, value: f64) -> f64 {
        let [min, max] = self.zoom_range;
        if value.is_finite() {
            value.clamp(min, max)
        } else {
            1.0_f64.clamp(min, max)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
