use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{HaloError, HaloResult};
use crate::render::backend::FrameRGBA;

/// File name offered for downloads.
pub const DEFAULT_EXPORT_NAME: &str = "profile-picture.png";

/// Encode a frame as PNG (straight alpha, RGBA8).
pub fn encode_png(frame: &FrameRGBA) -> HaloResult<Vec<u8>> {
    let straight = frame.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| HaloError::validation("invalid rgba buffer size"))?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

/// Encode a frame and write it to `path`.
pub fn write_png(frame: &FrameRGBA, path: impl AsRef<Path>) -> HaloResult<()> {
    let path = path.as_ref();
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
