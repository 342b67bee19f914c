/// Result alias used across the crate.
pub type HaloResult<T> = Result<T, HaloError>;

/// Errors surfaced at the crate's boundaries.
///
/// Rendering itself never fails on "empty" states (no image, empty text, malformed hex in the
/// colour utility). Errors only come from inputs that cannot be turned into a surface: invalid
/// configuration, undecodable image bytes, out-of-range control values and encoding failures.
#[derive(thiserror::Error, Debug)]
pub enum HaloError {
    /// A configuration or control value is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be decoded into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// The raster backend rejected an operation.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HaloError {
    /// Build a [`HaloError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HaloError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`HaloError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HaloError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
