/// Hex colour conversion.
pub mod color;
/// Image decoding.
pub mod decode;
/// Font measurement and glyph shaping.
pub mod text;
