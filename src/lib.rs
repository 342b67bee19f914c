//! Haloframe composes a circular profile picture: an uploaded photo panned and zoomed inside a
//! round frame, with curved banner text over a gradient arc, exported as PNG.
//!
//! The public API is session-oriented:
//!
//! - Build a [`FrameConfig`] (or load one from JSON)
//! - Create an [`EditorSession`], which draws the empty state once
//! - Feed it image loads and [`InputEvent`]s; each visible change redraws the surface
//! - Export the current surface with [`EditorSession::export_png`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Colour, image decode and text shaping facilities.
pub mod assets;
/// PNG export.
pub mod encode;
/// Curved banner text geometry.
pub mod layout;
/// CPU composite renderer.
pub mod render;
/// Data model and configuration.
pub mod scene;
/// Editor session and interaction state machine.
pub mod session;

pub use crate::foundation::core::{Affine, BezPath, Point, Rgba8Premul, SurfaceSize, Vec2};
pub use crate::foundation::error::{HaloError, HaloResult};

pub use crate::assets::color::{HexColor, RgbaColor, hex_to_rgba};
pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::text::{FontSpec, TextEngine, TextMeasure};
pub use crate::encode::png::{DEFAULT_EXPORT_NAME, encode_png, write_png};
pub use crate::layout::arc::{
    ARC_END, ARC_START, ArcTextLayout, BannerGeometry, PlacedChar, layout_arc_text,
};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuRenderer;
pub use crate::scene::config::{FontConfig, FrameConfig};
pub use crate::scene::model::{FrameSnapshot, ImageTransform, TextStyleConfig};
pub use crate::session::editor::{EditorSession, InputEvent, LoadTicket};
pub use crate::session::interaction::{DragState, Interaction};
