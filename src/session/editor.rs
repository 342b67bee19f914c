use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::color::HexColor;
use crate::assets::decode::{DecodedImage, decode_image};
use crate::assets::text::TextEngine;
use crate::encode::png::{DEFAULT_EXPORT_NAME, encode_png, write_png};
use crate::foundation::core::{Point, SurfaceSize};
use crate::foundation::error::{HaloError, HaloResult};
use crate::layout::arc::ArcTextLayout;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuRenderer;
use crate::scene::config::FrameConfig;
use crate::scene::model::{FrameSnapshot, ImageTransform, TextStyleConfig};
use crate::session::interaction::{DragState, Interaction};

/// Identifies one image selection. Only the most recent ticket may complete a load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Discrete input coming from the pointer and the style controls.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a surface position.
    PointerDown(Point),
    /// Pointer moved to a surface position.
    PointerMove(Point),
    /// Pointer released.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
    /// Zoom slider moved (raw value, clamped to the configured range).
    Zoom(f64),
    /// Banner text edited.
    Text(String),
    /// Text colour picked.
    TextColor(HexColor),
    /// First banner colour picked.
    BannerColor1(HexColor),
    /// Second banner colour picked.
    BannerColor2(HexColor),
    /// Banner opacity slider moved.
    BannerOpacity(f64),
    /// Font size slider moved.
    FontSize(u32),
}

/// Application state plus the renderer that draws it.
///
/// The session is single-threaded: every handler runs to completion and redraws synchronously
/// when the visible state changed. Constructing a session renders the empty state once.
#[derive(Debug)]
pub struct EditorSession {
    config: FrameConfig,
    surface: SurfaceSize,
    font_family: String,
    image: Option<DecodedImage>,
    interaction: Interaction,
    style: TextStyleConfig,
    zoom_control: f64,
    renderer: CpuRenderer,
    frame: FrameRGBA,
    latest_ticket: u64,
    redraws: u64,
}

impl EditorSession {
    /// Validate `config`, resolve the font source and draw the initial frame.
    pub fn new(config: FrameConfig) -> HaloResult<Self> {
        config.validate()?;
        let surface = config.surface()?;

        let mut text = TextEngine::new();
        let font_family = match &config.font.path {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read font '{}'", path.display()))?;
                text.register_font(bytes)?
            }
            None => config.font.family.clone(),
        };

        let mut session = Self {
            surface,
            font_family,
            image: None,
            interaction: Interaction::new(surface),
            style: config.style.clone(),
            zoom_control: 1.0,
            renderer: CpuRenderer::new(surface, text),
            frame: FrameRGBA::transparent(surface.px, surface.px),
            latest_ticket: 0,
            redraws: 0,
            config,
        };
        session.redraw()?;
        tracing::debug!(surface = surface.px, family = %session.font_family, "session ready");
        Ok(session)
    }

    /// Apply one input event. Returns `true` when the surface was redrawn.
    ///
    /// Out-of-range control values are rejected and leave the state untouched.
    pub fn handle(&mut self, event: InputEvent) -> HaloResult<bool> {
        let has_image = self.image.is_some();
        let changed = match event {
            InputEvent::PointerDown(p) => self.interaction.pointer_down(p, has_image),
            InputEvent::PointerMove(p) => self.interaction.pointer_move(p, has_image),
            InputEvent::PointerUp => self.interaction.pointer_up(),
            InputEvent::PointerLeave => self.interaction.pointer_leave(),
            InputEvent::Zoom(raw) => {
                let value = self.config.clamp_zoom(raw);
                self.zoom_control = value;
                self.interaction.set_zoom(value, has_image)?
            }
            InputEvent::Text(text) => {
                self.style.text = text;
                true
            }
            InputEvent::TextColor(c) => {
                self.style.text_color = c;
                true
            }
            InputEvent::BannerColor1(c) => {
                self.style.banner_color_1 = c;
                true
            }
            InputEvent::BannerColor2(c) => {
                self.style.banner_color_2 = c;
                true
            }
            InputEvent::BannerOpacity(v) => {
                if !(0.0..=1.0).contains(&v) {
                    return Err(HaloError::validation(format!(
                        "banner opacity must be in [0,1], got {v}"
                    )));
                }
                self.style.banner_opacity = v;
                true
            }
            InputEvent::FontSize(px) => {
                if px == 0 {
                    return Err(HaloError::validation("font size must be > 0"));
                }
                self.style.font_size_px = px;
                true
            }
        };
        if changed {
            self.redraw()?;
        }
        Ok(changed)
    }

    /// Register a new image selection. Any load still pending becomes stale.
    pub fn begin_image_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        LoadTicket(self.latest_ticket)
    }

    /// Finish a load by decoding `bytes`.
    ///
    /// Returns `Ok(false)` when `ticket` has been superseded. Decode failures leave the current
    /// image in place.
    pub fn complete_image_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> HaloResult<bool> {
        if !self.is_current(ticket) {
            tracing::warn!(ticket = ticket.0, "ignoring stale image load");
            return Ok(false);
        }
        let image = decode_image(bytes)?;
        self.complete_decoded_load(ticket, image)
    }

    /// Finish a load with an already decoded bitmap.
    pub fn complete_decoded_load(
        &mut self,
        ticket: LoadTicket,
        image: DecodedImage,
    ) -> HaloResult<bool> {
        if !self.is_current(ticket) {
            tracing::warn!(ticket = ticket.0, "ignoring stale image load");
            return Ok(false);
        }
        let max = u32::from(u16::MAX);
        if image.width > max || image.height > max {
            return Err(HaloError::validation(format!(
                "image {}x{} exceeds {max}px per edge",
                image.width, image.height
            )));
        }
        tracing::debug!(width = image.width, height = image.height, "image loaded");
        self.image = Some(image);
        self.interaction.reset(self.surface);
        self.zoom_control = 1.0;
        self.redraw()?;
        Ok(true)
    }

    /// Begin and complete a load in one step.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> HaloResult<()> {
        let ticket = self.begin_image_load();
        self.complete_image_load(ticket, bytes).map(|_| ())
    }

    /// The most recently rendered surface.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Number of redraws performed so far, including the initial one.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Surface size.
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Current image placement.
    pub fn transform(&self) -> ImageTransform {
        self.interaction.transform()
    }

    /// Current drag state.
    pub fn drag(&self) -> DragState {
        self.interaction.drag()
    }

    /// Value the zoom control currently displays.
    pub fn zoom_control(&self) -> f64 {
        self.zoom_control
    }

    /// Current text style.
    pub fn style(&self) -> &TextStyleConfig {
        &self.style
    }

    /// `true` once an image has been loaded.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Layout the current text would be drawn with.
    pub fn text_layout(&mut self) -> ArcTextLayout {
        let snap = FrameSnapshot {
            surface: self.surface,
            image: self.image.as_ref(),
            transform: self.interaction.transform(),
            style: &self.style,
            font_family: &self.font_family,
        };
        self.renderer.layout_text(&snap)
    }

    /// PNG bytes of exactly the current surface.
    #[tracing::instrument(skip_all)]
    pub fn export_png(&self) -> HaloResult<Vec<u8>> {
        encode_png(&self.frame)
    }

    /// Write the current surface to `dir/profile-picture.png`.
    #[tracing::instrument(skip(self))]
    pub fn export_to_dir(&self, dir: &Path) -> HaloResult<PathBuf> {
        let path = dir.join(DEFAULT_EXPORT_NAME);
        write_png(&self.frame, &path)?;
        Ok(path)
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    fn redraw(&mut self) -> HaloResult<()> {
        let snap = FrameSnapshot {
            surface: self.surface,
            image: self.image.as_ref(),
            transform: self.interaction.transform(),
            style: &self.style,
            font_family: &self.font_family,
        };
        self.frame = self.renderer.render(&snap)?;
        self.redraws += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
