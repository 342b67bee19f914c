use std::sync::Arc;

use kurbo::Shape;

use crate::assets::decode::DecodedImage;
use crate::assets::text::TextEngine;
use crate::foundation::core::{Affine, BezPath, Rgba8Premul, SurfaceSize};
use crate::foundation::error::{HaloError, HaloResult};
use crate::layout::arc::{ArcTextLayout, BannerGeometry, layout_arc_text};
use crate::render::backend::FrameRGBA;
use crate::scene::model::{FrameSnapshot, ImageTransform};

const CLIP_TOLERANCE: f64 = 0.1;

#[derive(Clone)]
struct ImagePaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    start: [u8; 4],
    end: [u8; 4],
    x0_bits: u64,
    x1_bits: u64,
}

/// Composite renderer on top of `vello_cpu`.
///
/// Each call to [`CpuRenderer::render`] clears the surface and repaints it completely: the
/// circularly clipped image first, then the gradient banner, then the curved text.
pub struct CpuRenderer {
    surface: SurfaceSize,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: vello_cpu::Pixmap,
    text: TextEngine,
    image_cache: Option<ImagePaint>,
    gradient_cache: Option<(GradientKey, vello_cpu::Image)>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("surface", &self.surface)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl CpuRenderer {
    /// Create a renderer for a square surface.
    pub fn new(surface: SurfaceSize, text: TextEngine) -> Self {
        let edge = surface.edge_u16();
        Self {
            surface,
            ctx: None,
            pixmap: vello_cpu::Pixmap::new(edge, edge),
            text,
            image_cache: None,
            gradient_cache: None,
        }
    }

    /// Surface this renderer paints.
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Text engine used for measurement and shaping.
    pub fn text_engine_mut(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    /// Compute the banner text layout for a snapshot without painting it.
    pub fn layout_text(&mut self, snap: &FrameSnapshot<'_>) -> ArcTextLayout {
        let font = snap.style.font(snap.font_family);
        layout_arc_text(&snap.style.text, snap.surface, &font, &mut self.text)
    }

    /// Repaint the whole surface from `snap` and read it back.
    #[tracing::instrument(
        skip_all,
        fields(
            surface = snap.surface.px,
            has_image = snap.image.is_some(),
            text_chars = snap.style.text.chars().count()
        )
    )]
    pub fn render(&mut self, snap: &FrameSnapshot<'_>) -> HaloResult<FrameRGBA> {
        if snap.surface != self.surface {
            let edge = snap.surface.edge_u16();
            self.surface = snap.surface;
            self.pixmap = vello_cpu::Pixmap::new(edge, edge);
            self.gradient_cache = None;
        }
        let edge = self.surface.edge_u16();
        clear_pixmap_to_transparent(&mut self.pixmap);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == edge && ctx.height() == edge => ctx,
            _ => vello_cpu::RenderContext::new(edge, edge),
        };
        ctx.reset();

        let drawn = self.draw_layers(&mut ctx, snap);
        if drawn.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut self.pixmap);
        }
        self.ctx = Some(ctx);
        drawn?;

        Ok(FrameRGBA {
            width: self.surface.px,
            height: self.surface.px,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_layers(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        snap: &FrameSnapshot<'_>,
    ) -> HaloResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match snap.image {
            Some(img) if !img.is_empty() => self.draw_clipped_image(ctx, img, snap.transform)?,
            Some(_) => tracing::debug!("image has zero area; skipping"),
            None => {}
        }

        if !snap.style.text.is_empty() {
            self.draw_banner_text(ctx, snap)?;
        }
        Ok(())
    }

    fn draw_clipped_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        img: &DecodedImage,
        transform: ImageTransform,
    ) -> HaloResult<()> {
        let p = self.image_paint_for(img)?;
        let clip = kurbo::Circle::new(self.surface.center(), self.surface.half_width())
            .to_path(CLIP_TOLERANCE);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&bezpath_to_cpu(&clip));
        ctx.set_transform(affine_to_cpu(transform.image_to_surface(p.w, p.h)));
        ctx.set_paint(p.paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(p.w),
            f64::from(p.h),
        ));
        ctx.pop_layer();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn draw_banner_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        snap: &FrameSnapshot<'_>,
    ) -> HaloResult<()> {
        let style = snap.style;
        let banner = BannerGeometry::new(snap.surface, f64::from(style.font_size_px));
        if banner.radius <= 0.0 {
            tracing::warn!(
                font_size_px = style.font_size_px,
                "banner is thicker than the frame; skipping banner and text"
            );
            return Ok(());
        }

        let start = style
            .banner_color_1
            .with_alpha(style.banner_opacity)
            .to_rgba8_premul();
        let end = style
            .banner_color_2
            .with_alpha(style.banner_opacity)
            .to_rgba8_premul();
        let gradient = self.gradient_paint(start, end, banner.gradient_x0, banner.gradient_x1)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(gradient);
        ctx.fill_path(&bezpath_to_cpu(&banner.outline()));

        let layout = self.layout_text(snap);
        let color = style.text_color.with_alpha(1.0);
        let mut buf = [0u8; 4];
        for placed in &layout.chars {
            let shaped = self.text.shape(placed.ch.encode_utf8(&mut buf), &layout.font);
            if shaped.is_empty() {
                continue;
            }
            let (dx, dy) = shaped.center_offset();
            let tr = placed.transform(banner.center, banner.radius)
                * Affine::translate((dx, dy));
            ctx.set_transform(affine_to_cpu(tr));
            for run in &shaped.runs {
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, 255,
                ));
                let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&run.font)
                    .font_size(run.font_size)
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        tracing::debug!(
            chars = layout.chars.len(),
            start_angle = layout.start_angle,
            "painted banner text"
        );
        Ok(())
    }

    fn image_paint_for(&mut self, img: &DecodedImage) -> HaloResult<ImagePaint> {
        if let Some(p) = &self.image_cache
            && Arc::ptr_eq(&p.source, &img.rgba8_premul)
        {
            return Ok(p.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
        let out = ImagePaint {
            source: Arc::clone(&img.rgba8_premul),
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: img.width,
            h: img.height,
        };
        self.image_cache = Some(out.clone());
        Ok(out)
    }

    /// Horizontal linear gradient covering the surface: `start` at `x0`, `end` at `x1`, padded
    /// beyond both stops. Only the most recent gradient is kept.
    fn gradient_paint(
        &mut self,
        start: Rgba8Premul,
        end: Rgba8Premul,
        x0: f64,
        x1: f64,
    ) -> HaloResult<vello_cpu::Image> {
        let key = GradientKey {
            start: start.to_array(),
            end: end.to_array(),
            x0_bits: x0.to_bits(),
            x1_bits: x1.to_bits(),
        };
        if let Some((cached, img)) = &self.gradient_cache
            && *cached == key
        {
            return Ok(img.clone());
        }
        let w = self.surface.px;
        let h = self.surface.px;
        let span = x1 - x0;
        let row: Vec<[u8; 4]> = (0..w)
            .map(|x| {
                let t = if span.abs() <= f64::EPSILON {
                    0.0
                } else {
                    (f64::from(x) + 0.5 - x0) / span
                };
                start.lerp(end, t).to_array()
            })
            .collect();
        let mut bytes = Vec::with_capacity((w as usize) * (h as usize) * 4);
        for _ in 0..h {
            for px in &row {
                bytes.extend_from_slice(px);
            }
        }
        let pixmap = pixmap_from_premul_bytes(&bytes, w, h)?;
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.gradient_cache = Some((key, img.clone()));
        Ok(img)
    }
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> HaloResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HaloError::render(format!("image width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HaloError::render(format!("image height {height} exceeds u16")))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(HaloError::render("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
