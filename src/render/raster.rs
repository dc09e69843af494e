//! CPU raster [`Surface`] backed by `vello_cpu`, with Parley text.

use std::sync::Arc;

use kurbo::Shape;

use crate::draw::surface::{Paint, Surface, TextAlign, TextStyle};
use crate::draw::text::{FontLibrary, TextLayoutEngine, approximate_width};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{LifegridError, LifegridResult};
use crate::render::backend::FrameRGBA;

/// Raster backend: paints into a `vello_cpu::RenderContext` sized to the canvas.
pub struct RasterSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    text: TextLayoutEngine,
    depth: usize,
}

impl RasterSurface {
    /// Create a surface; with an empty `fonts` text is measured approximately and not drawn.
    pub fn new(canvas: Canvas, fonts: &FontLibrary) -> LifegridResult<Self> {
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| LifegridError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| LifegridError::render("canvas height exceeds u16"))?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            text: TextLayoutEngine::new(fonts),
            depth: 0,
        })
    }

    /// Flush pending work and read back the frame (premultiplied RGBA8).
    pub fn finish(mut self) -> LifegridResult<FrameRGBA> {
        while self.depth > 0 {
            tracing::warn!("closing unbalanced opacity layer");
            self.pop_layer();
        }
        let (w, h) = (self.ctx.width(), self.ctx.height());
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    /// Select `paint` for a shape covering `bounds`.
    ///
    /// Gradients are baked into a premultiplied pixmap over the covered pixels and sampled as
    /// an image paint placed at the pixmap origin.
    fn apply_paint(&mut self, paint: &Paint, bounds: Rect) -> bool {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match paint {
            Paint::Solid { color } => {
                self.ctx.set_paint(cpu_color(*color));
                true
            }
            Paint::Linear { .. } | Paint::Radial { .. } => {
                let area = bounds.intersect(Rect::new(0.0, 0.0, self.canvas.w(), self.canvas.h()));
                let x0 = area.x0.floor().max(0.0);
                let y0 = area.y0.floor().max(0.0);
                let x1 = area.x1.ceil();
                let y1 = area.y1.ceil();
                if x1 <= x0 || y1 <= y0 {
                    return false;
                }
                let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
                match gradient_image(paint, x0, y0, w, h) {
                    Ok(img) => {
                        self.ctx.set_paint(img);
                        self.ctx
                            .set_paint_transform(affine_to_cpu(Affine::translate((x0, y0))));
                        true
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping gradient paint");
                        false
                    }
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fill(&mut self, path: &BezPath, paint: &Paint) {
        if self.apply_paint(paint, path.bounding_box()) {
            self.ctx.fill_path(&bezpath_to_cpu(path));
        }
    }

    fn stroke(&mut self, path: &BezPath, width: f64, paint: &Paint) {
        if !(width.is_finite() && width > 0.0) {
            return;
        }
        let bounds = path.bounding_box().inflate(width / 2.0, width / 2.0);
        if self.apply_paint(paint, bounds) {
            self.ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(width)
                    .with_caps(vello_cpu::kurbo::Cap::Round)
                    .with_join(vello_cpu::kurbo::Join::Round),
            );
            self.ctx.stroke_path(&bezpath_to_cpu(path));
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let Some(layout) = self.text.layout(text, style) else {
            return;
        };

        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let x = match style.align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - w / 2.0,
            TextAlign::Right => at.x - w,
        };
        let y = at.y - h / 2.0;

        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(Affine::translate((x, y))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(cpu_color(brush));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                // Glyph ids index into the face Parley resolved for this run.
                self.ctx
                    .glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64 {
        match self.text.layout(text, style) {
            Some(layout) => f64::from(layout.width()),
            None => approximate_width(text, style),
        }
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.depth += 1;
        self.ctx.push_opacity_layer(opacity.clamp(0.0, 1.0));
    }

    fn pop_layer(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.ctx.pop_layer();
    }
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Bake `paint` over the `w`x`h` pixel block whose top-left is `(x0, y0)`.
fn gradient_image(
    paint: &Paint,
    x0: f64,
    y0: f64,
    w: u32,
    h: u32,
) -> LifegridResult<vello_cpu::Image> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    for (i, px) in bytes.chunks_exact_mut(4).enumerate() {
        let x = (i % w as usize) as f64;
        let y = (i / w as usize) as f64;
        let c = paint
            .sample(Point::new(x0 + x + 0.5, y0 + y + 0.5))
            .to_premul();
        px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }
    let pixmap = pixmap_from_premul_bytes(&bytes, w, h)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> LifegridResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LifegridError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LifegridError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(LifegridError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
