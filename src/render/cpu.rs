use kurbo::{Affine, BezPath, PathEl, Shape as _};

use crate::config::model::PaintStyle;
use crate::controller::pulsator::PulseController;
use crate::foundation::core::{Color, Point};
use crate::foundation::error::{PulsatorError, PulsatorResult};
use crate::host::{AnimationClock, ArcDraw, RenderSurface, RingContainer};
use crate::render::frame::FrameRGBA;

const TOLERANCE: f64 = 0.1;

/// Raster surface painting rings into an RGBA frame with `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    background: Option<Color>,
}

impl CpuSurface {
    /// Create a transparent surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> PulsatorResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| PulsatorError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| PulsatorError::render("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(PulsatorError::render("surface must have non-zero size"));
        }
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            background: None,
        })
    }

    /// Fill the surface with `color` before any ring.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        self
    }

    /// Background color, if any.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Rasterize everything drawn so far into a premultiplied frame.
    pub fn finish(mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl RenderSurface for CpuSurface {
    fn draw_arc(&mut self, arc: &ArcDraw) -> PulsatorResult<()> {
        let color = arc.color.with_opacity(arc.props.alpha);
        if color.a == 0 || arc.bounds.width() <= 0.0 || arc.bounds.height() <= 0.0 {
            return Ok(());
        }
        if arc.props.scale_x == 0.0 || arc.props.scale_y == 0.0 {
            return Ok(());
        }

        let outline = arc_outline(arc);
        let path = match arc.style {
            PaintStyle::Fill => outline,
            PaintStyle::Stroke => {
                if arc.stroke_width <= 0.0 {
                    return Ok(());
                }
                kurbo::stroke(
                    outline.iter(),
                    &kurbo::Stroke::new(arc.stroke_width),
                    &kurbo::StrokeOpts::default(),
                    TOLERANCE,
                )
            }
        };

        let transform = scale_about(arc.pivot, arc.props.scale_x, arc.props.scale_y);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&bezpath_to_cpu(&path));
        Ok(())
    }
}

/// Draw every ring of `controller` onto a fresh `width` x `height` surface.
#[tracing::instrument(skip(controller, background))]
pub fn render_frame<C, K>(
    controller: &PulseController<C, K>,
    width: u32,
    height: u32,
    background: Option<Color>,
) -> PulsatorResult<FrameRGBA>
where
    C: RingContainer,
    K: AnimationClock,
{
    let mut surface = CpuSurface::new(width, height)?;
    if let Some(bg) = background {
        surface = surface.with_background(bg);
    }
    controller.draw(&mut surface)?;
    Ok(surface.finish())
}

/// Arc outline inscribed in the ring bounds. Partial sweeps are closed by their chord when filled.
fn arc_outline(arc: &ArcDraw) -> BezPath {
    let center = arc.bounds.center();
    let radii = kurbo::Vec2::new(arc.bounds.width() * 0.5, arc.bounds.height() * 0.5);
    if arc.sweep_angle_deg.abs() >= 360.0 {
        return kurbo::Ellipse::new(center, radii, 0.0).to_path(TOLERANCE);
    }
    let mut path = kurbo::Arc {
        center,
        radii,
        start_angle: arc.start_angle_deg.to_radians(),
        sweep_angle: arc.sweep_angle_deg.to_radians(),
        x_rotation: 0.0,
    }
    .to_path(TOLERANCE);
    if arc.style == PaintStyle::Fill {
        path.close_path();
    }
    path
}

fn scale_about(pivot: Point, sx: f64, sy: f64) -> Affine {
    Affine::translate(pivot.to_vec2())
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-pivot.to_vec2())
}

fn to_cpu_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
