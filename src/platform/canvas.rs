//! HTML canvas surface and its 2D context

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::SurfaceError;
use crate::renderer::Renderer;
use crate::surface::Surface;

/// `<canvas>` element used as the drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Context = CanvasRenderer;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn set_width(&mut self, width: u32) {
        self.canvas.set_width(width);
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_height(&mut self, height: u32) {
        self.canvas.set_height(height);
    }

    fn render_context(&self) -> Result<CanvasRenderer, SurfaceError> {
        let ctx = self
            .canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::ContextUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| SurfaceError::ContextUnavailable("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable("not a 2d context".into()))?;
        Ok(CanvasRenderer { ctx })
    }
}

/// `CanvasRenderingContext2d` behind the [`Renderer`] interface
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer for CanvasRenderer {
    fn clear_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn draw_filled_disc(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.begin_path();
        // arc() only throws on a negative radius
        if let Err(e) = self.ctx.arc(cx, cy, radius, 0.0, TAU) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }
}
