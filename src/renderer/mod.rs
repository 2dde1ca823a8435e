//! Rendering capability consumed by the simulation
//!
//! The simulation only needs two primitives, so any 2D backend (canvas,
//! software framebuffer, test recorder) can sit behind [`Renderer`].

/// Minimal immediate-mode 2D drawing interface
pub trait Renderer {
    /// Clear a rectangle to transparent
    fn clear_area(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill a disc centred on `(cx, cy)` with a CSS color string
    fn draw_filled_disc(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
}
