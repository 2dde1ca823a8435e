//! Per-frame motion, wall collision, and the draw pass
//!
//! [`Simulation`] caches the surface bounds and only learns about resizes
//! through [`SurfaceSubscriber`] notifications; it never reads the
//! registry directly.

use super::collision::step_circle;
use super::entity::Circle;
use crate::renderer::Renderer;
use crate::surface::{SurfaceSize, SurfaceSubscriber};

pub struct Simulation<R: Renderer> {
    renderer: R,
    bounds: SurfaceSize,
}

impl<R: Renderer> Simulation<R> {
    pub fn new(renderer: R, bounds: SurfaceSize) -> Self {
        Self { renderer, bounds }
    }

    /// Cached surface bounds used by collision and clearing
    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn update_bounds(&mut self, new_width: u32, new_height: u32) {
        self.bounds = SurfaceSize::new(new_width, new_height);
    }

    /// Bounce every circle off at most one wall, then advance it
    pub fn check_collision(&self, circles: &mut [Circle]) {
        for circle in circles.iter_mut() {
            step_circle(circle, self.bounds);
        }
    }

    /// Clear the surface and paint circles in collection order
    pub fn draw_entities(&mut self, circles: &[Circle]) {
        self.clear();
        for circle in circles {
            self.renderer
                .draw_filled_disc(circle.pos.x, circle.pos.y, circle.radius, &circle.fill_style);
        }
    }

    pub fn clear(&mut self) {
        self.renderer.clear_area(
            0.0,
            0.0,
            f64::from(self.bounds.width),
            f64::from(self.bounds.height),
        );
    }

    /// One update-and-render frame: every circle moves before any is drawn
    pub fn frame(&mut self, circles: &mut [Circle]) {
        self.check_collision(circles);
        self.draw_entities(circles);
    }
}

impl<R: Renderer> SurfaceSubscriber for Simulation<R> {
    fn surface_update(&mut self, size: SurfaceSize) {
        log::debug!("Simulation bounds now {}x{}", size.width, size.height);
        self.update_bounds(size.width, size.height);
    }
}
