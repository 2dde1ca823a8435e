//! The moving circle entity

use glam::DVec2;

/// A filled circle drifting across the surface.
///
/// Plain value type: nothing is validated, callers pick sane values.
/// Only the simulation step mutates `pos` and `vel`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
    /// Any CSS color string understood by the renderer
    pub fill_style: String,
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Circle {
    pub fn new(radius: f64, fill_style: impl Into<String>, x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            radius,
            fill_style: fill_style.into(),
            pos: DVec2::new(x, y),
            vel: DVec2::new(dx, dy),
        }
    }

    /// Move by one step of the current velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}
