//! Wall bounce rules for circles inside a rectangular surface
//!
//! One wall is resolved per step, checked in a fixed priority order:
//! bottom, top, right, left. A circle wedged in a corner therefore only
//! corrects one axis per step; the order is part of the observable
//! behavior and must not change.

use super::entity::Circle;
use crate::surface::SurfaceSize;

/// Which wall a circle bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Bottom,
    Top,
    Right,
    Left,
}

/// Flip at most one velocity component if the circle touches a wall
///
/// Returns the wall that matched, if any. Position is not touched.
pub fn bounce_off_walls(circle: &mut Circle, bounds: SurfaceSize) -> Option<Wall> {
    let width = f64::from(bounds.width);
    let height = f64::from(bounds.height);
    let r = circle.radius;

    if circle.pos.y >= height - r {
        circle.vel.y = -circle.vel.y;
        Some(Wall::Bottom)
    } else if circle.pos.y <= r {
        circle.vel.y = circle.vel.y.abs();
        Some(Wall::Top)
    } else if circle.pos.x >= width - r {
        circle.vel.x = -circle.vel.x;
        Some(Wall::Right)
    } else if circle.pos.x <= r {
        circle.vel.x = circle.vel.x.abs();
        Some(Wall::Left)
    } else {
        None
    }
}

/// Resolve the wall bounce, then move by the (possibly flipped) velocity
pub fn step_circle(circle: &mut Circle, bounds: SurfaceSize) -> Option<Wall> {
    let wall = bounce_off_walls(circle, bounds);
    circle.advance();
    wall
}
