//! Simulation module
//!
//! Circle model, wall bounce rules, and the update-and-draw pass.
//! No platform dependencies: rendering goes through [`crate::renderer::Renderer`].

pub mod collision;
pub mod entity;
pub mod simulation;

pub use collision::{Wall, bounce_off_walls, step_circle};
pub use entity::Circle;
pub use simulation::Simulation;
