//! Bouncing Circles - click and hold to spawn circles that bounce around a canvas
//!
//! Core modules:
//! - `sim`: Circle model, wall bounce rules, update-and-draw pass
//! - `surface`: Surface dimensions and resize notifications
//! - `renderer`: 2D drawing capability used by the simulation
//! - `playground`: Pointer/resize input wired to spawning and the frame loop
//! - `platform`: Browser canvas bindings (wasm32 only)

pub mod error;
pub mod platform;
pub mod playground;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod surface;

pub use error::SurfaceError;
pub use playground::Playground;
pub use settings::Settings;

/// Playground defaults
pub mod consts {
    /// Spawn cadence while the pointer is held (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 200.0;
    /// Update-and-render cadence (ms)
    pub const FRAME_INTERVAL_MS: f64 = 5.0;
    /// Longest host frame accepted in one clock advance (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    pub const CIRCLE_RADIUS: f64 = 20.0;
    pub const CIRCLE_FILL: &str = "#E7E247";
    /// Upper bound (exclusive) of each spawned velocity component
    pub const CIRCLE_MAX_SPEED: f64 = 5.0;
}
