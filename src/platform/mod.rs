//! Platform abstraction layer
//!
//! Browser implementations of the surface and renderer capabilities.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, CanvasSurface};
