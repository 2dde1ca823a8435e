//! Drawing surface registry
//!
//! Single source of truth for the surface's pixel dimensions. Resizes are
//! pushed synchronously to every registered [`SurfaceSubscriber`], in
//! registration order.

use std::cell::RefCell;
use std::rc::Weak;

use crate::error::SurfaceError;
use crate::renderer::Renderer;

/// Logical surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A concrete drawing surface (e.g. an HTML canvas)
pub trait Surface {
    type Context: Renderer + 'static;

    fn width(&self) -> u32;
    fn set_width(&mut self, width: u32);
    fn height(&self) -> u32;
    fn set_height(&mut self, height: u32);

    /// Obtain the 2D render context for this surface
    fn render_context(&self) -> Result<Self::Context, SurfaceError>;
}

/// Receives surface resize notifications
pub trait SurfaceSubscriber {
    fn surface_update(&mut self, size: SurfaceSize);
}

/// Non-owning subscriber handle held by the registry
pub type SubscriberHandle = Weak<RefCell<dyn SurfaceSubscriber>>;

/// Owns the surface, its dimensions, and the resize subscriber list
pub struct SurfaceRegistry<S: Surface> {
    surface: S,
    subscribers: Vec<SubscriberHandle>,
}

impl<S: Surface> SurfaceRegistry<S> {
    /// Bind to `surface` and give it its initial dimensions
    pub fn initialize(mut surface: S, width: u32, height: u32) -> Self {
        surface.set_width(width);
        surface.set_height(height);
        log::info!("Surface initialized at {}x{}", width, height);
        Self {
            surface,
            subscribers: Vec::new(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.surface.width(), self.surface.height())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn render_context(&self) -> Result<S::Context, SurfaceError> {
        self.surface.render_context()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Append a subscriber. The same subscriber may be registered twice and
    /// is then notified twice.
    ///
    /// A handle whose subscriber is already gone can never receive an
    /// update, so it is rejected with [`SurfaceError::InvalidSubscriber`]
    /// and nothing is registered.
    pub fn register_subscriber(&mut self, subscriber: SubscriberHandle) -> Result<(), SurfaceError> {
        if subscriber.strong_count() == 0 {
            return Err(SurfaceError::InvalidSubscriber);
        }
        self.subscribers.push(subscriber);
        Ok(())
    }

    /// Deliver `payload` to every subscriber in registration order.
    ///
    /// Best-effort: if a handler panics, later subscribers are not reached.
    /// Subscribers dropped since registration are pruned.
    pub fn notify_subscribers(&mut self, payload: SurfaceSize) {
        self.subscribers.retain(|handle| match handle.upgrade() {
            Some(subscriber) => {
                subscriber.borrow_mut().surface_update(payload);
                true
            }
            None => {
                log::debug!("Pruning dropped surface subscriber");
                false
            }
        });
    }

    /// Resize the surface, then notify subscribers of the new size.
    ///
    /// Most surfaces clear their contents when resized; that is left as is.
    pub fn update_surface_size(&mut self, new_width: u32, new_height: u32) {
        self.surface.set_width(new_width);
        self.surface.set_height(new_height);
        log::debug!("Surface resized to {}x{}", new_width, new_height);
        self.notify_subscribers(SurfaceSize::new(new_width, new_height));
    }
}
