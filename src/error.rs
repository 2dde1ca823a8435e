//! Error types for surface setup and subscription.

/// Errors raised while wiring the drawing surface to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The candidate subscriber has no reachable `surface_update` handler.
    #[error("subscriber does not expose a live surface update handler")]
    InvalidSubscriber,

    /// The surface could not hand out a 2D render context.
    #[error("2D render context unavailable: {0}")]
    ContextUnavailable(String),
}
