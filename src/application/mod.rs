//! Application layer orchestrating the avatar pipeline.

/// Service implementations.
pub mod services;

pub use services::avatar_loader::{AvatarLoader, ProbeOutcome};
pub use services::event_router::EventRouter;
