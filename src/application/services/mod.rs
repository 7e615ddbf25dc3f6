pub mod avatar_loader;
pub mod event_router;
