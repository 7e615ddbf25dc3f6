//! Stateless domain services.

mod avatar_policy;
mod ownership;

pub use avatar_policy::AvatarPolicy;
pub use ownership::AvatarOwnership;
