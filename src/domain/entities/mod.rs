//! Domain entity definitions.

mod avatar;
mod user;

pub use avatar::{AvatarAction, AvatarUrls, SLOT_LARGE, SLOT_SMALL};
pub use user::{NetworkId, SharedUser, UserRecord};
