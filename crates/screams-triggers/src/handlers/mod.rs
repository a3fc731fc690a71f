//! Built-in trigger handlers.

pub mod cascade;
pub mod notification;
pub mod profile;

pub use cascade::CascadeScreamDelete;
pub use notification::{DeleteNotificationOnUnlike, NotifyOnComment, NotifyOnLike};
pub use profile::PropagateUserImage;
