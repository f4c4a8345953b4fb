//! Notifications Module
//!
//! Domain events (created/updated/deleted/refreshed) and the broadcast
//! channel that carries them to subscribers.

mod channel;
mod notification;

pub use channel::{NotificationChannel, Subscription};
pub use notification::{Notification, NotificationKind};
