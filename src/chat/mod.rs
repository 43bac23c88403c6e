//! Chat host model.
//!
//! Owns the transcript for one chat widget and maps streamed fragments onto
//! the in-flight assistant message. Rendering is left to the caller.

mod notification;
mod session;

pub use notification::{Notification, NotificationVariant};
pub use session::{ChatSession, PendingReply, GREETING, GREETING_ID, GREETING_UNAVAILABLE};
