//! Save notifications: the unsaved-changes prompt and the save workflow
//!
//! [`SaveNotifications`] decides what the dirty-state toast slot shows and
//! [`SaveDispatcher`] runs saves off the UI loop. Validation failures are
//! summarized into the error toast's content.

mod controller;
mod dispatch;
mod message;
mod summary;

pub use controller::{
    NotifyTimings, SaveAction, SaveNotificationOptions, SaveNotifications, SubmitAction,
};
pub use dispatch::SaveDispatcher;
