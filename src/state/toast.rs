//! Toast registry: the queue of transient notifications on screen
//!
//! Toasts are keyed by [`ToastId`]. Showing a toast under an id that is
//! already visible replaces it in place, so a fixed slot id never stacks.
//! Timed toasts are removed by [`ToastQueue::prune`] once their duration
//! has passed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Slot shared by the unsaved-changes prompt and the saving spinner
pub const DIRTY_STATE_SLOT: &str = "DIRTY_STATE_TOASTER";

/// Unique identifier for a toast
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    /// A fixed, reusable id
    pub fn slot(name: &str) -> Self {
        Self(name.to_string())
    }

    /// A fresh id for a one-off toast
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn dirty_state() -> Self {
        Self::slot(DIRTY_STATE_SLOT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position where the toast should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ToastPosition {
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }

    /// Top-left corner of a toast of the given size inside an area of
    /// `width` x `height`
    pub fn origin(
        self,
        width: u16,
        height: u16,
        toast_width: u16,
        toast_height: u16,
        margin: u16,
    ) -> (u16, u16) {
        let x = match self {
            Self::TopLeft | Self::BottomLeft => margin,
            Self::TopCenter | Self::BottomCenter => width.saturating_sub(toast_width) / 2,
            Self::TopRight | Self::BottomRight => {
                width.saturating_sub(toast_width).saturating_sub(margin)
            }
        };
        let y = if self.is_top() {
            margin
        } else {
            height.saturating_sub(toast_height).saturating_sub(margin)
        };
        (x, y)
    }
}

/// How long a toast stays up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastDuration {
    /// Until dismissed or replaced
    Persistent,
    Timed(Duration),
}

/// Accessibility role of an announced toast. Announcements are polite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceRole {
    Alert,
    Status,
}

/// Display options for a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastOptions {
    pub position: ToastPosition,
    pub duration: ToastDuration,
    pub announcement: Option<AnnounceRole>,
}

impl ToastOptions {
    /// Persistent, unannounced toast at `position`
    pub fn new(position: ToastPosition) -> Self {
        Self {
            position,
            duration: ToastDuration::Persistent,
            announcement: None,
        }
    }

    pub fn timed(mut self, duration: Duration) -> Self {
        self.duration = ToastDuration::Timed(duration);
        self
    }

    pub fn announce(mut self, role: AnnounceRole) -> Self {
        self.announcement = Some(role);
        self
    }
}

/// Which of the save workflow's states a slot is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationState {
    #[default]
    Hidden,
    Initial,
    Saving,
    Success,
    Error,
}

/// Body of an error toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    Text(String),
    /// Rendered as a bulleted list
    List(Vec<String>),
}

/// A save button on the unsaved-changes prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveActionView {
    pub label: String,
    pub icon: Option<char>,
}

/// Content of a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Unsaved-changes prompt with reset and save controls
    Initial {
        actions: Vec<SaveActionView>,
        selected: usize,
    },
    Saving,
    Success {
        title: String,
        message: String,
    },
    Error {
        title: String,
        body: ErrorBody,
    },
}

impl Notification {
    pub fn state(&self) -> NotificationState {
        match self {
            Notification::Initial { .. } => NotificationState::Initial,
            Notification::Saving => NotificationState::Saving,
            Notification::Success { .. } => NotificationState::Success,
            Notification::Error { .. } => NotificationState::Error,
        }
    }

    /// Everything but the spinner offers a dismiss control
    pub fn is_dismissible(&self) -> bool {
        !matches!(self, Notification::Saving)
    }
}

/// A toast on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub notification: Notification,
    pub options: ToastOptions,
    pub shown_at: Instant,
}

impl Toast {
    /// Entrance slide length
    const ENTRANCE: Duration = Duration::from_millis(180);

    pub fn is_expired(&self, now: Instant) -> bool {
        match self.options.duration {
            ToastDuration::Persistent => false,
            ToastDuration::Timed(duration) => now.saturating_duration_since(self.shown_at) >= duration,
        }
    }

    /// Entrance progress from 0.0 (just shown) to 1.0 (settled)
    pub fn entrance_progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        let progress = elapsed.as_secs_f32() / Self::ENTRANCE.as_secs_f32();
        simple_easing::cubic_out(progress.clamp(0.0, 1.0))
    }
}

/// Show/dismiss interface the save notifications write through
#[cfg_attr(test, mockall::automock)]
pub trait Toaster {
    /// Show a toast at `now`. `None` generates a fresh id; an id already on
    /// screen is replaced in place. Returns the id used.
    fn show(
        &mut self,
        id: Option<ToastId>,
        notification: Notification,
        options: ToastOptions,
        now: Instant,
    ) -> ToastId;

    /// Remove a toast. Unknown ids are ignored.
    fn dismiss(&mut self, id: &ToastId);
}

/// Ordered queue of visible toasts, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Newest toast that offers a dismiss control
    pub fn newest_dismissible(&self) -> Option<ToastId> {
        self.toasts
            .iter()
            .rev()
            .find(|t| t.notification.is_dismissible())
            .map(|t| t.id.clone())
    }

    /// Drop expired toasts, returning how many were removed
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        let removed = before - self.toasts.len();
        if removed > 0 {
            tracing::debug!("Expired {removed} toast(s)");
        }
        removed
    }
}

impl Toaster for ToastQueue {
    fn show(
        &mut self,
        id: Option<ToastId>,
        notification: Notification,
        options: ToastOptions,
        now: Instant,
    ) -> ToastId {
        let id = id.unwrap_or_else(ToastId::generate);
        let toast = Toast {
            id: id.clone(),
            notification,
            options,
            shown_at: now,
        };
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(existing) => *existing = toast,
            None => self.toasts.push(toast),
        }
        id
    }

    fn dismiss(&mut self, id: &ToastId) {
        self.toasts.retain(|t| &t.id != id);
    }
}
