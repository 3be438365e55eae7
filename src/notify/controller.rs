//! Save notification controller
//!
//! Watches the form's dirty signal and drives the dirty-state toast slot:
//!
//! ```text
//! Hidden --dirty, grace over--> Initial --submit, valid--> Saving
//!   ^                             |                          |
//!   +-------- clean --------------+            settles: Success | Error
//! ```
//!
//! A submit that fails validation shows an Error toast without ever
//! reaching Saving. Success and Error are one-off toasts that expire on
//! their own; the slot itself is emptied when a save settles.

use super::dispatch::{PendingSave, SaveCompletion, SaveTicket, SharedHandler};
use super::message::error_message;
use super::summary::{summarize_errors, ErrorSummary};
use crate::state::{
    AnnounceRole, ErrorBody, FormState, Notification, NotificationState, SaveActionView, ToastId,
    ToastOptions, ToastPosition, Toaster,
};
use indexmap::IndexMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Timing and placement of the save notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyTimings {
    /// Time after mount during which the prompt stays hidden
    pub grace_period: Duration,
    /// Lifetime of success and error toasts
    pub auto_dismiss: Duration,
    /// Where the prompt and spinner appear
    pub prompt_position: ToastPosition,
    /// Where success and error toasts appear
    pub result_position: ToastPosition,
}

impl Default for NotifyTimings {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_millis(1000),
            auto_dismiss: Duration::from_millis(3000),
            prompt_position: ToastPosition::BottomRight,
            result_position: ToastPosition::TopRight,
        }
    }
}

/// One entry of a multi-action save
#[derive(Clone)]
pub struct SaveAction {
    pub label: String,
    pub icon: Option<char>,
    pub handler: SharedHandler,
}

/// What the prompt's save control runs
#[derive(Clone)]
pub enum SubmitAction {
    Single(SharedHandler),
    /// Ordered alternatives, e.g. "Save" and "Save and publish"
    Multi(Vec<SaveAction>),
}

impl SubmitAction {
    pub fn len(&self) -> usize {
        match self {
            SubmitAction::Single(_) => 1,
            SubmitAction::Multi(actions) => actions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label and handler of the action at `index`
    fn get(&self, index: usize) -> Option<(&str, &SharedHandler)> {
        match self {
            SubmitAction::Single(handler) if index == 0 => Some(("Save", handler)),
            SubmitAction::Single(_) => None,
            SubmitAction::Multi(actions) => actions
                .get(index)
                .map(|action| (action.label.as_str(), &action.handler)),
        }
    }

    fn views(&self) -> Vec<SaveActionView> {
        match self {
            SubmitAction::Single(_) => vec![SaveActionView {
                label: "Save".to_string(),
                icon: None,
            }],
            SubmitAction::Multi(actions) => actions
                .iter()
                .map(|action| SaveActionView {
                    label: action.label.clone(),
                    icon: action.icon,
                })
                .collect(),
        }
    }
}

/// Caller-supplied behaviour
pub struct SaveNotificationOptions {
    pub on_reset: Box<dyn FnMut(&mut FormState) + Send>,
    pub on_submit: SubmitAction,
    /// Extra dirty flags OR-ed into the form's own dirtiness
    pub additional_dirty_states: IndexMap<String, bool>,
}

impl SaveNotificationOptions {
    /// Options whose reset reverts the form to its initial values
    pub fn new(on_submit: SubmitAction) -> Self {
        Self {
            on_reset: Box::new(FormState::reset),
            on_submit,
            additional_dirty_states: IndexMap::new(),
        }
    }
}

/// Drives the dirty-state toast slot for one mounted form
pub struct SaveNotifications {
    timings: NotifyTimings,
    options: SaveNotificationOptions,
    slot: ToastId,
    /// Pending end of the grace period; `None` once elapsed or cancelled
    grace_deadline: Option<Instant>,
    mounted: bool,
    /// Last Hidden/Initial decision applied to the slot
    applied: Option<NotificationState>,
    /// Whether the slot currently holds the prompt
    prompt_shown: bool,
    state: NotificationState,
    in_flight: Option<SaveTicket>,
    next_ticket: u64,
    selected_action: usize,
}

impl fmt::Debug for SaveNotifications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveNotifications")
            .field("timings", &self.timings)
            .field("grace_deadline", &self.grace_deadline)
            .field("mounted", &self.mounted)
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl SaveNotifications {
    /// Mount the controller at `now`, starting the grace period
    pub fn mount(timings: NotifyTimings, options: SaveNotificationOptions, now: Instant) -> Self {
        Self {
            timings,
            options,
            slot: ToastId::dirty_state(),
            grace_deadline: Some(now + timings.grace_period),
            mounted: true,
            applied: None,
            prompt_shown: false,
            state: NotificationState::Hidden,
            in_flight: None,
            next_ticket: 0,
            selected_action: 0,
        }
    }

    pub fn state(&self) -> NotificationState {
        self.state
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn selected_action(&self) -> usize {
        self.selected_action
    }

    /// Set an auxiliary dirty flag
    pub fn set_additional_dirty(&mut self, key: &str, dirty: bool) {
        self.options
            .additional_dirty_states
            .insert(key.to_string(), dirty);
    }

    pub fn additional_dirty(&self, key: &str) -> bool {
        self.options
            .additional_dirty_states
            .get(key)
            .copied()
            .unwrap_or(false)
    }

    /// True if any field is dirty or any auxiliary flag is set
    pub fn is_dirty(&self, form: &FormState) -> bool {
        form.is_dirty() || self.options.additional_dirty_states.values().any(|v| *v)
    }

    /// Hidden/Initial decision for a dirty signal sampled at `now`
    pub fn decide(&self, is_dirty: bool, now: Instant) -> NotificationState {
        let in_grace = self.grace_deadline.is_some_and(|deadline| now < deadline);
        if is_dirty && !in_grace {
            NotificationState::Initial
        } else {
            NotificationState::Hidden
        }
    }

    /// Apply the current dirty signal to the slot.
    ///
    /// The slot is only written when the decision changes, and is left alone
    /// while a save is in flight.
    pub fn observe(&mut self, is_dirty: bool, now: Instant, toaster: &mut impl Toaster) {
        if !self.mounted {
            return;
        }
        if self.grace_deadline.is_some_and(|deadline| now >= deadline) {
            debug!("Grace period elapsed");
            self.grace_deadline = None;
        }
        if self.in_flight.is_some() {
            return;
        }

        let decision = self.decide(is_dirty, now);
        if self.applied == Some(decision) {
            return;
        }
        debug!(?decision, is_dirty, "Dirty state changed");
        self.applied = Some(decision);
        self.state = decision;

        match decision {
            NotificationState::Initial => self.show_prompt(now, toaster),
            _ => {
                self.prompt_shown = false;
                toaster.dismiss(&self.slot);
            }
        }
    }

    /// Select the next save action, redrawing the prompt if it is on screen
    pub fn cycle_action(&mut self, now: Instant, toaster: &mut impl Toaster) {
        let count = self.options.on_submit.len();
        if count < 2 {
            return;
        }
        self.selected_action = (self.selected_action + 1) % count;
        if self.prompt_shown {
            self.show_prompt(now, toaster);
        }
    }

    /// Validate the form and start a save with the action at `action_index`.
    ///
    /// Returns the save to dispatch, or `None` if validation failed, the
    /// action does not exist, or a save is already in flight.
    pub fn submit(
        &mut self,
        action_index: usize,
        form: &mut FormState,
        now: Instant,
        toaster: &mut impl Toaster,
    ) -> Option<PendingSave> {
        if let Some(ticket) = self.in_flight {
            debug!(ticket = ticket.0, "Save already in flight, ignoring submit");
            return None;
        }
        let Some((label, handler)) = self.options.on_submit.get(action_index) else {
            warn!(action_index, "No save action at index");
            return None;
        };
        let label = label.to_string();
        let handler = handler.clone();

        match form.handle_submit(Ok, |errors| Err(summarize_errors(errors))) {
            Err(summary) => {
                self.show_validation_error(summary, form, now, toaster);
                None
            }
            Ok(values) => {
                let ticket = SaveTicket(self.next_ticket);
                self.next_ticket += 1;

                toaster.show(
                    Some(self.slot.clone()),
                    Notification::Saving,
                    ToastOptions::new(self.timings.prompt_position),
                    now,
                );
                self.state = NotificationState::Saving;
                self.prompt_shown = false;
                self.in_flight = Some(ticket);
                info!(ticket = ticket.0, action = %label, "Saving changes");

                Some(PendingSave {
                    ticket,
                    label,
                    handler,
                    values,
                })
            }
        }
    }

    /// Settle an in-flight save at `now`. Returns false for a completion
    /// that does not belong to the current save. Once unmounted the outcome
    /// is only logged.
    pub fn complete(
        &mut self,
        completion: SaveCompletion,
        now: Instant,
        toaster: &mut impl Toaster,
    ) -> bool {
        if self.in_flight != Some(completion.ticket) {
            warn!(ticket = completion.ticket.0, "Ignoring completion for a stale save");
            return false;
        }
        self.in_flight = None;
        if !self.mounted {
            match &completion.result {
                Ok(()) => info!(ticket = completion.ticket.0, "Save succeeded after unmount"),
                Err(err) => warn!(ticket = completion.ticket.0, "Save failed after unmount: {err}"),
            }
            return true;
        }
        toaster.dismiss(&self.slot);
        // The slot is empty now; the next observe re-applies the prompt if
        // the form is still dirty.
        self.applied = Some(NotificationState::Hidden);

        let options = ToastOptions::new(self.timings.result_position)
            .timed(self.timings.auto_dismiss)
            .announce(AnnounceRole::Status);

        match completion.result {
            Ok(()) => {
                info!(ticket = completion.ticket.0, action = %completion.label, "Save succeeded");
                toaster.show(
                    None,
                    Notification::Success {
                        title: "Success".to_string(),
                        message: "Changes were successfully saved".to_string(),
                    },
                    options,
                    now,
                );
                self.state = NotificationState::Success;
            }
            Err(err) => {
                warn!(ticket = completion.ticket.0, action = %completion.label, "Save failed: {err}");
                toaster.show(
                    None,
                    Notification::Error {
                        title: "There was an error with your submission".to_string(),
                        body: ErrorBody::Text(error_message(&err)),
                    },
                    options,
                    now,
                );
                self.state = NotificationState::Error;
            }
        }
        true
    }

    /// Run the caller's reset action
    pub fn reset(&mut self, form: &mut FormState) {
        debug!("Resetting form");
        (self.options.on_reset)(form);
    }

    /// Remove a toast through its dismiss control
    pub fn dismiss(&mut self, id: &ToastId, toaster: &mut impl Toaster) {
        toaster.dismiss(id);
        if *id == self.slot && self.in_flight.is_none() {
            self.prompt_shown = false;
            self.state = NotificationState::Hidden;
        }
    }

    /// Tear down: cancel the grace timer and clear the slot
    pub fn unmount(&mut self, toaster: &mut impl Toaster) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.grace_deadline = None;
        self.prompt_shown = false;
        self.state = NotificationState::Hidden;
        toaster.dismiss(&self.slot);
        debug!("Save notifications unmounted");
    }

    fn show_prompt(&mut self, now: Instant, toaster: &mut impl Toaster) {
        self.prompt_shown = true;
        toaster.show(
            Some(self.slot.clone()),
            Notification::Initial {
                actions: self.options.on_submit.views(),
                selected: self.selected_action,
            },
            ToastOptions::new(self.timings.prompt_position),
            now,
        );
    }

    fn show_validation_error(
        &mut self,
        summary: ErrorSummary,
        form: &mut FormState,
        now: Instant,
        toaster: &mut impl Toaster,
    ) {
        if let Some(target) = summary.focus_targets.first() {
            form.focus(*target);
        }
        info!(errors = summary.items.len(), "Submit blocked by validation");

        toaster.show(
            None,
            Notification::Error {
                title: summary.title,
                body: ErrorBody::List(summary.items),
            },
            ToastOptions::new(self.timings.result_position)
                .timed(self.timings.auto_dismiss)
                .announce(AnnounceRole::Alert),
            now,
        );
        self.state = NotificationState::Error;
    }
}
