//! Application state and core logic

use crate::config::NotifyConfig;
use crate::notify::{
    SaveAction, SaveDispatcher, SaveNotificationOptions, SaveNotifications, SubmitAction,
};
use crate::service::{ProfileService, SaveMode};
use crate::state::{Form, FormState, Profile, ToastQueue};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Auxiliary dirty flag for the avatar toggle
pub const AVATAR_FLAG: &str = "avatar";

/// Window for the second Ctrl+C press
const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(800);

/// Main application struct
pub struct App {
    /// The profile form being edited
    pub form: FormState,
    /// Toasts on screen
    pub toasts: ToastQueue,
    /// Save workflow driving the dirty-state slot
    pub notifications: SaveNotifications,
    /// Runs saves off the UI loop
    dispatcher: SaveDispatcher,
    /// Simulated backend the save actions write to
    pub service: ProfileService,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance with the form mounted now
    pub fn new(config: &NotifyConfig) -> Self {
        let profile = Profile::sample();
        let service = ProfileService::new(profile.clone(), config.simulated_latency());

        let on_submit = if config.offer_publish {
            SubmitAction::Multi(vec![
                SaveAction {
                    label: "Save".to_string(),
                    icon: Some('✓'),
                    handler: Arc::new(service.handler(SaveMode::Save)),
                },
                SaveAction {
                    label: "Save and publish".to_string(),
                    icon: Some('↑'),
                    handler: Arc::new(service.handler(SaveMode::SaveAndPublish)),
                },
            ])
        } else {
            SubmitAction::Single(Arc::new(service.handler(SaveMode::Save)))
        };
        let mut options = SaveNotificationOptions::new(on_submit);
        options
            .additional_dirty_states
            .insert(AVATAR_FLAG.to_string(), false);

        Self {
            form: FormState::from_profile(&profile),
            toasts: ToastQueue::new(),
            notifications: SaveNotifications::mount(config.timings(), options, Instant::now()),
            dispatcher: SaveDispatcher::new(),
            service,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    /// Advance timers and apply settled saves
    pub fn tick(&mut self, now: Instant) {
        for completion in self.dispatcher.poll_completions() {
            let saved = completion.result.is_ok().then(|| completion.values.clone());
            if self.notifications.complete(completion, now, &mut self.toasts) {
                if let Some(values) = saved {
                    self.form.commit(&values);
                    self.notifications.set_additional_dirty(AVATAR_FLAG, false);
                }
            }
        }

        let dirty = self.notifications.is_dirty(&self.form);
        self.notifications.observe(dirty, now, &mut self.toasts);
        self.toasts.prune(now);
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Tear down the form's notifications before exit
    pub fn shutdown(&mut self) {
        self.notifications.unmount(&mut self.toasts);
    }

    pub fn avatar_changed(&self) -> bool {
        self.notifications.additional_dirty(AVATAR_FLAG)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Double-tap Ctrl+C to quit
        if ctrl && key.code == KeyCode::Char('c') {
            let now = Instant::now();
            if self
                .last_ctrl_c
                .is_some_and(|t| now.duration_since(t) < DOUBLE_TAP_WINDOW)
            {
                self.quit = true;
            } else {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
            return Ok(());
        }
        self.last_ctrl_c = None;
        self.status_message = None;

        match key.code {
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::SAVE_MODIFIER) => {
                self.save()
            }
            KeyCode::Char('a') if ctrl => self
                .notifications
                .cycle_action(Instant::now(), &mut self.toasts),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('x') if ctrl => self.dismiss_newest(),
            KeyCode::Esc => self.dismiss_newest(),
            KeyCode::Char('f') if ctrl => {
                let mode = self.service.cycle_failure_mode();
                self.status_message = Some(format!("Next save: {}", mode.label()));
            }
            KeyCode::Char('t') if ctrl => {
                let changed = !self.avatar_changed();
                self.notifications.set_additional_dirty(AVATAR_FLAG, changed);
            }
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Char(c) if !ctrl => self.form.input_char(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.form.newline(),
            _ => {}
        }
        Ok(())
    }

    /// Submit with the prompt's selected action
    fn save(&mut self) {
        let action = self.notifications.selected_action();
        if let Some(pending) = self
            .notifications
            .submit(action, &mut self.form, Instant::now(), &mut self.toasts)
        {
            self.dispatcher.dispatch(pending);
        }
    }

    fn reset(&mut self) {
        if self.notifications.is_saving() {
            self.status_message = Some("Save in progress".to_string());
            return;
        }
        self.notifications.reset(&mut self.form);
        self.notifications.set_additional_dirty(AVATAR_FLAG, false);
    }

    fn dismiss_newest(&mut self) {
        if let Some(id) = self.toasts.newest_dismissible() {
            self.notifications.dismiss(&id, &mut self.toasts);
        }
    }
}
