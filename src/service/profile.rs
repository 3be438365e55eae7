//! In-process profile service
//!
//! Stands in for a remote API: every save waits out a configurable latency
//! and can be told to fail the next request, so both outcomes of the save
//! workflow can be exercised from the keyboard.

use super::traits::{SubmitError, SubmitHandler};
use crate::state::{FormValues, Profile};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the service does with the next save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    None,
    Reject,
    Offline,
}

impl FailureMode {
    pub fn next(&self) -> Self {
        match self {
            Self::None => Self::Reject,
            Self::Reject => Self::Offline,
            Self::Offline => Self::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "ok",
            Self::Reject => "reject next",
            Self::Offline => "offline next",
        }
    }
}

/// Which button the save came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Save,
    SaveAndPublish,
}

#[derive(Debug, Default)]
struct Store {
    profile: Profile,
    failure: FailureMode,
    saves: u32,
}

/// Shared handle to the simulated service
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<Mutex<Store>>,
    latency: Duration,
}

impl ProfileService {
    pub fn new(profile: Profile, latency: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                profile,
                ..Default::default()
            })),
            latency,
        }
    }

    /// Snapshot of the stored profile
    pub fn profile(&self) -> Profile {
        self.store
            .lock()
            .map(|store| store.profile.clone())
            .unwrap_or_default()
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.store
            .lock()
            .map(|store| store.failure)
            .unwrap_or_default()
    }

    /// Advance to the next failure mode and return it
    pub fn cycle_failure_mode(&self) -> FailureMode {
        match self.store.lock() {
            Ok(mut store) => {
                store.failure = store.failure.next();
                tracing::info!("Next save will be: {}", store.failure.label());
                store.failure
            }
            Err(_) => FailureMode::None,
        }
    }

    /// Number of saves that reached the store
    pub fn save_count(&self) -> u32 {
        self.store.lock().map(|store| store.saves).unwrap_or(0)
    }

    /// Save handler bound to one of the prompt's buttons
    pub fn handler(&self, mode: SaveMode) -> ProfileSaveHandler {
        ProfileSaveHandler {
            service: self.clone(),
            mode,
        }
    }

    fn store_values(&self, values: &FormValues, mode: SaveMode) -> Result<(), SubmitError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| anyhow!("profile store lock poisoned"))?;

        match std::mem::take(&mut store.failure) {
            FailureMode::Reject => {
                return Err(SubmitError::Rejected(
                    "The server rejected the update. Please try again later.".to_string(),
                ))
            }
            FailureMode::Offline => return Err(SubmitError::Unavailable),
            FailureMode::None => {}
        }

        store.profile.apply(values);
        if mode == SaveMode::SaveAndPublish {
            store.profile.published = true;
        }
        store.saves += 1;
        Ok(())
    }
}

/// [`SubmitHandler`] writing into a [`ProfileService`]
#[derive(Debug, Clone)]
pub struct ProfileSaveHandler {
    service: ProfileService,
    mode: SaveMode,
}

#[async_trait]
impl SubmitHandler for ProfileSaveHandler {
    async fn submit(&self, values: FormValues) -> Result<(), SubmitError> {
        tokio::time::sleep(self.service.latency).await;
        self.service.store_values(&values, self.mode)?;
        tracing::info!(mode = ?self.mode, fields = values.len(), "Profile saved");
        Ok(())
    }
}
