//! Configuration handling for the TUI

use crate::notify::NotifyTimings;
use crate::state::ToastPosition;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment override for the simulated save latency
const LATENCY_ENV: &str = "SAVE_NOTIFY_LATENCY_MS";

/// User configuration for the TUI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Delay after opening the form before the unsaved-changes prompt may show
    pub grace_period_ms: u64,
    /// Lifetime of success and error toasts
    pub auto_dismiss_ms: u64,
    /// Where the prompt and saving spinner appear
    pub prompt_position: ToastPosition,
    /// Where success and error toasts appear
    pub result_position: ToastPosition,
    /// Latency of the in-process profile service
    pub simulated_latency_ms: u64,
    /// Offer "Save and publish" next to "Save" on the prompt
    pub offer_publish: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            grace_period_ms: 1000,
            auto_dismiss_ms: 3000,
            prompt_position: ToastPosition::BottomRight,
            result_position: ToastPosition::TopRight,
            simulated_latency_ms: 800,
            offer_publish: true,
        }
    }
}

impl NotifyConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "save-notify", "save-notify")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_or_create(&path)?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(LATENCY_ENV) {
            config.apply_latency_override(&value);
        }

        Ok(config)
    }

    /// Read the config at `path`, writing the defaults there on first run
    fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&content)?);
        }

        let config = Self::default();
        match config.save_to(path) {
            Ok(()) => tracing::info!("Wrote default config to {}", path.display()),
            Err(e) => tracing::warn!("Could not write default config to {}: {e}", path.display()),
        }
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_latency_override(&mut self, value: &str) {
        match value.trim().parse() {
            Ok(ms) => self.simulated_latency_ms = ms,
            Err(_) => tracing::warn!("Ignoring invalid {LATENCY_ENV}={value:?}"),
        }
    }

    pub fn timings(&self) -> NotifyTimings {
        NotifyTimings {
            grace_period: Duration::from_millis(self.grace_period_ms),
            auto_dismiss: Duration::from_millis(self.auto_dismiss_ms),
            prompt_position: self.prompt_position,
            result_position: self.result_position,
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
