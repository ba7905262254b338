// SPDX-License-Identifier: MPL-2.0
//! Configuration for the feedback coordination layer, stored as TOML.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - Toast lifetime
//! - `[confirmation]` - Single-flight policy and fallback labels
//! - `[diagnostics]` - Event recording
//!
//! Every field has a default, so a partial file (or an empty one) is valid.
//!
//! # Examples
//!
//! ```
//! use feedback_hub::config::{self, Config};
//! use feedback_hub::confirmation::SingleFlightPolicy;
//!
//! let config = config::from_toml_str(
//!     r#"
//!     [notifications]
//!     ttl_ms = 5000
//!
//!     [confirmation]
//!     policy = "refuse-new"
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.notifications.ttl().as_millis(), 5000);
//! assert_eq!(config.confirmation.policy, SingleFlightPolicy::RefuseNew);
//! assert_eq!(config.confirmation.cancel_label, "Cancel");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::confirmation::SingleFlightPolicy;
use crate::domain::feedback::{BufferCapacity, NotificationTtl};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "feedback.toml";
const APP_NAME: &str = "FeedbackHub";

// =============================================================================
// Section Structs
// =============================================================================

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationsConfig {
    /// Lifetime of every toast, in milliseconds.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl NotificationsConfig {
    /// Returns the validated TTL.
    #[must_use]
    pub fn ttl(&self) -> NotificationTtl {
        NotificationTtl::from_millis(self.ttl_ms)
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

/// Confirmation prompt settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationConfig {
    /// What happens when a second request arrives while one is pending.
    #[serde(default)]
    pub policy: SingleFlightPolicy,

    /// Affirmative label substituted when a request omits one.
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,

    /// Dismissive label substituted when a request omits one.
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            policy: SingleFlightPolicy::default(),
            confirm_label: default_confirm_label(),
            cancel_label: default_cancel_label(),
        }
    }
}

/// Diagnostics recording settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_diagnostics_enabled")]
    pub enabled: bool,

    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl DiagnosticsConfig {
    /// Returns the validated ring capacity.
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.buffer_capacity)
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_diagnostics_enabled(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Serde defaults
// =============================================================================

fn default_ttl_ms() -> u64 {
    DEFAULT_NOTIFICATION_TTL_MS
}

fn default_confirm_label() -> String {
    DEFAULT_CONFIRM_LABEL.to_string()
}

fn default_cancel_label() -> String {
    DEFAULT_CANCEL_LABEL.to_string()
}

fn default_diagnostics_enabled() -> bool {
    DEFAULT_DIAGNOSTICS_ENABLED
}

fn default_buffer_capacity() -> usize {
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the platform config directory.
///
/// A missing file yields the defaults. A malformed file also yields the
/// defaults, together with a warning describing the problem so the host
/// can surface it (typically as an error toast).
pub fn load() -> (Config, Option<String>) {
    match get_default_config_path() {
        Some(path) if path.exists() => match load_from_path(&path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err.to_string())),
        },
        _ => (Config::default(), None),
    }
}

/// Saves the configuration to the platform config directory.
///
/// Does nothing when the platform has no config directory.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Parses a configuration from TOML text.
pub fn from_toml_str(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Writes configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
