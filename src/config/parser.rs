// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::path::PathBuf;

use rune_cfg::RuneConfig;

use crate::config::model::{NotificationPolicy, TallyConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The inactivity timeout must be positive.
    InvalidTimeout(u64),

    /// Unknown `notifications` value.
    InvalidNotifications(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout(ms) => {
                write!(f, "inactivity_timeout_ms must be greater than 0 (got {ms})")
            }
            ConfigError::InvalidNotifications(s) => write!(
                f,
                "notifications must be one of \"ask\", \"always\", \"never\" (got \"{s}\")"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parses the `tally` section. Missing keys keep their defaults.
pub fn parse_tally_config(config: &RuneConfig) -> Result<TallyConfig, ConfigError> {
    let defaults = TallyConfig::default();

    let inactivity_timeout_ms = config
        .get::<u64>("tally.inactivity_timeout_ms")
        .or_else(|_| config.get::<u64>("tally.inactivity-timeout-ms"))
        .unwrap_or(defaults.inactivity_timeout_ms);

    let capture_command = config
        .get::<String>("tally.capture_command")
        .or_else(|_| config.get::<String>("tally.capture-command"))
        .map(normalize_command)
        .unwrap_or(defaults.capture_command);

    let capture_dir = config
        .get::<String>("tally.capture_dir")
        .or_else(|_| config.get::<String>("tally.capture-dir"))
        .map(|s| normalize_dir(&s))
        .unwrap_or(defaults.capture_dir);

    let notifications = match config.get::<String>("tally.notifications") {
        Ok(s) => parse_notifications(&s)?,
        Err(_) => defaults.notifications,
    };

    let console_display = config
        .get::<bool>("tally.console_display")
        .or_else(|_| config.get::<bool>("tally.console-display"))
        .unwrap_or(defaults.console_display);

    let cfg = TallyConfig {
        inactivity_timeout_ms,
        capture_command,
        capture_dir,
        notifications,
        console_display,
    };

    validate(&cfg)?;
    Ok(cfg)
}

pub fn validate(cfg: &TallyConfig) -> Result<(), ConfigError> {
    if cfg.inactivity_timeout_ms == 0 {
        return Err(ConfigError::InvalidTimeout(cfg.inactivity_timeout_ms));
    }
    Ok(())
}

pub fn parse_notifications(s: &str) -> Result<NotificationPolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "ask" => Ok(NotificationPolicy::Ask),
        "always" | "granted" => Ok(NotificationPolicy::Always),
        "never" | "denied" => Ok(NotificationPolicy::Never),
        other => Err(ConfigError::InvalidNotifications(other.to_string())),
    }
}

/// Empty command disables capture.
fn normalize_command(s: String) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Empty directory disables saving, and with it capture.
fn normalize_dir(s: &str) -> Option<PathBuf> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(expand_home(s)) }
}

fn expand_home(s: &str) -> PathBuf {
    match s.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(s)),
        None => PathBuf::from(s),
    }
}
