// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use crate::core::manager::DEFAULT_INACTIVITY_TIMEOUT_MS;

pub const DEFAULT_CAPTURE_COMMAND: &str = "grim -";

/// `$XDG_PICTURES_DIR/tally`, falling back to the cache dir.
pub fn default_capture_dir() -> Option<PathBuf> {
    dirs::picture_dir()
        .or_else(dirs::cache_dir)
        .map(|d| d.join("tally"))
}

/// How alerts treat the notification permission at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPolicy {
    /// Undetermined: ask the notification service on the first alert.
    Ask,
    /// Granted up front.
    Always,
    /// Denied; alerts are skipped silently.
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyConfig {
    pub inactivity_timeout_ms: u64,
    pub capture_command: Option<String>,
    pub capture_dir: Option<PathBuf>,
    pub notifications: NotificationPolicy,
    pub console_display: bool,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: DEFAULT_INACTIVITY_TIMEOUT_MS,
            capture_command: Some(DEFAULT_CAPTURE_COMMAND.to_string()),
            capture_dir: default_capture_dir(),
            notifications: NotificationPolicy::Ask,
            console_display: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_saves_captures_somewhere() {
        let cfg = TallyConfig::default();
        assert!(cfg.capture_command.is_some());
        if let Some(base) = dirs::picture_dir().or_else(dirs::cache_dir) {
            assert_eq!(cfg.capture_dir, Some(base.join("tally")));
        }
    }
}
