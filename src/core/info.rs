// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

/// One presentation update for the display sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub elapsed: String,
    pub inactive: bool,
    pub tracking: bool,
}

/// Snapshot returned from the daemon for `tally info`.
///
/// - `waybar` is the stable JSON contract.
/// - `pretty_text` is CLI-facing output for `tally info`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub waybar: WaybarInfo,

    #[serde(skip_serializing)]
    pub pretty_text: String,

    pub tracking: bool,
    pub inactive: bool,
    pub elapsed_ms: u64,
}

/// Waybar JSON contract.
#[derive(Debug, Clone, Serialize)]
pub struct WaybarInfo {
    pub text: String,
    pub alt: String,
    pub class: String,
    pub tooltip: String,
}

impl InfoSnapshot {
    pub fn new(frame: &DisplayFrame, elapsed_ms: u64, timeout_ms: u64) -> Self {
        let status = match (frame.tracking, frame.inactive) {
            (false, _) => "stopped",
            (true, false) => "active",
            (true, true) => "inactive",
        };

        let tooltip = format!(
            "Tracking: {status}\nElapsed: {}\nInactivity timeout: {}s",
            frame.elapsed,
            timeout_ms / 1000
        );

        let pretty_text = format!(
            "Tracking:           {}\nElapsed:            {}\nInactive:           {}\nInactivity timeout: {} ms",
            if frame.tracking { "active" } else { "stopped" },
            frame.elapsed,
            if frame.inactive { "yes" } else { "no" },
            timeout_ms,
        );

        Self {
            waybar: WaybarInfo {
                text: frame.elapsed.clone(),
                alt: status.to_string(),
                class: status.to_string(),
                tooltip,
            },
            pretty_text,
            tracking: frame.tracking,
            inactive: frame.inactive,
            elapsed_ms,
        }
    }
}
