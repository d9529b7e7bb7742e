// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Failure of the capture collaborator. Logged, never propagated into the core.
#[derive(Debug)]
pub enum CaptureError {
    /// Capture is switched off in the configuration.
    Disabled,

    /// The capture command could not be spawned.
    Spawn(std::io::Error),

    /// The capture command exited unsuccessfully.
    Failed { status: Option<i32>, stderr: String },

    /// The capture command produced no image data.
    Empty,

    /// The image could not be written to the capture directory.
    Save(std::io::Error),
}

/// Failure of the alert collaborator. Logged, never propagated into the core.
#[derive(Debug)]
pub enum AlertError {
    /// No notification service could be reached.
    Unavailable(String),

    /// The notification service rejected the request.
    Rejected(String),
}

// ---------------- Display ----------------

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Disabled => write!(f, "capture disabled"),
            CaptureError::Spawn(e) => write!(f, "failed to spawn capture command: {e}"),
            CaptureError::Failed { status: Some(code), stderr } if !stderr.is_empty() => {
                write!(f, "capture command exited with {code}: {stderr}")
            }
            CaptureError::Failed { status: Some(code), .. } => {
                write!(f, "capture command exited with {code}")
            }
            CaptureError::Failed { status: None, .. } => {
                write!(f, "capture command terminated by signal")
            }
            CaptureError::Empty => write!(f, "capture command produced no image data"),
            CaptureError::Save(e) => write!(f, "failed to save capture: {e}"),
        }
    }
}

impl fmt::Display for AlertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertError::Unavailable(s) => write!(f, "notification service unavailable: {s}"),
            AlertError::Rejected(s) => write!(f, "notification rejected: {s}"),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Spawn(e) | CaptureError::Save(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for AlertError {}
