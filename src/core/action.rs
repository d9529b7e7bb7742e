// Author: Dustin Pilgrim
// License: MIT

use crate::core::info::DisplayFrame;

/// Side effects requested by the core. The daemon decides how to run them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Register qualifying-input listeners.
    SubscribeInput,

    /// Drop input listeners; must take effect before the next message is handled.
    UnsubscribeInput,

    /// Start the 1s ticker for activation `session`.
    StartTicker { session: u64 },

    StopTicker,

    /// Replace any pending deadline timer.
    ScheduleDeadline { generation: u64, due_ms: u64 },

    CancelDeadline,

    /// Fire-and-forget screen capture.
    Capture,

    /// Fire-and-forget user alert.
    Alert { title: String, body: String },

    /// Hand a frame to the display sink.
    Display(DisplayFrame),
}
