// Author: Dustin Pilgrim
// License: MIT

/// Kinds of user-generated input that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A line typed on the controlling terminal.
    KeyPress,
    /// Compositor-level seat activity (pointer or keyboard, not distinguished).
    Seat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartTracking {
        now_ms: u64,
    },

    StopTracking {
        now_ms: u64,
    },

    /// Periodic tick from the ticker spawned for activation `session`.
    Tick {
        session: u64,
        now_ms: u64,
    },

    UserInput {
        kind: InputKind,
        now_ms: u64,
    },

    /// The deadline timer for `generation` woke up.
    DeadlineElapsed {
        generation: u64,
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::StartTracking { now_ms }
            | Event::StopTracking { now_ms }
            | Event::Tick { now_ms, .. }
            | Event::UserInput { now_ms, .. }
            | Event::DeadlineElapsed { now_ms, .. } => *now_ms,
        }
    }
}
