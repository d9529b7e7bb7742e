// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod run;
mod tasks;


use std::sync::Arc;

use tokio::time::{Duration, Instant};

use crate::core::{
    collab::{Alert, Capture, DisplaySink, InputSource},
    manager::{Manager, State},
};

use tasks::TaskManager;

/// External collaborators the daemon routes actions to.
pub struct Collaborators {
    pub capture: Arc<dyn Capture>,
    pub alert: Arc<dyn Alert>,
    pub display: Arc<dyn DisplaySink>,
    pub inputs: Vec<Arc<dyn InputSource>>,
}

/// Monotonic milliseconds since the daemon started.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    pub fn instant_at(&self, ms: u64) -> Instant {
        self.origin + Duration::from_millis(ms)
    }
}

pub struct Daemon {
    manager: Manager,
    state: State,
    clock: Clock,
    collab: Collaborators,
    tasks: TaskManager,
}

impl Daemon {
    pub fn new(manager: Manager, collab: Collaborators) -> Self {
        Self {
            manager,
            state: State::new(),
            clock: Clock::start(),
            collab,
            tasks: TaskManager::new(),
        }
    }
}
