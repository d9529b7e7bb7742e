// Author: Dustin Pilgrim
// License: MIT

use tokio::task::JoinHandle;

use crate::core::collab::InputSubscription;

/// Owns every live timer and listener of the current session.
///
/// Replacing or clearing a slot aborts what was there.
#[derive(Debug, Default)]
pub struct TaskManager {
    ticker: Option<JoinHandle<()>>,
    deadline: Option<JoinHandle<()>>,
    input: Option<InputSubscription>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ticker(&mut self, handle: JoinHandle<()>) {
        self.stop_ticker();
        self.ticker = Some(handle);
    }

    pub fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    pub fn set_deadline(&mut self, handle: JoinHandle<()>) {
        self.cancel_deadline();
        self.deadline = Some(handle);
    }

    pub fn cancel_deadline(&mut self) {
        if let Some(handle) = self.deadline.take() {
            handle.abort();
        }
    }

    pub fn set_input(&mut self, sub: InputSubscription) {
        self.input = Some(sub);
    }

    /// Synchronous: once this returns no emitter of the old subscription is live.
    pub fn drop_input(&mut self) {
        drop(self.input.take());
    }

    #[cfg(test)]
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    pub fn abort_all(&mut self) {
        self.stop_ticker();
        self.cancel_deadline();
        self.drop_input();
    }
}
