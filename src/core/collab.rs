// Author: Dustin Pilgrim
// License: MIT

//! Seams between the core and the outside world.
//!
//! The core never calls these directly: it emits [`Action`](crate::core::action::Action)s
//! and the daemon routes them to the collaborator behind each trait.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use futures::future::BoxFuture;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::core::{
    error::{AlertError, CaptureError},
    events::InputKind,
    info::DisplayFrame,
    manager_msg::ManagerMsg,
};

/// Visual capture. Returns the raw image bytes.
pub trait Capture: Send + Sync + 'static {
    fn capture(&self) -> BoxFuture<'_, Result<Vec<u8>, CaptureError>>;
}

/// User alert. `Ok(false)` means the alert was skipped (e.g. permission denied).
pub trait Alert: Send + Sync + 'static {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str) -> BoxFuture<'a, Result<bool, AlertError>>;
}

pub trait DisplaySink: Send + Sync + 'static {
    fn show(&self, frame: &DisplayFrame);
}

/// Source of qualifying input.
///
/// `subscribe` is called when a session becomes active. The source must only deliver
/// through the given emitter; once the subscription is dropped the emitter goes dead.
pub trait InputSource: Send + Sync + 'static {
    fn subscribe(&self, emitter: InputEmitter) -> Option<JoinHandle<()>>;
}

/// Handle given to input sources for the lifetime of one subscription.
#[derive(Debug, Clone)]
pub struct InputEmitter {
    tx: mpsc::Sender<ManagerMsg>,
    live: Arc<AtomicBool>,
}

impl InputEmitter {
    pub fn new(tx: mpsc::Sender<ManagerMsg>) -> Self {
        Self {
            tx,
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns `false` if the subscription is gone or the daemon is not listening.
    pub fn emit(&self, kind: InputKind) -> bool {
        if !self.is_live() {
            return false;
        }

        self.tx.try_send(ManagerMsg::Input(kind)).is_ok()
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst) && !self.tx.is_closed()
    }
}

/// Live input registration. Dropping it deregisters synchronously.
#[derive(Debug)]
pub struct InputSubscription {
    live: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
}

impl InputSubscription {
    pub fn new(emitter: &InputEmitter, tasks: Vec<JoinHandle<()>>) -> Self {
        Self {
            live: Arc::clone(&emitter.live),
            tasks,
        }
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        self.live.store(false, Ordering::SeqCst);

        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
