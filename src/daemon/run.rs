// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, watch};

use crate::core::{
    action::Action,
    events::Event,
    format::format_elapsed,
    manager_msg::{ControlCommand, ManagerMsg, Reply},
};
use crate::{sdebug, sinfo};

use super::Daemon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

impl Daemon {
    pub async fn run(
        &mut self,
        tx: mpsc::Sender<ManagerMsg>,
        mut rx: mpsc::Receiver<ManagerMsg>,
        mut shutdown: watch::Receiver<bool>,
    ) -> eyre::Result<()> {
        sinfo!(
            "Tally",
            "daemon starting (inactivity_timeout_ms={})",
            self.manager.timeout_ms()
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        sinfo!("Tally", "daemon stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(first) = maybe else {
                        sinfo!("Tally", "daemon stopping (event channel closed)");
                        break;
                    };

                    // Everything already queued is one evaluation pass.
                    let mut batch = vec![first];
                    while let Ok(msg) = rx.try_recv() {
                        batch.push(msg);
                    }

                    if self.process_batch(batch, &tx) == Flow::Quit {
                        sinfo!("Tally", "daemon stopping (quit requested)");
                        break;
                    }
                }
            }
        }

        self.finish(&tx);
        Ok(())
    }

    /// Deadlines are evaluated after every other message of the batch, so input
    /// observed in the same pass always supersedes them.
    pub(super) fn process_batch(&mut self, batch: Vec<ManagerMsg>, tx: &mpsc::Sender<ManagerMsg>) -> Flow {
        let now_ms = self.clock.now_ms();
        let mut deadlines = Vec::new();
        let mut flow = Flow::Continue;

        for msg in batch {
            match msg {
                ManagerMsg::DeadlineElapsed { generation } => deadlines.push(generation),
                other => {
                    if self.process_msg(other, now_ms, tx) == Flow::Quit {
                        flow = Flow::Quit;
                    }
                }
            }
        }

        for generation in deadlines {
            self.dispatch(Event::DeadlineElapsed { generation, now_ms }, tx);
        }

        flow
    }

    fn process_msg(&mut self, msg: ManagerMsg, now_ms: u64, tx: &mpsc::Sender<ManagerMsg>) -> Flow {
        match msg {
            ManagerMsg::Input(kind) => {
                self.dispatch(Event::UserInput { kind, now_ms }, tx);
            }

            ManagerMsg::Tick { session } => {
                self.dispatch(Event::Tick { session, now_ms }, tx);
            }

            ManagerMsg::DeadlineElapsed { generation } => {
                self.dispatch(Event::DeadlineElapsed { generation, now_ms }, tx);
            }

            ManagerMsg::Control { command, reply } => {
                return self.control(command, reply, now_ms, tx);
            }

            ManagerMsg::GetInfo { reply } => {
                let _ = reply.send(self.manager.snapshot(&self.state, now_ms));
            }
        }

        Flow::Continue
    }

    fn control(
        &mut self,
        command: ControlCommand,
        reply: Option<Reply>,
        now_ms: u64,
        tx: &mpsc::Sender<ManagerMsg>,
    ) -> Flow {
        let start = match command {
            ControlCommand::Start => true,
            ControlCommand::Stop => false,
            ControlCommand::Toggle => !self.state.tracker().is_active(),
            ControlCommand::Quit => {
                self.dispatch(Event::StopTracking { now_ms }, tx);
                if let Some(reply) = reply {
                    let _ = reply.send(Ok("Stopping tally".to_string()));
                }
                return Flow::Quit;
            }
        };

        let text = if start {
            if self.dispatch(Event::StartTracking { now_ms }, tx) {
                sinfo!("Tally", "tracking started");
                "Tracking started".to_string()
            } else {
                "Already tracking".to_string()
            }
        } else if self.dispatch(Event::StopTracking { now_ms }, tx) {
            let elapsed = format_elapsed(self.state.tracker().elapsed_ms(now_ms));
            sinfo!("Tally", "tracking stopped (total {})", elapsed);
            format!("Tracking stopped (total {elapsed})")
        } else {
            "Not tracking".to_string()
        };

        if let Some(reply) = reply {
            let _ = reply.send(Ok(text));
        }

        Flow::Continue
    }

    /// Returns whether the event produced any action.
    fn dispatch(&mut self, event: Event, tx: &mpsc::Sender<ManagerMsg>) -> bool {
        let at_ms = event.now_ms();
        let actions = self.manager.handle_event(&mut self.state, event);
        let acted = !actions.is_empty();

        for action in actions {
            if !matches!(action, Action::Display(_)) {
                sdebug!("Tally", "action at {}ms: {:?}", at_ms, action);
            }
            self.exec_action(action, tx);
        }

        acted
    }

    fn finish(&mut self, tx: &mpsc::Sender<ManagerMsg>) {
        let now_ms = self.clock.now_ms();
        self.dispatch(Event::StopTracking { now_ms }, tx);
        self.tasks.abort_all();

        sinfo!(
            "Tally",
            "total tracked time: {}",
            format_elapsed(self.state.tracker().elapsed_ms(now_ms))
        );
    }
}
