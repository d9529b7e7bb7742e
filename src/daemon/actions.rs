// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::sleep_until;

use crate::core::{
    action::Action,
    collab::{InputEmitter, InputSubscription},
    manager_msg::ManagerMsg,
};
use crate::services::ticker::run_ticker;
use crate::{sdebug, sinfo, swarn};

use super::Daemon;

impl Daemon {
    pub(super) fn exec_action(&mut self, action: Action, tx: &mpsc::Sender<ManagerMsg>) {
        match action {
            Action::SubscribeInput => {
                let emitter = InputEmitter::new(tx.clone());
                let handles = self
                    .collab
                    .inputs
                    .iter()
                    .filter_map(|source| source.subscribe(emitter.clone()))
                    .collect();

                self.tasks.set_input(InputSubscription::new(&emitter, handles));
                sdebug!("Tally", "input listeners registered");
            }

            Action::UnsubscribeInput => {
                self.tasks.drop_input();
                sdebug!("Tally", "input listeners removed");
            }

            Action::StartTicker { session } => {
                self.tasks.set_ticker(tokio::spawn(run_ticker(tx.clone(), session)));
            }

            Action::StopTicker => self.tasks.stop_ticker(),

            Action::ScheduleDeadline { generation, due_ms } => {
                let at = self.clock.instant_at(due_ms);
                let tx = tx.clone();

                self.tasks.set_deadline(tokio::spawn(async move {
                    sleep_until(at).await;
                    let _ = tx.send(ManagerMsg::DeadlineElapsed { generation }).await;
                }));
            }

            Action::CancelDeadline => self.tasks.cancel_deadline(),

            Action::Capture => {
                let capture = Arc::clone(&self.collab.capture);
                tokio::spawn(async move {
                    match capture.capture().await {
                        Ok(bytes) => sinfo!("Tally", "capture: {} bytes", bytes.len()),
                        Err(e) => swarn!("Tally", "capture failed: {}", e),
                    }
                });
            }

            Action::Alert { title, body } => {
                let alert = Arc::clone(&self.collab.alert);
                tokio::spawn(async move {
                    match alert.notify(&title, &body).await {
                        Ok(true) => sinfo!("Tally", "alert delivered: {}", title),
                        Ok(false) => sdebug!("Tally", "alert skipped: {}", title),
                        Err(e) => swarn!("Tally", "alert failed: {}", e),
                    }
                });
            }

            Action::Display(frame) => self.collab.display.show(&frame),
        }
    }
}
