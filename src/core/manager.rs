// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    events::Event,
    info::{DisplayFrame, InfoSnapshot},
    monitor::InactivityMonitor,
    tracker::ElapsedTracker,
};

pub const DEFAULT_INACTIVITY_TIMEOUT_MS: u64 = 60_000;

pub const ALERT_TITLE: &str = "Inactivity detected";
pub const ALERT_BODY: &str = "You have been inactive for a while.";

/// Both state machines. The monitor only lives while the tracker is active.
#[derive(Debug, Clone, Default)]
pub struct State {
    tracker: ElapsedTracker,
    monitor: InactivityMonitor,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracker(&self) -> &ElapsedTracker {
        &self.tracker
    }

    pub fn monitor(&self) -> &InactivityMonitor {
        &self.monitor
    }
}

/// Turns events into actions. Pure: time only enters through the events.
#[derive(Debug, Clone)]
pub struct Manager {
    timeout_ms: u64,
}

impl Manager {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms: timeout_ms.max(1),
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn handle_event(&self, state: &mut State, event: Event) -> Vec<Action> {
        match event {
            Event::StartTracking { now_ms } => self.on_start(state, now_ms),
            Event::StopTracking { now_ms } => self.on_stop(state, now_ms),

            Event::Tick { session, now_ms } => {
                if !state.tracker.is_active() || session != state.tracker.activation() {
                    return Vec::new();
                }
                vec![Action::Display(self.frame(state, now_ms))]
            }

            Event::UserInput { now_ms, .. } => {
                let was_fired = state.monitor.fired();

                let Some(deadline) = state.monitor.on_input(now_ms) else {
                    return Vec::new();
                };

                let mut actions = vec![Action::ScheduleDeadline {
                    generation: deadline.generation,
                    due_ms: deadline.due_ms,
                }];

                if was_fired {
                    actions.push(Action::Display(self.frame(state, now_ms)));
                }
                actions
            }

            Event::DeadlineElapsed { generation, now_ms } => {
                if !state.monitor.on_deadline(generation, now_ms) {
                    return Vec::new();
                }

                vec![
                    Action::Capture,
                    Action::Alert {
                        title: ALERT_TITLE.to_string(),
                        body: ALERT_BODY.to_string(),
                    },
                    Action::Display(self.frame(state, now_ms)),
                ]
            }
        }
    }

    fn on_start(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        if !state.tracker.start(now_ms) {
            return Vec::new();
        }

        let deadline = state.monitor.arm(now_ms, self.timeout_ms);

        vec![
            Action::SubscribeInput,
            Action::StartTicker {
                session: state.tracker.activation(),
            },
            Action::ScheduleDeadline {
                generation: deadline.generation,
                due_ms: deadline.due_ms,
            },
            Action::Display(self.frame(state, now_ms)),
        ]
    }

    fn on_stop(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        if !state.tracker.stop(now_ms) {
            return Vec::new();
        }

        state.monitor.disarm();

        vec![
            Action::CancelDeadline,
            Action::UnsubscribeInput,
            Action::StopTicker,
            Action::Display(self.frame(state, now_ms)),
        ]
    }

    pub fn frame(&self, state: &State, now_ms: u64) -> DisplayFrame {
        DisplayFrame {
            elapsed: state.tracker.tick(now_ms).to_string(),
            inactive: state.monitor.fired(),
            tracking: state.tracker.is_active(),
        }
    }

    pub fn snapshot(&self, state: &State, now_ms: u64) -> InfoSnapshot {
        InfoSnapshot::new(
            &self.frame(state, now_ms),
            state.tracker.elapsed_ms(now_ms),
            self.timeout_ms,
        )
    }
}

impl Default for Manager {
    fn default() -> Self {
        Manager::new(DEFAULT_INACTIVITY_TIMEOUT_MS)
    }
}
