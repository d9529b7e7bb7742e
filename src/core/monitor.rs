// Author: Dustin Pilgrim
// License: MIT

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Waiting for the deadline.
    Armed,
    /// Deadline passed with no qualifying input since.
    Fired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactivityState {
    timeout_ms: u64,
    last_reset_ms: u64,
    phase: MonitorPhase,
}

impl InactivityState {
    pub fn fired(&self) -> bool {
        self.phase == MonitorPhase::Fired
    }

    pub fn due_ms(&self) -> u64 {
        self.last_reset_ms.saturating_add(self.timeout_ms)
    }
}

/// A scheduled deadline. Only the newest generation may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    pub generation: u64,
    pub due_ms: u64,
}

/// Inactivity state machine.
///
/// `state` is `None` while disarmed; every signal is ignored in that case.
#[derive(Debug, Clone, Default)]
pub struct InactivityMonitor {
    state: Option<InactivityState>,
    generation: u64,
}

impl InactivityMonitor {
    pub fn arm(&mut self, now_ms: u64, timeout_ms: u64) -> Deadline {
        self.state = Some(InactivityState {
            timeout_ms: timeout_ms.max(1),
            last_reset_ms: now_ms,
            phase: MonitorPhase::Armed,
        });

        self.next_deadline()
    }

    /// Tears the monitor down. Returns `false` if it was already disarmed.
    pub fn disarm(&mut self) -> bool {
        if self.state.take().is_none() {
            return false;
        }

        // Invalidate whatever deadline is still in flight.
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Qualifying input: back to ARMED with a fresh full window.
    pub fn on_input(&mut self, now_ms: u64) -> Option<Deadline> {
        let state = self.state.as_mut()?;

        state.last_reset_ms = now_ms;
        state.phase = MonitorPhase::Armed;

        Some(self.next_deadline())
    }

    /// Returns `true` if this deadline caused the ARMED -> FIRED transition.
    pub fn on_deadline(&mut self, generation: u64, now_ms: u64) -> bool {
        if generation != self.generation {
            return false;
        }

        let Some(state) = self.state.as_mut() else {
            return false;
        };

        if state.phase == MonitorPhase::Fired || now_ms < state.due_ms() {
            return false;
        }

        state.phase = MonitorPhase::Fired;
        true
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.state.is_some()
    }

    pub fn fired(&self) -> bool {
        self.state.as_ref().is_some_and(InactivityState::fired)
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn next_deadline(&mut self) -> Deadline {
        self.generation = self.generation.wrapping_add(1);

        let due_ms = self.state.as_ref().map_or(0, InactivityState::due_ms);
        Deadline {
            generation: self.generation,
            due_ms,
        }
    }
}
