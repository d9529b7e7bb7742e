// Author: Dustin Pilgrim
// License: MIT

use crate::core::format::ElapsedDisplay;

/// Tracking on/off state plus the time carried over from earlier intervals.
///
/// `start_ms` is `Some` exactly while tracking is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingSession {
    start_ms: Option<u64>,
    accumulated_ms: u64,
}

impl TrackingSession {
    pub fn is_active(&self) -> bool {
        self.start_ms.is_some()
    }
}

/// Elapsed-time state machine.
#[derive(Debug, Clone, Default)]
pub struct ElapsedTracker {
    session: TrackingSession,

    // Bumped on every activation; ticks from older activations are stale.
    activation: u64,
}

impl ElapsedTracker {
    /// Returns `true` if this call activated tracking.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.session.is_active() {
            return false;
        }

        self.session.start_ms = Some(now_ms);
        self.activation = self.activation.wrapping_add(1);
        true
    }

    /// Returns `true` if this call stopped an active session.
    pub fn stop(&mut self, now_ms: u64) -> bool {
        let Some(start) = self.session.start_ms.take() else {
            return false;
        };

        self.session.accumulated_ms += now_ms.saturating_sub(start);
        true
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Current activation number (0 before the first start).
    pub fn activation(&self) -> u64 {
        self.activation
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.session.start_ms {
            Some(start) => self.session.accumulated_ms + now_ms.saturating_sub(start),
            None => self.session.accumulated_ms,
        }
    }

    pub fn tick(&self, now_ms: u64) -> ElapsedDisplay {
        ElapsedDisplay::from_millis(self.elapsed_ms(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut t = ElapsedTracker::default();

        assert!(t.start(1_000));
        assert!(!t.start(4_000));

        assert_eq!(t.session.start_ms, Some(1_000));
        assert_eq!(t.activation(), 1);
        assert_eq!(t.elapsed_ms(6_000), 5_000);
    }

    #[test]
    fn stop_when_inactive_is_noop() {
        let mut t = ElapsedTracker::default();

        assert!(!t.stop(5_000));
        assert_eq!(t.session.accumulated_ms, 0);
        assert!(!t.is_active());
    }

    #[test]
    fn accumulates_only_active_intervals() {
        let mut t = ElapsedTracker::default();

        let intervals = [(0, 1_500), (4_000, 4_250), (10_000, 70_000)];
        for (start, stop) in intervals {
            t.start(start);
            t.stop(stop);
        }

        let expected: u64 = intervals.iter().map(|(a, b)| b - a).sum();
        assert_eq!(t.session.accumulated_ms, expected);
        assert_eq!(t.elapsed_ms(1_000_000), expected);
    }

    #[test]
    fn accumulated_changes_only_on_stop() {
        let mut t = ElapsedTracker::default();
        t.start(0);

        let _ = t.tick(2_000);
        let _ = t.tick(3_000);
        assert_eq!(t.session.accumulated_ms, 0);

        t.stop(3_500);
        assert_eq!(t.session.accumulated_ms, 3_500);
        assert_eq!(t.session.start_ms, None);
    }

    #[test]
    fn elapsed_never_decreases_across_cycles() {
        let mut t = ElapsedTracker::default();
        let mut last = 0;

        t.start(0);
        for now in (0..=5_000).step_by(250) {
            let e = t.elapsed_ms(now);
            assert!(e >= last);
            last = e;
        }
        t.stop(5_000);

        // paused interval does not move the clock
        assert_eq!(t.elapsed_ms(9_000), last);

        t.start(10_000);
        assert_eq!(t.elapsed_ms(10_000), last);
        assert_eq!(t.elapsed_ms(10_001), last + 1);
    }

    #[test]
    fn tick_truncates_to_seconds() {
        let mut t = ElapsedTracker::default();
        t.start(0);

        assert_eq!(t.tick(1_999).to_string(), "00:00:01");
        assert_eq!(t.tick(61_000).to_string(), "00:01:01");
    }
}
