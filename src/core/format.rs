// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

const MS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Elapsed time split into display units.
///
/// Derived on demand from the tracker; never the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedDisplay {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedDisplay {
    /// Truncates at every unit boundary. Hours are not wrapped.
    pub fn from_millis(total_ms: u64) -> Self {
        let total_secs = total_ms / MS_PER_SECOND;

        Self {
            hours: total_secs / SECONDS_PER_HOUR,
            minutes: (total_secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total_secs % SECONDS_PER_MINUTE,
        }
    }
}

impl fmt::Display for ElapsedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// `HH:MM:SS`, with `HH` growing past two digits when needed.
pub fn format_elapsed(total_ms: u64) -> String {
    ElapsedDisplay::from_millis(total_ms).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(0), "00:00:00");
    }

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_elapsed(3_661_000), "01:01:01");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(format_elapsed(999), "00:00:00");
        assert_eq!(format_elapsed(59_999), "00:00:59");
        assert_eq!(format_elapsed(3_599_999), "00:59:59");
    }

    #[test]
    fn hours_are_not_wrapped() {
        assert_eq!(format_elapsed(359_999_000), "99:59:59");
        assert_eq!(format_elapsed(360_000_000), "100:00:00");
        assert_eq!(format_elapsed(25 * 3_600_000), "25:00:00");
    }

    #[test]
    fn splits_into_units() {
        let d = ElapsedDisplay::from_millis(7_384_500);
        assert_eq!(
            d,
            ElapsedDisplay {
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
    }
}
