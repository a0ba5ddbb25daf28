use core::cmp::Ordering;

use crate::SnowflakeId;

/// Mutable generator state: the last wall-clock millisecond an ID was issued
/// at, and the sequence used within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GeneratorState {
    pub(crate) last_timestamp: i64,
    pub(crate) sequence: i64,
}

/// Outcome of [`GeneratorState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Advance {
    /// The state moved to a fresh `(last_timestamp, sequence)` pair.
    Issued,
    /// The sequence for `last_timestamp` is used up.
    Exhausted,
    /// `now` is behind `last_timestamp` by this many milliseconds.
    Behind(i64),
}

impl GeneratorState {
    /// Sentinel for "nothing issued yet"; any real clock reading is larger.
    pub(crate) const UNSET: i64 = -1;

    pub(crate) const fn from_components(last_timestamp: i64, sequence: i64) -> Self {
        Self {
            last_timestamp,
            sequence,
        }
    }

    /// Tries to claim the next `(timestamp, sequence)` pair at `now`. The
    /// state only changes on [`Advance::Issued`].
    pub(crate) fn advance(&mut self, now: i64) -> Advance {
        match now.cmp(&self.last_timestamp) {
            Ordering::Greater => {
                self.last_timestamp = now;
                self.sequence = 0;
                Advance::Issued
            }
            Ordering::Equal => {
                if self.sequence < SnowflakeId::MAX_SEQUENCE {
                    self.sequence += 1;
                    Advance::Issued
                } else {
                    Advance::Exhausted
                }
            }
            Ordering::Less => Advance::Behind(self.last_timestamp - now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reading_always_issues() {
        let mut state = GeneratorState::from_components(GeneratorState::UNSET, 0);
        assert_eq!(state.advance(0), Advance::Issued);
        assert_eq!(state, GeneratorState::from_components(0, 0));
    }

    #[test]
    fn same_millisecond_counts_up_then_exhausts() {
        let mut state = GeneratorState::from_components(10, SnowflakeId::MAX_SEQUENCE - 1);
        assert_eq!(state.advance(10), Advance::Issued);
        assert_eq!(state.sequence, SnowflakeId::MAX_SEQUENCE);

        assert_eq!(state.advance(10), Advance::Exhausted);
        assert_eq!(state.advance(10), Advance::Exhausted);
        assert_eq!(state, GeneratorState::from_components(10, SnowflakeId::MAX_SEQUENCE));

        assert_eq!(state.advance(11), Advance::Issued);
        assert_eq!(state, GeneratorState::from_components(11, 0));
    }

    #[test]
    fn rollback_reports_distance_without_mutating() {
        let mut state = GeneratorState::from_components(100, 7);
        assert_eq!(state.advance(95), Advance::Behind(5));
        assert_eq!(state, GeneratorState::from_components(100, 7));

        assert_eq!(state.advance(100), Advance::Issued);
        assert_eq!(state, GeneratorState::from_components(100, 8));
    }
}
