//! # Time-Interval Conflict Detection
//!
//! Half-open time intervals and the overlap test shared by reservation
//! and shift scheduling.
//!
//! ## Half-Open Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Intervals are [start, end): the end instant is NOT included.       │
//! │                                                                     │
//! │  [10:00 ─────── 11:00)                                              │
//! │                 [11:00 ─────── 12:00)     back-to-back: NO conflict │
//! │                                                                     │
//! │  [10:00 ─────── 11:00)                                              │
//! │        [10:30 ─────── 11:30)              overlap:      CONFLICT    │
//! │                                                                     │
//! │  Two intervals conflict iff  s1 < e2  AND  s2 < e1.                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers pre-filter the existing set (e.g. drop CANCELLED reservations,
//! restrict to one staff member's shifts) before running the detector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Time Range
// =============================================================================

/// A validated half-open interval `[start, end)`.
///
/// Construction enforces `end > start`; a zero- or negative-length
/// interval is an input error, never a conflict-check candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a time range, rejecting `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(TimeRange { start, end })
    }

    /// Start instant (inclusive).
    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End instant (exclusive).
    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Interval length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Tests whether two half-open intervals overlap.
    ///
    /// Equal boundaries do not conflict: an interval ending exactly when
    /// another starts leaves both bookable.
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// =============================================================================
// Conflict Detection
// =============================================================================

/// Returns true if the candidate interval overlaps any existing interval.
///
/// The first conflict found is sufficient; the detector does not report
/// which interval conflicts.
pub fn conflicts(candidate: &TimeRange, existing: &[TimeRange]) -> bool {
    existing.iter().any(|range| candidate.overlaps(range))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 10, hour, min, 0).unwrap()
    }

    fn range(s: (u32, u32), e: (u32, u32)) -> TimeRange {
        TimeRange::new(at(s.0, s.1), at(e.0, e.1)).unwrap()
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert!(matches!(
            TimeRange::new(at(15, 0), at(14, 0)),
            Err(ValidationError::EndNotAfterStart)
        ));
    }

    #[test]
    fn test_rejects_zero_length_range() {
        assert!(TimeRange::new(at(14, 0), at(14, 0)).is_err());
    }

    #[test]
    fn test_back_to_back_is_not_a_conflict() {
        let candidate = range((10, 0), (11, 0));
        assert!(!conflicts(&candidate, &[range((11, 0), (12, 0))]));
        assert!(!conflicts(&candidate, &[range((9, 0), (10, 0))]));
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        let candidate = range((10, 0), (11, 0));
        assert!(conflicts(&candidate, &[range((10, 30), (11, 30))]));
    }

    #[test]
    fn test_contained_interval_conflicts() {
        let candidate = range((10, 15), (10, 45));
        assert!(conflicts(&candidate, &[range((10, 0), (11, 0))]));
    }

    #[test]
    fn test_identical_interval_conflicts() {
        let candidate = range((10, 0), (11, 0));
        assert!(conflicts(&candidate, &[range((10, 0), (11, 0))]));
    }

    #[test]
    fn test_disjoint_intervals_do_not_conflict() {
        let candidate = range((10, 0), (11, 0));
        assert!(!conflicts(&candidate, &[range((13, 0), (14, 0))]));
    }

    #[test]
    fn test_empty_existing_set() {
        assert!(!conflicts(&range((10, 0), (11, 0)), &[]));
    }

    #[test]
    fn test_detection_is_symmetric() {
        let a = range((10, 0), (11, 0));
        let b = range((10, 30), (11, 30));
        assert_eq!(conflicts(&a, &[b]), conflicts(&b, &[a]));

        let c = range((11, 0), (12, 0));
        assert_eq!(conflicts(&a, &[c]), conflicts(&c, &[a]));
    }

    #[test]
    fn test_first_conflict_among_many() {
        let candidate = range((12, 0), (13, 0));
        let existing = [
            range((8, 0), (9, 0)),
            range((12, 30), (12, 45)),
            range((15, 0), (16, 0)),
        ];
        assert!(conflicts(&candidate, &existing));
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(range((9, 0), (10, 0)).duration_minutes(), 60);
        assert_eq!(range((9, 0), (9, 59)).duration_minutes(), 59);
    }
}
