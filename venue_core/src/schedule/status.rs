//! Event status and the clocks used to evaluate it.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use venue_model::EventRecord;

/// Where an event stands relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventStatus {
    /// Starts later than the "soon" threshold.
    UpcomingFar,
    /// Starts within the "soon" threshold.
    UpcomingSoon,
    /// Running; both the start and end instants count as running.
    Ongoing,
    Completed,
}

impl EventStatus {
    /// Classify `event` at `now`.
    pub fn classify(event: &EventRecord, now: DateTime<Utc>, soon: Duration) -> Self {
        if now < event.start_time {
            if event.start_time - now <= soon {
                EventStatus::UpcomingSoon
            } else {
                EventStatus::UpcomingFar
            }
        } else if now <= event.end_time {
            EventStatus::Ongoing
        } else {
            EventStatus::Completed
        }
    }

    pub fn is_upcoming(&self) -> bool {
        matches!(self, EventStatus::UpcomingFar | EventStatus::UpcomingSoon)
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    fn event() -> EventRecord {
        EventRecord::new("ev-1", "Keynote", at(12, 14, 0), at(12, 15, 0))
    }

    fn status(now: DateTime<Utc>) -> EventStatus {
        EventStatus::classify(&event(), now, Duration::minutes(60))
    }

    #[test]
    fn test_upcoming_far_and_soon() {
        assert_eq!(status(at(12, 12, 59)), EventStatus::UpcomingFar);
        assert_eq!(status(at(12, 13, 0)), EventStatus::UpcomingSoon);
        assert_eq!(status(at(12, 13, 59)), EventStatus::UpcomingSoon);
        assert!(status(at(12, 9, 0)).is_upcoming());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(status(at(12, 14, 0)), EventStatus::Ongoing);
        assert_eq!(status(at(12, 15, 0)), EventStatus::Ongoing);
        assert_eq!(
            status(at(12, 15, 0) + Duration::seconds(1)),
            EventStatus::Completed
        );
        assert_eq!(
            status(at(12, 14, 0) - Duration::seconds(1)),
            EventStatus::UpcomingSoon
        );
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(at(12, 10, 0));
        assert_eq!(clock.now(), at(12, 10, 0));
    }
}
