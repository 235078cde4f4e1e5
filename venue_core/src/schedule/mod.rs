//! Schedule queries - what runs when.
//!
//! Every query is a pure function of the event list and the instant passed
//! in. Results are ordered by start time; events starting together keep
//! catalog order.

mod status;

pub use status::*;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use venue_model::EventRecord;

/// Events of one category split around a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySchedule<'a> {
    /// Not yet started, soonest first.
    pub upcoming: Vec<&'a EventRecord>,
    /// Already started, most recent first.
    pub past: Vec<&'a EventRecord>,
}

/// Events sharing a category, for grouped listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCategoryGroup<'a> {
    pub category: &'a str,
    /// All events in the category, past ones included.
    pub total: usize,
    /// Not yet started, soonest first.
    pub upcoming: Vec<&'a EventRecord>,
}

/// The events of one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a EventRecord>,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleQueryEngine<'a> {
    events: &'a [EventRecord],
    /// Venue local time, for calendar-day queries.
    offset: FixedOffset,
    soon: Duration,
}

impl<'a> ScheduleQueryEngine<'a> {
    /// `soon` is the threshold separating [`EventStatus::UpcomingSoon`]
    /// from [`EventStatus::UpcomingFar`].
    pub fn new(events: &'a [EventRecord], offset: FixedOffset, soon: Duration) -> Self {
        Self {
            events,
            offset,
            soon,
        }
    }

    /// Events starting in `[start, end)`.
    pub fn events_in_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&'a EventRecord> {
        let events = self.collect_sorted(|e| e.start_time >= start && e.start_time < end);
        debug!(%start, %end, events = events.len(), "events_in_window");
        events
    }

    /// Events starting after `now` and no later than `minutes` from now.
    /// A horizon past the representable range is unbounded.
    pub fn events_within_minutes(&self, now: DateTime<Utc>, minutes: i64) -> Vec<&'a EventRecord> {
        if minutes <= 0 {
            return Vec::new();
        }
        let horizon = Duration::try_minutes(minutes)
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.collect_sorted(|e| e.start_time > now && e.start_time <= horizon)
    }

    /// Events starting within the "soon" threshold of `now`.
    pub fn starting_soon(&self, now: DateTime<Utc>) -> Vec<&'a EventRecord> {
        let horizon = now
            .checked_add_signed(self.soon)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.collect_sorted(|e| e.start_time > now && e.start_time <= horizon)
    }

    /// Status of an event at `now`.
    pub fn status(&self, event: &EventRecord, now: DateTime<Utc>) -> EventStatus {
        EventStatus::classify(event, now, self.soon)
    }

    /// Events starting on `date` in the venue's local time.
    pub fn events_on_day(&self, date: NaiveDate) -> Vec<&'a EventRecord> {
        self.collect_sorted(|e| self.local_date(e) == date)
    }

    /// Events running at `now`.
    pub fn ongoing_events(&self, now: DateTime<Utc>) -> Vec<&'a EventRecord> {
        self.collect_sorted(|e| self.status(e, now) == EventStatus::Ongoing)
    }

    /// Events whose category contains `category`, split into upcoming and
    /// past at `now`.
    pub fn events_in_category(&self, category: &str, now: DateTime<Utc>) -> CategorySchedule<'a> {
        let needle = category.trim().to_lowercase();
        let matching = self.collect_sorted(|e| e.category.to_lowercase().contains(&needle));

        let (upcoming, mut past): (Vec<_>, Vec<_>) =
            matching.into_iter().partition(|e| e.start_time > now);
        past.reverse();

        CategorySchedule { upcoming, past }
    }

    /// Every event category in order of first appearance, with its size and
    /// the events still to come.
    pub fn events_by_category(&self, now: DateTime<Utc>) -> Vec<EventCategoryGroup<'a>> {
        let mut groups: Vec<EventCategoryGroup<'a>> = Vec::new();
        for event in self.events {
            let position = match groups.iter().position(|g| g.category == event.category) {
                Some(position) => position,
                None => {
                    groups.push(EventCategoryGroup {
                        category: &event.category,
                        total: 0,
                        upcoming: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[position];
            group.total += 1;
            if event.start_time > now {
                group.upcoming.push(event);
            }
        }
        for group in &mut groups {
            group.upcoming.sort_by_key(|e| e.start_time);
        }
        groups
    }

    /// All events grouped by local day, days in ascending order.
    pub fn agenda(&self) -> Vec<DaySchedule<'a>> {
        let mut days: BTreeMap<NaiveDate, Vec<&'a EventRecord>> = BTreeMap::new();
        for event in self.collect_sorted(|_| true) {
            days.entry(self.local_date(event)).or_default().push(event);
        }
        days.into_iter()
            .map(|(date, events)| DaySchedule { date, events })
            .collect()
    }

    fn local_date(&self, event: &EventRecord) -> NaiveDate {
        event.start_time.with_timezone(&self.offset).date_naive()
    }

    fn collect_sorted<F>(&self, predicate: F) -> Vec<&'a EventRecord>
    where
        F: Fn(&EventRecord) -> bool,
    {
        let mut events: Vec<_> = self.events.iter().filter(|e| predicate(e)).collect();
        events.sort_by_key(|e| e.start_time);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, salon_events};

    fn utc_engine(events: &[EventRecord]) -> ScheduleQueryEngine<'_> {
        ScheduleQueryEngine::new(events, FixedOffset::east_opt(0).unwrap(), Duration::minutes(60))
    }

    fn ids(events: &[&EventRecord]) -> Vec<String> {
        events.iter().map(|e| e.id.0.clone()).collect()
    }

    #[test]
    fn test_events_in_window() {
        let events = salon_events();
        let engine = utc_engine(&events);

        let found = engine.events_in_window(at(12, 9, 0), at(12, 14, 0));
        assert_eq!(ids(&found), vec!["ev-1", "ev-2"]);

        assert!(engine.events_in_window(at(14, 0, 0), at(15, 0, 0)).is_empty());
    }

    #[test]
    fn test_events_within_minutes_excludes_now() {
        let events = salon_events();
        let engine = utc_engine(&events);

        // ev-1 starts exactly now and is excluded; ev-2 starts at the horizon.
        let found = engine.events_within_minutes(at(12, 9, 0), 120);
        assert_eq!(ids(&found), vec!["ev-2"]);

        assert!(engine.events_within_minutes(at(12, 9, 0), 30).is_empty());
    }

    #[test]
    fn test_events_within_minutes_huge_horizon() {
        let events = salon_events();
        let engine = utc_engine(&events);

        let found = engine.events_within_minutes(at(12, 10, 0), i64::MAX);
        assert_eq!(ids(&found), vec!["ev-2", "ev-3", "ev-4"]);
        assert_eq!(engine.events_within_minutes(at(12, 10, 0), i64::MAX / 2).len(), 3);
        assert!(engine.events_within_minutes(at(12, 10, 0), i64::MIN).is_empty());
        assert!(engine.events_within_minutes(at(12, 10, 0), 0).is_empty());
    }

    #[test]
    fn test_starting_soon_uses_threshold() {
        let events = salon_events();
        let engine = utc_engine(&events);

        assert_eq!(ids(&engine.starting_soon(at(12, 10, 0))), vec!["ev-2"]);
        assert!(engine.starting_soon(at(12, 9, 30)).is_empty());
    }

    #[test]
    fn test_results_sorted_by_start() {
        let mut events = salon_events();
        events.reverse();
        let engine = utc_engine(&events);

        let found = engine.events_in_window(at(12, 0, 0), at(14, 0, 0));
        assert_eq!(ids(&found), vec!["ev-1", "ev-2", "ev-3", "ev-4"]);
    }

    #[test]
    fn test_events_on_day_uses_venue_offset() {
        let events = vec![
            EventRecord::new("late", "Soirée", at(12, 23, 30), at(13, 1, 0)),
            EventRecord::new("day", "Matinée", at(12, 9, 0), at(12, 10, 0)),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let next = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();

        let utc = utc_engine(&events);
        assert_eq!(ids(&utc.events_on_day(day)), vec!["day", "late"]);

        // At UTC+1 the 23:30 UTC event starts on the next local day.
        let paris = ScheduleQueryEngine::new(
            &events,
            FixedOffset::east_opt(3600).unwrap(),
            Duration::minutes(60),
        );
        assert_eq!(ids(&paris.events_on_day(day)), vec!["day"]);
        assert_eq!(ids(&paris.events_on_day(next)), vec!["late"]);
    }

    #[test]
    fn test_status_uses_threshold() {
        let events = salon_events();
        let engine = ScheduleQueryEngine::new(
            &events,
            FixedOffset::east_opt(0).unwrap(),
            Duration::minutes(15),
        );

        assert_eq!(engine.status(&events[0], at(12, 8, 30)), EventStatus::UpcomingFar);
        assert_eq!(engine.status(&events[0], at(12, 8, 45)), EventStatus::UpcomingSoon);
        assert_eq!(engine.status(&events[0], at(12, 10, 1)), EventStatus::Completed);
    }

    #[test]
    fn test_ongoing_events() {
        let events = salon_events();
        let engine = utc_engine(&events);

        assert_eq!(ids(&engine.ongoing_events(at(12, 11, 30))), vec!["ev-2"]);
        assert!(engine.ongoing_events(at(12, 13, 0)).is_empty());
    }

    #[test]
    fn test_events_in_category() {
        let events = vec![
            EventRecord::new("a1", "Atelier 1", at(12, 9, 0), at(12, 10, 0)).with_category("Atelier"),
            EventRecord::new("a2", "Atelier 2", at(12, 11, 0), at(12, 12, 0)).with_category("Atelier"),
            EventRecord::new("a3", "Atelier 3", at(12, 15, 0), at(12, 16, 0)).with_category("Atelier"),
            EventRecord::new("a4", "Atelier 4", at(12, 17, 0), at(12, 18, 0)).with_category("Atelier"),
            EventRecord::new("k1", "Keynote", at(12, 8, 0), at(12, 9, 0)).with_category("Keynote"),
        ];
        let engine = utc_engine(&events);

        let schedule = engine.events_in_category("atelier", at(12, 13, 0));
        assert_eq!(ids(&schedule.upcoming), vec!["a3", "a4"]);
        assert_eq!(ids(&schedule.past), vec!["a2", "a1"]);
    }

    #[test]
    fn test_events_by_category() {
        let events = vec![
            EventRecord::new("a2", "Atelier 2", at(12, 17, 0), at(12, 18, 0)).with_category("Atelier"),
            EventRecord::new("k1", "Keynote", at(12, 8, 0), at(12, 9, 0)).with_category("Keynote"),
            EventRecord::new("a1", "Atelier 1", at(12, 9, 0), at(12, 10, 0)).with_category("Atelier"),
            EventRecord::new("a3", "Atelier 3", at(12, 15, 0), at(12, 16, 0)).with_category("Atelier"),
        ];
        let engine = utc_engine(&events);

        let groups = engine.events_by_category(at(12, 12, 0));
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Atelier", "Keynote"]);

        assert_eq!(groups[0].total, 3);
        assert_eq!(ids(&groups[0].upcoming), vec!["a3", "a2"]);
        assert_eq!(groups[1].total, 1);
        assert!(groups[1].upcoming.is_empty());
    }

    #[test]
    fn test_agenda_groups_by_day() {
        let events = salon_events();
        let engine = utc_engine(&events);

        let agenda = engine.agenda();
        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda[0].date, NaiveDate::from_ymd_opt(2026, 3, 12).unwrap());
        assert_eq!(ids(&agenda[0].events), vec!["ev-1", "ev-2", "ev-3"]);
        assert_eq!(ids(&agenda[1].events), vec!["ev-4"]);
    }
}
