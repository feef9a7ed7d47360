//! Day placement for calendar rendering.
//!
//! Given a calendar date and a set of events, [`resolve_day`] works out
//! which events occupy that date and where the date sits inside each
//! event's day span. All comparisons happen on plain calendar dates
//! ([`NaiveDate`]) rather than timestamps: a midnight timestamp shifted by
//! the local timezone offset would land events on the wrong day.

use chrono::NaiveDate;

use crate::event::Event;

/// Where a date sits inside an event's day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPosition {
    /// The event covers exactly this one day.
    Single,
    /// First day of a multi-day event.
    Start,
    /// Interior day of a multi-day event.
    Middle,
    /// Last day of a multi-day event.
    End,
}

/// One event's placement on a specific calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayPlacement<'a> {
    pub event: &'a Event,
    pub position: DayPosition,
    pub is_first_day: bool,
    pub is_last_day: bool,
    /// Number of days the event spans, inclusive of both ends.
    pub total_days: i64,
    /// Zero-based index of `date` within the span.
    pub day_index: i64,
}

/// Resolve which of `events` occupy `date` and how.
///
/// Pure and order-preserving: placements come back in the input order of
/// `events`, one per matching event. Events without a start date are
/// excluded; an event whose end precedes its start is a data-integrity
/// violation and is skipped with a warning rather than producing a
/// negative span.
pub fn resolve_day<'a>(date: NaiveDate, events: &'a [Event]) -> Vec<DayPlacement<'a>> {
    events
        .iter()
        .filter_map(|event| placement_on(date, event))
        .collect()
}

fn placement_on(date: NaiveDate, event: &Event) -> Option<DayPlacement<'_>> {
    let (start, end) = event.span()?;

    if end < start {
        log::warn!(
            "event '{}' ({}) has end date {} before start date {}, skipping",
            event.title,
            event.id,
            end,
            start
        );
        return None;
    }

    if date < start || date > end {
        return None;
    }

    let total_days = (end - start).num_days() + 1;
    let day_index = (date - start).num_days();

    let position = if total_days == 1 {
        DayPosition::Single
    } else if day_index == 0 {
        DayPosition::Start
    } else if day_index == total_days - 1 {
        DayPosition::End
    } else {
        DayPosition::Middle
    };

    Some(DayPlacement {
        event,
        position,
        is_first_day: day_index == 0,
        is_last_day: day_index == total_days - 1,
        total_days,
        day_index,
    })
}
