pub mod day;
pub mod delete;
pub mod events;
pub mod new;
pub mod prune;
pub mod push;
pub mod sync;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};

/// Default number of days shown by the events listing.
pub const DEFAULT_LIST_DAYS: i64 = 7;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| anyhow::anyhow!("Invalid time '{}'. Expected HH:MM", s))
}
