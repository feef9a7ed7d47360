use anyhow::Result;
use chrono::{Duration, Local};
use owo_colors::OwoColorize;
use venued_core::event::Event;
use venued_core::placement::resolve_day;
use venued_core::venue::Venue;

use super::{DEFAULT_LIST_DAYS, parse_date};
use crate::render::Render;

pub fn run(venues: Vec<Venue>, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from = match from {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => from + Duration::days(DEFAULT_LIST_DAYS),
    };

    let mut per_venue: Vec<(String, Vec<Event>)> = Vec::new();
    for venue in &venues {
        let events = venue
            .events()?
            .into_iter()
            .map(|l| l.record.event)
            .collect();
        per_venue.push((venue.slug.clone(), events));
    }

    let mut printed_any = false;
    let mut day = from;

    while day <= to {
        let mut lines = Vec::new();
        for (slug, events) in &per_venue {
            for placement in resolve_day(day, events) {
                let venue_tag = format!("[{}]", slug);
                lines.push(format!("  {} {}", placement.render(), venue_tag.dimmed()));
            }
        }

        if !lines.is_empty() {
            if printed_any {
                println!();
            }
            println!("{}", day.format("%a %Y-%m-%d").to_string().bold());
            for line in lines {
                println!("{}", line);
            }
            printed_any = true;
        }

        day = day + Duration::days(1);
    }

    if !printed_any {
        println!("{}", "No events found".dimmed());
    }

    Ok(())
}
