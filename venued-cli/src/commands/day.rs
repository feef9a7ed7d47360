use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use venued_core::event::Event;
use venued_core::placement::resolve_day;
use venued_core::venue::Venue;

use crate::render::Render;

pub fn run(venues: Vec<Venue>, date: NaiveDate) -> Result<()> {
    println!("{}", date.format("%A %Y-%m-%d").to_string().bold());
    println!();

    for (i, venue) in venues.iter().enumerate() {
        println!("{}", venue.render());

        match venue.events() {
            Ok(locals) => {
                let events: Vec<Event> = locals.into_iter().map(|l| l.record.event).collect();
                let placements = resolve_day(date, &events);

                if placements.is_empty() {
                    println!("   {}", "no events".dimmed());
                } else {
                    for placement in &placements {
                        println!("   {}", placement.render());
                    }
                }
            }
            Err(e) => println!("   {}", e.to_string().red()),
        }

        // Add spacing between venues (but not after the last one)
        if i < venues.len() - 1 {
            println!();
        }
    }

    Ok(())
}
