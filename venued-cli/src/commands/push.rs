use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use venued_core::event::EventRecord;
use venued_core::reconcile::sync_all_from;
use venued_core::venue::Venue;

use super::parse_date;
use crate::render::{Render, render_batch};
use crate::tui;

pub async fn run(venues: Vec<Venue>, from: Option<&str>) -> Result<()> {
    let from = match from {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };

    for (i, venue) in venues.iter().enumerate() {
        let spinner = tui::create_spinner(venue.render());
        let result = venue.events();

        match result {
            Ok(locals) => {
                let mut records: Vec<EventRecord> =
                    locals.into_iter().map(|l| l.record).collect();
                let remote = venue.remote();
                let ctx = venue.description_context();

                let report =
                    sync_all_from(&mut records, from, remote.as_ref(), venue, &ctx).await;
                spinner.finish_and_clear();

                println!("{}", venue.render());
                println!("{}", render_batch(&report));
            }
            Err(e) => {
                spinner.finish_and_clear();
                println!("{}", venue.render());
                println!("   {}", e.to_string().red());
            }
        }

        // Add spacing between venues (but not after the last one)
        if i < venues.len() - 1 {
            println!();
        }
    }

    Ok(())
}
