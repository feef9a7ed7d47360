use anyhow::Result;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use venued_core::event::{Event, EventRecord};
use venued_core::reconcile::{SyncRequest, reconcile};
use venued_core::venue::Venue;

use super::{parse_date, parse_time};
use crate::render::Render;
use crate::tui;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    title: Option<String>,
    date: Option<String>,
    end_date: Option<String>,
    time: Option<String>,
    event_type: Option<String>,
    venue_slug: Option<String>,
    venues: Vec<Venue>,
) -> Result<()> {
    let interactive = title.is_none() || date.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Date ---
    let start_date = match date {
        Some(d) => parse_date(&d)?,
        None => prompt_with_retry("  Date (YYYY-MM-DD)", |s| parse_date(s))?,
    };

    let end_date = end_date.as_deref().map(parse_date).transpose()?;

    // --- Time ---
    let start_time = match time {
        Some(t) => Some(parse_time(&t)?),
        None if interactive => {
            let input: String = Input::new()
                .with_prompt("  Start time (HH:MM, skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?;
            if input.is_empty() {
                None
            } else {
                Some(parse_time(&input)?)
            }
        }
        None => None,
    };

    // --- Venue ---
    let venue = resolve_venue(venue_slug, &venues, interactive)?;

    let mut event = Event::new(title, Some(start_date));
    event.end_date = end_date;
    event.start_time = start_time;
    event.event_type = event_type;

    let mut record = EventRecord::new(event);
    let local = venue.create_event(&record)?;

    println!(
        "{} {}",
        "Created".green(),
        local.path.display().to_string().dimmed()
    );

    // On-save hook: mirror to the external calendar right away
    if let Some(remote) = venue.remote() {
        let ctx = venue.description_context();
        let spinner = tui::create_spinner(format!("Syncing {}", record.event.title));
        let outcome = reconcile(
            &mut record,
            SyncRequest::Create,
            Some(&remote),
            &venue,
            &ctx,
        )
        .await;
        spinner.finish_and_clear();

        println!("   {}", outcome.render());
    }

    Ok(())
}

fn prompt_with_retry<T>(prompt: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(value) => return Ok(value),
            Err(e) => println!("  {}", e.to_string().red()),
        }
    }
}

fn resolve_venue(
    venue_slug: Option<String>,
    venues: &[Venue],
    interactive: bool,
) -> Result<Venue> {
    if let Some(slug) = venue_slug {
        return venues
            .iter()
            .find(|v| v.slug == slug)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Venue '{}' not found", slug));
    }

    if venues.len() == 1 {
        return Ok(venues[0].clone());
    }

    if interactive {
        let names: Vec<&str> = venues.iter().map(|v| v.slug.as_str()).collect();
        let choice = Select::new()
            .with_prompt("  Venue")
            .items(&names)
            .default(0)
            .interact()?;
        return Ok(venues[choice].clone());
    }

    anyhow::bail!("Multiple venues found, pick one with --venue")
}
