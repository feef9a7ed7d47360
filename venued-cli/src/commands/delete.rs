use anyhow::Result;
use owo_colors::OwoColorize;
use venued_core::reconcile::{SyncOutcome, SyncRequest, reconcile};
use venued_core::venue::Venue;

use crate::render::Render;
use crate::tui;

pub async fn run(venues: Vec<Venue>, event_id: &str) -> Result<()> {
    for venue in &venues {
        let Ok(local) = venue.event_by_id(event_id) else {
            continue;
        };

        let mut record = local.record.clone();
        let remote = venue.remote();
        let ctx = venue.description_context();

        // External entry goes first; a local delete after a failed external
        // one would orphan the calendar entry.
        let spinner = tui::create_spinner(format!("Removing {}", record.event.title));
        let outcome = reconcile(&mut record, SyncRequest::Delete, remote.as_ref(), venue, &ctx)
            .await;
        spinner.finish_and_clear();

        println!("{}", venue.render());

        if outcome.is_failed() {
            println!("   {} {}", record.event.title, outcome.render());
            anyhow::bail!("External calendar delete failed; event kept locally");
        }

        if let SyncOutcome::Synced { .. } = outcome {
            println!("   {}", "external entry removed".dimmed());
        }

        venue.delete_event(&local)?;
        println!("   {} {}", record.event.title, "deleted".red());
        return Ok(());
    }

    anyhow::bail!("Event '{}' not found in any venue", event_id)
}
