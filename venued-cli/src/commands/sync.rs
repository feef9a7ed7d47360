use anyhow::Result;
use venued_core::reconcile::{EventLocks, SyncRequest, reconcile};
use venued_core::venue::Venue;

use crate::render::Render;
use crate::tui;

pub async fn run(venues: Vec<Venue>, event_id: &str, request: SyncRequest) -> Result<()> {
    let locks = EventLocks::new();

    for venue in &venues {
        let Ok(local) = venue.event_by_id(event_id) else {
            continue;
        };

        let _guard = locks.acquire(event_id).await;

        let mut record = local.record;
        let remote = venue.remote();
        let ctx = venue.description_context();

        let spinner = tui::create_spinner(format!("Syncing {}", record.event.title));
        let outcome = reconcile(&mut record, request, remote.as_ref(), venue, &ctx).await;
        spinner.finish_and_clear();

        println!("{}", venue.render());
        println!("   {} {}", record.event.title, outcome.render());
        return Ok(());
    }

    anyhow::bail!("Event '{}' not found in any venue", event_id)
}
