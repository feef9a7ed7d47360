//! List and look up event record files.

use std::path::Path;

use super::LocalEvent;
use crate::error::VenuedResult;

/// Load every event record in the directory, sorted by start date (undated
/// drafts last), then title.
pub fn list(dir: &Path) -> VenuedResult<Vec<LocalEvent>> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        // A venue without an events directory simply has no events yet
        return Ok(Vec::new());
    };

    let mut events: Vec<LocalEvent> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .filter_map(|path| match LocalEvent::from_file(path.clone()) {
            Ok(local) => Some(local),
            Err(e) => {
                log::warn!("skipping unreadable event file {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    events.sort_by(|a, b| {
        let key = |l: &LocalEvent| {
            let event = &l.record.event;
            // None sorts first on Option, but drafts belong at the end
            (
                event.start_date.is_none(),
                event.start_date,
                event.title.clone(),
            )
        };
        key(a).cmp(&key(b))
    });

    Ok(events)
}

/// Find the record owning an event id.
pub fn find_by_event_id(dir: &Path, event_id: &str) -> VenuedResult<Option<LocalEvent>> {
    Ok(list(dir)?
        .into_iter()
        .find(|local| local.record.event.id == event_id))
}
