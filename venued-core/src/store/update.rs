//! Update event record files in a venue directory.

use std::path::Path;

use super::LocalEvent;
use crate::error::{VenuedError, VenuedResult};
use crate::event::EventRecord;

/// Update an existing record file.
///
/// Deletes the old file and creates a new one, since the filename may
/// change when the event's date or title changed. Returns the updated
/// LocalEvent with the new path.
pub fn update(dir: &Path, old: &LocalEvent, record: &EventRecord) -> VenuedResult<LocalEvent> {
    super::delete::delete(old)?;
    super::create::create(dir, record)
}

/// Rewrite a record in place, keeping its path (atomic via temp file +
/// rename). Used for bookkeeping writes like persisting the external
/// calendar id, where a half-written file would lose the sync linkage.
pub fn rewrite(local: &LocalEvent, record: &EventRecord) -> VenuedResult<LocalEvent> {
    let content = toml::to_string_pretty(record)
        .map_err(|e| VenuedError::Serialization(e.to_string()))?;

    let temp_path = local.path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &content)?;

    // Atomic on POSIX when temp and target share a filesystem
    std::fs::rename(&temp_path, &local.path)?;

    let modified = std::fs::metadata(&local.path)
        .ok()
        .and_then(|m| m.modified().ok())
        .map(chrono::DateTime::<chrono::Utc>::from);

    Ok(LocalEvent {
        path: local.path.clone(),
        record: record.clone(),
        modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::store::create::create;
    use chrono::NaiveDate;

    fn make_record(title: &str) -> EventRecord {
        EventRecord::new(Event::new(
            title.to_string(),
            NaiveDate::from_ymd_opt(2024, 6, 1),
        ))
    }

    #[test]
    fn test_update_renames_when_title_changes() {
        let tmp = tempfile::tempdir().unwrap();
        let record = make_record("Smith Wedding");
        let local = create(tmp.path(), &record).unwrap();

        let mut renamed = record.clone();
        renamed.event.title = "Smith-Jones Wedding".to_string();
        let updated = update(tmp.path(), &local, &renamed).unwrap();

        assert!(!local.path.exists());
        assert!(
            updated
                .path
                .ends_with("2024-06-01__smith-jones-wedding.toml")
        );
    }

    #[test]
    fn test_rewrite_keeps_path_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let record = make_record("Smith Wedding");
        let local = create(tmp.path(), &record).unwrap();

        let mut linked = record.clone();
        linked.event.external_calendar_id = Some("ext-123".to_string());
        let rewritten = rewrite(&local, &linked).unwrap();

        assert_eq!(rewritten.path, local.path);
        let loaded = LocalEvent::from_file(local.path.clone()).unwrap();
        assert_eq!(
            loaded.record.event.external_calendar_id,
            Some("ext-123".to_string())
        );
    }
}
