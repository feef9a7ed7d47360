//! Create event record files in a venue directory.

use std::path::Path;

use chrono::{DateTime, Utc};

use super::LocalEvent;
use crate::error::{VenuedError, VenuedResult};
use crate::event::EventRecord;

const SLUG_MAX_LEN: usize = 50;

/// Create a new record file in the venue's events directory.
///
/// Generates the TOML content and a human-readable filename from the
/// event's start date and title, handling collisions with numeric suffixes
/// (-2, -3, etc). Returns the created LocalEvent.
pub fn create(dir: &Path, record: &EventRecord) -> VenuedResult<LocalEvent> {
    std::fs::create_dir_all(dir)?;

    let content = toml::to_string_pretty(record)
        .map_err(|e| VenuedError::Serialization(e.to_string()))?;
    let filename = filename_for(record, dir)?;
    let path = dir.join(&filename);

    std::fs::write(&path, &content)?;

    let modified = std::fs::metadata(&path)
        .ok()
        .and_then(|m| m.modified().ok())
        .map(DateTime::<Utc>::from);

    Ok(LocalEvent {
        path,
        record: record.clone(),
        modified,
    })
}

/// The base filename an event would get, without collision suffixes.
pub fn expected_filename(record: &EventRecord) -> String {
    base_filename(record)
}

/// Generate the filename to use for a record in a directory, adding a
/// numeric suffix if another event already owns the base name.
fn filename_for(record: &EventRecord, dir: &Path) -> VenuedResult<String> {
    unique_filename(&base_filename(record), dir, &record.event.id)
}

fn base_filename(record: &EventRecord) -> String {
    let slug = title_slug(&record.event.title);

    // Undated drafts get a prefix instead of a date
    match record.event.start_date {
        Some(date) => format!("{}__{}.toml", date.format("%Y-%m-%d"), slug),
        None => format!("_draft__{}.toml", slug),
    }
}

fn title_slug(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.chars().take(SLUG_MAX_LEN).collect()
    }
}

/// Find a free filename, reusing one already owned by this event id.
fn unique_filename(base_filename: &str, dir: &Path, own_id: &str) -> VenuedResult<String> {
    let base = base_filename.trim_end_matches(".toml");

    if available(dir, base_filename, own_id) {
        return Ok(base_filename.to_string());
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}.toml", base, n);
        if available(dir, &suffixed, own_id) {
            return Ok(suffixed);
        }
    }

    Err(VenuedError::Store(format!(
        "Could not find available filename for {}",
        base_filename
    )))
}

/// A name is available when no file exists there, or the existing file
/// holds the same event (same id).
fn available(dir: &Path, filename: &str, own_id: &str) -> bool {
    let path = dir.join(filename);
    if !path.exists() {
        return true;
    }
    LocalEvent::from_file(path)
        .map(|existing| existing.record.event.id == own_id)
        .unwrap_or(false)
}
