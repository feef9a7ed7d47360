//! Event record storage.
//!
//! Each event lives in its own TOML file under a venue's `events/`
//! directory, forms included, so removing the file removes the whole
//! booking. Filenames are derived from the start date and title; renames
//! happen on update when either changes.

mod create;
mod delete;
mod list;
mod update;

pub use create::{create, expected_filename};
pub use delete::delete;
pub use list::{find_by_event_id, list};
pub use update::{rewrite, update};

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{VenuedError, VenuedResult};
use crate::event::EventRecord;

/// An event record on disk.
#[derive(Debug, Clone)]
pub struct LocalEvent {
    /// Path to the .toml file
    pub path: PathBuf,
    /// The record data
    pub record: EventRecord,
    /// File modification time
    pub modified: Option<DateTime<Utc>>,
}

impl LocalEvent {
    pub fn from_file(path: PathBuf) -> VenuedResult<Self> {
        let content = std::fs::read_to_string(&path)?;

        let record: EventRecord = toml::from_str(&content).map_err(|e| {
            VenuedError::Store(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let modified = std::fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        Ok(LocalEvent {
            path,
            record,
            modified,
        })
    }
}
