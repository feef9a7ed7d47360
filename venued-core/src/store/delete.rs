//! Delete event record files from a venue directory.

use super::LocalEvent;
use crate::error::{VenuedError, VenuedResult};

/// Delete a record file. The event's forms live in the same file, so this
/// is the cascade.
pub fn delete(local: &LocalEvent) -> VenuedResult<()> {
    std::fs::remove_file(&local.path).map_err(|e| {
        VenuedError::Store(format!("Failed to delete {}: {}", local.path.display(), e))
    })
}
