//! Calendar sync reconciliation.
//!
//! [`reconcile`] decides what a sync request means for one event: create,
//! update or delete the mirrored entry on the external calendar, or skip
//! the call entirely. The presence of the event's `external_calendar_id` is
//! the single source of truth for create-vs-update — a requested create on
//! an already-linked event is downgraded to an update, which makes the
//! operation safe to retry without producing duplicate calendar entries.
//!
//! The function never returns an error: every path ends in a
//! [`SyncOutcome`] so call sites can match without try/catch plumbing, and
//! one event's failure can never abort a batch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::description::{DescriptionContext, generate_description};
use crate::error::VenuedResult;
use crate::event::EventRecord;
use crate::remote::protocol::EventPayload;
use crate::remote::CalendarClient;

/// What the caller asked for. The reconciler may resolve it differently
/// (see module docs); the outcome reports the action actually taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRequest {
    Create,
    Update,
    Delete,
}

/// The external action that was actually performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Deleted,
}

/// Why a sync request was skipped without contacting the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The venue has no enabled calendar integration.
    NoIntegration,
    /// Required fields are missing; names the gaps for display.
    MissingData { missing: Vec<&'static str> },
    /// Delete requested but the event was never synced.
    NoExternalId,
}

/// Why a sync request failed after validation passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncFailure {
    /// The provider call failed (network, API, timeout). Not retried here;
    /// retry policy belongs to the caller.
    Sync { message: String },
    /// The external call succeeded but writing the external id back to
    /// storage did not. `pending_external_id` is the value the store should
    /// hold (`None` after a delete), so the caller can re-attempt the
    /// persist without re-creating the external entry.
    Persistence {
        pending_external_id: Option<String>,
        message: String,
    },
}

/// Discriminated result of a reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Synced {
        action: SyncAction,
        external_id: Option<String>,
    },
    Skipped(SkipReason),
    Failed(SyncFailure),
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SyncOutcome::Failed(_))
    }
}

/// Persistence seam for the reconciler: the one write it needs is "set (or
/// clear) the external calendar id of event X".
pub trait SyncStore {
    fn persist_external_id(&self, event_id: &str, external_id: Option<&str>) -> VenuedResult<()>;
}

/// Reconcile one event against the external calendar.
///
/// `client` is `None` when the venue has no enabled integration. On
/// success the record is updated in place (`external_calendar_id` set after
/// a create, cleared after a delete) and the new linkage is persisted
/// through `store` before success is reported.
pub async fn reconcile<C: CalendarClient, S: SyncStore>(
    record: &mut EventRecord,
    requested: SyncRequest,
    client: Option<&C>,
    store: &S,
    ctx: &DescriptionContext<'_>,
) -> SyncOutcome {
    let Some(client) = client else {
        return SyncOutcome::Skipped(SkipReason::NoIntegration);
    };

    match requested {
        SyncRequest::Create | SyncRequest::Update => upsert(record, client, store, ctx).await,
        SyncRequest::Delete => delete(record, client, store).await,
    }
}

async fn upsert<C: CalendarClient, S: SyncStore>(
    record: &mut EventRecord,
    client: &C,
    store: &S,
    ctx: &DescriptionContext<'_>,
) -> SyncOutcome {
    let missing = missing_fields(record);
    if !missing.is_empty() {
        return SyncOutcome::Skipped(SkipReason::MissingData { missing });
    }

    // Validation guarantees a start date (unwrap safe: checked above)
    let payload = build_payload(record, ctx).unwrap();
    let event = &mut record.event;

    if let Some(external_id) = event.external_calendar_id.clone() {
        // Already linked: always an update, whatever was requested
        log::debug!(
            "event {} already linked to '{}', updating",
            event.id,
            external_id
        );
        match client.update_event(&external_id, &payload).await {
            Ok(()) => SyncOutcome::Synced {
                action: SyncAction::Updated,
                external_id: Some(external_id),
            },
            Err(e) => SyncOutcome::Failed(SyncFailure::Sync {
                message: e.to_string(),
            }),
        }
    } else {
        let external_id = match client.create_event(&payload).await {
            Ok(id) => id,
            Err(e) => {
                return SyncOutcome::Failed(SyncFailure::Sync {
                    message: e.to_string(),
                });
            }
        };

        // The external entry now exists; losing this write would make the
        // next sync create a duplicate, so surface it as its own failure.
        if let Err(e) = store.persist_external_id(&event.id, Some(&external_id)) {
            return SyncOutcome::Failed(SyncFailure::Persistence {
                pending_external_id: Some(external_id),
                message: e.to_string(),
            });
        }

        event.external_calendar_id = Some(external_id.clone());
        SyncOutcome::Synced {
            action: SyncAction::Created,
            external_id: Some(external_id),
        }
    }
}

async fn delete<C: CalendarClient, S: SyncStore>(
    record: &mut EventRecord,
    client: &C,
    store: &S,
) -> SyncOutcome {
    let event = &mut record.event;

    let Some(external_id) = event.external_calendar_id.clone() else {
        return SyncOutcome::Skipped(SkipReason::NoExternalId);
    };

    if let Err(e) = client.delete_event(&external_id).await {
        return SyncOutcome::Failed(SyncFailure::Sync {
            message: e.to_string(),
        });
    }

    if let Err(e) = store.persist_external_id(&event.id, None) {
        return SyncOutcome::Failed(SyncFailure::Persistence {
            pending_external_id: None,
            message: e.to_string(),
        });
    }

    event.external_calendar_id = None;
    SyncOutcome::Synced {
        action: SyncAction::Deleted,
        external_id: None,
    }
}

/// Create/update requirements: a title, a start date and an effective start
/// time. Checked before any provider call.
fn missing_fields(record: &EventRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if record.event.title.trim().is_empty() {
        missing.push("title");
    }
    if record.event.start_date.is_none() {
        missing.push("start date");
    }
    if record.event.effective_start_time(&record.forms).is_none() {
        missing.push("start time");
    }
    missing
}

/// Build the provider payload: calendar fields plus the generated
/// description body. `None` when the event has no start date.
pub fn build_payload(record: &EventRecord, ctx: &DescriptionContext<'_>) -> Option<EventPayload> {
    let (start_date, end_date) = record.event.span()?;
    Some(EventPayload {
        title: record.event.title.clone(),
        description: generate_description(&record.event, &record.forms, ctx),
        start_date,
        end_date,
        start_time: record.event.effective_start_time(&record.forms),
        end_time: record.event.effective_end_time(&record.forms),
    })
}

// =============================================================================
// Batch operations
// =============================================================================

/// Per-event result of a batch run.
#[derive(Debug)]
pub struct BatchEntry {
    pub event_id: String,
    pub title: String,
    pub outcome: SyncOutcome,
}

/// Collected outcomes of a batch run. One event failing never stops the
/// others; the report carries every outcome for display.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// (created, updated, deleted) counts across the batch.
    pub fn synced_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for entry in &self.entries {
            if let SyncOutcome::Synced { action, .. } = &entry.outcome {
                match action {
                    SyncAction::Created => counts.0 += 1,
                    SyncAction::Updated => counts.1 += 1,
                    SyncAction::Deleted => counts.2 += 1,
                }
            }
        }
        counts
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, SyncOutcome::Skipped(_)))
            .count()
    }
}

/// Sync every event whose day span ends on or after `from`.
pub async fn sync_all_from<C: CalendarClient, S: SyncStore>(
    records: &mut [EventRecord],
    from: NaiveDate,
    client: Option<&C>,
    store: &S,
    ctx: &DescriptionContext<'_>,
) -> BatchReport {
    run_batch(records, from, SyncRequest::Update, client, store, ctx).await
}

/// Remove the external entry of every event whose day span ends on or
/// after `from`. Local records are left in place with their linkage
/// cleared.
pub async fn delete_all_from<C: CalendarClient, S: SyncStore>(
    records: &mut [EventRecord],
    from: NaiveDate,
    client: Option<&C>,
    store: &S,
    ctx: &DescriptionContext<'_>,
) -> BatchReport {
    run_batch(records, from, SyncRequest::Delete, client, store, ctx).await
}

async fn run_batch<C: CalendarClient, S: SyncStore>(
    records: &mut [EventRecord],
    from: NaiveDate,
    request: SyncRequest,
    client: Option<&C>,
    store: &S,
    ctx: &DescriptionContext<'_>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for record in records {
        let in_range = record.event.span().is_some_and(|(_, end)| end >= from);
        if !in_range {
            continue;
        }

        let outcome = reconcile(record, request, client, store, ctx).await;
        report.entries.push(BatchEntry {
            event_id: record.event.id.clone(),
            title: record.event.title.clone(),
            outcome,
        });
    }

    report
}

// =============================================================================
// Per-event serialization
// =============================================================================

/// Per-event async locks. Two concurrent reconciliations of the same event
/// could both see "no external id" and create duplicate entries; callers
/// that reconcile concurrently must hold the event's lock across the call.
#[derive(Clone, Default)]
pub struct EventLocks {
    inner: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl EventLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for an event id, creating it on first use.
    pub async fn acquire(&self, event_id: &str) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            // unwrap safe: no code path panics while holding this mutex
            let mut map = self.inner.lock().unwrap();
            map.entry(event_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
