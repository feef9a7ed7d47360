//! A venue: one tenant's directory of event records plus configuration.

use std::path::{Path, PathBuf};

use crate::config::{CalendarIntegration, FormsConfig, VenueConfig};
use crate::description::DescriptionContext;
use crate::error::{VenuedError, VenuedResult};
use crate::event::EventRecord;
use crate::reconcile::SyncStore;
use crate::remote::Remote;
use crate::store::{self, LocalEvent};

/// One venue (tenant): a directory holding event records, marked by a
/// `.venued/` subdirectory with its configuration.
#[derive(Debug, Clone)]
pub struct Venue {
    pub slug: String,
    dir: PathBuf,
    config: VenueConfig,
    forms: FormsConfig,
}

impl Venue {
    /// Load a venue from `<root>/<slug>`.
    pub fn load(root: &Path, slug: &str) -> VenuedResult<Self> {
        let dir = root.join(slug);
        if !dir.join(".venued").exists() {
            return Err(VenuedError::VenueNotFound(slug.to_string()));
        }

        let config = VenueConfig::load(&dir)?;
        let forms = FormsConfig::load(&dir)?;

        Ok(Venue {
            slug: slug.to_string(),
            dir,
            config,
            forms,
        })
    }

    /// Create the venue directory structure and default configuration.
    pub fn init(root: &Path, slug: &str) -> VenuedResult<Self> {
        let dir = root.join(slug);
        std::fs::create_dir_all(dir.join("events"))?;
        VenueConfig::default().save(&dir)?;
        Self::load(root, slug)
    }

    fn events_dir(&self) -> PathBuf {
        self.dir.join("events")
    }

    pub fn events(&self) -> VenuedResult<Vec<LocalEvent>> {
        store::list(&self.events_dir())
    }

    pub fn event_by_id(&self, event_id: &str) -> VenuedResult<LocalEvent> {
        store::find_by_event_id(&self.events_dir(), event_id)?
            .ok_or_else(|| VenuedError::EventNotFound(event_id.to_string()))
    }

    pub fn create_event(&self, record: &EventRecord) -> VenuedResult<LocalEvent> {
        store::create(&self.events_dir(), record)
    }

    pub fn update_event(&self, record: &EventRecord) -> VenuedResult<LocalEvent> {
        let old = self.event_by_id(&record.event.id)?;
        store::update(&self.events_dir(), &old, record)
    }

    pub fn delete_event(&self, local: &LocalEvent) -> VenuedResult<()> {
        store::delete(local)
    }

    pub fn integration(&self) -> Option<&CalendarIntegration> {
        self.config.integration.as_ref()
    }

    /// The external calendar client, or `None` when the venue has no
    /// integration or syncing is paused.
    pub fn remote(&self) -> Option<Remote> {
        self.integration().and_then(|i| i.remote())
    }

    /// Lookup context for description generation, borrowing this venue's
    /// field definitions and sync configs.
    pub fn description_context(&self) -> DescriptionContext<'_> {
        DescriptionContext::new(&self.forms.fields, &self.forms.sync)
    }
}

impl SyncStore for Venue {
    /// The reconciler's one write: set or clear an event's external
    /// calendar id. Rewrites the record in place so the filename (and any
    /// concurrent reader's path) stays stable.
    fn persist_external_id(&self, event_id: &str, external_id: Option<&str>) -> VenuedResult<()> {
        let local = self.event_by_id(event_id)?;

        let mut record = local.record.clone();
        record.event.external_calendar_id = external_id.map(String::from);

        store::rewrite(&local, &record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use chrono::NaiveDate;

    fn make_venue(root: &Path) -> Venue {
        Venue::init(root, "grand-hall").unwrap()
    }

    fn make_record(title: &str) -> EventRecord {
        EventRecord::new(Event::new(
            title.to_string(),
            NaiveDate::from_ymd_opt(2024, 6, 1),
        ))
    }

    #[test]
    fn test_init_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        make_venue(tmp.path());

        let venue = Venue::load(tmp.path(), "grand-hall").unwrap();
        assert_eq!(venue.slug, "grand-hall");
        assert!(venue.integration().is_none());
        assert!(venue.remote().is_none());
    }

    #[test]
    fn test_load_unknown_venue_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            Venue::load(tmp.path(), "nope"),
            Err(VenuedError::VenueNotFound(_))
        ));
    }

    #[test]
    fn test_event_crud() {
        let tmp = tempfile::tempdir().unwrap();
        let venue = make_venue(tmp.path());

        let record = make_record("Smith Wedding");
        venue.create_event(&record).unwrap();

        let loaded = venue.event_by_id(&record.event.id).unwrap();
        assert_eq!(loaded.record.event.title, "Smith Wedding");

        let mut changed = record.clone();
        changed.event.title = "Smith Gala".to_string();
        venue.update_event(&changed).unwrap();

        let events = venue.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].record.event.title, "Smith Gala");

        venue.delete_event(&events[0]).unwrap();
        assert!(venue.events().unwrap().is_empty());
    }

    #[test]
    fn test_persist_external_id_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let venue = make_venue(tmp.path());

        let record = make_record("Smith Wedding");
        venue.create_event(&record).unwrap();

        venue
            .persist_external_id(&record.event.id, Some("ext-123"))
            .unwrap();
        let loaded = venue.event_by_id(&record.event.id).unwrap();
        assert_eq!(
            loaded.record.event.external_calendar_id,
            Some("ext-123".to_string())
        );

        venue.persist_external_id(&record.event.id, None).unwrap();
        let loaded = venue.event_by_id(&record.event.id).unwrap();
        assert_eq!(loaded.record.event.external_calendar_id, None);
    }

    #[test]
    fn test_persist_external_id_unknown_event() {
        let tmp = tempfile::tempdir().unwrap();
        let venue = make_venue(tmp.path());

        assert!(matches!(
            venue.persist_external_id("ghost", Some("ext-1")),
            Err(VenuedError::EventNotFound(_))
        ));
    }
}
