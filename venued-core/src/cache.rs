//! Integration lookup cache.
//!
//! Venue integration config is read on every sync decision; callers that
//! reconcile many events can hold an [`IntegrationCache`] to avoid
//! re-reading it each time. The cache is an explicit, injected object with
//! a stated TTL and per-venue keys — nothing global, so tests and
//! multi-tenant callers each get their own.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::CalendarIntegration;
use crate::error::VenuedResult;

/// Default freshness window for cached integration lookups.
pub const DEFAULT_INTEGRATION_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    integration: Option<CalendarIntegration>,
    fetched_at: Instant,
}

/// Per-venue cache of integration lookups with a fixed TTL.
pub struct IntegrationCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for IntegrationCache {
    fn default() -> Self {
        Self::new(DEFAULT_INTEGRATION_TTL)
    }
}

impl IntegrationCache {
    pub fn new(ttl: Duration) -> Self {
        IntegrationCache {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached integration for a venue, calling `load` when the
    /// entry is missing or older than the TTL. A venue legitimately having
    /// no integration (`Ok(None)`) is cached too; load errors are not.
    pub fn get_or_load<F>(&self, venue: &str, load: F) -> VenuedResult<Option<CalendarIntegration>>
    where
        F: FnOnce() -> VenuedResult<Option<CalendarIntegration>>,
    {
        // unwrap safe: no code path panics while holding this mutex
        let mut entries = self.entries.lock().unwrap();

        if let Some(entry) = entries.get(venue) {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(entry.integration.clone());
            }
        }

        let integration = load()?;
        entries.insert(
            venue.to_string(),
            CacheEntry {
                integration: integration.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(integration)
    }

    /// Drop a venue's entry (e.g. after its config was edited).
    pub fn invalidate(&self, venue: &str) {
        self.entries.lock().unwrap().remove(venue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{Provider, RemoteConfig};
    use std::cell::Cell;

    fn make_integration() -> CalendarIntegration {
        CalendarIntegration {
            provider: Provider::from_name("google"),
            sync_enabled: true,
            config: RemoteConfig::default(),
        }
    }

    #[test]
    fn test_fresh_entry_skips_loader() {
        let cache = IntegrationCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);

        let load = || {
            calls.set(calls.get() + 1);
            Ok(Some(make_integration()))
        };

        let first = cache.get_or_load("grand-hall", load).unwrap();
        let second = cache
            .get_or_load("grand-hall", || {
                calls.set(calls.get() + 1);
                Ok(None)
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_ttl_always_reloads() {
        let cache = IntegrationCache::new(Duration::ZERO);
        let calls = Cell::new(0);

        for _ in 0..3 {
            cache
                .get_or_load("grand-hall", || {
                    calls.set(calls.get() + 1);
                    Ok(None)
                })
                .unwrap();
        }

        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_absent_integration_is_cached() {
        let cache = IntegrationCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);

        for _ in 0..2 {
            let result = cache
                .get_or_load("no-integration", || {
                    calls.set(calls.get() + 1);
                    Ok(None)
                })
                .unwrap();
            assert!(result.is_none());
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let cache = IntegrationCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);

        let mut load = || {
            calls.set(calls.get() + 1);
            Ok(Some(make_integration()))
        };

        cache.get_or_load("grand-hall", &mut load).unwrap();
        cache.invalidate("grand-hall");
        cache.get_or_load("grand-hall", &mut load).unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_entries_are_per_venue() {
        let cache = IntegrationCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);

        let mut load = || {
            calls.set(calls.get() + 1);
            Ok(None)
        };

        cache.get_or_load("venue-a", &mut load).unwrap();
        cache.get_or_load("venue-b", &mut load).unwrap();

        assert_eq!(calls.get(), 2);
    }
}
