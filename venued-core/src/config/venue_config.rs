//! Per-venue local configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{VenuedError, VenuedResult};
use crate::remote::{Provider, Remote, RemoteConfig};

/// A venue's connection to one external calendar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarIntegration {
    pub provider: Provider,
    /// Turned off to pause mirroring without losing the provider settings.
    #[serde(default = "default_sync_enabled")]
    pub sync_enabled: bool,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

fn default_sync_enabled() -> bool {
    true
}

impl CalendarIntegration {
    /// The client for this integration, or `None` while syncing is paused.
    pub fn remote(&self) -> Option<Remote> {
        self.sync_enabled
            .then(|| Remote::new(self.provider.clone(), self.config.clone()))
    }
}

/// Configuration stored in each venue's .venued/config.toml
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct VenueConfig {
    pub integration: Option<CalendarIntegration>,
}

impl VenueConfig {
    /// Load config from .venued/config.toml
    pub fn load(venue_dir: &Path) -> VenuedResult<Self> {
        let path = venue_dir.join(".venued/config.toml");

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: VenueConfig =
                toml::from_str(&content).map_err(|e| VenuedError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to .venued/config.toml
    pub fn save(&self, venue_dir: &Path) -> VenuedResult<()> {
        let dir = venue_dir.join(".venued");
        std::fs::create_dir_all(&dir)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| VenuedError::Config(e.to_string()))?;

        std::fs::write(dir.join("config.toml"), content)?;

        Ok(())
    }
}
