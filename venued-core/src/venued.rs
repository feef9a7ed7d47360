//! Venue root directory management.

use std::path::PathBuf;

use ::config::{Config, File};

use crate::config::GlobalConfig;
use crate::error::{VenuedError, VenuedResult};
use crate::venue::Venue;

/// Entry point to the venue data directory: loads the global config and
/// discovers venues.
#[derive(Clone)]
pub struct Venued {
    config: GlobalConfig,
}

impl Venued {
    pub fn load() -> VenuedResult<Self> {
        let config_path = GlobalConfig::config_path()?;

        if !config_path.exists() {
            GlobalConfig::create_default(&config_path)?;
        }

        let config: GlobalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| VenuedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| VenuedError::Config(e.to_string()))?;

        Ok(Venued { config })
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.venue_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The venue directory in display-friendly form, keeping `~` instead
    /// of the expanded home directory.
    pub fn display_path(&self) -> PathBuf {
        self.config.venue_dir.clone()
    }

    /// Discover venues by scanning the data directory for subdirectories
    /// with a .venued/ marker.
    pub fn venues(&self) -> Vec<Venue> {
        let data_path = self.data_path();

        let Ok(entries) = std::fs::read_dir(&data_path) else {
            return Vec::new();
        };

        let mut venues: Vec<Venue> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(".venued").exists())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|name| Venue::load(&data_path, name).ok())
            })
            .collect();

        venues.sort_by(|a, b| a.slug.cmp(&b.slug));
        venues
    }

    pub fn venue(&self, slug: &str) -> VenuedResult<Venue> {
        Venue::load(&self.data_path(), slug)
    }

    pub fn default_venue(&self) -> Option<Venue> {
        let name = self.config.default_venue.as_ref()?;
        self.venue(name).ok()
    }
}
