//! Global venued configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{VenuedError, VenuedResult};

static DEFAULT_VENUE_PATH: &str = "~/banquets";

fn default_venue_path() -> PathBuf {
    PathBuf::from(DEFAULT_VENUE_PATH)
}

/// Global configuration at ~/.config/venued/config.toml
///
/// Venue-specific configuration (integration, form fields, etc.) is stored
/// in each venue's .venued/ directory instead.
#[derive(Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_venue_path")]
    pub venue_dir: PathBuf,

    pub default_venue: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            venue_dir: default_venue_path(),
            default_venue: None,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> VenuedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| VenuedError::Config("Could not determine config directory".into()))?
            .join("venued");

        Ok(config_dir.join("config.toml"))
    }

    /// Write a default config file so first runs have something to edit.
    pub fn create_default(path: &std::path::Path) -> VenuedResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&GlobalConfig::default())
            .map_err(|e| VenuedError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
