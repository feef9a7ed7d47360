//! Per-venue form configuration: field definitions and sync field
//! selection, stored in .venued/forms.toml.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::description::SyncFieldConfig;
use crate::error::{VenuedError, VenuedResult};
use crate::event::FieldDefinition;

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct FormsConfig {
    /// Known form fields, used to turn response ids into labels.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Which fields go into generated calendar descriptions. Empty means
    /// the default "anything with content" policy everywhere.
    #[serde(default)]
    pub sync: Vec<SyncFieldConfig>,
}

impl FormsConfig {
    /// Load from .venued/forms.toml; a venue without one gets defaults.
    pub fn load(venue_dir: &Path) -> VenuedResult<Self> {
        let path = venue_dir.join(".venued/forms.toml");

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: FormsConfig =
                toml::from_str(&content).map_err(|e| VenuedError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, venue_dir: &Path) -> VenuedResult<()> {
        let dir = venue_dir.join(".venued");
        std::fs::create_dir_all(&dir)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| VenuedError::Config(e.to_string()))?;

        std::fs::write(dir.join("forms.toml"), content)?;

        Ok(())
    }
}
