//! Remote calendar operations via providers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::VenuedResult;
use crate::remote::CalendarClient;
use crate::remote::protocol::{CreateEvent, DeleteEvent, EventPayload, UpdateEvent};
use crate::remote::provider::Provider;

/// Provider-specific settings, passed through opaquely (e.g. account email,
/// target calendar id).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RemoteConfig(pub HashMap<String, toml::Value>);

impl From<&RemoteConfig> for serde_json::Map<String, serde_json::Value> {
    fn from(config: &RemoteConfig) -> Self {
        config
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// A connected external calendar: a provider plus its settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Remote {
    pub provider: Provider,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

impl Remote {
    pub fn new(provider: Provider, config: RemoteConfig) -> Self {
        Remote { provider, config }
    }

    fn remote_config(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::from(&self.config)
    }
}

impl CalendarClient for Remote {
    async fn create_event(&self, payload: &EventPayload) -> VenuedResult<String> {
        let created = self
            .provider
            .call(CreateEvent {
                remote_config: self.remote_config(),
                payload: payload.clone(),
            })
            .await?;
        Ok(created.external_id)
    }

    async fn update_event(&self, external_id: &str, payload: &EventPayload) -> VenuedResult<()> {
        self.provider
            .call(UpdateEvent {
                remote_config: self.remote_config(),
                external_id: external_id.to_string(),
                payload: payload.clone(),
            })
            .await
    }

    async fn delete_event(&self, external_id: &str) -> VenuedResult<()> {
        self.provider
            .call(DeleteEvent {
                remote_config: self.remote_config(),
                external_id: external_id.to_string(),
            })
            .await
    }
}
