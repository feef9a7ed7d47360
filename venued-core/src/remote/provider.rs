//! Provider subprocess client.
//!
//! Spawns `venued-provider-<name>` binaries and exchanges one JSON request
//! and response per invocation. Providers manage their own credentials and
//! tokens; venued only passes through provider-specific parameters from the
//! venue's integration config.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{VenuedError, VenuedResult};
use crate::remote::protocol::{ProviderCommand, Request, Response};

/// Upper bound on a single provider call. A hung provider surfaces as a
/// sync failure instead of wedging the caller.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// A provider, addressed by name (e.g. "google").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> VenuedResult<std::path::PathBuf> {
        let binary_name = format!("venued-provider-{}", self.0);
        which::which(&binary_name).map_err(|_| {
            VenuedError::ProviderNotInstalled(format!(
                "Provider '{}' not found. Install it with:\n  cargo install {}",
                self.0, binary_name
            ))
        })
    }

    /// Call a typed provider command and return its response.
    ///
    /// The response type comes from the command's associated type, so a
    /// provider answering with the wrong shape fails deserialization here
    /// rather than corrupting caller state.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> VenuedResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.exchange(cmd))
            .await
            .map_err(|_| VenuedError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    async fn exchange<C: ProviderCommand>(&self, cmd: C) -> VenuedResult<C::Response> {
        let params = serde_json::to_value(&cmd)
            .map_err(|e| VenuedError::Serialization(e.to_string()))?;
        let request = Request {
            command: C::command(),
            params,
        };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| VenuedError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                VenuedError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(VenuedError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(VenuedError::Provider(
                "Provider returned no response".into(),
            ));
        }

        let response: Response<C::Response> = serde_json::from_str(&response_str)
            .map_err(|e| VenuedError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(VenuedError::Provider(error)),
        }
    }
}
