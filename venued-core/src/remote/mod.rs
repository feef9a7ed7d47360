//! External calendar access.
//!
//! Providers are out-of-process binaries (`venued-provider-<name>`) spoken
//! to over a JSON stdin/stdout protocol, so any executable implementing the
//! protocol can mirror events to its calendar service. [`CalendarClient`]
//! is the seam the sync reconciler works against; [`Remote`] is the
//! subprocess-backed implementation.

pub mod protocol;
pub mod provider;
mod remote;

pub use protocol::EventPayload;
pub use provider::Provider;
pub use remote::{Remote, RemoteConfig};

use crate::error::VenuedResult;

/// Operations an external calendar must support.
///
/// `create_event` returns the provider-assigned id of the new entry;
/// updates and deletes address an existing entry by that id.
#[allow(async_fn_in_trait)]
pub trait CalendarClient {
    async fn create_event(&self, payload: &EventPayload) -> VenuedResult<String>;
    async fn update_event(&self, external_id: &str, payload: &EventPayload) -> VenuedResult<()>;
    async fn delete_event(&self, external_id: &str) -> VenuedResult<()>;
}
