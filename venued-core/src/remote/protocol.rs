//! Provider protocol types.
//!
//! Defines the JSON protocol spoken between venued and provider binaries
//! over stdin/stdout. Each request carries a command tag plus typed
//! parameters; the response envelope is tagged by status.

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Commands that providers must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
}

/// A typed provider command with its response type.
pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;

    fn command() -> Command;
}

/// The calendar-facing shape of a booking: title, generated description,
/// and the day/time span. This is everything a provider needs to mirror an
/// event; domain details (forms, guest counts, contacts) are already folded
/// into `description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    /// Inclusive end day; equal to `start_date` for single-day events.
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Create a calendar entry; responds with the provider-assigned id.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub payload: EventPayload,
}

/// Id assigned by the provider to a newly created entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedEntry {
    pub external_id: String,
}

impl ProviderCommand for CreateEvent {
    type Response = CreatedEntry;

    fn command() -> Command {
        Command::CreateEvent
    }
}

/// Overwrite the entry with the given external id.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub external_id: String,
    pub payload: EventPayload,
}

impl ProviderCommand for UpdateEvent {
    type Response = ();

    fn command() -> Command {
        Command::UpdateEvent
    }
}

/// Remove the entry with the given external id.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEvent {
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub external_id: String,
}

impl ProviderCommand for DeleteEvent {
    type Response = ();

    fn command() -> Command {
        Command::DeleteEvent
    }
}

/// Request sent from venued to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider back to venued.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    /// Serialize a success response line (for provider implementations).
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    /// Serialize an error response line (for provider implementations).
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}
