//! Trigger registry capability.
//!
//! Triggers are platform-managed registrations binding an event to a
//! handler. This tool manages exactly one kind: the form-submit trigger that
//! fires the tag delivery handler. Handler identity is an explicit opaque id
//! stored in the record, matched exactly.

mod registry;

pub use registry::FileTriggerRegistry;

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque id of the submit handler bound by `configure`.
pub const SUBMIT_HANDLER: &str = "deliver-tag-on-submit";

/// Events a trigger can fire on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    /// A form response was submitted.
    FormSubmit,
}

/// A registered trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    /// Registry-assigned identifier (e.g., `trigger-001`).
    pub id: String,

    /// Event the trigger fires on.
    pub event: TriggerEvent,

    /// Opaque id of the bound handler.
    pub handler: String,

    /// When the trigger was installed.
    pub created_at: DateTime<Utc>,
}

/// Capability over the platform's trigger registry.
pub trait TriggerRegistry {
    /// Register a trigger binding `event` to `handler`.
    ///
    /// Deliberately performs no duplicate check: installing twice records
    /// two triggers. Returns the stored record.
    fn install(&self, event: TriggerEvent, handler: &str) -> Result<TriggerRecord>;

    /// Remove a trigger by id. Removing an unknown id is a trigger error.
    fn remove(&self, id: &str) -> Result<()>;

    /// First trigger matching `event` and `handler`, if any.
    fn find(&self, event: TriggerEvent, handler: &str) -> Result<Option<TriggerRecord>>;

    /// All registered triggers, in registration order.
    fn list(&self) -> Result<Vec<TriggerRecord>>;
}
