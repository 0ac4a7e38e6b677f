//! Event logging subsystem for formtag.
//!
//! This module implements append-only event logging so that tag generation
//! and trigger changes leave an audit trail. Events are stored in NDJSON
//! format (one JSON object per line) in `.formtag/events/events.ndjson`.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (init, generate, deliver, ...)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `response`: Optional response id for response-specific events
//! - `details`: Freeform object with action-specific details
//!
//! Logging is best-effort from the caller's point of view: commands warn on
//! append failures rather than failing the invocation.

use crate::context::WorkspaceContext;
use crate::error::{Result, TagError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Workspace initialization
    Init,
    /// Manual tag generation
    Generate,
    /// Automatic tag delivery for a submission
    Deliver,
    /// Submit trigger installed
    Configure,
    /// Submit trigger removed
    Unconfigure,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::Generate => write!(f, "generate"),
            EventAction::Deliver => write!(f, "deliver"),
            EventAction::Configure => write!(f, "configure"),
            EventAction::Unconfigure => write!(f, "unconfigure"),
        }
    }
}

/// An event record for the audit log.
///
/// Events are serialized as single-line JSON objects and appended to
/// the events.ndjson file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Optional response id for response-specific events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            response: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the response id for this event.
    pub fn with_response(mut self, response_id: impl Into<String>) -> Self {
        self.response = Some(response_id.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| TagError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Get the path to the events file.
pub fn events_file_path(ctx: &WorkspaceContext) -> PathBuf {
    ctx.events_dir().join("events.ndjson")
}

/// Append an event to the events log.
///
/// Appends the event as a single JSON line to the events.ndjson file,
/// creating the file and its directory if needed.
pub fn append_event(ctx: &WorkspaceContext, event: &Event) -> Result<()> {
    let events_file = events_file_path(ctx);
    let json_line = event.to_ndjson_line()?;

    let events_dir = ctx.events_dir();
    if !events_dir.exists() {
        fs::create_dir_all(&events_dir).map_err(|e| {
            TagError::UserError(format!(
                "failed to create events directory '{}': {}",
                events_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            TagError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        TagError::UserError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        TagError::UserError(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Append an event, warning on stderr instead of failing.
///
/// Audit logging never blocks a command that already did its work.
pub fn append_event_best_effort(ctx: &WorkspaceContext, event: &Event) {
    if let Err(e) = append_event(ctx, event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn make_test_context() -> (TempDir, WorkspaceContext) {
        let temp = TempDir::new().unwrap();
        let ctx = WorkspaceContext::at_root(temp.path());
        (temp, ctx)
    }

    #[test]
    fn event_creation_sets_recent_timestamp_and_actor() {
        let event = Event::new(EventAction::Init);

        assert_eq!(event.action, EventAction::Init);
        assert!(!event.actor.is_empty());
        assert!(event.response.is_none());
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn event_with_response_and_details() {
        let event = Event::new(EventAction::Deliver)
            .with_response("resp-003")
            .with_details(json!({"to": "ada@example.com"}));

        assert_eq!(event.response, Some("resp-003".to_string()));
        assert_eq!(event.details["to"], "ada@example.com");
    }

    #[test]
    fn event_serializes_to_single_line_snake_case() {
        let event = Event::new(EventAction::Unconfigure).with_response("resp-001");
        let json_line = event.to_ndjson_line().unwrap();

        assert!(!json_line.contains('\n'));
        assert!(json_line.contains("\"unconfigure\""));

        let parsed: Event = serde_json::from_str(&json_line).unwrap();
        assert_eq!(parsed.action, EventAction::Unconfigure);
        assert_eq!(parsed.response, Some("resp-001".to_string()));
    }

    #[test]
    fn event_without_response_omits_field() {
        let event = Event::new(EventAction::Init);
        let json_line = event.to_ndjson_line().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json_line).unwrap();
        assert!(parsed.get("response").is_none());
    }

    #[test]
    fn append_event_creates_file_and_directory() {
        let (_temp, ctx) = make_test_context();
        let events_file = events_file_path(&ctx);
        assert!(!events_file.exists());

        let event = Event::new(EventAction::Init);
        append_event(&ctx, &event).unwrap();

        assert!(events_file.exists());
        let content = fs::read_to_string(&events_file).unwrap();
        assert!(content.ends_with('\n'));

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        let parsed: Event = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.action, EventAction::Init);
    }

    #[test]
    fn append_event_appends_multiple_lines() {
        let (_temp, ctx) = make_test_context();

        append_event(&ctx, &Event::new(EventAction::Configure)).unwrap();
        append_event(&ctx, &Event::new(EventAction::Deliver).with_response("resp-001")).unwrap();

        let content = fs::read_to_string(events_file_path(&ctx)).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: Event = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.action, EventAction::Deliver);
        assert_eq!(second.response, Some("resp-001".to_string()));
    }

    #[test]
    fn event_action_display() {
        assert_eq!(format!("{}", EventAction::Init), "init");
        assert_eq!(format!("{}", EventAction::Generate), "generate");
        assert_eq!(format!("{}", EventAction::Deliver), "deliver");
        assert_eq!(format!("{}", EventAction::Configure), "configure");
        assert_eq!(format!("{}", EventAction::Unconfigure), "unconfigure");
    }

    #[test]
    fn actor_string_contains_separator() {
        let actor = get_actor_string();
        assert!(actor.contains('@'));
    }
}
