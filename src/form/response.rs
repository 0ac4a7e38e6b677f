//! Form response types and the response store capability.
//!
//! A response carries an ordered list of item answers plus optional
//! respondent email and edit URL. The store preserves submission order;
//! nothing here is ever written back.

use crate::error::{Result, TagError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single answered form item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAnswer {
    /// The question title as shown on the form.
    pub title: String,

    /// The submitted answer.
    pub answer: AnswerValue,
}

/// An answer value: free text or a multi-select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A single text answer.
    Text(String),

    /// A multi-value answer (checkboxes, multi-select).
    List(Vec<String>),
}

impl AnswerValue {
    /// Coerce the answer to its text form.
    ///
    /// Lists join with `","`, the platform's default list-to-string coercion.
    pub fn coerce(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::List(items) => items.join(","),
        }
    }
}

/// A submitted form response.
///
/// Read-only from this tool's perspective: responses are produced by the
/// form platform and only ever deserialized here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    /// Stable identifier assigned by the platform.
    pub id: String,

    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,

    /// Answered items, in form item order.
    pub items: Vec<ItemAnswer>,

    /// Respondent email, present when the form collects it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_email: Option<String>,

    /// URL the respondent can use to edit their submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

/// Capability over the platform's response storage.
pub trait ResponseStore {
    /// All responses, in submission order.
    fn list(&self) -> Result<Vec<FormResponse>>;
}

/// Response store backed by a JSON array file.
#[derive(Debug, Clone)]
pub struct JsonResponseStore {
    path: PathBuf,
}

impl JsonResponseStore {
    /// Create a store reading from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResponseStore for JsonResponseStore {
    fn list(&self) -> Result<Vec<FormResponse>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            TagError::UserError(format!(
                "failed to read response store '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            TagError::UserError(format!(
                "failed to parse response store '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn coerce_text_returns_text() {
        let answer = AnswerValue::Text("Widget".to_string());
        assert_eq!(answer.coerce(), "Widget");
    }

    #[test]
    fn coerce_list_joins_with_comma() {
        let answer = AnswerValue::List(vec![
            "Laser".to_string(),
            "Sensors".to_string(),
            "Wheels".to_string(),
        ]);
        assert_eq!(answer.coerce(), "Laser,Sensors,Wheels");
    }

    #[test]
    fn coerce_empty_list_is_empty_string() {
        let answer = AnswerValue::List(vec![]);
        assert_eq!(answer.coerce(), "");
    }

    #[test]
    fn response_deserializes_from_platform_json() {
        let json = r#"{
            "id": "resp-001",
            "submitted_at": "2026-02-03T10:15:00Z",
            "items": [
                {"title": "Project name", "answer": "Rover"},
                {"title": "Components", "answer": ["Laser", "Wheels"]}
            ],
            "respondent_email": "ada@example.com",
            "edit_url": "https://forms.example.com/edit/resp-001"
        }"#;

        let response: FormResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "resp-001");
        assert_eq!(response.items.len(), 2);
        assert_eq!(
            response.items[0].answer,
            AnswerValue::Text("Rover".to_string())
        );
        assert_eq!(
            response.items[1].answer,
            AnswerValue::List(vec!["Laser".to_string(), "Wheels".to_string()])
        );
        assert_eq!(response.respondent_email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn response_optional_fields_default_to_none() {
        let json = r#"{
            "id": "resp-002",
            "submitted_at": "2026-02-03T10:20:00Z",
            "items": []
        }"#;

        let response: FormResponse = serde_json::from_str(json).unwrap();
        assert!(response.respondent_email.is_none());
        assert!(response.edit_url.is_none());
    }

    #[test]
    fn json_store_lists_responses_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("responses.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "resp-001", "submitted_at": "2026-02-03T10:15:00Z", "items": []},
                {"id": "resp-002", "submitted_at": "2026-02-03T10:20:00Z", "items": []}
            ]"#,
        )
        .unwrap();

        let store = JsonResponseStore::new(&path);
        let responses = store.list().unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, "resp-001");
        assert_eq!(responses[1].id, "resp-002");
    }

    #[test]
    fn json_store_fails_for_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonResponseStore::new(temp.path().join("missing.json"));
        let result = store.list();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to read"));
    }

    #[test]
    fn json_store_fails_for_malformed_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("responses.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonResponseStore::new(&path);
        let result = store.list();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }
}
