//! YAML-file-backed trigger registry.
//!
//! The registry lives in `.formtag/triggers.yaml`. A missing file is an
//! empty registry. Every mutation rewrites the file atomically so a crash
//! never leaves it half-written.

use crate::error::{Result, TagError};
use crate::fs::atomic_write_file;
use crate::trigger::{TriggerEvent, TriggerRecord, TriggerRegistry};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape of the registry file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TriggerFile {
    triggers: Vec<TriggerRecord>,
}

/// Trigger registry stored in a YAML file.
#[derive(Debug, Clone)]
pub struct FileTriggerRegistry {
    path: PathBuf,
}

impl FileTriggerRegistry {
    /// Create a registry backed by `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> Result<TriggerFile> {
        if !self.path.exists() {
            return Ok(TriggerFile::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            TagError::TriggerError(format!(
                "failed to read trigger registry '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            TagError::TriggerError(format!(
                "failed to parse trigger registry '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write(&self, file: &TriggerFile) -> Result<()> {
        let yaml = serde_yaml::to_string(file).map_err(|e| {
            TagError::TriggerError(format!("failed to serialize trigger registry: {}", e))
        })?;
        atomic_write_file(&self.path, &yaml)
            .map_err(|e| TagError::TriggerError(e.to_string()))
    }

    /// Next free `trigger-NNN` id.
    fn next_id(file: &TriggerFile) -> String {
        let max = file
            .triggers
            .iter()
            .filter_map(|t| t.id.strip_prefix("trigger-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("trigger-{:03}", max + 1)
    }
}

impl TriggerRegistry for FileTriggerRegistry {
    fn install(&self, event: TriggerEvent, handler: &str) -> Result<TriggerRecord> {
        let mut file = self.read()?;
        let record = TriggerRecord {
            id: Self::next_id(&file),
            event,
            handler: handler.to_string(),
            created_at: Utc::now(),
        };
        file.triggers.push(record.clone());
        self.write(&file)?;
        Ok(record)
    }

    fn remove(&self, id: &str) -> Result<()> {
        let mut file = self.read()?;
        let before = file.triggers.len();
        file.triggers.retain(|t| t.id != id);
        if file.triggers.len() == before {
            return Err(TagError::TriggerError(format!(
                "no trigger found with id '{}'",
                id
            )));
        }
        self.write(&file)
    }

    fn find(&self, event: TriggerEvent, handler: &str) -> Result<Option<TriggerRecord>> {
        let file = self.read()?;
        Ok(file
            .triggers
            .into_iter()
            .find(|t| t.event == event && t.handler == handler))
    }

    fn list(&self) -> Result<Vec<TriggerRecord>> {
        Ok(self.read()?.triggers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::SUBMIT_HANDLER;
    use tempfile::TempDir;

    fn make_registry() -> (TempDir, FileTriggerRegistry) {
        let temp = TempDir::new().unwrap();
        let registry = FileTriggerRegistry::new(temp.path().join("triggers.yaml"));
        (temp, registry)
    }

    #[test]
    fn missing_file_is_an_empty_registry() {
        let (_temp, registry) = make_registry();
        assert!(registry.list().unwrap().is_empty());
        assert!(registry
            .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap()
            .is_none());
    }

    #[test]
    fn install_records_a_trigger() {
        let (_temp, registry) = make_registry();

        let record = registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();
        assert_eq!(record.id, "trigger-001");
        assert_eq!(record.handler, SUBMIT_HANDLER);

        let found = registry
            .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();
        assert_eq!(found, Some(record));
    }

    #[test]
    fn install_twice_records_two_triggers() {
        // Documented as-is behavior: no duplicate check on install.
        let (_temp, registry) = make_registry();

        registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();
        registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();

        let triggers = registry.list().unwrap();
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].id, "trigger-001");
        assert_eq!(triggers[1].id, "trigger-002");
    }

    #[test]
    fn find_returns_first_match_in_registration_order() {
        let (_temp, registry) = make_registry();

        let first = registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();
        registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();

        let found = registry
            .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();
        assert_eq!(found, Some(first));
    }

    #[test]
    fn find_matches_handler_identity_exactly() {
        let (_temp, registry) = make_registry();
        registry
            .install(TriggerEvent::FormSubmit, "some-other-handler")
            .unwrap();

        assert!(registry
            .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap()
            .is_none());
    }

    #[test]
    fn remove_deletes_the_trigger() {
        let (_temp, registry) = make_registry();
        let record = registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();

        registry.remove(&record.id).unwrap();

        assert!(registry.list().unwrap().is_empty());
        assert!(registry
            .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap()
            .is_none());
    }

    #[test]
    fn remove_unknown_id_is_trigger_error() {
        let (_temp, registry) = make_registry();
        let err = registry.remove("trigger-999").unwrap_err();
        assert!(matches!(err, TagError::TriggerError(_)));
        assert!(err.to_string().contains("no trigger found"));
    }

    #[test]
    fn registry_survives_a_reopen() {
        let (temp, registry) = make_registry();
        registry
            .install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
            .unwrap();

        let reopened = FileTriggerRegistry::new(temp.path().join("triggers.yaml"));
        let triggers = reopened.list().unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].event, TriggerEvent::FormSubmit);
    }

    #[test]
    fn malformed_registry_is_a_trigger_error() {
        let (temp, registry) = make_registry();
        std::fs::write(temp.path().join("triggers.yaml"), "triggers: {not: a list}").unwrap();

        assert!(registry.list().is_err());
    }
}
