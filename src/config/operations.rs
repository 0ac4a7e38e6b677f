//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{Result, TagError};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(TagError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            TagError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| TagError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| TagError::ConfigError(format!("failed to serialize config: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `template_id` and `attachment_name` must be non-empty
    /// - workspace path fields must be non-empty and relative
    pub fn validate(&self) -> Result<()> {
        if self.template_id.trim().is_empty() {
            return Err(TagError::ConfigError(
                "config validation failed: template_id must be non-empty".to_string(),
            ));
        }

        if self.attachment_name.trim().is_empty() {
            return Err(TagError::ConfigError(
                "config validation failed: attachment_name must be non-empty".to_string(),
            ));
        }

        for (field, value) in [
            ("documents_dir", &self.documents_dir),
            ("responses_file", &self.responses_file),
            ("outbox_dir", &self.outbox_dir),
            ("fonts_dir", &self.fonts_dir),
        ] {
            if value.is_empty() {
                return Err(TagError::ConfigError(format!(
                    "config validation failed: {} must be non-empty",
                    field
                )));
            }
            if Path::new(value).is_absolute() {
                return Err(TagError::ConfigError(format!(
                    "config validation failed: {} must be relative to the workspace root (found '{}')",
                    field, value
                )));
            }
        }

        Ok(())
    }

    /// Resolve a configured relative path against the workspace root.
    pub fn resolve_path(&self, root: &Path, relative: &str) -> PathBuf {
        root.join(relative)
    }
}
