//! Error types for the formtag CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! The taxonomy mirrors how invocations fail: user-correctable input problems
//! abort cleanly with exit code 1, everything else is fatal for the invocation
//! and maps to a dedicated exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for formtag operations.
#[derive(Error, Debug)]
pub enum TagError {
    /// User provided invalid input or the workspace is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Configuration problem: unresolvable template id, unreadable or invalid config.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Template fill or PDF export failed.
    #[error("Export failed: {0}")]
    ExportError(String),

    /// Mail composition or delivery failed.
    #[error("Mail delivery failed: {0}")]
    MailError(String),

    /// Trigger registry operation failed.
    #[error("Trigger error: {0}")]
    TriggerError(String),
}

impl TagError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TagError::UserError(_) => exit_codes::USER_ERROR,
            TagError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            TagError::ExportError(_) => exit_codes::EXPORT_FAILURE,
            TagError::MailError(_) => exit_codes::MAIL_FAILURE,
            TagError::TriggerError(_) => exit_codes::TRIGGER_FAILURE,
        }
    }
}

/// Result type alias for formtag operations.
pub type Result<T> = std::result::Result<T, TagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = TagError::UserError("that's not a number".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = TagError::ConfigError("template 'missing' not found".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn export_error_has_correct_exit_code() {
        let err = TagError::ExportError("font family not found".to_string());
        assert_eq!(err.exit_code(), exit_codes::EXPORT_FAILURE);
    }

    #[test]
    fn mail_error_has_correct_exit_code() {
        let err = TagError::MailError("no email found".to_string());
        assert_eq!(err.exit_code(), exit_codes::MAIL_FAILURE);
    }

    #[test]
    fn trigger_error_has_correct_exit_code() {
        let err = TagError::TriggerError("no trigger found".to_string());
        assert_eq!(err.exit_code(), exit_codes::TRIGGER_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = TagError::UserError("can't find response 6".to_string());
        assert_eq!(err.to_string(), "can't find response 6");

        let err = TagError::ConfigError("template 'prototype-tag' not found".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: template 'prototype-tag' not found"
        );

        let err = TagError::TriggerError("no trigger found".to_string());
        assert_eq!(err.to_string(), "Trigger error: no trigger found");
    }
}
