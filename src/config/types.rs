//! Configuration types and defaults for formtag.
//!
//! This module defines nested settings structs and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// Fixed text used when composing the delivery mail.
///
/// The edit-link line is appended to `body` at send time; it is not part of
/// the configured text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Display name of the sender.
    pub sender_name: String,

    /// Subject line.
    pub subject: String,

    /// Body text (without the appended edit-link line).
    pub body: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sender_name: default_sender_name(),
            subject: default_subject(),
            body: default_body(),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_template_id() -> String {
    "prototype-tag".to_string()
}
pub(crate) fn default_attachment_name() -> String {
    "Prototype Tag".to_string()
}
pub(crate) fn default_sender_name() -> String {
    "Prototype Tag".to_string()
}
pub(crate) fn default_subject() -> String {
    "Your new tag".to_string()
}
pub(crate) fn default_body() -> String {
    "Here's your prototype tag. Please attach it to your prototype.".to_string()
}
pub(crate) fn default_documents_dir() -> String {
    "documents".to_string()
}
pub(crate) fn default_responses_file() -> String {
    "responses.json".to_string()
}
pub(crate) fn default_outbox_dir() -> String {
    "outbox".to_string()
}
pub(crate) fn default_fonts_dir() -> String {
    "fonts".to_string()
}
