//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a formtag workspace.
///
/// This struct represents the contents of `formtag.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Tag settings
    // =========================================================================
    /// Document id of the tag template in the document store.
    #[serde(default = "default_template_id")]
    pub template_id: String,

    /// Display name for working copies and base name of the exported PDF
    /// (the artifact filename is this plus `.pdf`).
    #[serde(default = "default_attachment_name")]
    pub attachment_name: String,

    /// Fixed mail text for automatic delivery.
    #[serde(default)]
    pub mail: MailSettings,

    // =========================================================================
    // Workspace layout (paths relative to the workspace root)
    // =========================================================================
    /// Directory holding templates and working copies.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,

    /// JSON file holding submitted form responses.
    #[serde(default = "default_responses_file")]
    pub responses_file: String,

    /// Directory the mail spool writes delivered messages into.
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: String,

    /// Directory holding TTF font families for PDF export.
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_id: default_template_id(),
            attachment_name: default_attachment_name(),
            mail: MailSettings::default(),
            documents_dir: default_documents_dir(),
            responses_file: default_responses_file(),
            outbox_dir: default_outbox_dir(),
            fonts_dir: default_fonts_dir(),
        }
    }
}
