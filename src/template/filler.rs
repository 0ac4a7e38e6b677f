//! Template Filler: fields in, exported artifact out.
//!
//! The fill pipeline mirrors the document lifecycle: locate the template,
//! duplicate it as a working copy, substitute the fields, persist, export,
//! and trash the copy. The working copy is held by a scope guard, so the
//! trash step runs whether the export succeeds or fails; only the exported
//! bytes outlive the call.

use crate::error::Result;
use crate::form::Field;
use crate::store::{DocumentStore, WorkingCopy};
use crate::template::fill::{fill_tokens, unresolved_tokens};

/// The exported binary artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagArtifact {
    /// Attachment filename (base name plus extension).
    pub filename: String,

    /// MIME type of the exported bytes.
    pub mime_type: &'static str,

    /// Exported document bytes.
    pub bytes: Vec<u8>,
}

/// Capability over the platform's document-conversion service.
pub trait ArtifactExporter {
    /// Convert filled text into the binary artifact format.
    fn export(&self, text: &str, title: &str) -> Result<Vec<u8>>;

    /// MIME type of the exported format.
    fn mime_type(&self) -> &'static str;
}

/// Fills the tag template and exports the result.
pub struct TagFiller<'a> {
    store: &'a dyn DocumentStore,
    exporter: &'a dyn ArtifactExporter,
    template_id: &'a str,
    attachment_name: &'a str,
}

impl<'a> TagFiller<'a> {
    /// Create a filler over the given store and exporter.
    pub fn new(
        store: &'a dyn DocumentStore,
        exporter: &'a dyn ArtifactExporter,
        template_id: &'a str,
        attachment_name: &'a str,
    ) -> Self {
        Self {
            store,
            exporter,
            template_id,
            attachment_name,
        }
    }

    /// Fill the template with `fields` and export it.
    ///
    /// An unresolvable template id propagates as a configuration error.
    /// Placeholders no field matched stay in the document and are reported
    /// on stderr.
    pub fn fill(&self, fields: &[Field]) -> Result<TagArtifact> {
        let mut copy = WorkingCopy::create(self.store, self.template_id, self.attachment_name)?;

        let filled = fill_tokens(copy.text(), fields);
        let leftover = unresolved_tokens(&filled);
        if !leftover.is_empty() {
            eprintln!(
                "Warning: unresolved placeholders in '{}': {}",
                copy.id(),
                leftover.join(", ")
            );
        }
        copy.write(filled)?;

        let bytes = self.exporter.export(copy.text(), self.attachment_name)?;

        Ok(TagArtifact {
            filename: format!("{}.pdf", self.attachment_name),
            mime_type: self.exporter.mime_type(),
            bytes,
        })
        // `copy` drops here: the working copy is trashed on this and every
        // earlier exit path.
    }
}
