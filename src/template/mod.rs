//! Template fill and export.
//!
//! The fill engine performs `%name%` placeholder substitution over a working
//! copy of the tag template; the exporter turns the filled text into the
//! binary artifact attached to mails and shown to the operator.

mod fill;
mod filler;
mod pdf;

pub use fill::{fill_tokens, token, unresolved_tokens};
pub use filler::{ArtifactExporter, TagArtifact, TagFiller};
pub use pdf::{PdfExporter, PDF_MIME_TYPE};
