//! Storage capabilities for formtag.
//!
//! The document store stands in for the platform's file/document service:
//! templates live in it, working copies are created and soft-deleted in it,
//! and exported artifacts can be parked in it as transient files.

mod documents;

pub use documents::{Document, DocumentStore, FsDocumentStore, WorkingCopy};
