//! Document store capability and its filesystem implementation.
//!
//! Documents are text files identified by an id. Deletion is soft: trashed
//! documents move into a `.trash/` directory next to the live ones, where
//! the platform (here: the operator) can still recover them. Working copies
//! are held by a scope guard so they are trashed on every exit path.

use crate::error::{Result, TagError};
use crate::fs::{atomic_write, atomic_write_file, move_file};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Directory documents are soft-deleted into.
pub const TRASH_DIR: &str = ".trash";

/// A text document with its store id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Store identifier.
    pub id: String,

    /// Full text content.
    pub text: String,
}

/// Capability over the platform's document storage.
pub trait DocumentStore {
    /// Load a document by id. A missing id is a configuration error:
    /// the only documents resolved by id are configured templates.
    fn load(&self, id: &str) -> Result<Document>;

    /// Duplicate `id` under a fresh id derived from `display_name`.
    /// The template itself is never mutated.
    fn copy(&self, id: &str, display_name: &str) -> Result<Document>;

    /// Overwrite the text of an existing document.
    fn write(&self, id: &str, text: &str) -> Result<()>;

    /// Soft-delete a document (recoverable, not a hard erase).
    fn trash(&self, id: &str) -> Result<()>;

    /// Write raw bytes directly into the trash area under `filename`,
    /// returning the path. The file is addressable but already marked
    /// for deletion; used for manual-run artifacts.
    fn create_transient(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Document store backed by a directory of `.txt` files.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, id: &str) -> Result<PathBuf> {
        // Ids are single path components; anything else would escape the store.
        if id.is_empty() || id.contains('/') || id.contains('\\') || id == "." || id == ".." {
            return Err(TagError::UserError(format!("invalid document id '{}'", id)));
        }
        Ok(self.root.join(format!("{}.txt", id)))
    }

    fn trash_dir(&self) -> PathBuf {
        self.root.join(TRASH_DIR)
    }

    /// Derive a fresh id from `base` that does not collide with an
    /// existing document.
    fn unique_id(&self, base: &str) -> Result<String> {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let mut id = format!("{} {}", base, stamp);
        let mut n = 1;
        while self.doc_path(&id)?.exists() {
            id = format!("{} {} ({})", base, stamp, n);
            n += 1;
        }
        Ok(id)
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, id: &str) -> Result<Document> {
        let path = self.doc_path(id)?;
        if !path.is_file() {
            return Err(TagError::ConfigError(format!(
                "document '{}' not found in '{}'",
                id,
                self.root.display()
            )));
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            TagError::ExportError(format!(
                "failed to read document '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Document {
            id: id.to_string(),
            text,
        })
    }

    fn copy(&self, id: &str, display_name: &str) -> Result<Document> {
        let source = self.load(id)?;
        let copy_id = self.unique_id(display_name)?;
        let path = self.doc_path(&copy_id)?;
        atomic_write_file(&path, &source.text)?;

        Ok(Document {
            id: copy_id,
            text: source.text,
        })
    }

    fn write(&self, id: &str, text: &str) -> Result<()> {
        let path = self.doc_path(id)?;
        if !path.is_file() {
            return Err(TagError::ExportError(format!(
                "cannot write document '{}': it does not exist",
                id
            )));
        }
        atomic_write_file(&path, text)
    }

    fn trash(&self, id: &str) -> Result<()> {
        let path = self.doc_path(id)?;
        let destination = self.trash_dir().join(format!("{}.txt", id));
        move_file(&path, &destination).map_err(|e| {
            TagError::ExportError(format!("failed to trash document '{}': {}", id, e))
        })
    }

    fn create_transient(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
            return Err(TagError::UserError(format!(
                "invalid transient filename '{}'",
                filename
            )));
        }

        let mut path = self.trash_dir().join(filename);
        let mut n = 1;
        while path.exists() {
            path = self.trash_dir().join(format!("{} ({})", filename, n));
            n += 1;
        }

        atomic_write(&path, bytes)?;
        Ok(path)
    }
}

/// Scope guard around a working copy of a template.
///
/// The copy is trashed when the guard drops, so cleanup runs on success and
/// on every error path alike. Trashing failures are warned about, never
/// panicked on; a leftover working copy is recoverable by hand.
pub struct WorkingCopy<'a> {
    store: &'a dyn DocumentStore,
    document: Document,
}

impl<'a> WorkingCopy<'a> {
    /// Copy `template_id` under `display_name` and wrap it in a guard.
    pub fn create(
        store: &'a dyn DocumentStore,
        template_id: &str,
        display_name: &str,
    ) -> Result<Self> {
        let document = store.copy(template_id, display_name)?;
        Ok(Self { store, document })
    }

    /// Store id of the working copy.
    pub fn id(&self) -> &str {
        &self.document.id
    }

    /// Current text of the working copy.
    pub fn text(&self) -> &str {
        &self.document.text
    }

    /// Persist new text into the working copy.
    pub fn write(&mut self, text: String) -> Result<()> {
        self.store.write(&self.document.id, &text)?;
        self.document.text = text;
        Ok(())
    }
}

impl Drop for WorkingCopy<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.store.trash(&self.document.id) {
            eprintln!(
                "Warning: failed to trash working copy '{}': {}",
                self.document.id, e
            );
        }
    }
}
