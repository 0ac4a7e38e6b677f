//! Filesystem helpers for formtag.
//!
//! The workspace stores all external state as plain files (documents, the
//! trigger registry, the mail outbox), so registry and spool updates go
//! through an atomic write: content lands in a temporary file in the target
//! directory, is synced, and then renamed over the destination. Soft deletes
//! move files into a trash directory with a cross-device fallback.

use crate::error::{Result, TagError};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically write bytes to a file.
///
/// Writes to a `.{filename}.tmp` sibling, syncs it, then renames it over the
/// target so the target is never observed half-written. Parent directories
/// are created as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            TagError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| TagError::UserError(format!("invalid file path '{}'", path.display())))?;
    let temp_path = path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!(".{}.tmp", filename));

    let mut file = File::create(&temp_path).map_err(|e| {
        TagError::UserError(format!(
            "failed to create temporary file '{}': {}",
            temp_path.display(),
            e
        ))
    })?;
    file.write_all(content)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            TagError::UserError(format!("failed to write temporary file: {}", e))
        })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TagError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Move a single file from `source` to `destination`.
///
/// Tries `rename()` first (atomic when possible). Some environments surface
/// EXDEV even for paths that look local; for those the move falls back to an
/// atomic write of the content followed by deleting the source.
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TagError::UserError(format!(
                "failed to create destination directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_rename(&e) => {
            let content = fs::read(source).map_err(|read_err| {
                TagError::UserError(format!(
                    "failed to read '{}' for cross-device move: {} (rename error: {})",
                    source.display(),
                    read_err,
                    e
                ))
            })?;
            atomic_write(destination, &content)?;
            fs::remove_file(source).map_err(|del_err| {
                TagError::UserError(format!(
                    "moved '{}' across devices but failed to delete the source: {}",
                    source.display(),
                    del_err
                ))
            })
        }
        Err(e) => Err(TagError::UserError(format!(
            "failed to move file '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))),
    }
}

fn is_cross_device_rename(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(18)
}
