//! Workspace context resolution for formtag.
//!
//! A formtag workspace is a directory identified by a `formtag.yaml` file at
//! its root. This module finds the workspace root from any working directory
//! (walking up the directory tree) and resolves the canonical state paths.
//!
//! All commands go through this module to locate workspace state, so
//! operations target the same files regardless of where the command is
//! invoked from.

use crate::error::{Result, TagError};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the configuration file that marks the workspace root.
pub const CONFIG_FILE: &str = "formtag.yaml";

/// Directory for internal state (trigger registry, audit log).
pub const STATE_DIR: &str = ".formtag";

/// Resolved paths for a formtag workspace.
///
/// All paths are absolute. Store locations that are configurable
/// (documents, responses, outbox, fonts) are resolved against `root`
/// by the commands after loading the config.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Absolute path to the workspace root (the directory holding `formtag.yaml`).
    pub root: PathBuf,

    /// Absolute path to the configuration file.
    pub config_path: PathBuf,

    /// Absolute path to the internal state directory (`{root}/.formtag/`).
    pub state_dir: PathBuf,
}

impl WorkspaceContext {
    /// Resolve the workspace context from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(WorkspaceContext)` - Successfully resolved context
    /// * `Err(TagError::UserError)` - If no `formtag.yaml` is found upward of the cwd
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            TagError::UserError(format!("failed to get current working directory: {}", e))
        })?;
        Self::resolve_from(&cwd)
    }

    /// Resolve the workspace context from a specific directory.
    ///
    /// Walks up from `dir` until a directory containing `formtag.yaml` is
    /// found. This is also the entry point used by tests, which resolve
    /// against temporary directories instead of the process cwd.
    pub fn resolve_from<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let start = dir.as_ref();

        let mut current = Some(start);
        while let Some(candidate) = current {
            if candidate.join(CONFIG_FILE).is_file() {
                return Ok(Self::at_root(candidate));
            }
            current = candidate.parent();
        }

        Err(TagError::UserError(format!(
            "no formtag workspace found upward of '{}'.\n\
             Fix: run `formtag init` in the directory that should hold the workspace.",
            start.display()
        )))
    }

    /// Build a context rooted at `root` without searching.
    ///
    /// Used by `init`, which creates the workspace marker itself.
    pub fn at_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let config_path = root.join(CONFIG_FILE);
        let state_dir = root.join(STATE_DIR);
        Self {
            root,
            config_path,
            state_dir,
        }
    }

    /// Path to the trigger registry file.
    pub fn triggers_path(&self) -> PathBuf {
        self.state_dir.join("triggers.yaml")
    }

    /// Path to the events directory.
    pub fn events_dir(&self) -> PathBuf {
        self.state_dir.join("events")
    }
}
