//! Command implementations for formtag.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the shared runtime wiring: every command resolves
//! the workspace, loads the config, and builds the file-backed capability
//! implementations from the configured paths.

mod configure;
mod generate;
mod init;
mod status;
mod watch;

use crate::cli::Command;
use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::error::Result;
use crate::mail::OutboxMailer;
use crate::store::FsDocumentStore;
use crate::template::PdfExporter;
use crate::trigger::FileTriggerRegistry;
use crate::form::JsonResponseStore;
use std::path::PathBuf;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(),
        Command::Generate(args) => generate::cmd_generate(args),
        Command::Configure => configure::cmd_configure(),
        Command::Unconfigure => configure::cmd_unconfigure(),
        Command::Watch(args) => watch::cmd_watch(args),
        Command::Status => status::cmd_status(),
    }
}

/// Resolved workspace plus loaded config: what every command starts from.
pub(crate) struct Runtime {
    pub ctx: WorkspaceContext,
    pub config: Config,
}

impl Runtime {
    /// Resolve the workspace from the current directory and load its config.
    pub fn resolve() -> Result<Self> {
        let ctx = WorkspaceContext::resolve()?;
        let config = Config::load(&ctx.config_path)?;
        Ok(Self { ctx, config })
    }

    /// Build a runtime over an already-resolved context.
    pub fn from_context(ctx: WorkspaceContext) -> Result<Self> {
        let config = Config::load(&ctx.config_path)?;
        Ok(Self { ctx, config })
    }

    fn resolve_path(&self, relative: &str) -> PathBuf {
        self.config.resolve_path(&self.ctx.root, relative)
    }

    /// Document store over the configured documents directory.
    pub fn document_store(&self) -> FsDocumentStore {
        FsDocumentStore::new(self.resolve_path(&self.config.documents_dir))
    }

    /// Response store over the configured responses file.
    pub fn response_store(&self) -> JsonResponseStore {
        JsonResponseStore::new(self.resolve_path(&self.config.responses_file))
    }

    /// Mailer spooling into the configured outbox directory.
    pub fn mailer(&self) -> OutboxMailer {
        OutboxMailer::new(self.resolve_path(&self.config.outbox_dir))
    }

    /// Trigger registry in the workspace state directory.
    pub fn trigger_registry(&self) -> FileTriggerRegistry {
        FileTriggerRegistry::new(self.ctx.triggers_path())
    }

    /// PDF exporter over the configured fonts directory.
    pub fn pdf_exporter(&self) -> PdfExporter {
        PdfExporter::new(self.resolve_path(&self.config.fonts_dir))
    }
}
