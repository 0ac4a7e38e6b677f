//! CLI argument parsing for formtag.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Formtag: form-submission to PDF-tag automation.
///
/// A workspace is a directory with a `formtag.yaml` config plus file-backed
/// stores for templates, responses, triggers, and outgoing mail:
/// - `generate` builds a tag PDF for one past response
/// - `configure`/`unconfigure` switch automatic tag making on and off
/// - `watch` dispatches the submit handler for newly arriving responses
#[derive(Parser, Debug)]
#[command(name = "formtag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for formtag.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a formtag workspace in the current directory.
    ///
    /// Creates `formtag.yaml`, the document/response/outbox stores, and a
    /// starter tag template.
    Init,

    /// Make a PDF tag for one response.
    ///
    /// Takes the 1-based response number; prompts for it when omitted.
    /// Prints the path of the generated (transient) PDF.
    Generate(GenerateArgs),

    /// Start automatic tag making.
    ///
    /// Installs the form-submit trigger bound to the delivery handler.
    Configure,

    /// Stop automatic tag making.
    ///
    /// Removes the matching form-submit trigger; fails when none is installed.
    Unconfigure,

    /// Dispatch the submit handler for responses as they arrive.
    ///
    /// Polls the response store and, while the submit trigger is installed,
    /// delivers a tag mail for every new submission.
    Watch(WatchArgs),

    /// Show workspace status.
    ///
    /// Reports trigger state, response count, and template resolvability.
    Status,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// 1-based response number. Prompted for interactively when omitted.
    pub response: Option<String>,
}

/// Arguments for the `watch` command.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub interval_ms: u64,

    /// Run a single iteration and exit.
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
