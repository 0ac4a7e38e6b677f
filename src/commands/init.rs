//! Implementation of the `formtag init` command.
//!
//! Scaffolds a workspace in the current directory:
//!
//! 1. Writes `formtag.yaml` with the default configuration
//! 2. Creates the document store with a starter tag template
//! 3. Creates an empty response store, the outbox, and the fonts directory
//! 4. Creates the internal state directory (`.formtag/`)
//!
//! The command is **idempotent**: existing files and directories are left
//! untouched, only missing pieces are created.

use crate::commands::Runtime;
use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::error::{Result, TagError};
use crate::events::{append_event_best_effort, Event, EventAction};
use crate::fs::atomic_write_file;
use serde_json::json;
use std::env;
use std::fs;
use std::path::Path;

/// Starter template seeded into the document store.
const STARTER_TEMPLATE: &str = "\
%Project name%

Built by: %Team%
Contact: %Email%

Edit your submission: %Edit URL%
";

/// Execute the `formtag init` command.
pub fn cmd_init() -> Result<()> {
    let cwd = env::current_dir().map_err(|e| {
        TagError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let created = init_at(&cwd)?;

    let ctx = WorkspaceContext::at_root(&cwd);
    append_event_best_effort(
        &ctx,
        &Event::new(EventAction::Init).with_details(json!({ "created": created })),
    );

    println!("Initialized formtag workspace at {}", cwd.display());
    println!();
    if created.is_empty() {
        println!("Everything was already in place.");
    } else {
        println!("Created:");
        for entry in &created {
            println!("  {}", entry);
        }
    }
    println!();
    println!("Next steps:");
    println!("  1. Put TTF fonts (Arial or LiberationSans) into fonts/");
    println!("  2. Edit the tag template in documents/");
    println!("  3. Run `formtag configure` to start automatic tag making.");

    Ok(())
}

/// Scaffold a workspace at `root`, returning what was created.
///
/// Existing files are never overwritten.
pub(crate) fn init_at(root: &Path) -> Result<Vec<String>> {
    let mut created = Vec::new();

    let config_path = root.join(crate::context::CONFIG_FILE);
    if !config_path.exists() {
        let config = Config::default();
        atomic_write_file(&config_path, &config.to_yaml()?)?;
        created.push(crate::context::CONFIG_FILE.to_string());
    }

    // From here on the workspace resolves; use the config for the layout.
    let ctx = WorkspaceContext::at_root(root);
    let rt = Runtime::from_context(ctx)?;

    let documents_dir = root.join(&rt.config.documents_dir);
    for dir in [
        documents_dir.clone(),
        root.join(&rt.config.outbox_dir),
        root.join(&rt.config.fonts_dir),
        rt.ctx.state_dir.clone(),
    ] {
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                TagError::UserError(format!(
                    "failed to create directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
            created.push(format!(
                "{}/",
                dir.strip_prefix(root).unwrap_or(&dir).display()
            ));
        }
    }

    let template_path = documents_dir.join(format!("{}.txt", rt.config.template_id));
    if !template_path.exists() {
        atomic_write_file(&template_path, STARTER_TEMPLATE)?;
        created.push(
            template_path
                .strip_prefix(root)
                .unwrap_or(&template_path)
                .display()
                .to_string(),
        );
    }

    let responses_path = root.join(&rt.config.responses_file);
    if !responses_path.exists() {
        atomic_write_file(&responses_path, "[]\n")?;
        created.push(rt.config.responses_file.clone());
    }

    Ok(created)
}
