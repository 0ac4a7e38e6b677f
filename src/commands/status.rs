//! Implementation of the `formtag status` command.
//!
//! Read-only summary of the workspace: whether automatic tag making is on,
//! how many responses the store holds, and whether the configured template
//! resolves. Never mutates anything.

use crate::commands::Runtime;
use crate::error::Result;
use crate::form::ResponseStore;
use crate::store::DocumentStore;
use crate::trigger::{TriggerEvent, TriggerRegistry, SUBMIT_HANDLER};

/// Execute the `formtag status` command.
pub fn cmd_status() -> Result<()> {
    let rt = Runtime::resolve()?;
    let report = collect(&rt)?;

    println!("Workspace:          {}", rt.ctx.root.display());
    println!(
        "Automatic tagging:  {}",
        if report.trigger_installed { "on" } else { "off" }
    );
    if report.trigger_count > 1 {
        println!(
            "Note: {} submit triggers are installed; `formtag unconfigure` removes one at a time.",
            report.trigger_count
        );
    }
    match report.response_count {
        Some(count) => println!("Responses:          {}", count),
        None => println!("Responses:          store unreadable"),
    }
    match &report.template_error {
        None => println!("Template:           '{}' resolves", rt.config.template_id),
        Some(e) => println!("Template:           {}", e),
    }

    Ok(())
}

/// Gathered status facts, separated from printing.
pub(crate) struct StatusReport {
    pub trigger_installed: bool,
    pub trigger_count: usize,
    pub response_count: Option<usize>,
    pub template_error: Option<String>,
}

/// Collect the status facts for a workspace.
pub(crate) fn collect(rt: &Runtime) -> Result<StatusReport> {
    let registry = rt.trigger_registry();
    let trigger_installed = registry
        .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)?
        .is_some();
    let trigger_count = registry
        .list()?
        .iter()
        .filter(|t| t.event == TriggerEvent::FormSubmit && t.handler == SUBMIT_HANDLER)
        .count();

    let response_count = rt.response_store().list().ok().map(|r| r.len());
    let template_error = rt
        .document_store()
        .load(&rt.config.template_id)
        .err()
        .map(|e| e.to_string());

    Ok(StatusReport {
        trigger_installed,
        trigger_count,
        response_count,
        template_error,
    })
}
