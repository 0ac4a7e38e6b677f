//! Implementation of `formtag configure` and `formtag unconfigure`.
//!
//! `configure` installs the form-submit trigger bound to the delivery
//! handler. It performs no duplicate check, so configuring twice records two
//! triggers; that is the documented behavior, not corrected here.
//!
//! `unconfigure` looks up the first trigger matching the submit event and
//! the fixed handler id and removes it. With no match it fails fatally.

use crate::commands::Runtime;
use crate::error::{Result, TagError};
use crate::events::{append_event_best_effort, Event, EventAction};
use crate::trigger::{TriggerEvent, TriggerRecord, TriggerRegistry, SUBMIT_HANDLER};
use serde_json::json;

/// Execute the `formtag configure` command.
pub fn cmd_configure() -> Result<()> {
    let rt = Runtime::resolve()?;
    let registry = rt.trigger_registry();

    let record = configure_trigger(&registry)?;

    append_event_best_effort(
        &rt.ctx,
        &Event::new(EventAction::Configure)
            .with_details(json!({ "trigger": record.id, "handler": record.handler })),
    );

    println!("Automatic tag making is on ({}).", record.id);
    println!("Run `formtag watch` to dispatch tags for incoming responses.");
    Ok(())
}

/// Execute the `formtag unconfigure` command.
pub fn cmd_unconfigure() -> Result<()> {
    let rt = Runtime::resolve()?;
    let registry = rt.trigger_registry();

    let record = unconfigure_trigger(&registry)?;

    append_event_best_effort(
        &rt.ctx,
        &Event::new(EventAction::Unconfigure).with_details(json!({ "trigger": record.id })),
    );

    println!("Automatic tag making is off ({} removed).", record.id);
    Ok(())
}

/// Install the submit trigger. No duplicate check by design.
pub(crate) fn configure_trigger(registry: &dyn TriggerRegistry) -> Result<TriggerRecord> {
    registry.install(TriggerEvent::FormSubmit, SUBMIT_HANDLER)
}

/// Remove the first matching submit trigger, failing when none exists.
pub(crate) fn unconfigure_trigger(registry: &dyn TriggerRegistry) -> Result<TriggerRecord> {
    let record = registry
        .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)?
        .ok_or_else(|| {
            TagError::TriggerError(
                "no trigger found: automatic tag making is not configured".to_string(),
            )
        })?;

    registry.remove(&record.id)?;
    Ok(record)
}
