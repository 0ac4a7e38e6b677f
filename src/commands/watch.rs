//! Implementation of the `formtag watch` command.
//!
//! The watch loop plays the platform dispatcher for the automatic trigger:
//! it polls the response store and, for every response that appears after
//! the loop started, fires the submit handler while the submit trigger is
//! installed. Each handled response is an independent invocation: a failing
//! delivery is reported on stderr and does not stop the loop or unregister
//! the trigger.
//!
//! Responses present when the loop starts are treated as already handled;
//! only new submissions fire the handler, and responses arriving while the
//! trigger is uninstalled are skipped for good.

use crate::cli::WatchArgs;
use crate::commands::Runtime;
use crate::error::{Result, TagError};
use crate::events::{append_event_best_effort, Event, EventAction};
use crate::form::{extract, FormResponse, ResponseStore};
use crate::mail::{Attachment, Mailer, OutgoingMail};
use crate::config::MailSettings;
use crate::template::TagFiller;
use crate::trigger::{TriggerEvent, TriggerRegistry, SUBMIT_HANDLER};
use serde_json::json;
use std::collections::HashSet;
use std::thread;
use std::time::Duration;

/// Execute the `formtag watch` command.
pub fn cmd_watch(args: WatchArgs) -> Result<()> {
    let rt = Runtime::resolve()?;

    let documents = rt.document_store();
    let responses = rt.response_store();
    let mailer = rt.mailer();
    let registry = rt.trigger_registry();
    let exporter = rt.pdf_exporter();
    let filler = TagFiller::new(
        &documents,
        &exporter,
        &rt.config.template_id,
        &rt.config.attachment_name,
    );

    // Baseline: everything already in the store has been submitted in the
    // past and is not re-delivered.
    let mut seen: HashSet<String> = responses.list()?.into_iter().map(|r| r.id).collect();

    println!(
        "Watching {} for new responses (every {} ms).",
        responses.path().display(),
        args.interval_ms
    );

    loop {
        match tick(&mut seen, &responses, &registry, &filler, &mailer, &rt.config.mail) {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    match outcome {
                        TickOutcome::Delivered { response_id, to } => {
                            append_event_best_effort(
                                &rt.ctx,
                                &Event::new(EventAction::Deliver)
                                    .with_response(response_id)
                                    .with_details(json!({ "to": to })),
                            );
                            println!("Delivered tag for response '{}' to {}.", response_id, to);
                        }
                        TickOutcome::Failed { response_id, error } => {
                            eprintln!("Error delivering response '{}': {}", response_id, error);
                        }
                        TickOutcome::Skipped { response_id } => {
                            println!(
                                "Skipped response '{}': automatic tag making is off.",
                                response_id
                            );
                        }
                    }
                }
            }
            Err(e) if args.once => return Err(e),
            Err(e) => {
                // The store or registry was unreadable this round; the next
                // poll retries with the same seen set.
                eprintln!("Warning: watch iteration failed: {}", e);
            }
        }

        if args.once {
            return Ok(());
        }
        thread::sleep(Duration::from_millis(args.interval_ms));
    }
}

/// What happened to one new response during a tick.
#[derive(Debug)]
pub(crate) enum TickOutcome {
    /// Handler ran and the mail was spooled.
    Delivered { response_id: String, to: String },
    /// Handler failed; the invocation error is surfaced, the loop goes on.
    Failed { response_id: String, error: TagError },
    /// The submit trigger was not installed when the response arrived.
    Skipped { response_id: String },
}

/// Process one poll iteration: fire the handler for every unseen response.
///
/// New responses are marked seen whether or not the trigger is installed;
/// the platform only fires triggers that exist at submission time.
pub(crate) fn tick(
    seen: &mut HashSet<String>,
    responses: &dyn ResponseStore,
    registry: &dyn TriggerRegistry,
    filler: &TagFiller<'_>,
    mailer: &dyn Mailer,
    mail_settings: &MailSettings,
) -> Result<Vec<TickOutcome>> {
    let trigger_installed = registry
        .find(TriggerEvent::FormSubmit, SUBMIT_HANDLER)?
        .is_some();

    let mut outcomes = Vec::new();
    for response in responses.list()? {
        if !seen.insert(response.id.clone()) {
            continue;
        }

        if !trigger_installed {
            outcomes.push(TickOutcome::Skipped {
                response_id: response.id,
            });
            continue;
        }

        match handle_submission(&response, filler, mailer, mail_settings) {
            Ok(to) => outcomes.push(TickOutcome::Delivered {
                response_id: response.id,
                to,
            }),
            Err(error) => outcomes.push(TickOutcome::Failed {
                response_id: response.id,
                error,
            }),
        }
    }

    Ok(outcomes)
}

/// The submit handler: extract, fill, and mail the tag for one submission.
///
/// Requires a respondent email; without one the invocation fails before any
/// artifact is produced. Returns the recipient address.
pub(crate) fn handle_submission(
    response: &FormResponse,
    filler: &TagFiller<'_>,
    mailer: &dyn Mailer,
    mail_settings: &MailSettings,
) -> Result<String> {
    let email = response
        .respondent_email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| {
            TagError::MailError(format!("no email found on response '{}'", response.id))
        })?;

    let fields = extract(response);
    let artifact = filler.fill(&fields)?;

    let mut body = mail_settings.body.clone();
    if let Some(edit_url) = &response.edit_url {
        body.push_str(&format!(
            "\n\nUse this link to modify your submission: {}",
            edit_url
        ));
    }

    mailer.send(&OutgoingMail {
        to: email.to_string(),
        sender_name: mail_settings.sender_name.clone(),
        subject: mail_settings.subject.clone(),
        body,
        attachments: vec![Attachment {
            filename: artifact.filename,
            mime_type: artifact.mime_type.to_string(),
            bytes: artifact.bytes,
        }],
    })?;

    Ok(email.to_string())
}
