//! Implementation of the `formtag generate` command (manual run).
//!
//! Regenerates the tag artifact for a single past response. The response is
//! selected by its 1-based position in the store; the number comes from the
//! command line or, interactively, from a prompt. Bad input aborts cleanly
//! with a user error: no artifact is created, nothing fatal escapes.
//!
//! The generated PDF is written as a transient file (parked in the document
//! trash, still addressable) and its path is printed for viewing.

use crate::cli::GenerateArgs;
use crate::commands::Runtime;
use crate::error::{Result, TagError};
use crate::events::{append_event_best_effort, Event, EventAction};
use crate::form::{extract, FormResponse, ResponseStore};
use crate::store::DocumentStore;
use crate::template::TagFiller;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Execute the `formtag generate` command.
pub fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let rt = Runtime::resolve()?;

    let input = match args.response {
        Some(input) => input,
        None => match prompt_response_number()? {
            Some(input) => input,
            // Cancelled: abort silently, like dismissing the prompt.
            None => return Ok(()),
        },
    };

    let documents = rt.document_store();
    let responses = rt.response_store();
    let exporter = rt.pdf_exporter();
    let filler = TagFiller::new(
        &documents,
        &exporter,
        &rt.config.template_id,
        &rt.config.attachment_name,
    );

    let (response, path) = run(input.trim(), &responses, &filler, &documents)?;

    append_event_best_effort(
        &rt.ctx,
        &Event::new(EventAction::Generate)
            .with_response(&response.id)
            .with_details(json!({ "artifact": path.display().to_string() })),
    );

    println!("View the tag at: {}", path.display());
    Ok(())
}

/// Resolve the input to a response, fill the template, and park the artifact.
///
/// Returns the selected response and the transient artifact path.
fn run(
    input: &str,
    responses: &dyn ResponseStore,
    filler: &TagFiller<'_>,
    documents: &dyn DocumentStore,
) -> Result<(FormResponse, PathBuf)> {
    let number: usize = input
        .parse()
        .map_err(|_| TagError::UserError(format!("that's not a number: '{}'", input)))?;

    let all = responses.list()?;
    // 1-based selection; 0 underflows the checked subtraction below.
    let response = number
        .checked_sub(1)
        .and_then(|index| all.into_iter().nth(index))
        .ok_or_else(|| TagError::UserError(format!("can't find response {}", number)))?;

    let fields = extract(&response);
    let artifact = filler.fill(&fields)?;
    let path = documents.create_transient(&artifact.filename, &artifact.bytes)?;

    Ok((response, path))
}

/// Prompt for the 1-based response number on stdin.
///
/// Returns `None` when the user cancels with empty input.
fn prompt_response_number() -> Result<Option<String>> {
    print!("Enter the response number (empty input cancels): ");
    io::stdout()
        .flush()
        .map_err(|e| TagError::UserError(format!("failed to flush stdout: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| TagError::UserError(format!("failed to read from stdin: {}", e)))?;

    let line = line.trim();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
