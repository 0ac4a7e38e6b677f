//! Field extraction: turning a form response into substitution fields.
//!
//! Extraction is a pure function over a response. Fields come out in
//! insertion order: one per answered item (form item order), then the
//! synthesized `Email` and `Edit URL` fields when the response carries them.
//! Duplicate names are allowed; the filler processes each field in sequence.

use crate::form::response::FormResponse;

/// Name of the synthesized respondent-email field.
pub const EMAIL_FIELD: &str = "Email";

/// Name of the synthesized edit-link field.
pub const EDIT_URL_FIELD: &str = "Edit URL";

/// A (name, value) text pair used as a substitution unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Placeholder name; matched literally as `%name%` in templates.
    pub name: String,

    /// Replacement text.
    pub value: String,
}

impl Field {
    /// Create a field from name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Extract the ordered field sequence from a response.
///
/// Emits one field per answered item (question title as name, coerced answer
/// text as value), then appends `Email` and `Edit URL` fields when present.
/// Absent optional fields are omitted, not defaulted.
pub fn extract(response: &FormResponse) -> Vec<Field> {
    let mut fields: Vec<Field> = response
        .items
        .iter()
        .map(|item| Field::new(item.title.clone(), item.answer.coerce()))
        .collect();

    if let Some(email) = &response.respondent_email {
        fields.push(Field::new(EMAIL_FIELD, email.clone()));
    }

    if let Some(edit_url) = &response.edit_url {
        fields.push(Field::new(EDIT_URL_FIELD, edit_url.clone()));
    }

    fields
}
