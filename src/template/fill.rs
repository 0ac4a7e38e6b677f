//! Placeholder substitution engine.
//!
//! Templates contain literal tokens of the form `%name%` (case-sensitive,
//! delimiters included). Filling processes the supplied fields in order and
//! replaces every occurrence of each field's token with its value. There is
//! no recursive substitution: a later field only sees what earlier
//! replacements left behind, and tokens without a matching field are left
//! untouched.
//!
//! Names are matched literally, with no escaping layer: a name containing
//! `%` simply produces a longer literal token.

use crate::form::Field;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[^%\n]+%").expect("placeholder token pattern is valid"));

/// The literal placeholder token for a field name.
pub fn token(name: &str) -> String {
    format!("%{}%", name)
}

/// Substitute fields into `text`, in the order given.
///
/// Each field replaces every occurrence of its `%name%` token. Duplicate
/// field names are processed independently in sequence.
pub fn fill_tokens(text: &str, fields: &[Field]) -> String {
    fields.iter().fold(text.to_string(), |acc, field| {
        acc.replace(&token(&field.name), &field.value)
    })
}

/// Token-shaped spans still present in `text`.
///
/// Used to warn about placeholders no supplied field matched. The scan is a
/// diagnostic: `%` characters introduced by field values can produce
/// false positives, which is acceptable for a warning.
pub fn unresolved_tokens(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<Field> {
        pairs
            .iter()
            .map(|(name, value)| Field::new(*name, *value))
            .collect()
    }

    #[test]
    fn substitutes_single_token() {
        let result = fill_tokens(
            "Project: %Project name%",
            &fields(&[("Project name", "Rover")]),
        );
        assert_eq!(result, "Project: Rover");
    }

    #[test]
    fn substitutes_every_occurrence_of_a_token() {
        let result = fill_tokens("%x% and %x% and %x%", &fields(&[("x", "X")]));
        assert_eq!(result, "X and X and X");
    }

    #[test]
    fn leaves_unmatched_tokens_untouched() {
        let result = fill_tokens(
            "Name: %Project name%, Team: %Team%",
            &fields(&[("Project name", "Rover")]),
        );
        assert_eq!(result, "Name: Rover, Team: %Team%");
    }

    #[test]
    fn field_without_token_changes_nothing() {
        let template = "Name: %Project name%";
        let result = fill_tokens(template, &fields(&[("Unused", "value")]));
        assert_eq!(result, template);
    }

    #[test]
    fn empty_field_list_returns_template_unchanged() {
        let template = "Name: %Project name%";
        assert_eq!(fill_tokens(template, &[]), template);
    }

    #[test]
    fn no_recursive_substitution() {
        // The first field's value reintroduces a token text; the second field,
        // processed later, does replace it. The first field never re-runs.
        let result = fill_tokens("%a%", &fields(&[("a", "%b%"), ("b", "done")]));
        assert_eq!(result, "done");

        // Reversed order: %b% is produced after b was already processed.
        let result = fill_tokens("%a%", &fields(&[("b", "done"), ("a", "%b%")]));
        assert_eq!(result, "%b%");
    }

    #[test]
    fn duplicate_names_are_processed_in_sequence() {
        // The first occurrence of the name consumes the token; the duplicate
        // finds nothing left to replace.
        let result = fill_tokens("%Name%", &fields(&[("Name", "first"), ("Name", "second")]));
        assert_eq!(result, "first");
    }

    #[test]
    fn names_with_percent_match_literally() {
        let result = fill_tokens("%a%b%", &fields(&[("a%b", "matched")]));
        assert_eq!(result, "matched");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let template = "%Email%";
        let result = fill_tokens(template, &fields(&[("email", "ada@example.com")]));
        assert_eq!(result, template);
    }

    #[test]
    fn substitutes_multiline_templates() {
        let template = "Name: %Project name%\n\nContact: %Email%\n";
        let result = fill_tokens(
            template,
            &fields(&[("Project name", "Rover"), ("Email", "ada@example.com")]),
        );
        assert_eq!(result, "Name: Rover\n\nContact: ada@example.com\n");
    }

    #[test]
    fn empty_value_removes_token() {
        let result = fill_tokens("before%x%after", &fields(&[("x", "")]));
        assert_eq!(result, "beforeafter");
    }

    #[test]
    fn token_builds_delimited_name() {
        assert_eq!(token("Edit URL"), "%Edit URL%");
    }

    #[test]
    fn unresolved_tokens_lists_leftovers() {
        let text = "Name: Rover, Team: %Team%, Contact: %Email%";
        assert_eq!(unresolved_tokens(text), vec!["%Team%", "%Email%"]);
    }

    #[test]
    fn unresolved_tokens_empty_for_fully_filled_text() {
        assert!(unresolved_tokens("Name: Rover").is_empty());
    }

    #[test]
    fn unresolved_tokens_ignores_spans_across_lines() {
        assert!(unresolved_tokens("50% off\nup to 70% off").is_empty());
    }
}
