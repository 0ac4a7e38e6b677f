//! Exit code constants for the formtag CLI.
//!
//! - 0: Success
//! - 1: User error (bad input, uninitialized workspace)
//! - 2: Configuration failure (unresolvable template, invalid config)
//! - 3: Export failure (document I/O, PDF rendering)
//! - 4: Mail failure (missing respondent email, outbox write)
//! - 5: Trigger failure (no matching trigger to remove)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid prompt input, or uninitialized workspace.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: template id does not resolve or config is invalid.
pub const CONFIG_FAILURE: i32 = 2;

/// Export failure: template fill, document store I/O, or PDF rendering errors.
pub const EXPORT_FAILURE: i32 = 3;

/// Mail failure: missing respondent email or outbox delivery errors.
pub const MAIL_FAILURE: i32 = 4;

/// Trigger failure: no matching submit trigger found in the registry.
pub const TRIGGER_FAILURE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            CONFIG_FAILURE,
            EXPORT_FAILURE,
            MAIL_FAILURE,
            TRIGGER_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_match_error_classes() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(CONFIG_FAILURE, 2);
        assert_eq!(EXPORT_FAILURE, 3);
        assert_eq!(MAIL_FAILURE, 4);
        assert_eq!(TRIGGER_FAILURE, 5);
    }
}
