//! Exit code constants for the edict CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or malformed input, bad config)
//! - 2: Definition failure (key collisions, unknown or cyclic library includes)
//! - 3: Lint failure (unresolved store references)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, invalid YAML or config.
pub const USER_ERROR: i32 = 1;

/// Definition failure: error-level diagnostics collected while building a compile unit.
pub const DEFINITION_FAILURE: i32 = 2;

/// Lint failure: unresolved store references where the config forbids them.
pub const LINT_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, DEFINITION_FAILURE, LINT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
