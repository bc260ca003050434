//! Assertion helpers for common test patterns.

#![allow(dead_code)]

use fixture_rig::Result;

/// Asserts that the result failed with an error message containing the
/// expected substring.
pub fn assert_error_contains<T>(result: Result<T>, expected_substring: &str) {
    match result {
        Ok(_) => panic!("Expected operation to fail, but it succeeded"),
        Err(error) => {
            let message = error.to_string();
            assert!(
                message.contains(expected_substring),
                "Expected error message to contain '{}', but got: {}",
                expected_substring,
                message
            );
        }
    }
}
