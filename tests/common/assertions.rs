//! Custom assertion utilities for tests.

/// Assert that a result is Ok and return the inner value.
///
/// Panics with `context` and the error's alternate (chained) form.
#[allow(dead_code)]
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:#}", context, e),
    }
}

/// Assert that an error message (including its chain) contains expected text.
#[allow(dead_code)]
pub fn assert_error_contains(error: &anyhow::Error, expected_text: &str, context: &str) {
    let error_str = format!("{:#}", error);
    assert!(
        error_str.contains(expected_text),
        "{}: error message should contain '{}', got: {}",
        context,
        expected_text,
        error_str
    );
}
