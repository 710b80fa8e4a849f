//! Small assertion helpers shared across integration tests.

/// Assert that `haystack` contains `needle`, with a readable failure.
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "expected to find {needle:?} in:\n{haystack}"
    );
}
