// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for testrun-results.

/// Utilities for pluralizing various words based on count.
pub(crate) mod plural {
    /// Returns "test" if `count` is 1, otherwise "tests".
    pub(crate) fn tests_str(count: usize) -> &'static str {
        if count == 1 { "test" } else { "tests" }
    }

    /// Returns "FAILED TEST" if `count` is 1, otherwise "FAILED TESTS".
    pub(crate) fn failed_tests_str(count: usize) -> &'static str {
        if count == 1 {
            "FAILED TEST"
        } else {
            "FAILED TESTS"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::plural::*;
    use test_case::test_case;

    #[test_case(0, "tests", "FAILED TESTS" ; "zero is plural")]
    #[test_case(1, "test", "FAILED TEST" ; "one is singular")]
    #[test_case(2, "tests", "FAILED TESTS" ; "two is plural")]
    fn pluralization(count: usize, tests: &str, failed: &str) {
        assert_eq!(tests_str(count), tests);
        assert_eq!(failed_tests_str(count), failed);
    }
}
