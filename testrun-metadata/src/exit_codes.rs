// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `testrun` failures.
///
/// A `testrun report` invocation may fail for a variety of reasons. This structure documents the
/// exit codes that may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum TestRunExitCode {}

impl TestRunExitCode {
    /// No errors occurred and every aggregated test passed or was skipped.
    pub const OK: i32 = 0;

    /// One or more aggregated tests failed, crashed, timed out, had an unknown result, or did not
    /// run.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// Reading or parsing an outcome input file produced an error.
    pub const INPUT_READ_FAILED: i32 = 104;

    /// Writing data to stdout, stderr or a report file produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// A user issue happened while setting up a testrun invocation, e.g. an invalid config file.
    pub const SETUP_ERROR: i32 = 96;
}
