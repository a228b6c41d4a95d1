// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code to generate JUnit XML reports from result snapshots.

use crate::{
    config::JunitConfig,
    outcome::{OutcomeKind, TestOutcome},
    result_set::ResultSnapshot,
};
use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};

static NOT_RUN_MESSAGE: &str = "not run";

/// Builds a JUnit report containing a single test suite with one test case per outcome.
///
/// Test cases appear in identity order. Run-level links become properties of the suite, and
/// per-test links become properties of the test case.
pub fn to_junit_report(snapshot: &ResultSnapshot, config: &JunitConfig) -> Report {
    let mut test_suite = TestSuite::new(config.report_name());
    for (name, url) in snapshot.links() {
        test_suite.add_property((format!("link:{name}"), url.clone()));
    }
    for outcome in snapshot {
        test_suite.add_test_case(to_test_case(outcome, config.store_logs()));
    }

    let mut report = Report::new(config.report_name());
    report.add_test_suite(test_suite);
    report
}

fn to_test_case(outcome: &TestOutcome, store_logs: bool) -> TestCase {
    let status = match outcome.kind() {
        OutcomeKind::Pass => TestCaseStatus::success(),
        OutcomeKind::Skip => TestCaseStatus::skipped(),
        OutcomeKind::NotRun => {
            let mut status = TestCaseStatus::skipped();
            status.set_message(NOT_RUN_MESSAGE);
            status
        }
        OutcomeKind::Fail => TestCaseStatus::non_success(NonSuccessKind::Failure),
        kind @ (OutcomeKind::Crash | OutcomeKind::Timeout | OutcomeKind::Unknown) => {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Error);
            status.set_type(kind.as_str().to_ascii_lowercase());
            status
        }
    };

    let mut test_case = TestCase::new(outcome.identity().as_str(), status);
    test_case.set_time(outcome.duration());
    if store_logs && !outcome.log().is_empty() {
        test_case.set_system_out(outcome.log());
    }
    for (name, url) in outcome.links() {
        test_case.add_property((format!("link:{name}"), url.clone()));
    }
    test_case
}
