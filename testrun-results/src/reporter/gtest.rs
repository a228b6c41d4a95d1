// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::helpers::Styles;
use crate::{
    helpers::plural,
    outcome::OutcomeKind,
    result_set::{KindCounts, ResultSnapshot},
};
use owo_colors::OwoColorize;
use std::fmt;

static RAN_BANNER: &str = "[==========]";
static PASSED_BANNER: &str = "[  PASSED  ]";
static SKIPPED_BANNER: &str = "[  SKIPPED ]";
static FAILED_BANNER: &str = "[  FAILED  ]";

/// A gtest-style summary of a run.
///
/// ```text
/// [==========] 3 tests ran.
/// [  PASSED  ] 1 test.
/// [  SKIPPED ] Skipped 1 test, listed below:
/// [  SKIPPED ] t3
/// [  FAILED  ] 1 test, listed below:
/// [  FAILED  ] t1
///
/// 1 FAILED TEST
/// ```
///
/// Crashed, timed out and unknown tests are listed as failures with a `(CRASHED)`, `(TIMEOUT)` or
/// `(UNKNOWN)` suffix. Tests that did not run are only counted in the total.
#[derive(Clone, Copy, Debug)]
pub struct GtestSummary<'a> {
    snapshot: &'a ResultSnapshot,
    styles: &'a Styles,
}

impl<'a> GtestSummary<'a> {
    /// Creates a new summary over `snapshot`.
    pub fn new(snapshot: &'a ResultSnapshot, styles: &'a Styles) -> Self {
        Self { snapshot, styles }
    }

    fn write_failures(&self, f: &mut fmt::Formatter<'_>, counts: &KindCounts) -> fmt::Result {
        let failed_count = [
            OutcomeKind::Fail,
            OutcomeKind::Crash,
            OutcomeKind::Timeout,
            OutcomeKind::Unknown,
        ]
        .into_iter()
        .map(|kind| counts.get(kind))
        .sum::<usize>();
        if failed_count == 0 {
            return Ok(());
        }

        let banner = FAILED_BANNER.style(self.styles.fail);
        write!(
            f,
            "\n{banner} {} {}, listed below:",
            failed_count.style(self.styles.count),
            plural::tests_str(failed_count),
        )?;
        for (kind, suffix) in [
            (OutcomeKind::Fail, ""),
            (OutcomeKind::Crash, " (CRASHED)"),
            (OutcomeKind::Timeout, " (TIMEOUT)"),
            (OutcomeKind::Unknown, " (UNKNOWN)"),
        ] {
            for identity in self.snapshot.by_kind(kind).identities() {
                write!(f, "\n{banner} {identity}{suffix}")?;
            }
        }
        write!(
            f,
            "\n\n{} {}",
            failed_count.style(self.styles.fail),
            plural::failed_tests_str(failed_count).style(self.styles.fail),
        )
    }
}

impl fmt::Display for GtestSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.snapshot.counts();
        let total = counts.total();
        let passed = counts.get(OutcomeKind::Pass);
        let skipped = counts.get(OutcomeKind::Skip);

        write!(
            f,
            "{} {} {} ran.",
            RAN_BANNER.style(self.styles.banner),
            total.style(self.styles.count),
            plural::tests_str(total),
        )?;
        write!(
            f,
            "\n{} {} {}.",
            PASSED_BANNER.style(self.styles.pass),
            passed.style(self.styles.count),
            plural::tests_str(passed),
        )?;

        if skipped > 0 {
            let banner = SKIPPED_BANNER.style(self.styles.skip);
            write!(
                f,
                "\n{banner} Skipped {} {}, listed below:",
                skipped.style(self.styles.count),
                plural::tests_str(skipped),
            )?;
            for identity in self.snapshot.by_kind(OutcomeKind::Skip).identities() {
                write!(f, "\n{banner} {identity}")?;
            }
        }

        self.write_failures(f, &counts)
    }
}
