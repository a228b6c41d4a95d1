// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{outcome::OutcomeKind, result_set::ResultSnapshot};
use std::fmt;

/// Logs of every test that didn't pass.
///
/// For each kind other than `PASS`, in canonical order, and each test of that kind in identity
/// order, a test with a non-empty log produces a `[KIND] identity:` header line followed by the
/// log text. Entries are separated by newlines, with no trailing newline.
///
/// `NOTRUN` outcomes are included: a test that didn't run but still left a log shows it here.
#[derive(Clone, Copy, Debug)]
pub struct LogsView<'a> {
    snapshot: &'a ResultSnapshot,
}

impl<'a> LogsView<'a> {
    /// Creates a new logs view over `snapshot`.
    pub fn new(snapshot: &'a ResultSnapshot) -> Self {
        Self { snapshot }
    }
}

impl fmt::Display for LogsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in OutcomeKind::ALL {
            if kind == OutcomeKind::Pass {
                continue;
            }
            for outcome in self.snapshot.by_kind(kind).iter() {
                if outcome.log().is_empty() {
                    continue;
                }
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "[{kind}] {}:\n{}", outcome.identity(), outcome.log())?;
            }
        }
        Ok(())
    }
}
