// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::result_set::ResultSnapshot;
use std::fmt;

/// The default column width for [`Tally`].
pub const DEFAULT_TALLY_COLUMN_WIDTH: usize = 15;

/// A compact, single-line tally of a run.
///
/// Contains `ALL: <total>` followed by `<KIND>: <count>` for every kind in canonical order, each
/// field left-justified to the column width. Fields longer than the column width aren't truncated.
#[derive(Clone, Copy, Debug)]
pub struct Tally<'a> {
    snapshot: &'a ResultSnapshot,
    column_width: usize,
}

impl<'a> Tally<'a> {
    /// Creates a new tally over `snapshot` with the default column width.
    pub fn new(snapshot: &'a ResultSnapshot) -> Self {
        Self {
            snapshot,
            column_width: DEFAULT_TALLY_COLUMN_WIDTH,
        }
    }

    /// Sets the column width.
    pub fn with_column_width(mut self, column_width: usize) -> Self {
        self.column_width = column_width;
        self
    }
}

impl fmt::Display for Tally<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.snapshot.counts();
        let width = self.column_width;

        // Format each field into a buffer first: padding applies to the whole field.
        write!(f, "{:<width$}", format!("ALL: {}", counts.total()))?;
        for (kind, count) in counts.iter() {
            write!(f, "{:<width$}", format!("{kind}: {count}"))?;
        }
        Ok(())
    }
}
