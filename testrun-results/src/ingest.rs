// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading outcomes from JSON Lines files.
//!
//! Each non-blank line is an [`OutcomeRecord`]. Records are validated while being converted into
//! [`TestOutcome`]s, and the first invalid line aborts reading the file.

use crate::{errors::ReadOutcomesError, outcome::TestOutcome};
use camino::Utf8Path;
use std::{
    fs::File,
    io::{BufRead, BufReader},
};
use testrun_metadata::OutcomeRecord;
use tracing::debug;

/// Reads every outcome from the file at `path`.
pub fn read_outcomes(path: &Utf8Path) -> Result<Vec<TestOutcome>, ReadOutcomesError> {
    let f = File::open(path).map_err(|err| ReadOutcomesError::Read {
        path: path.to_owned(),
        err,
    })?;
    let outcomes = parse_outcomes(BufReader::new(f), path)?;
    debug!(%path, count = outcomes.len(), "read outcomes");
    Ok(outcomes)
}

/// Parses outcomes from `reader`. `path` is only used for error reporting.
pub fn parse_outcomes(
    reader: impl BufRead,
    path: &Utf8Path,
) -> Result<Vec<TestOutcome>, ReadOutcomesError> {
    let mut outcomes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|err| ReadOutcomesError::Read {
            path: path.to_owned(),
            err,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record: OutcomeRecord =
            serde_json::from_str(&line).map_err(|err| ReadOutcomesError::Parse {
                path: path.to_owned(),
                line: line_number,
                err,
            })?;
        let outcome = TestOutcome::try_from(record).map_err(|err| ReadOutcomesError::Invalid {
            path: path.to_owned(),
            line: line_number,
            err,
        })?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
