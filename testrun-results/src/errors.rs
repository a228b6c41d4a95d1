// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by testrun-results.

use crate::outcome::OutcomeKind;
use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use std::io;
use thiserror::Error;

/// An outcome was constructed or updated with invalid data.
///
/// This is a contract violation by the caller: the input must be fixed before retrying.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum InvalidOutcome {
    /// The test identity was empty.
    #[error("test identity must not be empty")]
    EmptyIdentity,

    /// The outcome kind was not one of the known kinds.
    #[error(
        "unrecognized outcome kind: {input}\n(known kinds: {})",
        OutcomeKind::variants().join(", "),
    )]
    UnknownKind {
        /// The input that failed to parse.
        input: String,
    },
}

impl InvalidOutcome {
    pub(crate) fn unknown_kind(input: impl Into<String>) -> Self {
        Self::UnknownKind {
            input: input.into(),
        }
    }
}

/// A value that is not a [`ResultSet`](crate::result_set::ResultSet) was passed to
/// [`ResultSet::try_merge`](crate::result_set::ResultSet::try_merge).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("expected {expected} to merge, found {found}")]
pub struct TypeMismatch {
    expected: &'static str,
    found: &'static str,
}

impl TypeMismatch {
    pub(crate) fn new<T: ?Sized>() -> Self {
        Self {
            expected: std::any::type_name::<crate::result_set::ResultSet>(),
            found: std::any::type_name::<T>(),
        }
    }

    /// Returns the name of the type that was passed in.
    pub fn found(&self) -> &'static str {
        self.found
    }
}

/// An error that occurred while parsing the report config.
#[derive(Debug, Error)]
#[error("failed to parse testrun config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    err: ConfigError,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, err: ConfigError) -> Self {
        Self {
            config_file: config_file.into(),
            err,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }
}

/// An error that occurred while reading outcome records from a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadOutcomesError {
    /// The file could not be read.
    #[error("error reading outcomes from `{path}`")]
    Read {
        /// The path that was being read.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        err: io::Error,
    },

    /// A line could not be parsed as an outcome record.
    #[error("error parsing outcome record at `{path}` line {line}")]
    Parse {
        /// The path that was being read.
        path: Utf8PathBuf,

        /// The 1-based line number.
        line: usize,

        /// The underlying error.
        #[source]
        err: serde_json::Error,
    },

    /// A record was well-formed JSON, but described an invalid outcome.
    #[error("invalid outcome record at `{path}` line {line}")]
    Invalid {
        /// The path that was being read.
        path: Utf8PathBuf,

        /// The 1-based line number.
        line: usize,

        /// The underlying error.
        #[source]
        err: InvalidOutcome,
    },
}

/// An error that occurred while writing a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// An I/O error occurred.
    #[error("error writing report")]
    Io(#[from] io::Error),

    /// A report file could not be created.
    #[error("error creating report file at `{path}`")]
    CreateFile {
        /// The path to the file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        err: io::Error,
    },

    /// The JUnit report could not be serialized.
    #[error("error serializing JUnit report")]
    Junit(#[from] quick_junit::SerializeError),

    /// The JSON summary could not be serialized.
    #[error("error serializing JSON summary")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_kind_lists_known_kinds() {
        let err = InvalidOutcome::unknown_kind("FLAKY");
        assert_eq!(
            err.to_string(),
            "unrecognized outcome kind: FLAKY\n\
             (known kinds: PASS, SKIP, FAIL, CRASH, TIMEOUT, UNKNOWN, NOTRUN)"
        );
    }
}
