// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use testrun_metadata::TestRunExitCode;
use testrun_results::errors::{ConfigParseError, ReadOutcomesError, WriteReportError};
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are mostly placeholders: errors are meant to be printed with
// display_to_stderr, which colorizes them.

/// An expected error that causes `testrun` to exit with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine the current directory")]
    CurrentDirFailed {
        #[source]
        err: std::io::Error,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("invalid link argument")]
    InvalidLink { input: String },
    #[error("failed to read outcomes")]
    ReadOutcomesFailed {
        #[from]
        err: ReadOutcomesError,
    },
    #[error("failed to write report")]
    WriteReportFailed {
        #[from]
        err: WriteReportError,
    },
    #[error("reading outcomes panicked")]
    ReaderPanicked { path: Utf8PathBuf },
    #[error("test run failed")]
    TestRunFailed,
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::ConfigParseError { .. }
            | Self::InvalidLink { .. } => TestRunExitCode::SETUP_ERROR,
            Self::ReadOutcomesFailed { .. } | Self::ReaderPanicked { .. } => {
                TestRunExitCode::INPUT_READ_FAILED
            }
            Self::WriteReportFailed { .. } => TestRunExitCode::WRITE_OUTPUT_ERROR,
            Self::TestRunFailed => TestRunExitCode::TEST_RUN_FAILED,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::CurrentDirFailed { err } => {
                tracing::error!("could not determine the current directory");
                Some(err as &dyn Error)
            }
            Self::ConfigParseError { err } => {
                tracing::error!(
                    "failed to parse testrun config at `{}`",
                    err.config_file().style(styles.bold)
                );
                err.source()
            }
            Self::InvalidLink { input } => {
                tracing::error!(
                    "invalid link `{}`: expected NAME=URL",
                    input.style(styles.bold)
                );
                None
            }
            Self::ReadOutcomesFailed { err } => {
                tracing::error!("{err}");
                err.source()
            }
            Self::WriteReportFailed { err } => {
                tracing::error!("{err}");
                err.source()
            }
            Self::ReaderPanicked { path } => {
                tracing::error!(
                    "reading outcomes from `{}` panicked",
                    path.style(styles.bold)
                );
                None
            }
            Self::TestRunFailed => {
                tracing::error!("test run failed");
                None
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: "testrun_cli::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
