// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of result snapshots.
//!
//! Every view is a pure function of a [`ResultSnapshot`](crate::result_set::ResultSnapshot):
//!
//! * [`LogsView`]: logs of every test that didn't pass.
//! * [`GtestSummary`]: a gtest-style pass/fail summary.
//! * [`Tally`]: a single line of per-kind counts.
//! * [`junit`]: a JUnit XML report.
//! * [`run_summary`]: a machine-readable [`RunSummary`](testrun_metadata::RunSummary).

mod gtest;
mod helpers;
pub mod junit;
mod logs;
mod summary;
mod tally;
mod write;

pub use gtest::GtestSummary;
pub use helpers::Styles;
pub use logs::LogsView;
pub use summary::run_summary;
pub use tally::{Tally, DEFAULT_TALLY_COLUMN_WIDTH};
pub use write::ReportWriter;
