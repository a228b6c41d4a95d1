// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Aggregation and reporting of test outcomes.
//!
//! Test-execution workers build [`TestOutcome`](outcome::TestOutcome) values and submit them to a
//! shared [`ResultSet`](result_set::ResultSet). At any point, a consumer can take a
//! [`ResultSnapshot`](result_set::ResultSnapshot) and render it with the views in [`reporter`].
//!
//! A `ResultSet` holds at most one outcome per test identity: a later submission for the same
//! identity replaces the earlier one.

pub mod config;
pub mod errors;
mod helpers;
pub mod ingest;
pub mod outcome;
pub mod reporter;
pub mod result_set;
