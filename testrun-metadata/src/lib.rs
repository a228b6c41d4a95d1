// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Machine-readable formats for [testrun](https://crates.io/crates/testrun-cli).
//!
//! This crate contains the serialized forms that cross process boundaries:
//!
//! * [`OutcomeRecord`]: one line of the JSON Lines input read by `testrun report`.
//! * [`RunSummary`]: the JSON summary written by `testrun report --view json`.
//! * [`TestRunExitCode`]: documented exit codes for the `testrun` binary.

mod exit_codes;
mod records;

pub use exit_codes::*;
pub use records::*;
