// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregates test outcomes produced by many shards and reports on them.
//!
//! The `testrun` binary reads outcome records from JSON Lines files, one worker thread per file,
//! and prints the requested views of the combined results.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
