// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporting of test results.
//!
//! [`Counts`] reduces run records to per-outcome totals, and [`TestReporter`] prints per-test
//! status lines and the final summary.

mod aggregator;
mod displayer;

pub use aggregator::*;
pub use displayer::*;
