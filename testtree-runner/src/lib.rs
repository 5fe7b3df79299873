// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! An embeddable engine for defining trees of named test cases and running them.
//!
//! The basic flow of operations is:
//!
//! 1. Describe the suite as a [`Test`](test_tree::Test) tree using [`case`], [`list`] and
//!    [`labeled`].
//! 2. Flatten the tree into a [`TestList`](list::TestList) of qualified names and bodies.
//! 3. Run the list through a [`TestRunner`](runner::TestRunner), either sequentially or in
//!    parallel, producing one [`RunRecord`](outcome::RunRecord) per test.
//! 4. Reduce the records to [`Counts`](reporter::Counts), print the summary, and derive an exit
//!    code.
//!
//! [`run`](runner::run) and [`run_parallel`](runner::run_parallel) perform all of these steps with
//! the default console reporter.

pub mod classify;
pub mod config;
pub mod errors;
mod helpers;
pub mod list;
pub mod outcome;
pub mod reporter;
pub mod runner;
pub mod signal;
pub mod test_filter;
pub mod test_tree;
mod time;

pub use test_tree::{case, labeled, list};
