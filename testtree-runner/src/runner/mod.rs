// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The test runner.
//!
//! The main structure in this module is [`TestRunner`], built with a [`TestRunnerBuilder`]. The
//! runner drives the [`evaluate_test`] evaluator over a [`TestList`](crate::list::TestList) using
//! one of the [`ExecutionStrategy`](crate::config::ExecutionStrategy) values, calling
//! [`TestHooks`] as each test starts and finishes.

mod evaluator;
mod executor;
mod hooks;
mod imp;

pub use evaluator::*;
pub use hooks::*;
pub use imp::*;
