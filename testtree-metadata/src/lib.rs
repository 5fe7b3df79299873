// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Machine-readable data for testtree runs.
//!
//! This crate holds the parts of a testtree run that are consumed outside the engine: the
//! documented process exit codes, and a serializable form of the per-outcome counts that sharded
//! runs can persist and merge later.

mod errors;
mod exit_codes;
mod summary;

pub use errors::*;
pub use exit_codes::*;
pub use summary::*;
