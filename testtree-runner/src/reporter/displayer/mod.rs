// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console output for test runs.

mod duration;
mod imp;
mod status_level;

pub(crate) use duration::*;
pub use imp::*;
pub use status_level::*;
