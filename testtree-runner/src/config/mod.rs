// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for testtree.
//!
//! Configuration is read from TOML and organized into named profiles. The main structure in this
//! module is [`TestTreeConfig`], from which a [`TestTreeProfile`] can be obtained.

mod imp;
mod strategy;
mod test_threads;

pub use imp::*;
pub use strategy::*;
pub use test_threads::*;
