// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattening test trees into lists of test instances.
//!
//! The main data structure in this module is [`TestList`].

mod test_list;

pub use test_list::*;
