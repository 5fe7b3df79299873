// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{thread, time::Duration};
use testtree_runner::{
    case, labeled, list,
    signal::{fail_test, skip_test},
    test_tree::Test,
};

/// Qualified names of [`suite`], in tree order.
pub(crate) static SUITE_NAMES: &[&str] = &[
    "parser/empty",
    "parser/nested/deep",
    "parser/nested/unsupported",
    "parser/unicode",
    "codec/roundtrip",
    "codec/truncated",
    "codec/corrupt",
    "smoke",
];

/// A suite with 4 passing, 1 ignored, 2 failing and 1 erroring test.
pub(crate) fn suite() -> Test {
    list([
        labeled(
            "parser",
            list([
                labeled("empty", case(|| {})),
                labeled(
                    "nested",
                    list([
                        labeled("deep", case(|| thread::sleep(Duration::from_millis(10)))),
                        labeled("unsupported", case(|| skip_test("needs a newer grammar"))),
                    ]),
                ),
                labeled("unicode", case(|| fail_test("expected 'é', found 'e'"))),
            ]),
        ),
        labeled(
            "codec",
            list([
                labeled("roundtrip", case(|| {})),
                labeled("truncated", case(|| fail_test("unexpected end of input"))),
                labeled("corrupt", case(|| panic!("index out of bounds"))),
            ]),
        ),
        labeled("smoke", case(|| {})),
    ])
}
