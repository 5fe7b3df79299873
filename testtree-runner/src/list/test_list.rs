// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    test_filter::TestFilter,
    test_tree::{Test, TestBody},
};
use tracing::debug;

/// The separator between labels in a qualified name.
pub const NAME_SEPARATOR: char = '/';

/// A test tree flattened into an ordered list of named test bodies.
///
/// There is one [`TestInstance`] per [`Test::Case`] leaf that matches the filter, in
/// left-to-right tree order. The list borrows bodies from the tree it was built from.
#[derive(Clone, Debug)]
pub struct TestList<'tree> {
    tests: Vec<TestInstance<'tree>>,
    skip_count: usize,
}

impl<'tree> TestList<'tree> {
    /// Flattens a tree, keeping every test case.
    pub fn new(tree: &'tree Test) -> Self {
        Self::with_filter(tree, &TestFilter::all())
    }

    /// Flattens a tree, keeping the test cases whose qualified names match the filter.
    pub fn with_filter(tree: &'tree Test, filter: &TestFilter) -> Self {
        let mut list = Self {
            tests: Vec::new(),
            skip_count: 0,
        };
        list.flatten_impl(tree, "", filter);
        debug!(
            run_count = list.run_count(),
            skip_count = list.skip_count,
            "flattened test tree"
        );
        list
    }

    /// Returns the number of tests that will be run.
    pub fn run_count(&self) -> usize {
        self.tests.len()
    }

    /// Returns the number of test cases that were filtered out.
    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    /// Returns true if no tests will be run.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Iterates over the tests in flattened order.
    pub fn iter_tests(&self) -> impl ExactSizeIterator<Item = &TestInstance<'tree>> + '_ {
        self.tests.iter()
    }

    /// Iterates over the qualified names of the tests in flattened order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.tests.iter().map(|test| test.name.as_str())
    }

    fn flatten_impl(&mut self, test: &'tree Test, path: &str, filter: &TestFilter) {
        match test {
            Test::Case(body) => {
                if filter.is_match(path) {
                    self.tests.push(TestInstance {
                        name: path.to_owned(),
                        body,
                    });
                } else {
                    self.skip_count += 1;
                }
            }
            Test::List(tests) => {
                for test in tests {
                    self.flatten_impl(test, path, filter);
                }
            }
            Test::Labeled(label, test) => {
                let path = qualify(path, label);
                self.flatten_impl(test, &path, filter);
            }
        }
    }
}

/// A single named test body within a [`TestList`].
#[derive(Clone, Debug)]
pub struct TestInstance<'tree> {
    /// The qualified name: the labels leading to this test, joined by `/`. May be empty.
    pub name: String,

    /// The test body.
    pub body: &'tree TestBody,
}

fn qualify(parent: &str, label: &str) -> String {
    if parent.is_empty() {
        label.to_owned()
    } else {
        format!("{parent}{NAME_SEPARATOR}{label}")
    }
}
