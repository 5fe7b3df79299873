// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtering tests by qualified name.
//!
//! Patterns are collected in [`TestFilterPatterns`] and compiled into a [`TestFilter`]. A test is
//! run if it matches any include pattern (or no include patterns were given) and matches no skip
//! pattern.

use crate::errors::TestFilterBuildError;
use aho_corasick::AhoCorasick;
use std::collections::BTreeSet;

/// How a pattern is compared against a qualified test name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameMatch {
    /// The pattern occurs anywhere in the name.
    Substring,

    /// The pattern is the whole name.
    Exact,
}

/// Include and skip patterns for a [`TestFilter`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TestFilterPatterns {
    include: PatternSet,
    skip: PatternSet,
}

impl TestFilterPatterns {
    /// Creates patterns that include tests matching any of these substrings.
    ///
    /// With no substrings, every test is included.
    pub fn new(substring_patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut patterns = Self::default();
        for pattern in substring_patterns {
            patterns.include(pattern, NameMatch::Substring);
        }
        patterns
    }

    /// Adds a pattern for tests to run. Once any include pattern is added, tests that match
    /// none of them are filtered out.
    pub fn include(&mut self, pattern: impl Into<String>, name_match: NameMatch) -> &mut Self {
        self.include.insert(pattern.into(), name_match);
        self
    }

    /// Adds a pattern for tests to filter out. Skip patterns take precedence over include
    /// patterns.
    pub fn skip(&mut self, pattern: impl Into<String>, name_match: NameMatch) -> &mut Self {
        self.skip.insert(pattern.into(), name_match);
        self
    }

    /// Compiles these patterns into a [`TestFilter`].
    pub fn build(&self) -> Result<TestFilter, TestFilterBuildError> {
        Ok(TestFilter {
            include: self.include.compile()?,
            skip: self.skip.compile()?,
        })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct PatternSet {
    substrings: Vec<String>,
    exact: BTreeSet<String>,
}

impl PatternSet {
    fn insert(&mut self, pattern: String, name_match: NameMatch) {
        match name_match {
            NameMatch::Substring => self.substrings.push(pattern),
            NameMatch::Exact => {
                self.exact.insert(pattern);
            }
        }
    }

    fn compile(&self) -> Result<Option<CompiledPatternSet>, TestFilterBuildError> {
        if self.substrings.is_empty() && self.exact.is_empty() {
            return Ok(None);
        }
        let substrings = if self.substrings.is_empty() {
            None
        } else {
            Some(AhoCorasick::new(&self.substrings)?)
        };
        Ok(Some(CompiledPatternSet {
            substrings,
            exact: self.exact.clone(),
        }))
    }
}

/// A compiled filter over qualified test names.
#[derive(Clone, Debug, Default)]
pub struct TestFilter {
    // None means "every test".
    include: Option<CompiledPatternSet>,
    // None means "no test".
    skip: Option<CompiledPatternSet>,
}

impl TestFilter {
    /// Returns a filter that matches every test.
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns true if the test with this qualified name should be run.
    pub fn is_match(&self, name: &str) -> bool {
        if self.skip.as_ref().is_some_and(|skip| skip.is_match(name)) {
            return false;
        }
        self.include
            .as_ref()
            .is_none_or(|include| include.is_match(name))
    }
}

#[derive(Clone, Debug)]
struct CompiledPatternSet {
    substrings: Option<AhoCorasick>,
    exact: BTreeSet<String>,
}

impl CompiledPatternSet {
    fn is_match(&self, name: &str) -> bool {
        self.exact.contains(name)
            || self
                .substrings
                .as_ref()
                .is_some_and(|matcher| matcher.is_match(name))
    }
}
