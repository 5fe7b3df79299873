// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The test tree: an immutable description of the shape of a suite.
//!
//! A tree is built out of three kinds of nodes:
//! * [`Test::Case`]: a leaf holding a test body.
//! * [`Test::List`]: an unnamed, ordered group of subtrees.
//! * [`Test::Labeled`]: a subtree with a path segment attached to it.
//!
//! Trees carry no behavior of their own. To run one, flatten it into a
//! [`TestList`](crate::list::TestList).

use debug_ignore::DebugIgnore;
use std::sync::Arc;

/// The executable part of a test case.
///
/// A body takes no arguments and returns nothing. It reports anything other than a pass by
/// panicking: see [`signal`](crate::signal) for the payloads the default classifier
/// understands.
///
/// Bodies are `Fn` rather than `FnOnce` so that a tree can be run more than once, and `Send + Sync`
/// so that the parallel strategy can call them from worker threads.
#[derive(Clone, Debug)]
pub struct TestBody(DebugIgnore<Arc<dyn Fn() + Send + Sync + 'static>>);

impl TestBody {
    /// Creates a new test body from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(DebugIgnore(Arc::new(f)))
    }

    /// Calls the body on the current thread.
    ///
    /// Panics raised by the body propagate out of this call. The evaluator is responsible for
    /// containing them.
    pub fn call(&self) {
        (self.0.0)()
    }
}

/// A node in a test tree.
#[derive(Clone, Debug)]
pub enum Test {
    /// A single test case.
    Case(TestBody),

    /// An ordered group of tests. Lists do not contribute to qualified names.
    List(Vec<Test>),

    /// A subtree with a name. The name becomes one `/`-separated segment of the qualified name of
    /// every case underneath it.
    Labeled(String, Box<Test>),
}

impl Test {
    /// Creates a test case from a closure.
    pub fn case<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::Case(TestBody::new(f))
    }

    /// Attaches a name to a subtree.
    pub fn labeled(name: impl Into<String>, test: Test) -> Self {
        Self::Labeled(name.into(), Box::new(test))
    }

    /// Groups a sequence of subtrees, preserving their order.
    pub fn list(tests: impl IntoIterator<Item = Test>) -> Self {
        Self::List(tests.into_iter().collect())
    }

    /// Returns the number of test cases in this tree.
    pub fn case_count(&self) -> usize {
        match self {
            Self::Case(_) => 1,
            Self::List(tests) => tests.iter().map(Test::case_count).sum(),
            Self::Labeled(_, test) => test.case_count(),
        }
    }

    /// Returns a new tree with the same shape and names, where every case body has been replaced
    /// by `f(body)`.
    ///
    /// This is useful for running per-test setup and teardown around every body in a subtree.
    pub fn wrap<F>(self, f: F) -> Self
    where
        F: Fn(TestBody) -> TestBody,
    {
        self.wrap_impl(&f)
    }

    fn wrap_impl(self, f: &dyn Fn(TestBody) -> TestBody) -> Self {
        match self {
            Self::Case(body) => Self::Case(f(body)),
            Self::List(tests) => Self::List(tests.into_iter().map(|t| t.wrap_impl(f)).collect()),
            Self::Labeled(name, test) => Self::Labeled(name, Box::new(test.wrap_impl(f))),
        }
    }
}

/// Creates a test case from a closure. Shorthand for [`Test::case`].
pub fn case<F>(f: F) -> Test
where
    F: Fn() + Send + Sync + 'static,
{
    Test::case(f)
}

/// Attaches a name to a subtree. Shorthand for [`Test::labeled`].
pub fn labeled(name: impl Into<String>, test: Test) -> Test {
    Test::labeled(name, test)
}

/// Groups a sequence of subtrees. Shorthand for [`Test::list`].
pub fn list(tests: impl IntoIterator<Item = Test>) -> Test {
    Test::list(tests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn case_count() {
        let tree = list([
            labeled("a", case(|| {})),
            labeled("b", list([case(|| {}), labeled("c", case(|| {}))])),
            list([]),
        ]);
        assert_eq!(tree.case_count(), 3);
    }

    #[test]
    fn wrap_runs_wrapper_around_every_body() {
        let calls = Arc::new(AtomicUsize::new(0));
        let setups = Arc::new(AtomicUsize::new(0));

        let body_calls = calls.clone();
        let tree = labeled(
            "outer",
            list([
                case({
                    let calls = body_calls.clone();
                    move || {
                        calls.fetch_add(1, Ordering::SeqCst);
                    }
                }),
                labeled(
                    "inner",
                    case(move || {
                        body_calls.fetch_add(1, Ordering::SeqCst);
                    }),
                ),
            ]),
        );

        let wrapper_setups = setups.clone();
        let wrapped = tree.wrap(|body| {
            let setups = wrapper_setups.clone();
            TestBody::new(move || {
                setups.fetch_add(1, Ordering::SeqCst);
                body.call();
            })
        });

        assert_eq!(wrapped.case_count(), 2);
        let Test::Labeled(name, inner) = &wrapped else {
            panic!("wrapping preserves the root label");
        };
        assert_eq!(name, "outer");
        let Test::List(children) = inner.as_ref() else {
            panic!("wrapping preserves lists");
        };
        for child in children {
            match child {
                Test::Case(body) => body.call(),
                Test::Labeled(name, test) => {
                    assert_eq!(name, "inner");
                    let Test::Case(body) = test.as_ref() else {
                        panic!("wrapping preserves cases");
                    };
                    body.call();
                }
                Test::List(_) => panic!("unexpected list"),
            }
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(setups.load(Ordering::SeqCst), 2);
    }
}
