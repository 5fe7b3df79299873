// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::signal::Signal;
use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

/// Observer hooks called while tests are evaluated.
///
/// For every test, [`before_run`](Self::before_run) is called first, followed by exactly one of
/// the four outcome hooks.
///
/// Hooks take `&mut self` and are never called concurrently by the runner: the parallel strategy
/// wraps them in [`SynchronizedHooks`], which serializes calls from its workers.
pub trait TestHooks {
    /// Called before the test body starts. Not included in the test's elapsed time.
    fn before_run(&mut self, name: &str) {
        let _ = name;
    }

    /// Called after a test passed.
    fn on_passed(&mut self, name: &str, elapsed: Duration) {
        let _ = (name, elapsed);
    }

    /// Called after a test marked itself as ignored.
    fn on_ignored(&mut self, name: &str, reason: &str) {
        let _ = (name, reason);
    }

    /// Called after a test failed with a recognized assertion failure.
    fn on_failed(&mut self, name: &str, message: &str, elapsed: Duration) {
        let _ = (name, message, elapsed);
    }

    /// Called after a test terminated with an unexpected signal.
    fn on_exception(&mut self, name: &str, cause: &Signal, elapsed: Duration) {
        let _ = (name, cause, elapsed);
    }
}

impl<H: TestHooks + ?Sized> TestHooks for &mut H {
    fn before_run(&mut self, name: &str) {
        (**self).before_run(name)
    }

    fn on_passed(&mut self, name: &str, elapsed: Duration) {
        (**self).on_passed(name, elapsed)
    }

    fn on_ignored(&mut self, name: &str, reason: &str) {
        (**self).on_ignored(name, reason)
    }

    fn on_failed(&mut self, name: &str, message: &str, elapsed: Duration) {
        (**self).on_failed(name, message, elapsed)
    }

    fn on_exception(&mut self, name: &str, cause: &Signal, elapsed: Duration) {
        (**self).on_exception(name, cause, elapsed)
    }
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl TestHooks for NoopHooks {}

/// Hooks shared between concurrent workers.
///
/// Each hook call takes a mutex for the duration of that call only, so output written by one call
/// is never interleaved with output from another. Test bodies run without the lock held.
///
/// Workers use `&SynchronizedHooks<H>`, which implements [`TestHooks`].
#[derive(Debug)]
pub struct SynchronizedHooks<H> {
    inner: Mutex<H>,
}

impl<H: TestHooks> SynchronizedHooks<H> {
    /// Wraps a set of hooks.
    pub fn new(hooks: H) -> Self {
        Self {
            inner: Mutex::new(hooks),
        }
    }

    /// Returns the wrapped hooks.
    pub fn into_inner(self) -> H {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, H> {
        // A poisoned lock means a hook panicked on another worker. That panic resurfaces when the
        // worker pool joins.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H: TestHooks> TestHooks for &SynchronizedHooks<H> {
    fn before_run(&mut self, name: &str) {
        self.lock().before_run(name)
    }

    fn on_passed(&mut self, name: &str, elapsed: Duration) {
        self.lock().on_passed(name, elapsed)
    }

    fn on_ignored(&mut self, name: &str, reason: &str) {
        self.lock().on_ignored(name, reason)
    }

    fn on_failed(&mut self, name: &str, message: &str, elapsed: Duration) {
        self.lock().on_failed(name, message, elapsed)
    }

    fn on_exception(&mut self, name: &str, cause: &Signal, elapsed: Duration) {
        self.lock().on_exception(name, cause, elapsed)
    }
}

/// Hooks that record every call, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHooks {
    pub(crate) calls: Vec<HookCall>,
}

#[cfg(test)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum HookCall {
    BeforeRun(String),
    Passed(String),
    Ignored(String, String),
    Failed(String, String),
    Exception(String, String),
}

#[cfg(test)]
impl TestHooks for RecordingHooks {
    fn before_run(&mut self, name: &str) {
        self.calls.push(HookCall::BeforeRun(name.to_owned()));
    }

    fn on_passed(&mut self, name: &str, _elapsed: Duration) {
        self.calls.push(HookCall::Passed(name.to_owned()));
    }

    fn on_ignored(&mut self, name: &str, reason: &str) {
        self.calls
            .push(HookCall::Ignored(name.to_owned(), reason.to_owned()));
    }

    fn on_failed(&mut self, name: &str, message: &str, _elapsed: Duration) {
        self.calls
            .push(HookCall::Failed(name.to_owned(), message.to_owned()));
    }

    fn on_exception(&mut self, name: &str, cause: &Signal, _elapsed: Duration) {
        self.calls
            .push(HookCall::Exception(name.to_owned(), cause.message().into_owned()));
    }
}
