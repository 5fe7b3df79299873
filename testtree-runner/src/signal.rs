// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signals raised by test bodies.
//!
//! A test body that does not pass terminates by panicking. The panic payload is captured as a
//! [`Signal`] and handed to a [`Classify`](crate::classify::Classify) implementation, which decides
//! what the panic means.
//!
//! This module also defines the two marker payloads that the default classifier recognizes:
//! [`Skip`], raised by [`skip_test`], and [`AssertionFailure`], raised by [`fail_test`].

use std::{
    any::Any,
    borrow::Cow,
    cell::Cell,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

/// Payload raised by a test body to mark itself as ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Skip {
    reason: String,
}

impl Skip {
    /// Creates a new skip payload with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason the test was skipped.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Payload raised by a test body when an assertion does not hold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    /// Creates a new assertion failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Marks the current test as ignored, with the given reason.
///
/// This unwinds out of the test body with a [`Skip`] payload.
pub fn skip_test(reason: impl Into<String>) -> ! {
    panic::panic_any(Skip::new(reason))
}

/// Fails the current test with the given message.
///
/// This unwinds out of the test body with an [`AssertionFailure`] payload.
pub fn fail_test(message: impl Into<String>) -> ! {
    panic::panic_any(AssertionFailure::new(message))
}

/// The payload of a panic raised by a test body.
///
/// The full original payload is kept, so that observers can inspect the underlying cause of an
/// [`Errored`](crate::outcome::Outcome::Errored) outcome rather than just its message.
pub struct Signal {
    payload: Box<dyn Any + Send + 'static>,
}

impl Signal {
    /// Wraps a payload returned by [`std::panic::catch_unwind`].
    pub fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self { payload }
    }

    /// Creates a signal carrying the given value, as if a body had called
    /// [`panic_any`](std::panic::panic_any) with it.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            payload: Box::new(value),
        }
    }

    /// Returns true if the payload is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// Returns a reference to the payload if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns a reference to the payload.
    pub fn payload(&self) -> &(dyn Any + Send + 'static) {
        &*self.payload
    }

    /// Consumes the signal, returning the payload.
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }

    /// Resumes unwinding with this signal's payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }

    /// Returns a best-effort message for this signal.
    ///
    /// Recognizes the marker payloads in this module as well as the `&'static str` and `String`
    /// payloads produced by `panic!` and the standard assertion macros.
    pub fn message(&self) -> Cow<'_, str> {
        if let Some(skip) = self.downcast_ref::<Skip>() {
            Cow::Borrowed(skip.reason())
        } else if let Some(failure) = self.downcast_ref::<AssertionFailure>() {
            Cow::Borrowed(failure.message())
        } else if let Some(s) = self.downcast_ref::<&'static str>() {
            Cow::Borrowed(s)
        } else if let Some(s) = self.downcast_ref::<String>() {
            Cow::Borrowed(s.as_str())
        } else {
            Cow::Borrowed("(unknown panic payload)")
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Runs `f`, capturing a panic it raises as a [`Signal`].
///
/// While `f` runs, panics on the current thread are not passed to the process panic hook. The
/// captured signal is reported through the runner's hooks instead. Panics on other threads, or
/// outside `f`, reach the previously installed hook as usual.
pub(crate) fn catch_signal<F: FnOnce()>(f: F) -> Result<(), Signal> {
    install_quiet_panic_hook();
    let _guard = CaptureGuard::enter();
    // A panicking body leaves no state behind that callers read.
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Signal::from_payload)
}

fn install_quiet_panic_hook() {
    // Installed once and never removed: runs on different threads may overlap, so swapping the
    // hook per run would restore it while another run is still capturing.
    QUIET_PANIC_HOOK.call_once(|| {
        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.try_with(Cell::get).unwrap_or(false) {
                panic_hook(info);
            }
        }));
    });
}

struct CaptureGuard {
    prev: bool,
}

impl CaptureGuard {
    fn enter() -> Self {
        Self {
            prev: CAPTURING.with(|capturing| capturing.replace(true)),
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURING.with(|capturing| capturing.set(self.prev));
    }
}
