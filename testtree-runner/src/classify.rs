// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome classification.
//!
//! The engine knows nothing about assertion libraries. Instead, the [`Classify`] trait maps the
//! result of running a body to an [`Outcome`]. The default implementation, [`SignalClassifier`],
//! matches the type of a panic payload against two caller-configurable sets of
//! [`SignalType`]s: one for ignored tests and one for assertion failures.

use crate::{
    outcome::Outcome,
    signal::{AssertionFailure, Signal, Skip},
};
use std::{
    any::{Any, TypeId},
    fmt,
};

/// Maps the result of running a test body to an [`Outcome`].
///
/// `Ok(())` means the body returned normally; `Err(signal)` carries the payload of the panic that
/// terminated it.
///
/// Classification runs outside the failure boundary around the test body. A classifier that
/// panics is a defect in the engine, not a test outcome, and the panic is propagated to the
/// caller of the runner.
pub trait Classify: Send + Sync {
    /// Classifies a single result.
    fn classify(&self, result: Result<(), Signal>) -> Outcome;
}

impl<F> Classify for F
where
    F: Fn(Result<(), Signal>) -> Outcome + Send + Sync,
{
    fn classify(&self, result: Result<(), Signal>) -> Outcome {
        self(result)
    }
}

/// Identifies a type of signal payload.
///
/// Constructed with [`SignalType::of`]. Carries enough information to check whether a payload is
/// of this type and to extract a message from it.
#[derive(Clone, Copy)]
pub struct SignalType {
    type_id: TypeId,
    type_name: &'static str,
    matches: fn(&(dyn Any + Send + 'static)) -> bool,
    describe: fn(&(dyn Any + Send + 'static)) -> Option<String>,
}

impl SignalType {
    /// Returns the signal type for payloads of type `T`.
    ///
    /// The message of a matching signal is the `Display` output of the payload.
    pub fn of<T>() -> Self
    where
        T: Any + Send + fmt::Display,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            matches: matches_type::<T>,
            describe: describe_type::<T>,
        }
    }

    /// Returns the name of the payload type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if the signal's payload is of this type.
    pub fn matches(&self, signal: &Signal) -> bool {
        (self.matches)(signal.payload())
    }

    /// Returns the message for a signal of this type, or `None` if the signal is of a different
    /// type.
    pub fn message(&self, signal: &Signal) -> Option<String> {
        (self.describe)(signal.payload())
    }
}

impl fmt::Debug for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignalType").field(&self.type_name).finish()
    }
}

impl PartialEq for SignalType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for SignalType {}

fn matches_type<T: Any>(payload: &(dyn Any + Send + 'static)) -> bool {
    payload.is::<T>()
}

fn describe_type<T>(payload: &(dyn Any + Send + 'static)) -> Option<String>
where
    T: Any + fmt::Display,
{
    payload.downcast_ref::<T>().map(|value| value.to_string())
}

/// The default classifier.
///
/// * A body that returned normally has [passed](Outcome::Passed).
/// * A signal matching any type in the ignore set is [ignored](Outcome::Ignored), with the
///   signal's message as the reason.
/// * Otherwise, a signal matching any type in the failure set has [failed](Outcome::Failed), with
///   the signal's message.
/// * Any other signal has [errored](Outcome::Errored), and the signal is kept as the cause.
///
/// [`SignalClassifier::default`] ignores [`Skip`] and fails on [`AssertionFailure`]. Plain
/// `panic!`, `assert!` and `assert_eq!` panics are errors unless
/// [`with_std_panics_as_failures`](SignalClassifierBuilder::with_std_panics_as_failures) is used.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignalClassifier {
    ignore: Vec<SignalType>,
    failure: Vec<SignalType>,
}

impl SignalClassifier {
    /// Returns a builder with empty ignore and failure sets.
    pub fn builder() -> SignalClassifierBuilder {
        SignalClassifierBuilder::default()
    }

    /// Returns the ignore set, in the order it is consulted.
    pub fn ignore_types(&self) -> &[SignalType] {
        &self.ignore
    }

    /// Returns the failure set, in the order it is consulted.
    pub fn failure_types(&self) -> &[SignalType] {
        &self.failure
    }

    fn first_match(types: &[SignalType], signal: &Signal) -> Option<String> {
        types.iter().find_map(|ty| ty.message(signal))
    }
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self::builder()
            .ignore::<Skip>()
            .fail_on::<AssertionFailure>()
            .build()
    }
}

impl Classify for SignalClassifier {
    fn classify(&self, result: Result<(), Signal>) -> Outcome {
        let signal = match result {
            Ok(()) => return Outcome::Passed,
            Err(signal) => signal,
        };

        if let Some(reason) = Self::first_match(&self.ignore, &signal) {
            Outcome::Ignored { reason }
        } else if let Some(message) = Self::first_match(&self.failure, &signal) {
            Outcome::Failed { message }
        } else {
            Outcome::Errored { cause: signal }
        }
    }
}

/// Builder for [`SignalClassifier`].
#[derive(Clone, Debug, Default)]
pub struct SignalClassifierBuilder {
    ignore: Vec<SignalType>,
    failure: Vec<SignalType>,
}

impl SignalClassifierBuilder {
    /// Adds `T` to the end of the ignore set.
    pub fn ignore<T>(self) -> Self
    where
        T: Any + Send + fmt::Display,
    {
        self.ignore_type(SignalType::of::<T>())
    }

    /// Adds `T` to the end of the failure set.
    pub fn fail_on<T>(self) -> Self
    where
        T: Any + Send + fmt::Display,
    {
        self.fail_on_type(SignalType::of::<T>())
    }

    /// Adds a signal type to the end of the ignore set. Duplicates are not added twice.
    pub fn ignore_type(mut self, ty: SignalType) -> Self {
        if !self.ignore.contains(&ty) {
            self.ignore.push(ty);
        }
        self
    }

    /// Adds a signal type to the end of the failure set. Duplicates are not added twice.
    pub fn fail_on_type(mut self, ty: SignalType) -> Self {
        if !self.failure.contains(&ty) {
            self.failure.push(ty);
        }
        self
    }

    /// Treats the `&'static str` and `String` payloads produced by `panic!` and the standard
    /// assertion macros as failures rather than errors.
    pub fn with_std_panics_as_failures(self) -> Self {
        self.fail_on::<&'static str>().fail_on::<String>()
    }

    /// Builds the classifier.
    pub fn build(self) -> SignalClassifier {
        SignalClassifier {
            ignore: self.ignore,
            failure: self.failure,
        }
    }
}
