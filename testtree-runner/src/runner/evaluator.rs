// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::TestHooks;
use crate::{
    classify::Classify,
    list::TestInstance,
    outcome::{Outcome, RunRecord},
    signal::catch_signal,
    time::stopwatch,
};
use tracing::trace;

/// Runs a single test and produces its [`RunRecord`].
///
/// 1. Calls [`TestHooks::before_run`].
/// 2. Runs the body, catching any panic it raises. The elapsed time covers the body only. Panics
///    raised by the body are not printed by the process panic hook.
/// 3. Classifies the result with `classifier`.
/// 4. Calls exactly one of the outcome hooks, matching the classified outcome.
///
/// A panicking body never propagates out of this function. A panicking classifier or hook does:
/// those are defects in the engine rather than test outcomes.
pub fn evaluate_test<H>(
    instance: &TestInstance<'_>,
    classifier: &dyn Classify,
    hooks: &mut H,
) -> RunRecord
where
    H: TestHooks + ?Sized,
{
    let name = instance.name.as_str();
    hooks.before_run(name);

    let stopwatch = stopwatch();
    let result = catch_signal(|| instance.body.call());
    let snapshot = stopwatch.snapshot();

    let outcome = classifier.classify(result);
    trace!(
        test_name = name,
        kind = %outcome.kind(),
        elapsed = ?snapshot.duration,
        "classified test"
    );

    match &outcome {
        Outcome::Passed => hooks.on_passed(name, snapshot.duration),
        Outcome::Ignored { reason } => hooks.on_ignored(name, reason),
        Outcome::Failed { message } => hooks.on_failed(name, message, snapshot.duration),
        Outcome::Errored { cause } => hooks.on_exception(name, cause, snapshot.duration),
    }

    RunRecord {
        name: instance.name.clone(),
        outcome,
        start_time: snapshot.start_time,
        elapsed: snapshot.duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::SignalClassifier,
        outcome::OutcomeKind,
        runner::{HookCall, RecordingHooks},
        signal::{fail_test, skip_test},
        test_tree::TestBody,
    };
    use pretty_assertions::assert_eq;
    use std::{thread, time::Duration};
    use test_case::test_case;

    fn run(body: TestBody, classifier: &dyn Classify) -> (RunRecord, Vec<HookCall>) {
        let instance = TestInstance {
            name: "suite/test".to_owned(),
            body: &body,
        };
        let mut hooks = RecordingHooks::default();
        let record = evaluate_test(&instance, classifier, &mut hooks);
        (record, hooks.calls)
    }

    fn outcome_hook_count(calls: &[HookCall]) -> usize {
        calls
            .iter()
            .filter(|call| !matches!(call, HookCall::BeforeRun(_)))
            .count()
    }

    #[test]
    fn passed() {
        let (record, calls) = run(TestBody::new(|| {}), &SignalClassifier::default());
        assert_eq!(record.name, "suite/test");
        assert_eq!(record.kind(), OutcomeKind::Passed);
        assert_eq!(
            calls,
            vec![
                HookCall::BeforeRun("suite/test".to_owned()),
                HookCall::Passed("suite/test".to_owned()),
            ]
        );
    }

    #[test]
    fn ignored() {
        let (record, calls) = run(TestBody::new(|| skip_test("a")), &SignalClassifier::default());
        assert_eq!(record.outcome.message().as_deref(), Some("a"));
        assert_eq!(record.kind(), OutcomeKind::Ignored);
        assert_eq!(
            calls[1],
            HookCall::Ignored("suite/test".to_owned(), "a".to_owned())
        );
    }

    #[test]
    fn failed() {
        let (record, calls) = run(
            TestBody::new(|| fail_test("1 != 2")),
            &SignalClassifier::default(),
        );
        assert_eq!(record.kind(), OutcomeKind::Failed);
        assert_eq!(
            calls[1],
            HookCall::Failed("suite/test".to_owned(), "1 != 2".to_owned())
        );
    }

    #[test]
    fn errored_keeps_cause() {
        #[derive(Debug, PartialEq)]
        struct Custom(u8);

        let (record, calls) = run(
            TestBody::new(|| std::panic::panic_any(Custom(3))),
            &SignalClassifier::default(),
        );
        let Outcome::Errored { cause } = &record.outcome else {
            panic!("expected errored outcome, got {:?}", record.outcome);
        };
        assert_eq!(cause.downcast_ref::<Custom>(), Some(&Custom(3)));
        assert_eq!(
            calls[1],
            HookCall::Exception(
                "suite/test".to_owned(),
                "(unknown panic payload)".to_owned()
            )
        );
    }

    #[test]
    fn elapsed_covers_body() {
        let (record, _) = run(
            TestBody::new(|| thread::sleep(Duration::from_millis(100))),
            &SignalClassifier::default(),
        );
        assert!(
            record.elapsed >= Duration::from_millis(100),
            "elapsed {:?} covers the body",
            record.elapsed
        );
    }

    #[test]
    fn elapsed_excludes_before_run() {
        struct SlowBeforeRun;

        impl TestHooks for SlowBeforeRun {
            fn before_run(&mut self, _name: &str) {
                thread::sleep(Duration::from_millis(200));
            }
        }

        let body = TestBody::new(|| {});
        let instance = TestInstance {
            name: String::new(),
            body: &body,
        };
        let record = evaluate_test(&instance, &SignalClassifier::default(), &mut SlowBeforeRun);
        assert!(
            record.elapsed < Duration::from_millis(200),
            "elapsed {:?} excludes before_run",
            record.elapsed
        );
    }

    #[test_case(TestBody::new(|| {}) ; "returns")]
    #[test_case(TestBody::new(|| skip_test("skip")) ; "skips")]
    #[test_case(TestBody::new(|| fail_test("fail")) ; "fails")]
    #[test_case(TestBody::new(|| panic!("panic")) ; "panics")]
    #[test_case(TestBody::new(|| std::assert_eq!(1, 2)) ; "std assertion")]
    fn exactly_one_outcome_hook(body: TestBody) {
        let classifiers: Vec<Box<dyn Classify>> = vec![
            Box::new(SignalClassifier::default()),
            Box::new(SignalClassifier::builder().build()),
            Box::new(
                SignalClassifier::builder()
                    .ignore::<String>()
                    .with_std_panics_as_failures()
                    .build(),
            ),
        ];
        for classifier in &classifiers {
            let (_, calls) = run(body.clone(), classifier.as_ref());
            assert_eq!(calls.len(), 2, "before_run plus one outcome hook: {calls:?}");
            assert_eq!(outcome_hook_count(&calls), 1);
        }
    }
}
