// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Individual test outcomes.
//!
//! A [`TestOutcome`] is built once per observed test execution by the worker that ran the test,
//! and is then handed over to a [`ResultSet`](crate::result_set::ResultSet). Submitting an outcome
//! moves it into the set, so it can't be mutated behind the set's back afterwards.

use crate::errors::InvalidOutcome;
use smol_str::SmolStr;
use std::{borrow::Borrow, collections::BTreeMap, fmt, str::FromStr, time::Duration};
use testrun_metadata::OutcomeRecord;

/// The closed set of test outcome kinds.
///
/// The declaration order is the canonical reporting order, which is also the `Ord` order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum OutcomeKind {
    /// The test passed.
    Pass,

    /// The test was intentionally skipped.
    Skip,

    /// The test failed.
    Fail,

    /// The test caused the containing process to crash.
    Crash,

    /// The test timed out.
    Timeout,

    /// The test ran, but its result couldn't be determined.
    Unknown,

    /// The test did not run.
    NotRun,
}

impl OutcomeKind {
    /// All outcome kinds, in canonical reporting order.
    pub const ALL: [OutcomeKind; 7] = [
        OutcomeKind::Pass,
        OutcomeKind::Skip,
        OutcomeKind::Fail,
        OutcomeKind::Crash,
        OutcomeKind::Timeout,
        OutcomeKind::Unknown,
        OutcomeKind::NotRun,
    ];

    /// String representations of all known variants, in canonical order.
    pub fn variants() -> &'static [&'static str] {
        &[
            "PASS", "SKIP", "FAIL", "CRASH", "TIMEOUT", "UNKNOWN", "NOTRUN",
        ]
    }

    /// Returns the canonical string form of this kind, e.g. `"TIMEOUT"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Skip => "SKIP",
            Self::Fail => "FAIL",
            Self::Crash => "CRASH",
            Self::Timeout => "TIMEOUT",
            Self::Unknown => "UNKNOWN",
            Self::NotRun => "NOTRUN",
        }
    }

    /// Returns true if an outcome of this kind makes the whole run unsuccessful.
    ///
    /// Everything except `Pass` and `Skip` counts against the run, including `NotRun`.
    pub fn counts_against_run(self) -> bool {
        !matches!(self, Self::Pass | Self::Skip)
    }

    /// The position of this kind in canonical order.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeKind {
    type Err = InvalidOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "PASS" => Self::Pass,
            "SKIP" => Self::Skip,
            "FAIL" => Self::Fail,
            "CRASH" => Self::Crash,
            "TIMEOUT" => Self::Timeout,
            "UNKNOWN" => Self::Unknown,
            "NOTRUN" => Self::NotRun,
            other => return Err(InvalidOutcome::unknown_kind(other)),
        };
        Ok(kind)
    }
}

/// The name that uniquely identifies a test within a run. Never empty.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TestIdentity(SmolStr);

impl TestIdentity {
    /// Creates a new identity, returning an error if `name` is empty.
    pub fn new(name: impl AsRef<str>) -> Result<Self, InvalidOutcome> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(InvalidOutcome::EmptyIdentity);
        }
        Ok(Self(name.into()))
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TestIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque tag attached to an outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Annotation(serde_json::Value);

impl Annotation {
    /// Creates an annotation from a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            // Print strings without surrounding quotes.
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// The result of a single test execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestOutcome {
    identity: TestIdentity,
    kind: OutcomeKind,
    duration_ms: u64,
    log: String,
    annotations: Vec<Annotation>,
    links: BTreeMap<String, String>,
}

impl TestOutcome {
    /// Creates a new outcome with no duration, log, annotations or links.
    ///
    /// Returns an error if `identity` is empty.
    pub fn new(identity: impl AsRef<str>, kind: OutcomeKind) -> Result<Self, InvalidOutcome> {
        Ok(Self {
            identity: TestIdentity::new(identity)?,
            kind,
            duration_ms: 0,
            log: String::new(),
            annotations: Vec::new(),
            links: BTreeMap::new(),
        })
    }

    /// Sets the duration in milliseconds, returning `self` for chaining.
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the log, returning `self` for chaining.
    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = log.into();
        self
    }

    /// Returns the test identity.
    pub fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// Renames this outcome.
    ///
    /// Only rename outcomes that haven't been submitted yet, or that are about to be re-submitted
    /// under the new name.
    pub fn set_identity(&mut self, identity: impl AsRef<str>) -> Result<(), InvalidOutcome> {
        self.identity = TestIdentity::new(identity)?;
        Ok(())
    }

    /// Returns the outcome kind.
    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    /// Sets the outcome kind.
    pub fn set_kind(&mut self, kind: OutcomeKind) {
        self.kind = kind;
    }

    /// Sets the outcome kind from its string form, e.g. `"CRASH"`.
    pub fn set_kind_str(&mut self, kind: &str) -> Result<(), InvalidOutcome> {
        self.kind = kind.parse()?;
        Ok(())
    }

    /// Returns the time taken by the test, in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns the time taken by the test.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Returns the log for this test. Empty if there's no log.
    pub fn log(&self) -> &str {
        &self.log
    }

    /// Sets the log for this test.
    pub fn set_log(&mut self, log: impl Into<String>) {
        self.log = log.into();
    }

    /// Returns the annotations attached to this test, in order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Replaces the annotations attached to this test.
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// Sets annotations from a structured payload.
    ///
    /// If `payload` is an object with an `annotations` array, its elements become the annotations.
    /// Any other shape clears the annotations.
    pub fn set_annotations_from(&mut self, payload: &serde_json::Value) {
        self.annotations = match payload.get("annotations") {
            Some(serde_json::Value::Array(items)) => {
                items.iter().cloned().map(Annotation::new).collect()
            }
            _ => Vec::new(),
        };
    }

    /// Returns links to auxiliary data for this test, keyed by name.
    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    /// Sets a link for this test. An existing link with the same name is replaced.
    pub fn set_link(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.links.insert(name.into(), url.into());
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}

impl TryFrom<OutcomeRecord> for TestOutcome {
    type Error = InvalidOutcome;

    fn try_from(record: OutcomeRecord) -> Result<Self, Self::Error> {
        let OutcomeRecord {
            identity,
            kind,
            duration_ms,
            log,
            annotations,
            links,
        } = record;

        let mut outcome = TestOutcome::new(identity, kind.parse()?)?
            .with_duration_ms(duration_ms)
            .with_log(log);
        if let Some(payload) = &annotations {
            outcome.set_annotations_from(payload);
        }
        outcome.links = links;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in OutcomeKind::ALL {
            assert_eq!(kind.as_str().parse::<OutcomeKind>(), Ok(kind));
        }
        let strs: Vec<_> = OutcomeKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(strs, OutcomeKind::variants());
    }

    #[test_case("pass" ; "lowercase")]
    #[test_case("FLAKY" ; "not a kind")]
    #[test_case("" ; "empty")]
    fn kind_parse_rejects(input: &str) {
        assert_eq!(
            input.parse::<OutcomeKind>(),
            Err(InvalidOutcome::UnknownKind {
                input: input.to_owned()
            })
        );
    }

    #[test]
    fn canonical_order_is_ord() {
        let mut kinds = OutcomeKind::ALL;
        kinds.reverse();
        kinds.sort();
        assert_eq!(kinds, OutcomeKind::ALL);
        for (i, kind) in OutcomeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn only_pass_and_skip_keep_run_green() {
        let green: Vec<_> = OutcomeKind::ALL
            .into_iter()
            .filter(|k| !k.counts_against_run())
            .collect();
        assert_eq!(green, [OutcomeKind::Pass, OutcomeKind::Skip]);
    }

    #[test]
    fn empty_identity_is_rejected() {
        assert_eq!(
            TestOutcome::new("", OutcomeKind::Pass),
            Err(InvalidOutcome::EmptyIdentity)
        );

        let mut outcome = TestOutcome::new("t1", OutcomeKind::Pass).unwrap();
        assert_eq!(outcome.set_identity(""), Err(InvalidOutcome::EmptyIdentity));
        assert_eq!(outcome.identity().as_str(), "t1", "identity unchanged");
    }

    #[test]
    fn defaults() {
        let outcome = TestOutcome::new("t1", OutcomeKind::Fail).unwrap();
        assert_eq!(outcome.duration_ms(), 0);
        assert_eq!(outcome.log(), "");
        assert!(outcome.annotations().is_empty());
        assert!(outcome.links().is_empty());
        assert_eq!(outcome.to_string(), "t1");
    }

    #[test]
    fn set_kind_str_validates() {
        let mut outcome = TestOutcome::new("t1", OutcomeKind::Pass).unwrap();
        outcome.set_kind_str("TIMEOUT").unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Timeout);
        assert!(outcome.set_kind_str("SLOW").is_err());
        assert_eq!(outcome.kind(), OutcomeKind::Timeout, "kind unchanged");
    }

    #[test_case(
        json!({"annotations": ["SmallTest", {"Feature": ["Sync"]}]}),
        vec![json!("SmallTest"), json!({"Feature": ["Sync"]})]
        ; "object with array"
    )]
    #[test_case(json!({"other": 1}), vec![] ; "field absent")]
    #[test_case(json!({"annotations": "SmallTest"}), vec![] ; "field not an array")]
    #[test_case(json!(["SmallTest"]), vec![] ; "not an object")]
    #[test_case(json!(null), vec![] ; "null")]
    fn annotations_from_payload(payload: serde_json::Value, expected: Vec<serde_json::Value>) {
        let mut outcome = TestOutcome::new("t1", OutcomeKind::Pass).unwrap();
        outcome.set_annotations(vec![Annotation::new(json!("stale"))]);
        outcome.set_annotations_from(&payload);
        let actual: Vec<_> = outcome
            .annotations()
            .iter()
            .map(|a| a.as_value().clone())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn links_last_write_wins() {
        let mut outcome = TestOutcome::new("t1", OutcomeKind::Pass).unwrap();
        outcome.set_link("logcat", "https://a");
        outcome.set_link("logcat", "https://b");
        outcome.set_link("trace", "https://c");
        assert_eq!(outcome.links().len(), 2);
        assert_eq!(outcome.links()["logcat"], "https://b");
    }

    #[test]
    fn from_record() {
        let record = OutcomeRecord {
            identity: "suite::t1".to_owned(),
            kind: "CRASH".to_owned(),
            duration_ms: 42,
            log: "segfault".to_owned(),
            annotations: Some(json!({"annotations": ["LargeTest"]})),
            links: [("tombstone".to_owned(), "https://t".to_owned())]
                .into_iter()
                .collect(),
        };
        let outcome = TestOutcome::try_from(record).unwrap();
        assert_eq!(outcome.identity().as_str(), "suite::t1");
        assert_eq!(outcome.kind(), OutcomeKind::Crash);
        assert_eq!(outcome.duration(), Duration::from_millis(42));
        assert_eq!(outcome.log(), "segfault");
        assert_eq!(outcome.annotations()[0].to_string(), "LargeTest");
        assert_eq!(outcome.links()["tombstone"], "https://t");
    }

    #[test]
    fn from_record_rejects_bad_kind() {
        let record = OutcomeRecord {
            identity: "t1".to_owned(),
            kind: "PASSED".to_owned(),
            ..OutcomeRecord::default()
        };
        assert!(matches!(
            TestOutcome::try_from(record),
            Err(InvalidOutcome::UnknownKind { .. })
        ));
    }
}
