// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single test outcome, as produced by a test-execution worker.
///
/// This is the unvalidated, serialized form: `kind` is a raw string and `identity` may be empty.
/// `testrun-results` validates records while converting them into outcomes.
///
/// Records are read as [JSON Lines](https://jsonlines.org/), one record per line.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OutcomeRecord {
    /// The unique name of the test within a run.
    pub identity: String,

    /// The outcome kind, e.g. `"PASS"` or `"CRASH"`.
    pub kind: String,

    /// The time taken by the test, in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,

    /// Log output associated with the test.
    #[serde(default)]
    pub log: String,

    /// A structured payload that may carry an `annotations` field.
    ///
    /// The payload is kept as-is here; its shape is only interpreted when the record is converted
    /// into an outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<serde_json::Value>,

    /// Links to auxiliary data for this test, keyed by link name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
}

/// A machine-readable summary of a test run.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RunSummary {
    /// The total number of distinct tests in the run.
    pub total: usize,

    /// Whether the run is considered successful.
    pub did_pass: bool,

    /// The number of tests of each kind, in canonical reporting order.
    pub counts: Vec<KindCountSummary>,

    /// Identities of tests that neither passed nor were skipped, grouped by kind in canonical
    /// order. Kinds with no tests are omitted.
    pub not_passed: Vec<KindTestsSummary>,

    /// Run-level links, keyed by link name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
}

/// The number of tests of a particular kind.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct KindCountSummary {
    /// The outcome kind.
    pub kind: String,

    /// The number of tests with that kind.
    pub count: usize,
}

/// The identities of tests of a particular kind.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct KindTestsSummary {
    /// The outcome kind.
    pub kind: String,

    /// Test identities, sorted in ascending order.
    pub tests: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(
        r#"{"identity": "t1", "kind": "PASS"}"#,
        OutcomeRecord {
            identity: "t1".to_owned(),
            kind: "PASS".to_owned(),
            ..OutcomeRecord::default()
        }
        ; "minimal"
    )]
    #[test_case(
        indoc! {r#"
            {
                "identity": "suite::t2",
                "kind": "FAIL",
                "duration-ms": 250,
                "log": "assertion failed",
                "links": {"logcat": "https://logs.example/t2"}
            }
        "#},
        OutcomeRecord {
            identity: "suite::t2".to_owned(),
            kind: "FAIL".to_owned(),
            duration_ms: 250,
            log: "assertion failed".to_owned(),
            annotations: None,
            links: [("logcat".to_owned(), "https://logs.example/t2".to_owned())]
                .into_iter()
                .collect(),
        }
        ; "full"
    )]
    fn parse_outcome_record(input: &str, expected: OutcomeRecord) {
        let record: OutcomeRecord = serde_json::from_str(input).expect("record parses");
        assert_eq!(record, expected);
    }

    #[test]
    fn annotations_payload_is_kept_verbatim() {
        let record: OutcomeRecord = serde_json::from_str(
            r#"{"identity": "t", "kind": "SKIP", "annotations": {"annotations": ["flaky"]}}"#,
        )
        .expect("record parses");
        assert_eq!(
            record.annotations,
            Some(serde_json::json!({"annotations": ["flaky"]}))
        );
    }

    #[test]
    fn run_summary_field_names() {
        let summary = RunSummary {
            total: 1,
            did_pass: true,
            counts: vec![KindCountSummary {
                kind: "PASS".to_owned(),
                count: 1,
            }],
            not_passed: vec![],
            links: BTreeMap::new(),
        };
        let value = serde_json::to_value(&summary).expect("summary serializes");
        assert_eq!(
            value,
            serde_json::json!({
                "total": 1,
                "did-pass": true,
                "counts": [{"kind": "PASS", "count": 1}],
                "not-passed": [],
            })
        );
    }
}
