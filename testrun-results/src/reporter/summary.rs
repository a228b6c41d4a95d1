// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{outcome::OutcomeKind, result_set::ResultSnapshot};
use testrun_metadata::{KindCountSummary, KindTestsSummary, RunSummary};

/// Builds a machine-readable summary of `snapshot`.
pub fn run_summary(snapshot: &ResultSnapshot) -> RunSummary {
    let counts = snapshot.counts();
    let not_passed = OutcomeKind::ALL
        .into_iter()
        .filter(|kind| kind.counts_against_run() && counts.get(*kind) > 0)
        .map(|kind| KindTestsSummary {
            kind: kind.to_string(),
            tests: snapshot
                .by_kind(kind)
                .identities()
                .map(|identity| identity.to_string())
                .collect(),
        })
        .collect();

    RunSummary {
        total: counts.total(),
        did_pass: snapshot.did_pass(),
        counts: counts
            .iter()
            .map(|(kind, count)| KindCountSummary {
                kind: kind.to_string(),
                count,
            })
            .collect(),
        not_passed,
        links: snapshot.links().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{outcome::TestOutcome, result_set::ResultSet};
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_lists_failing_kinds_only() {
        let results = ResultSet::new();
        results.add_outcomes([
            TestOutcome::new("b", OutcomeKind::Fail).unwrap(),
            TestOutcome::new("a", OutcomeKind::Fail).unwrap(),
            TestOutcome::new("c", OutcomeKind::Skip).unwrap(),
            TestOutcome::new("d", OutcomeKind::NotRun).unwrap(),
            TestOutcome::new("e", OutcomeKind::Pass).unwrap(),
        ]);
        results.set_link("index", "https://a");

        let summary = run_summary(&results.snapshot());
        assert_eq!(summary.total, 5);
        assert!(!summary.did_pass);
        assert_eq!(summary.counts.len(), 7);
        assert_eq!(summary.counts[0].kind, "PASS");
        assert_eq!(summary.counts[2].count, 2);
        assert_eq!(
            summary.not_passed,
            vec![
                KindTestsSummary {
                    kind: "FAIL".to_owned(),
                    tests: vec!["a".to_owned(), "b".to_owned()],
                },
                KindTestsSummary {
                    kind: "NOTRUN".to_owned(),
                    tests: vec!["d".to_owned()],
                },
            ]
        );
        assert_eq!(summary.links["index"], "https://a");
    }
}
