// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for concurrent use of a shared result set.

use pretty_assertions::assert_eq;
use std::thread;
use testrun_results::{
    outcome::{OutcomeKind, TestOutcome},
    result_set::ResultSet,
};

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn outcome(thread: usize, index: usize) -> TestOutcome {
    let kind = if index % 10 == 0 {
        OutcomeKind::Fail
    } else {
        OutcomeKind::Pass
    };
    TestOutcome::new(format!("shard_{thread}::test_{index}"), kind).unwrap()
}

#[test]
fn concurrent_submissions_are_all_recorded() {
    let results = ResultSet::new();
    thread::scope(|s| {
        for t in 0..THREADS {
            let results = &results;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    results.add_outcome(outcome(t, i));
                }
            });
        }
    });

    assert_eq!(results.len(), THREADS * PER_THREAD);
    assert_eq!(results.fail().len(), THREADS * PER_THREAD / 10);
    assert!(!results.did_pass());
}

#[test]
fn concurrent_batches_are_all_recorded() {
    let results = ResultSet::new();
    thread::scope(|s| {
        for t in 0..THREADS {
            let results = &results;
            s.spawn(move || results.add_outcomes((0..PER_THREAD).map(|i| outcome(t, i))));
        }
    });
    assert_eq!(results.len(), THREADS * PER_THREAD);
}

#[test]
fn readers_see_consistent_snapshots() {
    let results = ResultSet::new();
    thread::scope(|s| {
        let writer = {
            let results = &results;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    results.add_outcome(outcome(0, i));
                }
            })
        };

        let results = &results;
        s.spawn(move || {
            let mut last_len = 0;
            loop {
                let snapshot = results.snapshot();
                let counts = snapshot.counts();
                assert_eq!(counts.total(), snapshot.len());
                assert!(snapshot.len() >= last_len, "set never shrinks");
                last_len = snapshot.len();
                if last_len == PER_THREAD {
                    break;
                }
                thread::yield_now();
            }
        });

        writer.join().unwrap();
    });
    assert_eq!(results.len(), PER_THREAD);
}

#[test]
fn readers_never_see_partial_batches() {
    const BATCH: usize = 50;
    const BATCHES: usize = 200;

    let results = ResultSet::new();
    thread::scope(|s| {
        let results = &results;
        s.spawn(move || {
            for b in 0..BATCHES {
                results.add_outcomes((0..BATCH).map(|i| outcome(b, i)));
            }
        });

        s.spawn(move || {
            loop {
                let len = results.snapshot().len();
                assert_eq!(len % BATCH, 0, "snapshot of {len} outcomes splits a batch");
                if len == BATCH * BATCHES {
                    break;
                }
                thread::yield_now();
            }
        });
    });
    assert_eq!(results.len(), BATCH * BATCHES);
}

#[test]
fn concurrent_merges_in_both_directions() {
    let a = ResultSet::new();
    let b = ResultSet::new();
    a.add_outcomes((0..PER_THREAD).map(|i| outcome(0, i)));
    b.add_outcomes((0..PER_THREAD).map(|i| outcome(1, i)));

    thread::scope(|s| {
        s.spawn(|| a.merge(&b));
        s.spawn(|| b.merge(&a));
    });

    // Whichever merge runs first, the other one sees at least the original contents.
    assert_eq!(a.len(), 2 * PER_THREAD);
    assert_eq!(b.len(), 2 * PER_THREAD);
}

#[test]
fn merging_disjoint_sets_commutes() {
    let receiver = || {
        let set = ResultSet::new();
        set.add_outcomes((0..PER_THREAD).map(|i| outcome(0, i)));
        set.set_link("base", "https://base.example/");
        set
    };
    let b = ResultSet::new();
    b.add_outcomes((0..PER_THREAD).map(|i| outcome(1, i)));
    b.set_link("left", "https://left.example/");
    let c = ResultSet::new();
    c.add_outcomes((0..PER_THREAD).map(|i| outcome(2, i)));
    c.set_link("right", "https://right.example/");

    let a1 = receiver();
    a1.merge(&b);
    a1.merge(&c);
    let a2 = receiver();
    a2.merge(&c);
    a2.merge(&b);

    assert_eq!(a1.len(), 3 * PER_THREAD);
    assert_eq!(a1.snapshot(), a2.snapshot());
    assert_eq!(a1.links(), a2.links());
    assert_eq!(a1.to_string(), a2.to_string());
}
