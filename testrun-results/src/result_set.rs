// Copyright (c) The testrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared collection of test outcomes for a run.
//!
//! [`ResultSet`] is the only shared mutable state: any number of workers may submit outcomes
//! concurrently, and a consumer may read it at any time. Every public method acquires the internal
//! lock exactly once, for the time it takes to update or clone the state. Reads hand out a
//! [`ResultSnapshot`], on which all queries and rendering run without any locking.

use crate::{
    errors::TypeMismatch,
    outcome::{OutcomeKind, TestIdentity, TestOutcome},
    reporter::{GtestSummary, Styles},
};
use std::{
    any::Any,
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, trace};

type OutcomeMap = BTreeMap<TestIdentity, TestOutcome>;
type LinkMap = BTreeMap<String, String>;

/// A concurrency-safe set of test outcomes, keyed by test identity.
///
/// Submitting an outcome for an identity that is already present replaces the earlier outcome.
#[derive(Debug, Default)]
pub struct ResultSet {
    inner: Mutex<ResultSetInner>,
}

// Both maps are behind `Arc`s so that snapshots are cheap: writers copy on write if a snapshot is
// outstanding.
#[derive(Debug, Default)]
struct ResultSetInner {
    outcomes: Arc<OutcomeMap>,
    links: Arc<LinkMap>,
}

impl ResultSet {
    /// Creates a new, empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an outcome, replacing any existing outcome with the same identity.
    pub fn add_outcome(&self, outcome: TestOutcome) {
        let mut inner = self.lock();
        insert_outcome(Arc::make_mut(&mut inner.outcomes), outcome);
    }

    /// Adds several outcomes as a single batch.
    ///
    /// Readers observe either none or all of the batch.
    pub fn add_outcomes(&self, outcomes: impl IntoIterator<Item = TestOutcome>) {
        // Collect before locking so that producing the outcomes doesn't happen under the lock.
        let outcomes: Vec<_> = outcomes.into_iter().collect();
        debug!(count = outcomes.len(), "adding batch of outcomes");

        let mut inner = self.lock();
        let map = Arc::make_mut(&mut inner.outcomes);
        for outcome in outcomes {
            insert_outcome(map, outcome);
        }
    }

    /// Merges all outcomes and run-level links of `other` into this set.
    ///
    /// Outcomes in `other` replace outcomes in `self` with the same identity. Merging a set into
    /// itself does nothing.
    pub fn merge(&self, other: &ResultSet) {
        if std::ptr::eq(self, other) {
            return;
        }

        // Take other's snapshot before locking self, so that at most one lock is held at a time
        // and two sets merging into each other can't deadlock.
        let other = other.snapshot();
        debug!(count = other.len(), "merging result set");

        let mut inner = self.lock();
        let map = Arc::make_mut(&mut inner.outcomes);
        for outcome in other.iter() {
            insert_outcome(map, outcome.clone());
        }
        if !other.links.is_empty() {
            Arc::make_mut(&mut inner.links)
                .extend(other.links.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    /// Merges `other` into this set if it is a `ResultSet`, and returns an error otherwise.
    pub fn try_merge<T: Any>(&self, other: &T) -> Result<(), TypeMismatch> {
        match (other as &dyn Any).downcast_ref::<ResultSet>() {
            Some(other) => {
                self.merge(other);
                Ok(())
            }
            None => Err(TypeMismatch::new::<T>()),
        }
    }

    /// Returns a snapshot of the current state.
    ///
    /// The snapshot isn't affected by later writes to this set.
    pub fn snapshot(&self) -> ResultSnapshot {
        let inner = self.lock();
        ResultSnapshot {
            outcomes: inner.outcomes.clone(),
            links: inner.links.clone(),
        }
    }

    /// Returns a snapshot of all outcomes. Same as [`Self::snapshot`].
    pub fn all(&self) -> ResultSnapshot {
        self.snapshot()
    }

    /// Returns the number of distinct tests in this set.
    pub fn len(&self) -> usize {
        self.lock().outcomes.len()
    }

    /// Returns true if no outcomes have been added.
    pub fn is_empty(&self) -> bool {
        self.lock().outcomes.is_empty()
    }

    /// Returns a snapshot of outcomes of the given kind.
    pub fn by_kind(&self, kind: OutcomeKind) -> ResultSnapshot {
        self.snapshot().by_kind(kind)
    }

    /// Returns a snapshot of passed outcomes.
    pub fn pass(&self) -> ResultSnapshot {
        self.by_kind(OutcomeKind::Pass)
    }

    /// Returns a snapshot of skipped outcomes.
    pub fn skip(&self) -> ResultSnapshot {
        self.by_kind(OutcomeKind::Skip)
    }

    /// Returns a snapshot of failed outcomes.
    pub fn fail(&self) -> ResultSnapshot {
        self.by_kind(OutcomeKind::Fail)
    }

    /// Returns a snapshot of crashed outcomes.
    pub fn crash(&self) -> ResultSnapshot {
        self.by_kind(OutcomeKind::Crash)
    }

    /// Returns a snapshot of timed out outcomes.
    pub fn timeout(&self) -> ResultSnapshot {
        self.by_kind(OutcomeKind::Timeout)
    }

    /// Returns a snapshot of outcomes whose result is unknown.
    pub fn unknown(&self) -> ResultSnapshot {
        self.by_kind(OutcomeKind::Unknown)
    }

    /// Returns a snapshot of all outcomes that didn't pass.
    pub fn not_passed(&self) -> ResultSnapshot {
        self.snapshot().not_passed()
    }

    /// Returns true if the run is successful: every test either passed or was skipped.
    pub fn did_pass(&self) -> bool {
        self.snapshot().did_pass()
    }

    /// Sets a run-level link. An existing link with the same name is replaced.
    pub fn set_link(&self, name: impl Into<String>, url: impl Into<String>) {
        let mut inner = self.lock();
        Arc::make_mut(&mut inner.links).insert(name.into(), url.into());
    }

    /// Returns a copy of the run-level links.
    pub fn links(&self) -> BTreeMap<String, String> {
        (*self.lock().links).clone()
    }

    fn lock(&self) -> MutexGuard<'_, ResultSetInner> {
        // Each critical section is a single map update that can't panic halfway, so a poisoned
        // lock still guards consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}

fn insert_outcome(map: &mut OutcomeMap, outcome: TestOutcome) {
    let identity = outcome.identity().clone();
    if let Some(previous) = map.insert(identity, outcome) {
        trace!(
            identity = %previous.identity(),
            previous_kind = %previous.kind(),
            "replaced outcome for existing identity"
        );
    }
}

/// An immutable view of a [`ResultSet`] at a point in time.
///
/// Outcomes are iterated in ascending identity order. Cloning a snapshot is cheap.
#[derive(Clone, Debug, Default)]
pub struct ResultSnapshot {
    outcomes: Arc<OutcomeMap>,
    links: Arc<LinkMap>,
}

impl ResultSnapshot {
    /// Returns the number of outcomes in this snapshot.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if this snapshot has no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns the outcome for the given identity, if present.
    pub fn get(&self, identity: &str) -> Option<&TestOutcome> {
        self.outcomes.get(identity)
    }

    /// Returns true if an outcome for the given identity is present.
    pub fn contains(&self, identity: &str) -> bool {
        self.outcomes.contains_key(identity)
    }

    /// Iterates over outcomes in ascending identity order.
    pub fn iter(&self) -> impl Iterator<Item = &TestOutcome> + '_ {
        self.outcomes.values()
    }

    /// Iterates over identities in ascending order.
    pub fn identities(&self) -> impl Iterator<Item = &TestIdentity> + '_ {
        self.outcomes.keys()
    }

    /// Returns the run-level links at the time the snapshot was taken.
    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    /// Returns the subset of outcomes of the given kind.
    pub fn by_kind(&self, kind: OutcomeKind) -> ResultSnapshot {
        self.filter(|outcome| outcome.kind() == kind)
    }

    /// Returns the subset of outcomes that didn't pass.
    pub fn not_passed(&self) -> ResultSnapshot {
        self.filter(|outcome| outcome.kind() != OutcomeKind::Pass)
    }

    /// Returns outcomes in `self` whose identity isn't present in `other`.
    pub fn difference(&self, other: &ResultSnapshot) -> ResultSnapshot {
        self.filter(|outcome| !other.contains(outcome.identity().as_str()))
    }

    /// Returns true if every outcome either passed or was skipped.
    ///
    /// An empty snapshot counts as a successful run.
    pub fn did_pass(&self) -> bool {
        self.iter().all(|outcome| !outcome.kind().counts_against_run())
    }

    /// Returns the number of outcomes of each kind.
    pub fn counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for outcome in self.iter() {
            counts.counts[outcome.kind().index()] += 1;
        }
        counts
    }

    fn filter(&self, mut f: impl FnMut(&TestOutcome) -> bool) -> ResultSnapshot {
        let outcomes = self
            .outcomes
            .iter()
            .filter(|(_, outcome)| f(outcome))
            .map(|(identity, outcome)| (identity.clone(), outcome.clone()))
            .collect();
        ResultSnapshot {
            outcomes: Arc::new(outcomes),
            links: self.links.clone(),
        }
    }
}

impl PartialEq for ResultSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.outcomes == other.outcomes && self.links == other.links
    }
}

impl Eq for ResultSnapshot {}

impl fmt::Display for ResultSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", GtestSummary::new(self, &Styles::default()))
    }
}

impl<'a> IntoIterator for &'a ResultSnapshot {
    type Item = &'a TestOutcome;
    type IntoIter = std::collections::btree_map::Values<'a, TestIdentity, TestOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.values()
    }
}

/// The number of outcomes of each kind in a snapshot.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct KindCounts {
    counts: [usize; OutcomeKind::ALL.len()],
}

impl KindCounts {
    /// Returns the number of outcomes of the given kind.
    pub fn get(&self, kind: OutcomeKind) -> usize {
        self.counts[kind.index()]
    }

    /// Returns the total number of outcomes.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterates over `(kind, count)` pairs in canonical order, including kinds with no outcomes.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeKind, usize)> + '_ {
        OutcomeKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}
