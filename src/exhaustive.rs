//! Brute-force permutation search.
//!
//! Enumerates every ordering of the free waypoints (all `k!` of them)
//! and streams each strict improvement as it is found. Deliberately
//! unpruned; only viable for small `k`. Enumeration is a depth-first
//! prefix extension (append each unused waypoint, recurse), which visits
//! permutations in a deterministic, reproducible order.

use crate::candidate::Candidate;
use crate::events::{Outcome, SolverEvent};
use crate::problem::ProblemInstance;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Exhaustive tour search over one problem instance.
pub struct ExhaustiveSolver {
    instance: Arc<ProblemInstance>,
}

impl ExhaustiveSolver {
    /// Creates a solver for the given instance.
    ///
    /// # Panics
    ///
    /// Panics when the instance has no free waypoints; a single
    /// waypoint is the degenerate one-permutation case and is allowed.
    pub fn new(instance: Arc<ProblemInstance>) -> Self {
        assert!(
            !instance.free_waypoints().is_empty(),
            "exhaustive search requires at least one free waypoint"
        );
        Self { instance }
    }

    /// Examines every permutation, emitting progress on `events`.
    ///
    /// Emits [`SolverEvent::BestCandidateUpdated`] whenever a strictly
    /// better tour is found and a terminal [`SolverEvent::Finished`].
    /// The cancellation flag is checked between permutations; a
    /// cancelled run still sends its terminal event.
    pub fn run(&self, cancel: &AtomicBool, events: &Sender<SolverEvent>) -> Outcome {
        let origin = self.instance.origin();
        let mut best: Option<Candidate> = None;

        let completed = for_each_permutation(self.instance.free_waypoints(), &mut |genes| {
            if cancel.load(Ordering::Relaxed) {
                return false;
            }
            let candidate = Candidate::new(origin, genes.to_vec());
            let improved = best
                .as_ref()
                .is_none_or(|current| candidate.fitness() < current.fitness());
            if improved {
                tracing::debug!(fitness = candidate.fitness(), "best tour improved");
                let _ = events.send(SolverEvent::BestCandidateUpdated(candidate.clone()));
                best = Some(candidate);
            }
            true
        });

        let outcome = if completed {
            Outcome::Completed
        } else {
            Outcome::Cancelled
        };
        tracing::info!(?outcome, "exhaustive search finished");
        let _ = events.send(SolverEvent::Finished(outcome));
        outcome
    }
}

/// Visits every permutation of `items` in a deterministic order.
///
/// The visitor returns `false` to abort the enumeration; the function
/// then returns `false`. Returns `true` once all permutations were
/// visited. An empty slice yields one (empty) permutation.
pub fn for_each_permutation<T, F>(items: &[T], visit: &mut F) -> bool
where
    T: Clone,
    F: FnMut(&[T]) -> bool,
{
    let mut used = vec![false; items.len()];
    let mut prefix = Vec::with_capacity(items.len());
    extend_prefix(items, &mut used, &mut prefix, visit)
}

fn extend_prefix<T, F>(items: &[T], used: &mut [bool], prefix: &mut Vec<T>, visit: &mut F) -> bool
where
    T: Clone,
    F: FnMut(&[T]) -> bool,
{
    if prefix.len() == items.len() {
        return visit(prefix);
    }
    for i in 0..items.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        prefix.push(items[i].clone());
        let keep_going = extend_prefix(items, used, prefix, visit);
        prefix.pop();
        used[i] = false;
        if !keep_going {
            return false;
        }
    }
    true
}
