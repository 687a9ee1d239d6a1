//! Progress notifications from solver workers.
//!
//! Workers publish progress over an unbounded [`std::sync::mpsc`]
//! channel: sends never block, so a slow consumer can never stall the
//! search. Candidates are sent by value, so the consumer never observes
//! a tour mid-mutation.

use crate::candidate::Candidate;

/// How a solver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The solver exhausted its search space.
    ///
    /// Only the exhaustive solver terminates on its own; the genetic
    /// loop has no built-in convergence condition.
    Completed,
    /// The run was stopped through the cooperative cancellation flag.
    Cancelled,
}

/// A notification emitted by a running solver.
#[derive(Debug, Clone)]
pub enum SolverEvent {
    /// A strictly better tour than anything seen so far in this run.
    BestCandidateUpdated(Candidate),
    /// The genetic solver finished generation `n` (1-based).
    GenerationAdvanced(u64),
    /// Terminal event: the worker is about to exit.
    Finished(Outcome),
}
