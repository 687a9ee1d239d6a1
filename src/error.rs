//! Error taxonomy for the solving engine.
//!
//! Configuration problems surface synchronously from `generate`/`start_*`
//! calls, before any worker exists. Cancellation is not an error; it is
//! reported as [`crate::events::Outcome::Cancelled`].

/// Errors that can occur while setting up a problem or a solver run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied parameter is out of range.
    ///
    /// Never occurs mid-run: every parameter is checked before a worker
    /// is spawned, so a failed call leaves the engine unchanged.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Point generation could not satisfy the minimum-separation
    /// constraint within the given bounds.
    ///
    /// Rejection sampling is bounded by a per-point attempt cap; when it
    /// is exhausted this error is returned instead of looping forever.
    #[error(
        "infeasible instance: placed {placed} of {requested} points before \
         exhausting the separation-constraint retry budget"
    )]
    InfeasibleInstance {
        /// Points successfully placed before giving up.
        placed: usize,
        /// Points that were requested.
        requested: usize,
    },
}
